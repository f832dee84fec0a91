//! Injected assembly configuration.
//!
//! [`FormEnv`] carries the state form assembly reads from its surroundings:
//! the anti-forgery secret salt and the hook registry. One instance is built
//! at application bootstrap and shared (`Arc`) into every form, replacing
//! hidden process-wide state with an explicit dependency.

use std::sync::{Arc, RwLock};

use crate::hooks::FormHooks;

/// The salt used for anti-forgery elements when no application salt has
/// been configured.
pub const DEFAULT_SECRET_SALT: &str = "secretSalt";

/// Application-scoped assembly configuration.
///
/// The secret salt is read on every anti-forgery element creation and
/// written rarely (bootstrap). Writes are last-writer-wins; reads are
/// torn-free from any thread.
pub struct FormEnv {
    secret_salt: RwLock<String>,
    hooks: Arc<FormHooks>,
}

impl FormEnv {
    /// Creates an environment with the default salt and a fresh hook
    /// registry.
    pub fn new() -> Self {
        Self::with_hooks(Arc::new(FormHooks::new()))
    }

    /// Creates an environment around an existing hook registry.
    pub fn with_hooks(hooks: Arc<FormHooks>) -> Self {
        Self {
            secret_salt: RwLock::new(DEFAULT_SECRET_SALT.to_string()),
            hooks,
        }
    }

    /// Returns the current secret salt.
    pub fn secret_salt(&self) -> String {
        self.secret_salt
            .read()
            .expect("form env lock poisoned")
            .clone()
    }

    /// Replaces the secret salt. Last writer wins.
    pub fn set_secret_salt(&self, salt: impl Into<String>) {
        *self.secret_salt.write().expect("form env lock poisoned") = salt.into();
    }

    /// Returns the hook registry.
    pub fn hooks(&self) -> &Arc<FormHooks> {
        &self.hooks
    }
}

impl Default for FormEnv {
    fn default() -> Self {
        Self::new()
    }
}
