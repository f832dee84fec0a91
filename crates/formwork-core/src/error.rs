//! Core error types for the formwork framework.
//!
//! This module provides the [`FormworkError`] enum covering every failure
//! class raised during form assembly: plugin resolution, element registration,
//! and display-group membership. Assembly performs no recovery of its own —
//! errors propagate unchanged to the caller so a partially assembled form is
//! never handed out silently.

use thiserror::Error;

/// The primary error type for the formwork framework.
///
/// Each variant corresponds to a distinct failure detected by the assembly
/// substrate. Callers are expected to abort construction of the affected
/// form or element on any of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormworkError {
    /// A short plugin name could not be resolved in any registered namespace.
    #[error("unknown {kind} plugin: {name}")]
    UnknownPlugin {
        /// The plugin kind searched ("element", "decorator", "display group").
        kind: String,
        /// The short name that failed to resolve.
        name: String,
    },

    /// An element with the same name already exists in the form or composite.
    #[error("duplicate element name: {0}")]
    DuplicateElement(String),

    /// A referenced element does not exist in the form.
    #[error("unknown element: {0}")]
    UnknownElement(String),

    /// A display group with the same name already exists in the form.
    #[error("duplicate display group name: {0}")]
    DuplicateDisplayGroup(String),
}
