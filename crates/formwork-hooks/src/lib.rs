//! # formwork-hooks
//!
//! Hook dispatcher for the formwork framework. Provides a decoupled event
//! system allowing external code to intercept construction pipelines without
//! modifying them: listeners register against a hook, the pipeline emits the
//! hook with a mutable payload, and listeners mutate the payload in place.
//! No return value is consumed by the emitter.
//!
//! ## Usage
//!
//! ```
//! use formwork_hooks::Hook;
//! use std::sync::Arc;
//!
//! let hook: Hook<Vec<String>> = Hook::new();
//!
//! hook.connect("greeter", Arc::new(|names: &mut Vec<String>| {
//!     names.push("hello".to_string());
//! }));
//!
//! let mut payload = Vec::new();
//! hook.emit(&mut payload);
//! assert_eq!(payload, vec!["hello".to_string()]);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// The type signature for a hook listener.
///
/// Listeners receive a mutable reference to the event payload and may mutate
/// it in place. Listeners must be `Send + Sync` so that hooks can be shared
/// across threads.
pub type HookListener<P> = Arc<dyn Fn(&mut P) + Send + Sync>;

/// A hook that listeners can connect to and pipelines can emit.
///
/// Each hook carries a payload type `P`. Listeners are called in the order
/// they were connected.
///
/// # Examples
///
/// ```
/// use formwork_hooks::Hook;
/// use std::sync::Arc;
///
/// let hook: Hook<String> = Hook::new();
///
/// hook.connect("upper", Arc::new(|msg: &mut String| {
///     *msg = msg.to_uppercase();
/// }));
///
/// let mut payload = "quiet".to_string();
/// hook.emit(&mut payload);
/// assert_eq!(payload, "QUIET");
/// ```
pub struct Hook<P> {
    listeners: RwLock<Vec<(String, HookListener<P>)>>,
}

impl<P> Default for Hook<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Hook<P> {
    /// Creates a new hook with no connected listeners.
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Connects a listener to this hook.
    ///
    /// The `listener_id` identifies the listener for later disconnection.
    /// If a listener with the same ID is already connected, it is replaced
    /// in place, keeping its original position in the call order.
    pub fn connect(&self, listener_id: impl Into<String>, listener: HookListener<P>) {
        let id = listener_id.into();
        let mut listeners = self.listeners.write().expect("hook lock poisoned");

        if let Some(entry) = listeners.iter_mut().find(|(lid, _)| *lid == id) {
            entry.1 = listener;
        } else {
            listeners.push((id, listener));
        }
    }

    /// Disconnects the listener with the given ID.
    ///
    /// Returns `true` if a listener was found and removed.
    pub fn disconnect(&self, listener_id: &str) -> bool {
        let mut listeners = self.listeners.write().expect("hook lock poisoned");
        let len_before = listeners.len();
        listeners.retain(|(id, _)| id != listener_id);
        listeners.len() < len_before
    }

    /// Emits the hook, calling every connected listener in connection order
    /// with a mutable reference to `payload`.
    ///
    /// The listener list is snapshotted before dispatch so listeners may
    /// connect or disconnect further listeners re-entrantly.
    pub fn emit(&self, payload: &mut P) {
        let snapshot: Vec<HookListener<P>> = self
            .listeners
            .read()
            .expect("hook lock poisoned")
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(payload);
        }
    }

    /// Returns the number of connected listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.read().expect("hook lock poisoned").len()
    }
}

/// A registry of hooks keyed by event name.
///
/// Event names are plain strings; a hook is created lazily the first time a
/// name is used. Emitting an event nobody has registered for is a cheap
/// no-op.
///
/// # Examples
///
/// ```
/// use formwork_hooks::NamedHooks;
/// use std::sync::Arc;
///
/// let hooks: NamedHooks<u32> = NamedHooks::new();
///
/// hooks.hook("onCounter").connect("inc", Arc::new(|n: &mut u32| {
///     *n += 1;
/// }));
///
/// let mut count = 0;
/// hooks.emit("onCounter", &mut count);
/// hooks.emit("onSomethingElse", &mut count);
/// assert_eq!(count, 1);
/// ```
pub struct NamedHooks<P> {
    hooks: RwLock<HashMap<String, Arc<Hook<P>>>>,
}

impl<P> Default for NamedHooks<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> NamedHooks<P> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            hooks: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the hook registered under `event`, creating it if absent.
    pub fn hook(&self, event: &str) -> Arc<Hook<P>> {
        {
            let hooks = self.hooks.read().expect("hook registry lock poisoned");
            if let Some(hook) = hooks.get(event) {
                return Arc::clone(hook);
            }
        }

        let mut hooks = self.hooks.write().expect("hook registry lock poisoned");
        Arc::clone(
            hooks
                .entry(event.to_string())
                .or_insert_with(|| Arc::new(Hook::new())),
        )
    }

    /// Emits `event` with the given payload.
    ///
    /// A no-op when no hook exists under that name.
    pub fn emit(&self, event: &str, payload: &mut P) {
        let hook = {
            let hooks = self.hooks.read().expect("hook registry lock poisoned");
            hooks.get(event).map(Arc::clone)
        };
        if let Some(hook) = hook {
            tracing::trace!(event, listeners = hook.listener_count(), "emitting hook");
            hook.emit(payload);
        }
    }

    /// Returns the number of listeners connected under `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        let hooks = self.hooks.read().expect("hook registry lock poisoned");
        hooks.get(event).map_or(0, |hook| hook.listener_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_hook_connect_and_emit() {
        let hook: Hook<String> = Hook::new();
        hook.connect(
            "suffix",
            Arc::new(|s: &mut String| {
                s.push_str("!");
            }),
        );

        let mut payload = "hi".to_string();
        hook.emit(&mut payload);
        assert_eq!(payload, "hi!");
    }

    #[test]
    fn test_hook_listeners_called_in_connection_order() {
        let hook: Hook<Vec<u32>> = Hook::new();
        for i in 0..3 {
            hook.connect(
                format!("listener_{i}"),
                Arc::new(move |seen: &mut Vec<u32>| {
                    seen.push(i);
                }),
            );
        }

        assert_eq!(hook.listener_count(), 3);

        let mut seen = Vec::new();
        hook.emit(&mut seen);
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn test_hook_disconnect() {
        let hook: Hook<()> = Hook::new();

        hook.connect("a", Arc::new(|(): &mut ()| {}));
        hook.connect("b", Arc::new(|(): &mut ()| {}));
        assert_eq!(hook.listener_count(), 2);

        assert!(hook.disconnect("a"));
        assert_eq!(hook.listener_count(), 1);

        assert!(!hook.disconnect("nonexistent"));
        assert_eq!(hook.listener_count(), 1);
    }

    #[test]
    fn test_hook_replace_listener_keeps_position() {
        let hook: Hook<Vec<&'static str>> = Hook::new();
        hook.connect("first", Arc::new(|seen: &mut Vec<&'static str>| seen.push("first")));
        hook.connect("second", Arc::new(|seen: &mut Vec<&'static str>| seen.push("second")));
        hook.connect(
            "first",
            Arc::new(|seen: &mut Vec<&'static str>| seen.push("replaced")),
        );

        assert_eq!(hook.listener_count(), 2);

        let mut seen = Vec::new();
        hook.emit(&mut seen);
        assert_eq!(seen, vec!["replaced", "second"]);
    }

    #[test]
    fn test_hook_emit_without_listeners() {
        let hook: Hook<u32> = Hook::new();
        let mut payload = 5;
        hook.emit(&mut payload);
        assert_eq!(payload, 5);
    }

    #[test]
    fn test_hook_reentrant_disconnect_during_emit() {
        let hook: Arc<Hook<u32>> = Arc::new(Hook::new());
        let inner = Arc::clone(&hook);
        hook.connect(
            "self_removing",
            Arc::new(move |n: &mut u32| {
                *n += 1;
                inner.disconnect("self_removing");
            }),
        );

        let mut count = 0;
        hook.emit(&mut count);
        hook.emit(&mut count);
        assert_eq!(count, 1);
        assert_eq!(hook.listener_count(), 0);
    }

    #[test]
    fn test_named_hooks_get_or_create() {
        let hooks: NamedHooks<u32> = NamedHooks::new();
        let a = hooks.hook("onThing");
        let b = hooks.hook("onThing");
        a.connect("inc", Arc::new(|n: &mut u32| *n += 1));

        let mut count = 0;
        b.emit(&mut count);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_named_hooks_emit_unknown_event_is_noop() {
        let hooks: NamedHooks<u32> = NamedHooks::new();
        let mut count = 0;
        hooks.emit("onNobodyListens", &mut count);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_named_hooks_listener_count() {
        let hooks: NamedHooks<()> = NamedHooks::new();
        assert_eq!(hooks.listener_count("onThing"), 0);

        hooks.hook("onThing").connect("a", Arc::new(|(): &mut ()| {}));
        hooks.hook("onThing").connect("b", Arc::new(|(): &mut ()| {}));
        assert_eq!(hooks.listener_count("onThing"), 2);
    }

    #[test]
    fn test_named_hooks_separate_events() {
        let hooks: NamedHooks<u32> = NamedHooks::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&calls);
        hooks.hook("onA").connect(
            "counter",
            Arc::new(move |_: &mut u32| {
                c.fetch_add(1, Ordering::SeqCst);
            }),
        );

        let mut payload = 0;
        hooks.emit("onA", &mut payload);
        hooks.emit("onB", &mut payload);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_hook_default() {
        let hook: Hook<i32> = Hook::default();
        assert_eq!(hook.listener_count(), 0);
    }
}
