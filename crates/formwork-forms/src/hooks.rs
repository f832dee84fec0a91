//! Named lifecycle events for form and element assembly.
//!
//! External code intercepts assembly by connecting listeners to these
//! events; pipelines emit them with mutable payloads. The registry is owned
//! by the application and injected through
//! [`FormEnv`](crate::config::FormEnv) — there is no process-wide dispatcher.

use formwork_hooks::NamedHooks;

use crate::element::Element;
use crate::form::Form;

/// Emitted before default decorators are attached to an element.
pub const BEFORE_ELEMENT_DEFAULT_DECORATORS: &str = "onBeforeAddFormElementDefaultDecorators";

/// Emitted after default decorators are attached to an element.
pub const AFTER_ELEMENT_DEFAULT_DECORATORS: &str = "onAfterAddFormElementDefaultDecorators";

/// Builds the lifecycle event name for a form kind.
///
/// Underscores in the kind are stripped, so listeners see one flat name per
/// form kind:
///
/// ```
/// use formwork_forms::hooks::init_event_name;
///
/// assert_eq!(init_event_name("Signup_Form"), "onSignupFormInitAfter");
/// ```
pub fn init_event_name(form_kind: &str) -> String {
    format!("on{}InitAfter", form_kind.replace('_', ""))
}

/// Payload of the element-decoration events.
///
/// The element travels through the payload by value: the pipeline moves it
/// in before the first emission and back out after the last, so listeners
/// get full mutable access. `element_id` is the fully-qualified identifier
/// computed before emission; the decorators attached between the two events
/// use that precomputed value.
pub struct ElementDecorationEvent {
    /// The element being decorated.
    pub element: Element,
    /// The fully-qualified element identifier.
    pub element_id: String,
}

/// The hook registry consumed by form assembly.
///
/// One instance per application, shared through `Arc` in
/// [`FormEnv`](crate::config::FormEnv).
#[derive(Default)]
pub struct FormHooks {
    /// Element-decoration events, keyed by event name.
    pub element_decoration: NamedHooks<ElementDecorationEvent>,
    /// Form lifecycle events, keyed by derived event name; the payload is
    /// the form itself.
    pub form_init: NamedHooks<Form>,
}

impl FormHooks {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}
