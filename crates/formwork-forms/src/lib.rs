//! # formwork-forms
//!
//! Form assembly for the formwork framework: forms aggregate elements,
//! decorators, and display groups; plugin loaders resolve short plugin
//! names against registered namespaces; anti-forgery elements receive a
//! configured secret salt at creation; and named lifecycle events let
//! external code rewrite the assembly pipeline without modifying it.
//!
//! The usual flow: build a [`FormEnv`](config::FormEnv) at bootstrap,
//! construct a [`Form`](form::Form) per request with
//! [`FormOptions`](form::FormOptions), add elements, then attach default
//! decorator chains before rendering.

pub mod config;
pub mod decorate;
pub mod decorator;
pub mod display_group;
pub mod element;
pub mod form;
pub mod hooks;
pub mod loader;

pub use config::FormEnv;
pub use decorate::{add_default_decorators, set_form_element_type_classes};
pub use decorator::{Decorator, Placement};
pub use display_group::DisplayGroup;
pub use element::{Element, ElementOptions};
pub use form::{enable_form, Form, FormOptions};
pub use hooks::{ElementDecorationEvent, FormHooks};
pub use loader::{PluginKind, PluginLoader};
