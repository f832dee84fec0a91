//! Rendering decorators — named, ordered configuration directives.
//!
//! A [`Decorator`] carries no behavior of its own: it is a name plus an
//! option bag (tag, CSS id/class, placement) that a downstream rendering
//! engine interprets. What matters here is chain order — decorators wrap
//! each other in registration order, so position in the chain encodes the
//! nesting of the rendered output, not its visual top-to-bottom order.

use std::collections::HashMap;

use formwork_core::Value;

/// Well-known decorator names published under the built-in namespace.
pub mod names {
    /// Renders the form's elements in order.
    pub const FORM_ELEMENTS: &str = "FormElements";
    /// Wraps content in a configurable HTML tag.
    pub const HTML_TAG: &str = "HtmlTag";
    /// A second HTML tag wrapper, for chains that need two.
    pub const HTML_TAG_2: &str = "HtmlTag2";
    /// Renders the form's notice messages.
    pub const FORM_MESSAGES: &str = "FormMessages";
    /// Renders the form's error messages.
    pub const FORM_ERRORS: &str = "FormErrors";
    /// Renders a description block.
    pub const DESCRIPTION: &str = "Description";
    /// Renders the form title.
    pub const FORM_TITLE: &str = "FormTitle";
    /// Wraps the whole form in a styling container.
    pub const FORM_WRAPPER: &str = "FormWrapper";
    /// Outermost form container.
    pub const FORM_CONTAINER: &str = "FormContainer";
    /// Renders the `<form>` tag itself.
    pub const FORM: &str = "Form";
    /// Renders an element's label.
    pub const LABEL: &str = "Label";
}

/// Where a decorator places its output relative to the content it wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Output precedes the wrapped content.
    Prepend,
    /// Output follows the wrapped content.
    #[default]
    Append,
}

/// A named rendering directive with an option bag.
///
/// Decorators are pure configuration: `Clone` + `PartialEq`, with no
/// identity beyond their position in a chain. Construction is builder
/// style:
///
/// ```
/// use formwork_forms::decorator::{names, Decorator, Placement};
///
/// let wrapper = Decorator::new(names::HTML_TAG)
///     .tag("div")
///     .class("form-elements");
/// let title = Decorator::new(names::FORM_TITLE)
///     .tag("h3")
///     .placement(Placement::Prepend);
/// assert_eq!(wrapper.tag.as_deref(), Some("div"));
/// assert_eq!(title.placement, Placement::Prepend);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Decorator {
    /// The decorator name, resolved through a decorator namespace.
    pub name: String,
    /// HTML tag to render, when the decorator wraps content in a tag.
    pub tag: Option<String>,
    /// CSS id attribute.
    pub id: Option<String>,
    /// CSS class attribute.
    pub class: Option<String>,
    /// Output placement relative to wrapped content.
    pub placement: Placement,
    /// Any further options a rendering engine may interpret.
    pub extra: HashMap<String, Value>,
}

impl Decorator {
    /// Creates a decorator with the given name and default options.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: None,
            id: None,
            class: None,
            placement: Placement::default(),
            extra: HashMap::new(),
        }
    }

    /// Sets the HTML tag option.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Sets the CSS id option.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the CSS class option.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Sets the placement option.
    #[must_use]
    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Adds an extra option.
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}
