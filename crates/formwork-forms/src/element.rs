//! Form elements — named leaf or composite nodes.
//!
//! An [`Element`] is a named node in a form: a type tag (e.g. `"Text"`,
//! `"Hash"`), an optional group qualifier, an HTML attribute map, the option
//! bag it was created from, and an ordered decorator chain. Composite
//! elements additionally own nested child elements and borrow a
//! decorator-resolution loader from their owning form.

use std::collections::HashMap;
use std::sync::Arc;

use formwork_core::{FormworkError, Value};

use crate::decorator::Decorator;
use crate::loader::PluginLoader;

/// The option bag passed to element factories at creation time.
///
/// Keys are free-form; factories read the ones they understand (`class`,
/// `id`, `belongsTo`, `salt`, ...) and the whole bag is retained on the
/// created element for later inspection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementOptions {
    values: HashMap<String, Value>,
}

impl ElementOptions {
    /// Creates an empty option bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an option, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Sets an option in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns the option stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns the CSRF salt option, if it is a string.
    pub fn salt(&self) -> Option<&str> {
        self.get("salt").and_then(Value::as_str)
    }

    /// Returns `true` if a non-empty salt option is present.
    pub fn has_salt(&self) -> bool {
        self.get("salt").is_some_and(|salt| !salt.is_empty())
    }

    /// Sets the CSRF salt option, coercing to a string.
    pub fn set_salt(&mut self, salt: impl Into<String>) {
        self.set("salt", salt.into());
    }

    /// Returns the number of options.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the bag holds no options.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the stored options.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}

/// Distinguishes leaf elements from composites.
#[derive(Debug, Default)]
pub enum ElementKind {
    /// A leaf element with no children.
    #[default]
    Standard,
    /// A composite element owning nested children.
    Composite(Composite),
}

/// The composite capability: nested child elements plus a borrowed
/// decorator-resolution context.
///
/// The decorator loader is shared from the owning form so that nested
/// construction resolves decorator names against the same namespace
/// registrations as the form itself.
#[derive(Debug, Default)]
pub struct Composite {
    children: Vec<Element>,
    decorator_loader: Option<Arc<PluginLoader<Decorator>>>,
}

impl Composite {
    /// Returns the nested child elements, in insertion order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Adds a child element.
    ///
    /// Child names are unique within the composite.
    pub fn add_child(&mut self, child: Element) -> Result<(), FormworkError> {
        if self.children.iter().any(|c| c.name() == child.name()) {
            return Err(FormworkError::DuplicateElement(child.name().to_string()));
        }
        self.children.push(child);
        Ok(())
    }

    /// Returns the child with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name() == name)
    }

    /// Returns the child with the given name, mutably.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find(|c| c.name() == name)
    }

    /// Sets the decorator-resolution loader shared from the owning form.
    pub fn set_decorator_loader(&mut self, loader: Arc<PluginLoader<Decorator>>) {
        self.decorator_loader = Some(loader);
    }

    /// Returns the decorator-resolution loader, if one has been propagated.
    pub fn decorator_loader(&self) -> Option<&Arc<PluginLoader<Decorator>>> {
        self.decorator_loader.as_ref()
    }
}

/// A named node in a form.
///
/// # Examples
///
/// ```
/// use formwork_forms::element::Element;
///
/// let mut element = Element::new("email", "Text");
/// element.set_belongs_to(Some("profile".to_string()));
/// assert_eq!(element.fully_qualified_name(), "profile-email");
/// ```
#[derive(Debug, Default)]
pub struct Element {
    name: String,
    element_type: String,
    belongs_to: Option<String>,
    attribs: HashMap<String, String>,
    options: ElementOptions,
    decorators: Vec<Decorator>,
    kind: ElementKind,
}

impl Element {
    /// Creates a leaf element with the given name and type tag.
    pub fn new(name: impl Into<String>, element_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            element_type: element_type.into(),
            ..Self::default()
        }
    }

    /// Creates a composite element with the given name and type tag.
    pub fn composite(name: impl Into<String>, element_type: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Composite(Composite::default()),
            ..Self::new(name, element_type)
        }
    }

    /// Returns the element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the element's type tag.
    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    /// Returns the group qualifier, if the element belongs to a group.
    pub fn belongs_to(&self) -> Option<&str> {
        self.belongs_to.as_deref()
    }

    /// Sets or clears the group qualifier.
    pub fn set_belongs_to(&mut self, belongs_to: Option<String>) {
        self.belongs_to = belongs_to;
    }

    /// Returns the fully-qualified element identifier: the name, prefixed
    /// with the group qualifier when one is set.
    pub fn fully_qualified_name(&self) -> String {
        match &self.belongs_to {
            Some(group) => format!("{group}-{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Returns the lowercase final segment of the type tag.
    ///
    /// Namespaced type tags split on underscores: `"Text_Box"` yields
    /// `"box"`.
    pub fn type_tag(&self) -> String {
        self.element_type
            .rsplit('_')
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }

    /// Returns the attribute stored under `key`.
    pub fn attrib(&self, key: &str) -> Option<&str> {
        self.attribs.get(key).map(String::as_str)
    }

    /// Sets an HTML attribute.
    pub fn set_attrib(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attribs.insert(key.into(), value.into());
    }

    /// Returns the CSS class attribute.
    pub fn class(&self) -> Option<&str> {
        self.attrib("class")
    }

    /// Appends a CSS class token, space-separated.
    ///
    /// A token already present in the class list is not added again, so
    /// repeated classification passes leave the attribute unchanged.
    pub fn add_class(&mut self, token: &str) {
        let class = append_class_token(self.class(), token);
        self.set_attrib("class", class);
    }

    /// Returns the creation option bag.
    pub fn options(&self) -> &ElementOptions {
        &self.options
    }

    /// Replaces the creation option bag.
    pub fn set_options(&mut self, options: ElementOptions) {
        self.options = options;
    }

    /// Returns the decorator chain, in registration order.
    pub fn decorators(&self) -> &[Decorator] {
        &self.decorators
    }

    /// Appends a decorator to the chain. Chainable.
    pub fn add_decorator(&mut self, decorator: Decorator) -> &mut Self {
        self.decorators.push(decorator);
        self
    }

    /// Returns `true` when at least one decorator is attached.
    pub fn has_decorators(&self) -> bool {
        !self.decorators.is_empty()
    }

    /// Removes all decorators.
    pub fn clear_decorators(&mut self) {
        self.decorators.clear();
    }

    /// Returns `true` for composite elements.
    pub fn is_composite(&self) -> bool {
        matches!(self.kind, ElementKind::Composite(_))
    }

    /// Returns the composite capability, if this element has children.
    pub fn as_composite(&self) -> Option<&Composite> {
        match &self.kind {
            ElementKind::Composite(composite) => Some(composite),
            ElementKind::Standard => None,
        }
    }

    /// Returns the composite capability mutably, if this element has
    /// children.
    pub fn as_composite_mut(&mut self) -> Option<&mut Composite> {
        match &mut self.kind {
            ElementKind::Composite(composite) => Some(composite),
            ElementKind::Standard => None,
        }
    }
}

/// Appends `token` to a space-joined class list, skipping duplicates.
pub(crate) fn append_class_token(existing: Option<&str>, token: &str) -> String {
    match existing {
        Some(current) if !current.is_empty() => {
            if current.split_whitespace().any(|t| t == token) {
                current.to_string()
            } else {
                format!("{current} {token}")
            }
        }
        _ => token.to_string(),
    }
}
