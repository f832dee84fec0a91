//! Plugin-name resolution namespaces.
//!
//! A [`PluginLoader`] maps short plugin names (`"Text"`, `"HtmlTag"`) to
//! implementations, scoped by an ordered list of namespace registrations.
//! Forms carry one loader per plugin kind; composite elements borrow their
//! owning form's decorator loader so nested construction resolves names
//! consistently.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use formwork_core::{FormworkError, Value};

use crate::decorator::{names, Decorator};
use crate::display_group::{default_display_group_factory, DisplayGroup};
use crate::element::{Element, ElementOptions};

/// The kinds of plugin a loader can resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginKind {
    /// Rendering decorators.
    Decorator,
    /// Form elements.
    Element,
    /// Display-group implementations.
    DisplayGroup,
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Decorator => "decorator",
            Self::Element => "element",
            Self::DisplayGroup => "display group",
        };
        write!(f, "{name}")
    }
}

/// A namespace registration: a logical prefix plus the path it maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixPath {
    /// The namespace prefix qualified names are built from.
    pub prefix: String,
    /// The path the prefix maps to.
    pub path: String,
}

/// Constructs an element from its name and creation options.
pub type ElementFactory = Arc<dyn Fn(&str, &ElementOptions) -> Element + Send + Sync>;

/// Constructs a display group from its name.
pub type DisplayGroupFactory = Arc<dyn Fn(&str) -> DisplayGroup + Send + Sync>;

/// The built-in element namespace.
pub const BUILTIN_ELEMENT_PREFIX: &str = "formwork::elements";
/// Path of the built-in element namespace.
pub const BUILTIN_ELEMENT_PATH: &str = "formwork/elements";
/// The built-in decorator namespace.
pub const BUILTIN_DECORATOR_PREFIX: &str = "formwork::decorators";
/// Path of the built-in decorator namespace.
pub const BUILTIN_DECORATOR_PATH: &str = "formwork/decorators";

/// Resolves short plugin names against an ordered list of namespace
/// registrations plus a plugin table.
///
/// Registration is interior-mutable so loaders can be shared (`Arc`) between
/// a form and its composite elements. Namespace registration is idempotent:
/// re-adding an identical prefix/path pair is a no-op. Name resolution uses
/// the most recently registered namespace — last write wins.
pub struct PluginLoader<T> {
    kind: PluginKind,
    paths: RwLock<Vec<PrefixPath>>,
    plugins: RwLock<HashMap<String, T>>,
}

impl<T> fmt::Debug for PluginLoader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut plugin_names: Vec<String> = self
            .plugins
            .read()
            .expect("plugin loader lock poisoned")
            .keys()
            .cloned()
            .collect();
        plugin_names.sort();
        let paths = self.paths.read().expect("plugin loader lock poisoned");
        f.debug_struct("PluginLoader")
            .field("kind", &self.kind)
            .field("paths", &*paths)
            .field("plugins", &plugin_names)
            .finish()
    }
}

impl<T: Clone> PluginLoader<T> {
    /// Creates an empty loader for the given plugin kind.
    pub fn new(kind: PluginKind) -> Self {
        Self {
            kind,
            paths: RwLock::new(Vec::new()),
            plugins: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the plugin kind this loader resolves.
    pub fn kind(&self) -> PluginKind {
        self.kind
    }

    /// Registers a namespace.
    ///
    /// Re-registering an identical prefix/path pair is a no-op, so callers
    /// may register unconditionally.
    pub fn add_prefix_path(&self, prefix: impl Into<String>, path: impl Into<String>) {
        let entry = PrefixPath {
            prefix: prefix.into(),
            path: path.into(),
        };
        let mut paths = self.paths.write().expect("plugin loader lock poisoned");
        if !paths.contains(&entry) {
            paths.push(entry);
        }
    }

    /// Returns the registered namespaces, oldest first.
    pub fn prefix_paths(&self) -> Vec<PrefixPath> {
        self.paths
            .read()
            .expect("plugin loader lock poisoned")
            .clone()
    }

    /// Registers a plugin under a short name. Last write wins.
    pub fn register(&self, name: impl Into<String>, plugin: T) {
        self.plugins
            .write()
            .expect("plugin loader lock poisoned")
            .insert(name.into(), plugin);
    }

    /// Returns the plugin registered under `name`.
    pub fn get(&self, name: &str) -> Option<T> {
        self.plugins
            .read()
            .expect("plugin loader lock poisoned")
            .get(name)
            .cloned()
    }

    /// Returns `true` if a plugin is registered under `name`.
    pub fn is_registered(&self, name: &str) -> bool {
        self.plugins
            .read()
            .expect("plugin loader lock poisoned")
            .contains_key(name)
    }

    /// Resolves a short name to its qualified form, using the most recently
    /// registered namespace. Returns `None` for unknown plugins.
    pub fn resolve_name(&self, name: &str) -> Option<String> {
        if !self.is_registered(name) {
            return None;
        }
        let paths = self.paths.read().expect("plugin loader lock poisoned");
        Some(match paths.last() {
            Some(path) => format!("{}::{name}", path.prefix),
            None => name.to_string(),
        })
    }
}

impl PluginLoader<ElementFactory> {
    /// Creates an element of the given type.
    ///
    /// Fails fast with [`FormworkError::UnknownPlugin`] when the type tag is
    /// not registered in any namespace.
    pub fn create(
        &self,
        element_type: &str,
        name: &str,
        options: &ElementOptions,
    ) -> Result<Element, FormworkError> {
        let factory = self
            .get(element_type)
            .ok_or_else(|| FormworkError::UnknownPlugin {
                kind: self.kind.to_string(),
                name: element_type.to_string(),
            })?;
        Ok(factory(name, options))
    }
}

// ── Built-in plugins ───────────────────────────────────────────────────

/// Leaf element types published under the built-in namespace.
const STANDARD_ELEMENT_TYPES: &[&str] = &[
    "Text", "Password", "Hidden", "Textarea", "Checkbox", "Select", "Button", "Submit", "File",
    "Hash",
];

/// Type tag of the built-in composite element.
pub const COMPOSITE_ELEMENT_TYPE: &str = "Composite";

fn standard_factory(element_type: &'static str) -> ElementFactory {
    Arc::new(move |name, options| {
        let mut element = Element::new(name, element_type);
        apply_creation_options(&mut element, options);
        element
    })
}

fn composite_factory() -> ElementFactory {
    Arc::new(move |name, options| {
        let mut element = Element::composite(name, COMPOSITE_ELEMENT_TYPE);
        apply_creation_options(&mut element, options);
        element
    })
}

/// Applies the option keys common to all element factories, then retains
/// the full bag on the element.
fn apply_creation_options(element: &mut Element, options: &ElementOptions) {
    if let Some(group) = options.get("belongsTo").and_then(Value::as_str) {
        element.set_belongs_to(Some(group.to_string()));
    }
    for key in ["class", "id"] {
        if let Some(value) = options.get(key) {
            if !value.is_empty() {
                element.set_attrib(key, value.coerce_string());
            }
        }
    }
    element.set_options(options.clone());
}

static BUILTIN_ELEMENT_FACTORIES: Lazy<HashMap<&'static str, ElementFactory>> = Lazy::new(|| {
    let mut factories: HashMap<&'static str, ElementFactory> = HashMap::new();
    for &element_type in STANDARD_ELEMENT_TYPES {
        factories.insert(element_type, standard_factory(element_type));
    }
    factories.insert(COMPOSITE_ELEMENT_TYPE, composite_factory());
    factories
});

/// Builds an element loader pre-populated with the built-in factories.
pub fn default_element_loader() -> Arc<PluginLoader<ElementFactory>> {
    let loader = PluginLoader::new(PluginKind::Element);
    for (name, factory) in BUILTIN_ELEMENT_FACTORIES.iter() {
        loader.register(*name, Arc::clone(factory));
    }
    Arc::new(loader)
}

/// Builds a decorator loader pre-populated with the standard prototypes.
pub fn default_decorator_loader() -> Arc<PluginLoader<Decorator>> {
    let loader = PluginLoader::new(PluginKind::Decorator);
    for name in [
        names::FORM_ELEMENTS,
        names::HTML_TAG,
        names::HTML_TAG_2,
        names::FORM_MESSAGES,
        names::FORM_ERRORS,
        names::DESCRIPTION,
        names::FORM_TITLE,
        names::FORM_WRAPPER,
        names::FORM_CONTAINER,
        names::FORM,
        names::LABEL,
    ] {
        loader.register(name, Decorator::new(name));
    }
    Arc::new(loader)
}

/// Builds a display-group loader pre-populated with the default factory.
pub fn default_display_group_loader() -> Arc<PluginLoader<DisplayGroupFactory>> {
    let loader = PluginLoader::new(PluginKind::DisplayGroup);
    loader.register("DisplayGroup", default_display_group_factory());
    Arc::new(loader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_prefix_path_is_idempotent() {
        let loader: PluginLoader<Decorator> = PluginLoader::new(PluginKind::Decorator);
        loader.add_prefix_path(BUILTIN_DECORATOR_PREFIX, BUILTIN_DECORATOR_PATH);
        loader.add_prefix_path(BUILTIN_DECORATOR_PREFIX, BUILTIN_DECORATOR_PATH);
        assert_eq!(loader.prefix_paths().len(), 1);
    }

    #[test]
    fn test_distinct_prefix_paths_accumulate_in_order() {
        let loader: PluginLoader<Decorator> = PluginLoader::new(PluginKind::Decorator);
        loader.add_prefix_path("app::decorators", "app/decorators");
        loader.add_prefix_path("theme::decorators", "theme/decorators");
        let paths = loader.prefix_paths();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].prefix, "app::decorators");
        assert_eq!(paths[1].prefix, "theme::decorators");
    }

    #[test]
    fn test_resolve_name_uses_latest_namespace() {
        let loader = default_decorator_loader();
        loader.add_prefix_path(BUILTIN_DECORATOR_PREFIX, BUILTIN_DECORATOR_PATH);
        assert_eq!(
            loader.resolve_name("HtmlTag"),
            Some("formwork::decorators::HtmlTag".to_string())
        );

        loader.add_prefix_path("theme::decorators", "theme/decorators");
        assert_eq!(
            loader.resolve_name("HtmlTag"),
            Some("theme::decorators::HtmlTag".to_string())
        );
    }

    #[test]
    fn test_resolve_name_unknown_plugin() {
        let loader = default_decorator_loader();
        assert_eq!(loader.resolve_name("Bogus"), None);
    }

    #[test]
    fn test_create_standard_element() {
        let loader = default_element_loader();
        let element = loader
            .create("Text", "username", &ElementOptions::new())
            .unwrap();
        assert_eq!(element.name(), "username");
        assert_eq!(element.element_type(), "Text");
        assert!(!element.is_composite());
    }

    #[test]
    fn test_create_composite_element() {
        let loader = default_element_loader();
        let element = loader
            .create("Composite", "address", &ElementOptions::new())
            .unwrap();
        assert!(element.is_composite());
        assert_eq!(element.element_type(), "Composite");
    }

    #[test]
    fn test_create_unknown_type_fails() {
        let loader = default_element_loader();
        let err = loader
            .create("Bogus", "x", &ElementOptions::new())
            .unwrap_err();
        assert_eq!(
            err,
            FormworkError::UnknownPlugin {
                kind: "element".to_string(),
                name: "Bogus".to_string(),
            }
        );
    }

    #[test]
    fn test_creation_options_applied() {
        let loader = default_element_loader();
        let options = ElementOptions::new()
            .with("belongsTo", "profile")
            .with("class", "wide")
            .with("salt", "s3cret");
        let element = loader.create("Hash", "token", &options).unwrap();
        assert_eq!(element.belongs_to(), Some("profile"));
        assert_eq!(element.class(), Some("wide"));
        assert_eq!(element.options().salt(), Some("s3cret"));
    }

    #[test]
    fn test_register_overrides_builtin() {
        let loader = default_element_loader();
        loader.register(
            "Text",
            Arc::new(|name: &str, _options: &ElementOptions| Element::new(name, "CustomText"))
                as ElementFactory,
        );
        let element = loader
            .create("Text", "username", &ElementOptions::new())
            .unwrap();
        assert_eq!(element.element_type(), "CustomText");
    }

    #[test]
    fn test_plugin_kind_display() {
        assert_eq!(PluginKind::Decorator.to_string(), "decorator");
        assert_eq!(PluginKind::Element.to_string(), "element");
        assert_eq!(PluginKind::DisplayGroup.to_string(), "display group");
    }
}
