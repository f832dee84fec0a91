//! The form aggregate and its construction pipeline.
//!
//! A [`Form`] owns its elements, decorator chain, and display groups, and
//! carries the plugin loaders its plugins are resolved against. Construction
//! runs a fixed sequence — base attributes, action capture, namespace
//! enablement, option processing — and finishes by emitting a per-kind
//! lifecycle event so external listeners can customize any form kind without
//! subclassing.

use std::collections::HashMap;
use std::sync::Arc;

use formwork_core::{FormworkError, RequestContext};

use crate::config::FormEnv;
use crate::decorate;
use crate::decorator::Decorator;
use crate::display_group::DisplayGroup;
use crate::element::{Element, ElementOptions};
use crate::hooks;
use crate::loader::{
    self, default_decorator_loader, default_display_group_loader, default_element_loader,
    DisplayGroupFactory, ElementFactory, PluginLoader,
};

/// The CSS class every form starts with.
pub const FORM_CSS_CLASS: &str = "global_form";

/// The element type that receives anti-forgery salt injection.
pub const DEFAULT_CSRF_ELEMENT_TYPE: &str = "Hash";

/// The display-group implementation name installed by [`enable_form`].
pub const DEFAULT_DISPLAY_GROUP: &str = "DisplayGroup";

/// Construction options for [`Form::new`].
///
/// Builder style; only the environment is mandatory:
///
/// ```
/// use std::sync::Arc;
/// use formwork_core::RequestContext;
/// use formwork_forms::config::FormEnv;
/// use formwork_forms::form::{Form, FormOptions};
///
/// let env = Arc::new(FormEnv::new());
/// let request = RequestContext::builder().path("/signup").build();
/// let form = Form::new(FormOptions::new(env).hook_name("Signup_Form").request(&request));
/// assert_eq!(form.action(), "/signup");
/// ```
pub struct FormOptions {
    env: Arc<FormEnv>,
    hook_name: String,
    request_path: String,
    title: Option<String>,
    attribs: Vec<(String, String)>,
    csrf_element_type: String,
    disable_default_decorators: bool,
}

impl FormOptions {
    /// Creates options bound to an assembly environment.
    pub fn new(env: Arc<FormEnv>) -> Self {
        Self {
            env,
            hook_name: "Form".to_string(),
            request_path: "/".to_string(),
            title: None,
            attribs: Vec::new(),
            csrf_element_type: DEFAULT_CSRF_ELEMENT_TYPE.to_string(),
            disable_default_decorators: false,
        }
    }

    /// Sets the lifecycle hook name for this form kind.
    ///
    /// Each concrete form kind supplies its own name; listeners subscribe to
    /// the event derived from it (see [`hooks::init_event_name`]).
    #[must_use]
    pub fn hook_name(mut self, hook_name: impl Into<String>) -> Self {
        self.hook_name = hook_name.into();
        self
    }

    /// Captures the action URI from the current request.
    #[must_use]
    pub fn request(mut self, request: &RequestContext) -> Self {
        self.request_path = request.full_path();
        self
    }

    /// Sets the form title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Adds an HTML attribute applied after construction defaults.
    #[must_use]
    pub fn attrib(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attribs.push((key.into(), value.into()));
        self
    }

    /// Overrides the element type that receives salt injection.
    #[must_use]
    pub fn csrf_element_type(mut self, element_type: impl Into<String>) -> Self {
        self.csrf_element_type = element_type.into();
        self
    }

    /// Disables the default decorator chain.
    #[must_use]
    pub fn disable_default_decorators(mut self, disable: bool) -> Self {
        self.disable_default_decorators = disable;
        self
    }
}

/// An aggregate of elements, decorators, and display groups.
pub struct Form {
    attribs: HashMap<String, String>,
    action: String,
    title: Option<String>,
    notices: Vec<String>,
    elements: Vec<Element>,
    decorators: Vec<Decorator>,
    display_groups: Vec<DisplayGroup>,
    hook_name: String,
    csrf_element_type: String,
    default_decorators_disabled: bool,
    default_display_group: String,
    decorator_loader: Arc<PluginLoader<Decorator>>,
    element_decorator_loader: Arc<PluginLoader<Decorator>>,
    display_group_decorator_loader: Arc<PluginLoader<Decorator>>,
    element_loader: Arc<PluginLoader<ElementFactory>>,
    display_group_loader: Arc<PluginLoader<DisplayGroupFactory>>,
    env: Arc<FormEnv>,
}

/// Registers the built-in resolution namespaces on a form and installs the
/// default display-group implementation.
///
/// Safe to call any number of times: namespace registration is idempotent
/// and the display-group default is a plain overwrite.
pub fn enable_form(form: &mut Form) {
    form.decorator_loader
        .add_prefix_path(loader::BUILTIN_DECORATOR_PREFIX, loader::BUILTIN_DECORATOR_PATH);
    form.element_loader
        .add_prefix_path(loader::BUILTIN_ELEMENT_PREFIX, loader::BUILTIN_ELEMENT_PATH);
    form.element_decorator_loader
        .add_prefix_path(loader::BUILTIN_DECORATOR_PREFIX, loader::BUILTIN_DECORATOR_PATH);
    form.display_group_decorator_loader
        .add_prefix_path(loader::BUILTIN_DECORATOR_PREFIX, loader::BUILTIN_DECORATOR_PATH);
    form.default_display_group = DEFAULT_DISPLAY_GROUP.to_string();
}

impl Form {
    /// Constructs a form.
    ///
    /// The sequence is fixed: base CSS class, action capture from the
    /// request snapshot, namespace enablement, remaining options, then the
    /// lifecycle event for this form kind with the form itself as mutable
    /// payload.
    pub fn new(options: FormOptions) -> Self {
        let FormOptions {
            env,
            hook_name,
            request_path,
            title,
            attribs,
            csrf_element_type,
            disable_default_decorators,
        } = options;

        let span = formwork_core::logging::assembly_span(&hook_name);
        let _guard = span.enter();

        let mut form = Self {
            attribs: HashMap::new(),
            action: String::new(),
            title: None,
            notices: Vec::new(),
            elements: Vec::new(),
            decorators: Vec::new(),
            display_groups: Vec::new(),
            hook_name,
            csrf_element_type,
            default_decorators_disabled: disable_default_decorators,
            default_display_group: DEFAULT_DISPLAY_GROUP.to_string(),
            decorator_loader: default_decorator_loader(),
            element_decorator_loader: default_decorator_loader(),
            display_group_decorator_loader: default_decorator_loader(),
            element_loader: default_element_loader(),
            display_group_loader: default_display_group_loader(),
            env,
        };

        form.set_attrib("class", FORM_CSS_CLASS);
        form.action = request_path;
        enable_form(&mut form);

        if let Some(title) = title {
            form.set_title(title);
        }
        for (key, value) in attribs {
            form.set_attrib(key, value);
        }

        let event_name = hooks::init_event_name(&form.hook_name);
        tracing::debug!(event = %event_name, action = %form.action, "form constructed");
        let registry = Arc::clone(form.env.hooks());
        registry.form_init.emit(&event_name, &mut form);

        form
    }

    // ── Attributes ──────────────────────────────────────────────────

    /// Returns the attribute stored under `key`.
    pub fn attrib(&self, key: &str) -> Option<&str> {
        self.attribs.get(key).map(String::as_str)
    }

    /// Sets an HTML attribute.
    pub fn set_attrib(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attribs.insert(key.into(), value.into());
    }

    /// Returns the action URI captured at construction.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns the lifecycle hook name of this form kind.
    pub fn hook_name(&self) -> &str {
        &self.hook_name
    }

    /// Returns the assembly environment.
    pub fn env(&self) -> &Arc<FormEnv> {
        &self.env
    }

    // ── Title and notices ───────────────────────────────────────────

    /// Sets the form title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Returns the form title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Appends a notice message.
    pub fn add_notice(&mut self, message: impl Into<String>) {
        self.notices.push(message.into());
    }

    /// Returns all notices, oldest first.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Removes all notices.
    pub fn clear_notices(&mut self) {
        self.notices.clear();
    }

    // ── Decorators ──────────────────────────────────────────────────

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

    /// Returns `true` when the default chain must not be attached.
    pub fn default_decorators_disabled(&self) -> bool {
        self.default_decorators_disabled
    }

    /// Enables or disables the default decorator chain.
    pub fn set_default_decorators_disabled(&mut self, disabled: bool) {
        self.default_decorators_disabled = disabled;
    }

    /// Attaches the default decorator chain.
    ///
    /// A no-op when default decoration is disabled or when any decorator is
    /// already attached, so repeated calls leave the chain unchanged.
    pub fn load_default_decorators(&mut self) {
        if self.default_decorators_disabled {
            tracing::debug!("default form decorators disabled");
            return;
        }
        if self.has_decorators() {
            return;
        }
        tracing::debug!("attaching default form decorators");
        for decorator in decorate::default_form_decorators() {
            self.add_decorator(decorator);
        }
    }

    /// Classifies this form's elements by type.
    ///
    /// Object-form convenience for
    /// [`decorate::set_form_element_type_classes`].
    pub fn set_element_type_classes(&mut self) {
        decorate::set_form_element_type_classes(self);
    }

    // ── Elements ────────────────────────────────────────────────────

    /// Creates an element without adding it to the form.
    ///
    /// When the type matches the configured anti-forgery element type and
    /// the options carry no salt, the environment's secret salt is injected
    /// first; an explicitly supplied salt always wins. Composite elements
    /// leave with the form's decorator loader already propagated.
    pub fn create_element(
        &self,
        element_type: &str,
        name: &str,
        options: ElementOptions,
    ) -> Result<Element, FormworkError> {
        let mut options = options;
        if element_type == self.csrf_element_type && !options.has_salt() {
            tracing::debug!(element = name, "injecting secret salt");
            options.set_salt(self.env.secret_salt());
        }

        let mut element = self.element_loader.create(element_type, name, &options)?;
        self.propagate_decorator_loader(&mut element);
        Ok(element)
    }

    /// Adds an existing element to the form.
    ///
    /// Element names are unique within the form. Composite elements receive
    /// the form's decorator loader on this path too.
    pub fn add_element(&mut self, mut element: Element) -> Result<(), FormworkError> {
        if self.elements.iter().any(|e| e.name() == element.name()) {
            return Err(FormworkError::DuplicateElement(element.name().to_string()));
        }
        self.propagate_decorator_loader(&mut element);
        self.elements.push(element);
        Ok(())
    }

    /// Creates an element and adds it to the form.
    pub fn add_new_element(
        &mut self,
        element_type: &str,
        name: &str,
        options: ElementOptions,
    ) -> Result<(), FormworkError> {
        let element = self.create_element(element_type, name, options)?;
        self.add_element(element)
    }

    fn propagate_decorator_loader(&self, element: &mut Element) {
        if let Some(composite) = element.as_composite_mut() {
            composite.set_decorator_loader(Arc::clone(&self.decorator_loader));
        }
    }

    /// Returns the form's elements, in insertion order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub(crate) fn elements_mut(&mut self) -> &mut [Element] {
        &mut self.elements
    }

    /// Returns the element with the given name.
    pub fn element(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.name() == name)
    }

    /// Returns the element with the given name, mutably.
    pub fn element_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.name() == name)
    }

    /// Removes and returns the element with the given name.
    pub fn remove_element(&mut self, name: &str) -> Option<Element> {
        let index = self.elements.iter().position(|e| e.name() == name)?;
        Some(self.elements.remove(index))
    }

    // ── CSRF configuration ──────────────────────────────────────────

    /// Returns the element type that receives salt injection.
    pub fn csrf_element_type(&self) -> &str {
        &self.csrf_element_type
    }

    /// Overrides the element type that receives salt injection.
    pub fn set_csrf_element_type(&mut self, element_type: impl Into<String>) {
        self.csrf_element_type = element_type.into();
    }

    // ── Display groups ──────────────────────────────────────────────

    /// Returns the display-group implementation name groups are built with.
    pub fn default_display_group(&self) -> &str {
        &self.default_display_group
    }

    /// Overrides the display-group implementation name.
    pub fn set_default_display_group(&mut self, name: impl Into<String>) {
        self.default_display_group = name.into();
    }

    /// Groups existing elements under a named display group.
    ///
    /// Every member must already be an element of the form; the group is
    /// built through the configured display-group implementation.
    pub fn add_display_group(
        &mut self,
        name: impl Into<String>,
        members: &[&str],
    ) -> Result<(), FormworkError> {
        let name = name.into();
        if self.display_groups.iter().any(|g| g.name() == name) {
            return Err(FormworkError::DuplicateDisplayGroup(name));
        }
        for member in members {
            if self.element(member).is_none() {
                return Err(FormworkError::UnknownElement((*member).to_string()));
            }
        }

        let factory = self
            .display_group_loader
            .get(&self.default_display_group)
            .ok_or_else(|| FormworkError::UnknownPlugin {
                kind: self.display_group_loader.kind().to_string(),
                name: self.default_display_group.clone(),
            })?;
        let mut group = factory(&name);
        for member in members {
            group.add_member(*member);
        }
        self.display_groups.push(group);
        Ok(())
    }

    /// Returns the display groups, in insertion order.
    pub fn display_groups(&self) -> &[DisplayGroup] {
        &self.display_groups
    }

    /// Returns the display group with the given name.
    pub fn display_group(&self, name: &str) -> Option<&DisplayGroup> {
        self.display_groups.iter().find(|g| g.name() == name)
    }

    // ── Loaders ─────────────────────────────────────────────────────

    /// Returns the generic decorator loader.
    pub fn decorator_loader(&self) -> &Arc<PluginLoader<Decorator>> {
        &self.decorator_loader
    }

    /// Returns the decorator loader seeded into elements.
    pub fn element_decorator_loader(&self) -> &Arc<PluginLoader<Decorator>> {
        &self.element_decorator_loader
    }

    /// Returns the decorator loader used by display groups.
    pub fn display_group_decorator_loader(&self) -> &Arc<PluginLoader<Decorator>> {
        &self.display_group_decorator_loader
    }

    /// Returns the element loader.
    pub fn element_loader(&self) -> &Arc<PluginLoader<ElementFactory>> {
        &self.element_loader
    }

    /// Returns the display-group implementation loader.
    pub fn display_group_loader(&self) -> &Arc<PluginLoader<DisplayGroupFactory>> {
        &self.display_group_loader
    }
}
