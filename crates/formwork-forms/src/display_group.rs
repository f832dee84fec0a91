//! Display groups — named groupings of elements rendered together.
//!
//! A [`DisplayGroup`] collects element names under a shared legend and its
//! own decorator chain. Forms build groups through a replaceable factory so
//! applications can substitute their own implementation; the default factory
//! is installed by `enable_form`.

use std::sync::Arc;

use crate::decorator::Decorator;
use crate::loader::DisplayGroupFactory;

/// A named grouping of form elements.
#[derive(Debug, Default)]
pub struct DisplayGroup {
    name: String,
    legend: Option<String>,
    members: Vec<String>,
    decorators: Vec<Decorator>,
}

impl DisplayGroup {
    /// Creates an empty display group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the group name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the legend, if set.
    pub fn legend(&self) -> Option<&str> {
        self.legend.as_deref()
    }

    /// Sets the legend.
    pub fn set_legend(&mut self, legend: impl Into<String>) {
        self.legend = Some(legend.into());
    }

    /// Returns the member element names, in insertion order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Adds a member element name. Re-adding a present name is a no-op.
    pub fn add_member(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.members.contains(&name) {
            self.members.push(name);
        }
    }

    /// Returns the group's decorator chain.
    pub fn decorators(&self) -> &[Decorator] {
        &self.decorators
    }

    /// Appends a decorator to the group's chain. Chainable.
    pub fn add_decorator(&mut self, decorator: Decorator) -> &mut Self {
        self.decorators.push(decorator);
        self
    }

    /// Returns `true` when at least one decorator is attached.
    pub fn has_decorators(&self) -> bool {
        !self.decorators.is_empty()
    }
}

/// Returns the factory building the stock [`DisplayGroup`] implementation.
pub fn default_display_group_factory() -> DisplayGroupFactory {
    Arc::new(|name| DisplayGroup::new(name))
}
