//! Default decorator chains and type classification.
//!
//! The chains built here encode wrapping order: a `Prepend` placement makes
//! a decorator's output precede the element block in the rendered result
//! even though it sits later in the chain. Preserve placements exactly when
//! changing these chains — registration order alone does not describe the
//! output.

use crate::decorator::{names, Decorator, Placement};
use crate::element::Element;
use crate::form::Form;
use crate::hooks::{
    ElementDecorationEvent, FormHooks, AFTER_ELEMENT_DEFAULT_DECORATORS,
    BEFORE_ELEMENT_DEFAULT_DECORATORS,
};

/// The default form-level chain, outermost wrapping last.
pub(crate) fn default_form_decorators() -> Vec<Decorator> {
    vec![
        Decorator::new(names::FORM_ELEMENTS),
        Decorator::new(names::HTML_TAG).tag("div").class("form-elements"),
        Decorator::new(names::FORM_MESSAGES).placement(Placement::Prepend),
        Decorator::new(names::FORM_ERRORS).placement(Placement::Prepend),
        Decorator::new(names::DESCRIPTION)
            .placement(Placement::Prepend)
            .class("form-description"),
        Decorator::new(names::FORM_TITLE)
            .placement(Placement::Prepend)
            .tag("h3"),
        Decorator::new(names::FORM_WRAPPER).tag("div"),
        Decorator::new(names::FORM_CONTAINER).tag("div"),
        Decorator::new(names::FORM),
    ]
}

/// Attaches the default decorator chain to an element.
///
/// An explicit extension point: callers assembling elements invoke this
/// themselves. The before event is emitted before any default decorator is
/// attached and the after event once all four are, with the same payload
/// shape, so listeners can contribute decorators on either side of the
/// defaults.
pub fn add_default_decorators(element: &mut Element, hooks: &FormHooks) {
    let element_id = element.fully_qualified_name();
    tracing::debug!(element = %element_id, "attaching default element decorators");

    // The element travels through the event payload and is restored after
    // the last emission.
    let mut event = ElementDecorationEvent {
        element: std::mem::take(element),
        element_id: element_id.clone(),
    };
    hooks
        .element_decoration
        .emit(BEFORE_ELEMENT_DEFAULT_DECORATORS, &mut event);

    event
        .element
        .add_decorator(
            Decorator::new(names::DESCRIPTION)
                .tag("p")
                .class("description")
                .placement(Placement::Prepend),
        )
        .add_decorator(
            Decorator::new(names::HTML_TAG)
                .tag("div")
                .id(format!("{element_id}-element"))
                .class("form-element"),
        )
        .add_decorator(
            Decorator::new(names::LABEL)
                .tag("div")
                .id(format!("{element_id}-label"))
                .class("form-label"),
        )
        .add_decorator(
            Decorator::new(names::HTML_TAG_2)
                .tag("div")
                .id(format!("{element_id}-wrapper"))
                .class("form-wrapper"),
        );

    hooks
        .element_decoration
        .emit(AFTER_ELEMENT_DEFAULT_DECORATORS, &mut event);

    *element = event.element;
}

/// Appends an `element-type-*` class to every element of the form.
///
/// The type token is the lowercase final segment of the element's type tag.
/// Existing classes are preserved and the append skips tokens already
/// present, so repeated calls do not accumulate duplicates.
pub fn set_form_element_type_classes(form: &mut Form) {
    for element in form.elements_mut() {
        let token = format!("element-type-{}", element.type_tag());
        element.add_class(&token);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::FormEnv;
    use crate::element::ElementOptions;
    use crate::form::FormOptions;

    fn decorator_names(element: &Element) -> Vec<&str> {
        element.decorators().iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn test_element_default_chain_order() {
        let mut element = Element::new("email", "Text");
        add_default_decorators(&mut element, &FormHooks::new());
        assert_eq!(
            decorator_names(&element),
            vec!["Description", "HtmlTag", "Label", "HtmlTag2"]
        );
    }

    #[test]
    fn test_element_default_chain_options() {
        let mut element = Element::new("email", "Text");
        add_default_decorators(&mut element, &FormHooks::new());

        let description = &element.decorators()[0];
        assert_eq!(description.tag.as_deref(), Some("p"));
        assert_eq!(description.class.as_deref(), Some("description"));
        assert_eq!(description.placement, Placement::Prepend);

        let wrapper = &element.decorators()[1];
        assert_eq!(wrapper.id.as_deref(), Some("email-element"));
        assert_eq!(wrapper.class.as_deref(), Some("form-element"));
        assert_eq!(wrapper.placement, Placement::Append);

        let label = &element.decorators()[2];
        assert_eq!(label.id.as_deref(), Some("email-label"));
        assert_eq!(label.class.as_deref(), Some("form-label"));

        let outer = &element.decorators()[3];
        assert_eq!(outer.id.as_deref(), Some("email-wrapper"));
        assert_eq!(outer.class.as_deref(), Some("form-wrapper"));
    }

    #[test]
    fn test_element_ids_use_group_qualifier() {
        let mut element = Element::new("email", "Text");
        element.set_belongs_to(Some("profile".to_string()));
        add_default_decorators(&mut element, &FormHooks::new());

        assert_eq!(
            element.decorators()[1].id.as_deref(),
            Some("profile-email-element")
        );
        assert_eq!(
            element.decorators()[3].id.as_deref(),
            Some("profile-email-wrapper")
        );
    }

    #[test]
    fn test_before_event_fires_before_defaults() {
        let hooks = FormHooks::new();
        hooks
            .element_decoration
            .hook(BEFORE_ELEMENT_DEFAULT_DECORATORS)
            .connect(
                "observe",
                Arc::new(|event: &mut ElementDecorationEvent| {
                    assert_eq!(event.element.decorators().len(), 0);
                    assert_eq!(event.element_id, "email");
                    event.element.add_decorator(Decorator::new("ViewHelper"));
                }),
            );

        let mut element = Element::new("email", "Text");
        add_default_decorators(&mut element, &hooks);
        assert_eq!(
            decorator_names(&element),
            vec!["ViewHelper", "Description", "HtmlTag", "Label", "HtmlTag2"]
        );
    }

    #[test]
    fn test_after_event_fires_after_defaults() {
        let hooks = FormHooks::new();
        hooks
            .element_decoration
            .hook(AFTER_ELEMENT_DEFAULT_DECORATORS)
            .connect(
                "observe",
                Arc::new(|event: &mut ElementDecorationEvent| {
                    assert_eq!(event.element.decorators().len(), 4);
                    event.element.add_decorator(Decorator::new("Tooltip"));
                }),
            );

        let mut element = Element::new("email", "Text");
        add_default_decorators(&mut element, &hooks);
        assert_eq!(element.decorators().len(), 5);
        assert_eq!(element.decorators()[4].name, "Tooltip");
    }

    #[test]
    fn test_event_payload_carries_qualified_id() {
        let hooks = FormHooks::new();
        hooks
            .element_decoration
            .hook(BEFORE_ELEMENT_DEFAULT_DECORATORS)
            .connect(
                "observe",
                Arc::new(|event: &mut ElementDecorationEvent| {
                    assert_eq!(event.element_id, "profile-email");
                }),
            );

        let mut element = Element::new("email", "Text");
        element.set_belongs_to(Some("profile".to_string()));
        add_default_decorators(&mut element, &hooks);
    }

    #[test]
    fn test_type_classes_applied_to_all_elements() {
        let env = Arc::new(FormEnv::new());
        let mut form = Form::new(FormOptions::new(env));
        form.add_new_element("Text", "username", ElementOptions::new())
            .unwrap();
        form.add_new_element("Textarea", "bio", ElementOptions::new())
            .unwrap();

        set_form_element_type_classes(&mut form);
        assert_eq!(
            form.element("username").unwrap().class(),
            Some("element-type-text")
        );
        assert_eq!(
            form.element("bio").unwrap().class(),
            Some("element-type-textarea")
        );
    }

    #[test]
    fn test_type_classes_preserve_existing_classes() {
        let env = Arc::new(FormEnv::new());
        let mut form = Form::new(FormOptions::new(env));
        form.add_new_element(
            "Text",
            "username",
            ElementOptions::new().with("class", "wide"),
        )
        .unwrap();

        set_form_element_type_classes(&mut form);
        assert_eq!(
            form.element("username").unwrap().class(),
            Some("wide element-type-text")
        );
    }

    #[test]
    fn test_type_classes_use_last_type_segment() {
        let env = Arc::new(FormEnv::new());
        let mut form = Form::new(FormOptions::new(env));
        form.add_element(Element::new("bio", "Text_Box")).unwrap();

        set_form_element_type_classes(&mut form);
        assert_eq!(form.element("bio").unwrap().class(), Some("element-type-box"));
    }

    #[test]
    fn test_type_classes_are_idempotent() {
        let env = Arc::new(FormEnv::new());
        let mut form = Form::new(FormOptions::new(env));
        form.add_new_element("Text", "username", ElementOptions::new())
            .unwrap();

        set_form_element_type_classes(&mut form);
        set_form_element_type_classes(&mut form);
        assert_eq!(
            form.element("username").unwrap().class(),
            Some("element-type-text")
        );
    }

    #[test]
    fn test_form_convenience_method() {
        let env = Arc::new(FormEnv::new());
        let mut form = Form::new(FormOptions::new(env));
        form.add_new_element("Checkbox", "agree", ElementOptions::new())
            .unwrap();
        form.set_element_type_classes();
        assert_eq!(
            form.element("agree").unwrap().class(),
            Some("element-type-checkbox")
        );
    }
}
