//! DOM bindings for the registration form fields.
//!
//! Every field is an `<input>` located by id whose direct parent is the
//! field's container. The container holds a `<small>` message slot and
//! carries the `error`/`success` state classes.

use shared::errors::{FormError, FormResult};
use shared::form::RegistrationFields;
use shared::models::{FieldId, VisualState};
use shared::presenter::FieldView;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

/// Selector of the message slot inside a field container.
const MESSAGE_SLOT: &str = "small";

/// A form field backed by live DOM elements.
#[derive(Debug, Clone)]
pub struct DomField {
    input: HtmlInputElement,
    container: Element,
    message: Element,
}

impl DomField {
    /// Locate the input, container and message slot of `id` in `document`.
    ///
    /// # Errors
    /// Returns a [`FormError`] naming the first element that is missing.
    pub fn locate(document: &Document, id: FieldId) -> FormResult<Self> {
        let selector = id.selector();
        let input = document
            .query_selector(&selector)
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
            .ok_or_else(|| FormError::MissingElement {
                selector: selector.clone(),
            })?;

        let container = input
            .parent_element()
            .ok_or_else(|| FormError::MissingContainer {
                field: id.to_string(),
            })?;

        let message = container
            .query_selector(MESSAGE_SLOT)
            .ok()
            .flatten()
            .ok_or_else(|| FormError::MissingMessageSlot {
                field: id.to_string(),
            })?;

        Ok(Self {
            input,
            container,
            message,
        })
    }
}

impl FieldView for DomField {
    fn value(&self) -> String {
        self.input.value()
    }

    fn set_visual_state(&mut self, state: VisualState) {
        let classes = self.container.class_list();
        if let Err(err) = classes.remove_2("error", "success") {
            web_sys::console::warn_2(&"Failed to clear field state classes".into(), &err);
        }
        if let Some(class) = state.css_class()
            && let Err(err) = classes.add_1(class)
        {
            web_sys::console::warn_2(&"Failed to set field state class".into(), &err);
        }
    }

    fn set_message(&mut self, message: &str) {
        self.message.set_text_content(Some(message));
    }
}

/// Locate all four registration fields.
///
/// # Errors
/// Fails fast on the first field whose markup is incomplete.
pub fn locate_fields(document: &Document) -> FormResult<RegistrationFields<DomField>> {
    RegistrationFields::try_build(|id| DomField::locate(document, id))
}
