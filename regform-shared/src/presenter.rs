//! Feedback presenter.
//!
//! Toggles a field's visual state and message slot. The presenter never
//! decides anything; it only renders the verdict it is handed.

use crate::models::VisualState;

/// A form field as seen by the validators and the presenter.
///
/// Implementations wrap whatever actually displays the field: a DOM input and
/// its container in the browser, or plain memory in the CLI and in tests.
pub trait FieldView {
    /// Current raw value of the input.
    fn value(&self) -> String;

    /// Apply a visual state to the field's container. `Error` and `Success`
    /// are mutually exclusive.
    fn set_visual_state(&mut self, state: VisualState);

    /// Replace the text of the field's message slot.
    fn set_message(&mut self, message: &str);
}

/// Mark `field` as invalid and show `message` in its message slot.
pub fn show_error<F: FieldView + ?Sized>(field: &mut F, message: &str) {
    field.set_visual_state(VisualState::Error);
    field.set_message(message);
}

/// Mark `field` as valid and clear its message slot.
pub fn show_success<F: FieldView + ?Sized>(field: &mut F) {
    field.set_visual_state(VisualState::Success);
    field.set_message("");
}

/// In-memory field used by the command-line front end and by tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryField {
    value: String,
    state: VisualState,
    message: String,
}

impl MemoryField {
    /// Create a field holding `value`, in the neutral state.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Replace the value, as typing into the input would.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Current visual state.
    #[must_use]
    pub fn state(&self) -> VisualState {
        self.state
    }

    /// Current message slot text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl FieldView for MemoryField {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_visual_state(&mut self, state: VisualState) {
        self.state = state;
    }

    fn set_message(&mut self, message: &str) {
        message.clone_into(&mut self.message);
    }
}
