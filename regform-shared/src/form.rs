//! Form controller.
//!
//! Owns the four registration fields and wires the submit path (validate
//! every field) and the live-input path (validate the one field that
//! changed) to the field validators.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, trace};

use crate::models::{FieldId, Verdict};
use crate::presenter::{FieldView, show_error, show_success};
use crate::validation::{
    ValidationRules, validate_confirm_password, validate_email, validate_password,
    validate_username,
};

/// The four inputs of the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationFields<F> {
    /// `#username`
    pub username: F,
    /// `#email`
    pub email: F,
    /// `#password`
    pub password: F,
    /// `#confirm-password`
    pub confirm_password: F,
}

impl<F> RegistrationFields<F> {
    /// Build every field with `make`, stopping at the first error.
    ///
    /// # Errors
    /// Returns the first error produced by `make`.
    pub fn try_build<E>(mut make: impl FnMut(FieldId) -> Result<F, E>) -> Result<Self, E> {
        Ok(Self {
            username: make(FieldId::Username)?,
            email: make(FieldId::Email)?,
            password: make(FieldId::Password)?,
            confirm_password: make(FieldId::ConfirmPassword)?,
        })
    }

    /// Borrow the field identified by `id`.
    #[must_use]
    pub fn get(&self, id: FieldId) -> &F {
        match id {
            FieldId::Username => &self.username,
            FieldId::Email => &self.email,
            FieldId::Password => &self.password,
            FieldId::ConfirmPassword => &self.confirm_password,
        }
    }

    /// Mutably borrow the field identified by `id`.
    pub fn get_mut(&mut self, id: FieldId) -> &mut F {
        match id {
            FieldId::Username => &mut self.username,
            FieldId::Email => &mut self.email,
            FieldId::Password => &mut self.password,
            FieldId::ConfirmPassword => &mut self.confirm_password,
        }
    }
}

/// Result of validating the whole form on submit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// `true` only when every field is valid.
    pub valid: bool,
    /// Verdict of each field, in form order.
    pub verdicts: Vec<(FieldId, Verdict)>,
}

/// A field validator: validates one field, updates its feedback, and reports
/// whether it passed.
pub type FieldValidator<F> = fn(&mut FormController<F>) -> bool;

/// Validates the registration form and presents the results.
pub struct FormController<F: FieldView> {
    fields: RegistrationFields<F>,
    rules: ValidationRules,
    routes: HashMap<&'static str, FieldValidator<F>>,
}

impl<F: FieldView> FormController<F> {
    /// Create a controller over `fields` using `rules`.
    #[must_use]
    pub fn new(fields: RegistrationFields<F>, rules: ValidationRules) -> Self {
        let routes: [(&'static str, FieldValidator<F>); 4] = [
            (FieldId::Username.as_str(), Self::check_username),
            (FieldId::Email.as_str(), Self::check_email),
            (FieldId::Password.as_str(), Self::check_password),
            (
                FieldId::ConfirmPassword.as_str(),
                Self::check_confirm_password,
            ),
        ];

        Self {
            fields,
            rules,
            routes: HashMap::from(routes),
        }
    }

    /// Borrow the fields.
    #[must_use]
    pub fn fields(&self) -> &RegistrationFields<F> {
        &self.fields
    }

    /// Mutably borrow the fields, e.g. to change a value.
    pub fn fields_mut(&mut self) -> &mut RegistrationFields<F> {
        &mut self.fields
    }

    /// Rules in effect.
    #[must_use]
    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Validate the username field.
    pub fn check_username(&mut self) -> bool {
        self.check_field(FieldId::Username).valid
    }

    /// Validate the email field.
    pub fn check_email(&mut self) -> bool {
        self.check_field(FieldId::Email).valid
    }

    /// Validate the password field.
    pub fn check_password(&mut self) -> bool {
        self.check_field(FieldId::Password).valid
    }

    /// Validate the confirm-password field against the password field.
    pub fn check_confirm_password(&mut self) -> bool {
        self.check_field(FieldId::ConfirmPassword).valid
    }

    /// Validate every field and combine the verdicts.
    ///
    /// All four fields are always checked so every error is shown at once.
    pub fn submit(&mut self) -> SubmitOutcome {
        let verdicts: Vec<(FieldId, Verdict)> = FieldId::iter()
            .map(|id| (id, self.check_field(id)))
            .collect();
        let valid = verdicts.iter().all(|(_, verdict)| verdict.valid);

        debug!(valid, "form submitted");
        SubmitOutcome { valid, verdicts }
    }

    /// Validate the field whose element id is `field_id`, as live input does.
    ///
    /// Returns `None` without touching any field when the id is not part of
    /// the form.
    pub fn handle_input(&mut self, field_id: &str) -> Option<bool> {
        let Some(validator) = self.routes.get(field_id).copied() else {
            trace!(field_id, "ignoring input from unknown field");
            return None;
        };
        Some(validator(self))
    }

    /// Compute a field's verdict without presenting it.
    #[must_use]
    pub fn evaluate(&self, id: FieldId) -> Verdict {
        let value = self.fields.get(id).value();
        let result = match id {
            FieldId::Username => validate_username(&value, &self.rules),
            FieldId::Email => validate_email(&value),
            FieldId::Password => validate_password(&value),
            FieldId::ConfirmPassword => {
                validate_confirm_password(&value, &self.fields.password.value())
            }
        };
        Verdict::from(result)
    }

    fn check_field(&mut self, id: FieldId) -> Verdict {
        let verdict = self.evaluate(id);
        let field = self.fields.get_mut(id);
        match &verdict.message {
            Some(message) => show_error(field, message),
            None => show_success(field),
        }

        debug!(field = %id, valid = verdict.valid, "field validated");
        verdict
    }
}

impl<F: FieldView + std::fmt::Debug> std::fmt::Debug for FormController<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("fields", &self.fields)
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}
