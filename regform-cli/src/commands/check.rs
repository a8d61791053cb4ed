//! `check` command: validate a full form submission.

use colored::Colorize;
use shared::config::FormConfig;
use shared::form::{FormController, RegistrationFields, SubmitOutcome};
use shared::models::{FieldId, VisualState};
use shared::presenter::MemoryField;
use strum::IntoEnumIterator;
use tracing::info;

/// Raw values of the four form fields.
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Runs the submit path over `input` and prints the result.
///
/// # Returns
/// `true` when every field is valid.
///
/// # Errors
/// Returns an error if the JSON outcome cannot be serialized.
pub fn run_check(input: &FormInput, config: &FormConfig, json: bool) -> anyhow::Result<bool> {
    let (fields, outcome) = submit(input, config);
    info!(valid = outcome.valid, "form checked");

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", render_report(&fields));
    }
    Ok(outcome.valid)
}

fn submit(input: &FormInput, config: &FormConfig) -> (RegistrationFields<MemoryField>, SubmitOutcome) {
    let mut controller = FormController::new(
        RegistrationFields {
            username: MemoryField::new(input.username.as_str()),
            email: MemoryField::new(input.email.as_str()),
            password: MemoryField::new(input.password.as_str()),
            confirm_password: MemoryField::new(input.confirm_password.as_str()),
        },
        config.rules(),
    );
    let outcome = controller.submit();
    (controller.fields().clone(), outcome)
}

/// One report line per field: a status mark, the label, and the message.
pub fn render_report(fields: &RegistrationFields<MemoryField>) -> String {
    let mut report = String::new();
    for id in FieldId::iter() {
        report.push_str(&render_line(id, fields.get(id)));
        report.push('\n');
    }
    report
}

pub(crate) fn render_line(id: FieldId, field: &MemoryField) -> String {
    let mark = match field.state() {
        VisualState::Success => "✔".green(),
        VisualState::Error => "✖".red(),
        VisualState::Neutral => "·".dimmed(),
    };
    if field.message().is_empty() {
        format!("{mark} {}", id.label())
    } else {
        format!("{mark} {}: {}", id.label(), field.message())
    }
}
