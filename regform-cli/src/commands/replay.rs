//! `replay` command: feed a timed keystroke script through the debounced
//! live validator on a virtual clock.
//!
//! Script lines look like `<ms> <field-id> <value>`. Blank lines and lines
//! starting with `#` are skipped. The value is the rest of the line and may
//! be empty.

use std::{cell::RefCell, fs, path::Path, rc::Rc, time::Duration};

use anyhow::{Context, bail};
use shared::config::FormConfig;
use shared::debounce::{Debouncer, VirtualScheduler};
use shared::form::{FormController, RegistrationFields};
use shared::models::FieldId;
use shared::presenter::MemoryField;
use tracing::debug;

use super::check::render_line;

/// One keystroke in a replay script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    /// Virtual time of the keystroke, in milliseconds.
    pub at_ms: u64,
    /// Element id of the edited field.
    pub field_id: String,
    /// Field value after the keystroke.
    pub value: String,
}

/// Parses a replay script.
///
/// # Errors
/// Returns an error naming the line when a timestamp is malformed, a field id
/// is missing, or timestamps go backwards.
pub fn parse_script(script: &str) -> anyhow::Result<Vec<InputEvent>> {
    let mut events: Vec<InputEvent> = Vec::new();

    for (index, raw) in script.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (at, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let at_ms: u64 = at
            .parse()
            .with_context(|| format!("line {line_no}: invalid timestamp `{at}`"))?;

        let rest = rest.trim_start();
        let (field_id, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        if field_id.is_empty() {
            bail!("line {line_no}: missing field id");
        }

        if let Some(previous) = events.last()
            && at_ms < previous.at_ms
        {
            bail!(
                "line {line_no}: timestamp {at_ms} is earlier than the previous event at {}",
                previous.at_ms
            );
        }

        events.push(InputEvent {
            at_ms,
            field_id: field_id.to_string(),
            value: value.trim().to_string(),
        });
    }

    Ok(events)
}

/// Replays `events` and returns one line per settled validation, prefixed
/// with the virtual time at which it ran.
pub fn replay(events: &[InputEvent], config: &FormConfig) -> Vec<String> {
    let scheduler = VirtualScheduler::new();
    let controller = Rc::new(RefCell::new(FormController::new(
        RegistrationFields::<MemoryField>::default(),
        config.rules(),
    )));
    let output = Rc::new(RefCell::new(Vec::new()));

    let debouncer = {
        let controller = Rc::clone(&controller);
        let output = Rc::clone(&output);
        let clock = scheduler.clone();
        Debouncer::new(
            scheduler.clone(),
            config.debounce_delay(),
            move |field_id: String| {
                let mut controller = controller.borrow_mut();
                let at = clock.now().as_millis();
                let line = match (controller.handle_input(&field_id), field_id.parse::<FieldId>()) {
                    (Some(_), Ok(id)) => render_line(id, controller.fields().get(id)),
                    _ => format!("ignored input from unknown field `{field_id}`"),
                };
                output.borrow_mut().push(format!("[{at:>6}ms] {line}"));
            },
        )
    };

    for event in events {
        scheduler.advance_to(Duration::from_millis(event.at_ms));
        debug!(at_ms = event.at_ms, field = %event.field_id, "replaying keystroke");

        if let Ok(id) = event.field_id.parse::<FieldId>() {
            controller
                .borrow_mut()
                .fields_mut()
                .get_mut(id)
                .set_value(event.value.as_str());
        }
        debouncer.trigger(event.field_id.clone());
    }
    scheduler.run_until_idle();

    drop(debouncer);
    output.take()
}

/// Reads, replays and prints the script at `path`.
///
/// # Errors
/// Returns an error if the script cannot be read or parsed.
pub fn run_replay(path: &Path, config: &FormConfig) -> anyhow::Result<()> {
    let script = fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    let events =
        parse_script(&script).with_context(|| format!("invalid script {}", path.display()))?;

    for line in replay(&events, config) {
        println!("{line}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(at_ms: u64, field_id: &str, value: &str) -> InputEvent {
        InputEvent {
            at_ms,
            field_id: field_id.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_parse_script() {
        let script = "# typing a username\n0 username a\n\n100 username ab\n200 confirm-password Secret 1!\n300 email\n";
        let events = parse_script(script).unwrap();
        assert_eq!(
            events,
            vec![
                event(0, "username", "a"),
                event(100, "username", "ab"),
                event(200, "confirm-password", "Secret 1!"),
                event(300, "email", ""),
            ]
        );
    }

    #[test]
    fn test_parse_script_errors() {
        let err = parse_script("soon username a").unwrap_err();
        assert!(err.to_string().contains("line 1: invalid timestamp"));

        let err = parse_script("0 username a\n10").unwrap_err();
        assert!(err.to_string().contains("line 2: missing field id"));

        let err = parse_script("100 username a\n50 username b").unwrap_err();
        assert!(err.to_string().contains("earlier than the previous event"));
    }

    #[test]
    fn test_burst_settles_once_with_latest_value() {
        let events = vec![
            event(0, "username", "v"),
            event(100, "username", "va"),
            event(200, "username", "validUser"),
        ];
        let lines = replay(&events, &FormConfig::with_defaults());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("[   700ms]"), "{}", lines[0]);
        assert!(lines[0].contains("Username"));
        assert!(!lines[0].contains("cannot be blank"));
    }

    #[test]
    fn test_pauses_settle_separately() {
        let events = vec![
            event(0, "username", "ab"),
            event(1_000, "email", "a@b.com"),
        ];
        let lines = replay(&events, &FormConfig::with_defaults());
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("[   500ms]"));
        assert!(lines[0].contains("Username must be between 3 and 25 characters long."));
        assert!(lines[1].contains("[  1500ms]"));
        assert!(lines[1].contains("Email"));
    }

    #[test]
    fn test_switching_fields_only_validates_the_last_one() {
        // The debouncer is shared by the whole form, so an edit to another
        // field within the quiet period supersedes the first one.
        let events = vec![event(0, "username", "ab"), event(100, "email", "bad")];
        let lines = replay(&events, &FormConfig::with_defaults());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Email format is invalid."));
    }

    #[test]
    fn test_unknown_field_is_reported_as_ignored() {
        let lines = replay(&[event(0, "nickname", "x")], &FormConfig::with_defaults());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("ignored input from unknown field `nickname`"));
    }

    #[test]
    fn test_configured_delay_is_used() {
        let mut config = FormConfig::with_defaults();
        config.debounce_delay_ms = 50;
        let lines = replay(&[event(10, "password", "Abcdef1!")], &config);
        assert!(lines[0].starts_with("[    60ms]"), "{}", lines[0]);
    }
}
