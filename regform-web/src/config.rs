//! Frontend configuration module
//!
//! The browser has no config file or environment, so the tunables are baked
//! in at compile time.

use shared::config::FormConfig;

/// Frontend configuration for the registration form
#[derive(Debug, Clone)]
pub struct FrontendConfig {
    /// Form tunables resolved at build time
    pub form: FormConfig,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        let mut form = FormConfig::with_defaults();
        form.debounce_delay_ms =
            parse_delay(option_env!("REGFORM_DEBOUNCE_DELAY_MS"), form.debounce_delay_ms);
        Self { form }
    }
}

impl FrontendConfig {
    /// Create a new frontend configuration instance
    pub fn new() -> Self {
        Self::default()
    }
}

/// Parse a positive millisecond delay, falling back to `default` when the
/// value is absent, malformed, or zero.
fn parse_delay(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|delay| *delay > 0)
        .unwrap_or(default)
}
