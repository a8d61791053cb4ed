use shared::config::FormConfig;

/// Serializes `config` in the requested format.
///
/// # Arguments
/// * `config` - The configuration to serialize.
/// * `format` - The output format ("yaml", "json" or "toml").
///
/// # Errors
/// Returns an error if the format is unsupported or serialization fails.
pub fn render_config(config: &FormConfig, format: &str) -> anyhow::Result<String> {
    let rendered = match format {
        "yaml" | "yml" => serde_yml::to_string(config)?,
        "json" => serde_json::to_string_pretty(config)?,
        "toml" => toml::to_string_pretty(config)?,
        other => anyhow::bail!("Unsupported format '{other}'. Use 'yaml', 'json' or 'toml'."),
    };
    Ok(rendered)
}

/// Prints `config` to stdout in the requested format.
///
/// # Errors
/// Returns an error if the format is unsupported or serialization fails.
pub fn print_config(config: &FormConfig, format: &str) -> anyhow::Result<()> {
    let rendered = render_config(config, format)?;
    println!("{}", rendered.trim_end());
    Ok(())
}
