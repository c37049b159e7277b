use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::config::AppConfig;

/// Print the configuration `serve` would run with
pub fn handle(config_path: Option<PathBuf>, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut config = AppConfig::load(config_path.as_deref())?;

    // Secrets never reach the terminal
    if config.security.auth.jwt_secret.is_some() {
        config.security.auth.jwt_secret = Some("********".to_string());
    }
    if let Some(url) = &config.database.url {
        config.database.url = Some(crate::database::DatabaseManager::redact(url)?);
    }

    match output_format {
        OutputFormat::Yaml => print!("{}", config.to_yaml()?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
    }
    Ok(())
}
