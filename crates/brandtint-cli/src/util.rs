use std::fs;
use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::error::{CliError, Result};

/// Environment variable holding the JSON color configuration.
pub const CONFIG_ENV: &str = "BRANDTINT_CUSTOM_COLOR";

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "BRANDTINT_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";

/// Install the stderr log subscriber. Safe to call more than once.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[must_use]
pub fn config_from_env() -> Option<String> {
    std::env::var(CONFIG_ENV).ok()
}

pub fn read_config_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(CliError::invalid(format!(
            "config file does not exist: {}",
            path.display()
        )));
    }
    Ok(fs::read_to_string(path)?)
}

/// Placeholder printed for an absent slot.
pub const ABSENT: &str = "-";

#[must_use]
pub fn or_absent(value: Option<&str>) -> &str {
    value.unwrap_or(ABSENT)
}
