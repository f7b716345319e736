use std::path::PathBuf;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use tracing::warn;

use crate::output::Format;

pub const DEFAULT_OUTPUT: &str = "stat_output.csv";
pub const DEFAULT_UTC_OFFSET: &str = "+0000";
const ENV_PREFIX: &str = "STAT2CSV";

/// Run settings. Defaults, then `STAT2CSV_*` environment variables; the
/// command line overrides both.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub output: PathBuf,
    pub utc_offset: String,
    pub split_path: bool,
    pub progress: bool,
    pub format: Format,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            output: PathBuf::from(DEFAULT_OUTPUT),
            utc_offset: DEFAULT_UTC_OFFSET.to_string(),
            split_path: false,
            progress: false,
            format: Format::Csv,
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        Self::from_env(Environment::with_prefix(ENV_PREFIX)).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring {}_* environment settings", ENV_PREFIX);
            Settings::default()
        })
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("output", DEFAULT_OUTPUT)?
            .set_default("utc_offset", DEFAULT_UTC_OFFSET)?
            .set_default("split_path", false)?
            .set_default("progress", false)?
            .set_default("format", "csv")?
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}
