//! Configuration management

use serde::Deserialize;

use crate::session::DEFAULT_SESSION_KEY;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Local-storage key holding the cached session
    #[serde(default = "default_session_key")]
    pub session_key: String,

    /// Tracing filter used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_session_key() -> String {
    DEFAULT_SESSION_KEY.to_string()
}

fn default_log_filter() -> String {
    "ticket_desk=info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_key: default_session_key(),
            log_filter: default_log_filter(),
        }
    }
}

/// Load config: defaults, then `config.{toml,json,...}` in the platform
/// config dir, then `TICKET_DESK_*` environment variables.
#[cfg(feature = "cli")]
pub fn load_config() -> anyhow::Result<Config> {
    let config_dir = directories::ProjectDirs::from("com", "open-horizon-labs", "ticket-desk")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    load_config_from(&config_dir.join("config"))
}

/// Same as [`load_config`] with an explicit file stem.
#[cfg(feature = "cli")]
pub fn load_config_from(file_stem: &std::path::Path) -> anyhow::Result<Config> {
    let config = ::config::Config::builder()
        .set_default("session_key", DEFAULT_SESSION_KEY)?
        .set_default("log_filter", default_log_filter())?
        // Load from config file if it exists
        .add_source(::config::File::with_name(&file_stem.to_string_lossy()).required(false))
        // Override with environment variables (TICKET_DESK_SESSION_KEY, TICKET_DESK_LOG_FILTER)
        .add_source(
            ::config::Environment::with_prefix("TICKET_DESK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}
