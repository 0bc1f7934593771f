//! Bot settings loaded from an optional config.toml and the environment.
//!
//! Every identifier is optional. A value that is empty, non-numeric or zero is
//! logged and treated as unset, so a bad `.env` degrades features instead of
//! stopping the bot. Environment variables override the file.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_VAR: &str = "PARTNER_BUDDY_CONFIG";
/// Config file used when [`CONFIG_PATH_VAR`] is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Role allowed to use `/partnerhak`.
pub const PARTNER_ROLE_VAR: &str = "PARTNER_YETKILI_ROL_ID";
/// Channel receiving audit records.
pub const LOG_CHANNEL_VAR: &str = "LOG_CHANNEL_ID";
/// Channel receiving partnership announcements.
pub const ANNOUNCEMENT_CHANNEL_VAR: &str = "PARTNER_DUYURU_KANAL_ID";
/// Guild where commands are also registered for instant availability.
pub const DEV_GUILD_VAR: &str = "DEV_GUILD_ID";

/// Raw contents of config.toml.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    /// Partner staff role ID
    pub partner_role_id: Option<String>,
    /// Log channel ID
    pub log_channel_id: Option<String>,
    /// Announcement channel ID
    pub announcement_channel_id: Option<String>,
    /// Development guild ID
    pub dev_guild_id: Option<String>,
}

/// Resolved application configuration shared by all commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Role required to set credits; `None` means nobody may set credits
    pub partner_role_id: Option<u64>,
    /// Channel for audit records; `None` turns auditing into a warning
    pub log_channel_id: Option<u64>,
    /// Channel for announcements; `None` makes `/partner` report a configuration error
    pub announcement_channel_id: Option<u64>,
    /// Guild for instant command registration during development
    pub dev_guild_id: Option<u64>,
}

impl AppConfig {
    /// Merges file values with environment lookups, the environment winning.
    pub fn from_sources<F>(file: FileConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |key: &str, from_file: Option<String>| {
            let raw = env(key).or(from_file)?;
            parse_id(key, &raw)
        };

        Self {
            partner_role_id: pick(PARTNER_ROLE_VAR, file.partner_role_id),
            log_channel_id: pick(LOG_CHANNEL_VAR, file.log_channel_id),
            announcement_channel_id: pick(ANNOUNCEMENT_CHANNEL_VAR, file.announcement_channel_id),
            dev_guild_id: pick(DEV_GUILD_VAR, file.dev_guild_id),
        }
    }

    fn warn_about_gaps(&self) {
        if self.partner_role_id.is_none() {
            warn!("{PARTNER_ROLE_VAR} is not set; nobody can use /partnerhak");
        }
        if self.log_channel_id.is_none() {
            warn!("{LOG_CHANNEL_VAR} is not set; audit records will only be logged locally");
        }
        if self.announcement_channel_id.is_none() {
            warn!("{ANNOUNCEMENT_CHANNEL_VAR} is not set; /partner will report a configuration error");
        }
    }
}

/// Parses a Discord snowflake, returning `None` (with a warning) for anything unusable.
#[must_use]
pub fn parse_id(key: &str, raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<u64>() {
        Ok(0) => {
            warn!("{key} is 0, which is not a valid Discord ID; ignoring it");
            None
        }
        Ok(id) => Some(id),
        Err(e) => {
            warn!("{key} has invalid value {trimmed:?} ({e}); ignoring it");
            None
        }
    }
}

/// Reads and parses a config.toml file.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file {:?}: {e}", path.as_ref()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {:?}: {e}", path.as_ref()),
    })
}

/// Loads the application configuration.
///
/// An explicitly named config file must exist; the default `config.toml` is
/// skipped quietly when absent.
pub fn load_app_configuration() -> Result<AppConfig> {
    let file = match std::env::var(CONFIG_PATH_VAR) {
        Ok(path) => load_file(&path)?,
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => load_file(DEFAULT_CONFIG_PATH)?,
        Err(_) => {
            debug!("No {DEFAULT_CONFIG_PATH} found; using environment only");
            FileConfig::default()
        }
    };

    let config = AppConfig::from_sources(file, |key| std::env::var(key).ok());
    config.warn_about_gaps();
    info!(?config, "Application configuration loaded");
    Ok(config)
}
