//! User settings.
//!
//! Read from `~/.config/birthdir/config.toml`, then overridden by
//! `BIRTHDIR__*` environment variables (e.g. `BIRTHDIR__HOLIDAYS__API_KEY`).
//! Every key is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    CALENDARIFIC_BASE_URL, CALENDARIFIC_HOST, DEFAULT_ADVANCE_NOTICE_DAYS, DEFAULT_COUNTRY,
    DEFAULT_HOLIDAY_LIMIT, HOLIDAY_FETCH_TIMEOUT,
};
use crate::error::{BirthdirError, BirthdirResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where reminders are kept. Defaults to `reminders.toml` next to the config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminders_file: Option<String>,

    /// Country code passed to the holiday source.
    pub country: String,

    /// How many upcoming holidays to show.
    pub holiday_limit: usize,

    /// Alert window, in days before a birthday.
    pub advance_notice_days: u32,

    /// Default log filter when `RUST_LOG` is not set.
    pub log_level: String,

    pub holidays: HolidaySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            reminders_file: None,
            country: DEFAULT_COUNTRY.to_string(),
            holiday_limit: DEFAULT_HOLIDAY_LIMIT,
            advance_notice_days: DEFAULT_ADVANCE_NOTICE_DAYS,
            log_level: "warn".to_string(),
            holidays: HolidaySettings::default(),
        }
    }
}

/// Holiday feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HolidaySettings {
    /// RapidAPI key. Without it the built-in holidays are used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub api_host: String,
    pub base_url: String,
    pub timeout_secs: u64,
    /// Keep fetched holidays per country and year for the life of the process.
    pub cache: bool,
}

impl Default for HolidaySettings {
    fn default() -> Self {
        HolidaySettings {
            api_key: None,
            api_host: CALENDARIFIC_HOST.to_string(),
            base_url: CALENDARIFIC_BASE_URL.to_string(),
            timeout_secs: HOLIDAY_FETCH_TIMEOUT.as_secs(),
            cache: false,
        }
    }
}

impl Settings {
    pub fn config_dir() -> BirthdirResult<PathBuf> {
        Ok(dirs::config_dir()
            .ok_or_else(|| BirthdirError::Config("Could not determine config directory".into()))?
            .join("birthdir"))
    }

    pub fn config_path() -> BirthdirResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load settings from the default config path plus the environment.
    pub fn load() -> BirthdirResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load settings from `path` (which may not exist) plus the environment.
    pub fn load_from(path: &Path) -> BirthdirResult<Self> {
        let settings: Settings = config::Config::builder()
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("BIRTHDIR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| BirthdirError::Config(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> BirthdirResult<()> {
        if self.country.trim().is_empty() {
            return Err(BirthdirError::Config("country must not be empty".into()));
        }
        if self.holidays.timeout_secs == 0 {
            return Err(BirthdirError::Config(
                "holidays.timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Resolved path of the reminders file, with `~` expanded.
    pub fn reminders_path(&self) -> BirthdirResult<PathBuf> {
        match &self.reminders_file {
            Some(path) => Ok(PathBuf::from(shellexpand::tilde(path).into_owned())),
            None => Ok(Self::config_dir()?.join("reminders.toml")),
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> BirthdirResult<()> {
        let defaults = Settings::default();
        let contents = format!(
            "\
# birthdir configuration

# Where reminders are stored:
# reminders_file = \"~/.config/birthdir/reminders.toml\"

# Country for public holidays:
# country = \"{}\"

# Number of upcoming holidays to show:
# holiday_limit = {}

# Days before a birthday that it shows up in `birthdir alerts`:
# advance_notice_days = {}

# log_level = \"{}\"

# [holidays]
# api_key = \"your-rapidapi-key\"
# api_host = \"{}\"
# base_url = \"{}\"
# timeout_secs = {}
# cache = false
",
            defaults.country,
            defaults.holiday_limit,
            defaults.advance_notice_days,
            defaults.log_level,
            defaults.holidays.api_host,
            defaults.holidays.base_url,
            defaults.holidays.timeout_secs,
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                BirthdirError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| BirthdirError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
