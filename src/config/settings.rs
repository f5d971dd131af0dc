//! User settings for sharetab

use serde::{Deserialize, Serialize};

use super::paths::SharetabPaths;
use crate::error::SharetabError;
use crate::models::{Money, Person};

/// User settings stored in `config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Symbol printed in front of amounts, empty for none
    #[serde(default)]
    pub currency_symbol: String,

    /// Subtract recorded payments before computing settlements
    #[serde(default = "default_true")]
    pub apply_recorded_payments: bool,

    /// Show names title-cased ("jane doe" as "Jane Doe")
    #[serde(default = "default_true")]
    pub title_case_names: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: String::new(),
            apply_recorded_payments: true,
            title_case_names: true,
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &SharetabPaths) -> Result<Self, SharetabError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| SharetabError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| SharetabError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SharetabPaths) -> Result<(), SharetabError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SharetabError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SharetabError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Render an amount with the configured symbol
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Render a person's name according to the display preference
    pub fn format_person(&self, person: &Person) -> String {
        if self.title_case_names {
            person.display_name()
        } else {
            person.as_str().to_string()
        }
    }

    /// Update one setting from a `key` / `value` pair given on the command line
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SharetabError> {
        match key {
            "currency_symbol" => self.currency_symbol = value.trim().to_string(),
            "apply_recorded_payments" => self.apply_recorded_payments = parse_bool(key, value)?,
            "title_case_names" => self.title_case_names = parse_bool(key, value)?,
            _ => {
                return Err(SharetabError::Config(format!(
                    "Unknown setting '{}'. Available: currency_symbol, apply_recorded_payments, title_case_names",
                    key
                )))
            }
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, SharetabError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(SharetabError::Config(format!(
            "Invalid value '{}' for {}: expected true or false",
            other, key
        ))),
    }
}
