//! User settings, stored as TOML in the platform config dir.
//!
//! ```toml
//! decimal_precision = 2
//! currency = "EUR"
//! currency_symbol = "€"
//! show_currency = true
//! show_line_numbers = true
//! include_formulas = true
//! history_limit = 50
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, TallyError};
use crate::format::currency_symbol;
use crate::history::DEFAULT_HISTORY_LIMIT;

const MAX_DECIMAL_PRECISION: usize = 12;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub decimal_precision: usize,
    pub currency: String,
    pub currency_symbol: String,
    /// Show results converted to `currency`, prefixed with `currency_symbol`.
    pub show_currency: bool,
    pub show_line_numbers: bool,
    /// Keep `=...` formulas in plain-text exports.
    pub include_formulas: bool,
    pub history_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            decimal_precision: 2,
            currency: "USD".to_string(),
            currency_symbol: "$".to_string(),
            show_currency: false,
            show_line_numbers: true,
            include_formulas: true,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl Settings {
    /// `config.toml` in the user's config directory, if one can be determined.
    pub fn default_path() -> Option<PathBuf> {
        let proj = ProjectDirs::from("", "", "tally")?;
        let mut path = proj.config_dir().to_path_buf();
        path.push("config.toml");
        Some(path)
    }

    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Settings> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }
        let content = fs::read_to_string(path)?;
        let settings = Self::from_toml(&content)?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn from_toml(content: &str) -> Result<Settings> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| TallyError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Switch currency, picking up its symbol.
    pub fn set_currency(&mut self, code: &str) {
        self.currency = code.to_ascii_uppercase();
        self.currency_symbol = currency_symbol(&self.currency).to_string();
    }

    pub fn validate(&self) -> Result<()> {
        if self.decimal_precision > MAX_DECIMAL_PRECISION {
            return Err(TallyError::Config(format!(
                "decimal_precision must be <= {}",
                MAX_DECIMAL_PRECISION
            )));
        }
        if self.history_limit == 0 {
            return Err(TallyError::Config("history_limit must be > 0".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings = Settings::from_toml("decimal_precision = 4\n").unwrap();
        assert_eq!(
            settings,
            Settings {
                decimal_precision: 4,
                ..Settings::default()
            }
        );
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(matches!(
            Settings::from_toml("decimal_precision = \"two\""),
            Err(TallyError::Toml(_))
        ));
    }

    #[test]
    fn test_out_of_range_precision() {
        assert!(matches!(
            Settings::from_toml("decimal_precision = 40"),
            Err(TallyError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("none.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut settings = Settings::default();
        settings.set_currency("eur");
        settings.show_currency = true;
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
        assert_eq!(settings.currency_symbol, "€");
    }
}
