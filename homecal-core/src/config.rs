//! Global homecal configuration.

use std::path::{Path, PathBuf};

use chrono::Weekday;
use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::color::EventColor;
use crate::error::{CoreError, CoreResult};
use crate::time;

static DEFAULT_DATA_FILE: &str = "~/.local/share/homecal/household.json";
static DEFAULT_FIRST_DAY: &str = "monday";
static DEFAULT_COLOR: &str = "#FF6750A4";

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn is_default_data_file(p: &PathBuf) -> bool {
    *p == default_data_file()
}

fn default_first_day() -> String {
    DEFAULT_FIRST_DAY.to_string()
}

fn is_default_first_day(s: &String) -> bool {
    s.eq_ignore_ascii_case(DEFAULT_FIRST_DAY)
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn is_default_color(s: &String) -> bool {
    s.eq_ignore_ascii_case(DEFAULT_COLOR)
}

/// Configuration at ~/.config/homecal/config.toml
///
/// Any key can be overridden with a `HOMECAL_` environment variable, e.g.
/// `HOMECAL_TIME_ZONE=Europe/Berlin`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HomecalConfig {
    /// Snapshot of the household's profile, events and links.
    #[serde(default = "default_data_file", skip_serializing_if = "is_default_data_file")]
    pub data_file: PathBuf,

    /// Household to open instead of the profile's own code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub household: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default = "default_first_day", skip_serializing_if = "is_default_first_day")]
    pub first_day_of_week: String,

    /// IANA zone name. The system zone is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,

    #[serde(default = "default_color", skip_serializing_if = "is_default_color")]
    pub default_color: String,
}

impl Default for HomecalConfig {
    fn default() -> Self {
        HomecalConfig {
            data_file: default_data_file(),
            household: None,
            display_name: None,
            first_day_of_week: default_first_day(),
            time_zone: None,
            default_color: default_color(),
        }
    }
}

impl HomecalConfig {
    pub fn config_path() -> CoreResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CoreError::Config("Could not determine config directory".into()))?
            .join("homecal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, writing a commented default file first if
    /// there is none.
    pub fn load() -> CoreResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` plus `HOMECAL_*` overrides. A missing file is fine.
    pub fn load_from(path: &Path) -> CoreResult<Self> {
        Self::load_with_env(path, Environment::with_prefix("HOMECAL"))
    }

    fn load_with_env(path: &Path, env: Environment) -> CoreResult<Self> {
        let config: HomecalConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(env)
            .build()
            .map_err(|e| CoreError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CoreError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save to ~/.config/homecal/config.toml
    pub fn save(&self) -> CoreResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> CoreResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CoreError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| CoreError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CoreResult<()> {
        let contents = format!(
            "\
# homecal configuration

# Where the household snapshot is kept:
# data_file = \"{DEFAULT_DATA_FILE}\"

# Open another household than your own:
# household = \"FAMILY\"

# Name shown on links and comments you share:
# display_name = \"Sam\"

# First column of the month grid:
# first_day_of_week = \"{DEFAULT_FIRST_DAY}\"

# IANA time zone; defaults to the system zone:
# time_zone = \"Europe/Berlin\"

# Color for events that have none:
# default_color = \"{DEFAULT_COLOR}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CoreError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CoreError::Config(format!("Could not write config file: {e}")))?;

        tracing::debug!(path = %path.display(), "created default config");
        Ok(())
    }

    /// The snapshot path with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_file.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// The configured zone, or the system zone when none is set.
    pub fn zone(&self) -> CoreResult<Tz> {
        match self.time_zone.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => time::parse_zone(name),
            _ => Ok(time::local_zone()),
        }
    }

    pub fn first_day_of_week(&self) -> CoreResult<Weekday> {
        self.first_day_of_week.trim().parse::<Weekday>().map_err(|_| {
            CoreError::Config(format!("Unknown weekday '{}'", self.first_day_of_week))
        })
    }

    pub fn default_color(&self) -> CoreResult<EventColor> {
        self.default_color.parse()
    }

    /// The household override, if one is set and not blank.
    pub fn household(&self) -> Option<&str> {
        self.household
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = HomecalConfig::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.first_day_of_week().unwrap(), Weekday::Mon);
        assert_eq!(config.default_color().unwrap(), EventColor::DEFAULT);
        assert_eq!(config.data_file, default_data_file());
        assert_eq!(config.household(), None);
    }

    #[test]
    fn default_file_is_all_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        HomecalConfig::create_default_config(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.lines().all(|l| l.is_empty() || l.starts_with('#')));

        let config = HomecalConfig::load_from(&path).unwrap();
        assert_eq!(config.first_day_of_week, "monday");
    }

    #[test]
    fn file_values_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "first_day_of_week = \"sunday\"\n\
             time_zone = \"Europe/Berlin\"\n\
             default_color = \"#00897B\"\n\
             household = \"  \"\n",
        )
        .unwrap();

        let config = HomecalConfig::load_from(&path).unwrap();
        assert_eq!(config.first_day_of_week().unwrap(), Weekday::Sun);
        assert_eq!(config.zone().unwrap(), chrono_tz::Europe::Berlin);
        assert_eq!(config.default_color().unwrap(), EventColor(0xFF00_897B));
        assert_eq!(config.household(), None);
    }

    #[test]
    fn bad_values_are_reported() {
        let config = HomecalConfig {
            first_day_of_week: "someday".into(),
            time_zone: Some("Mars/Olympus".into()),
            default_color: "purple".into(),
            ..HomecalConfig::default()
        };

        assert!(matches!(config.first_day_of_week(), Err(CoreError::Config(_))));
        assert!(matches!(config.zone(), Err(CoreError::InvalidZone(_))));
        assert!(matches!(config.default_color(), Err(CoreError::InvalidColor(_))));
    }

    #[test]
    fn save_skips_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = HomecalConfig {
            household: Some("FAMILY".into()),
            ..HomecalConfig::default()
        };

        config.save_to(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.trim(), "household = \"FAMILY\"");
        assert_eq!(HomecalConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "time_zone = \"Europe/Berlin\"\nfirst_day_of_week = \"sunday\"\n").unwrap();

        let mut vars = config::Map::new();
        vars.insert("HOMECAL_TIME_ZONE".to_string(), "Asia/Kolkata".to_string());
        vars.insert("HOMECAL_HOUSEHOLD".to_string(), "FAMILY".to_string());
        let env = Environment::with_prefix("HOMECAL").source(Some(vars));

        let config = HomecalConfig::load_with_env(&path, env).unwrap();
        assert_eq!(config.zone().unwrap(), chrono_tz::Asia::Kolkata);
        assert_eq!(config.household(), Some("FAMILY"));
        assert_eq!(config.first_day_of_week().unwrap(), Weekday::Sun);
    }

    #[test]
    fn data_path_expands_tilde() {
        let config = HomecalConfig::default();
        let path = config.data_path();
        assert!(!path.to_string_lossy().starts_with('~'));
        assert!(path.ends_with("household.json"));
    }
}
