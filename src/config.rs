//! Settings read from a YAML configuration file
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::fs::read_to_string;
use std::io;
use std::path::{Path, PathBuf};
use log::LevelFilter;
use serde::{Serialize, Deserialize};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// All settings. Every field has a default, so a file only needs to name what it changes.
///
/// ```yaml
/// log:
///   enabled: true
///   file: arbiter.log
///   level: debug
/// display:
///   show_board: false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Logging settings
    pub log: LogSettings,
    /// Display settings for the text session
    pub display: DisplaySettings,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Turns on logging
    pub enabled: bool,
    /// The file to log to
    pub file: PathBuf,
    /// One of off, error, warn, info, debug or trace
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            enabled: false,
            file: PathBuf::from("arbiter.log"),
            level: "info".to_string(),
        }
    }
}

impl LogSettings {
    /// Returns the log level as a filter.
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        parse_level(&self.level)
    }
}

/// Display settings for the text session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Prints the board after every move
    pub show_board: bool,
    /// Labels the board with rank numbers and file letters
    pub coordinates: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            show_board: true,
            coordinates: true,
        }
    }
}

impl Settings {
    /// Reads settings from the YAML file at `path`. A missing file gives the default settings.
    pub fn load(path: &Path) -> Result<Settings, ConfigError> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let s = read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Settings::from_yaml(&s)
    }

    /// Parses settings from YAML text. Empty text gives the default settings.
    pub fn from_yaml(s: &str) -> Result<Settings, ConfigError> {
        if s.trim().is_empty() {
            return Ok(Settings::default());
        }

        let settings: Settings = serde_yaml::from_str(s)?;
        settings.log.level_filter()?;

        Ok(settings)
    }

    /// Returns the settings as YAML text.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Returns the default location of the configuration file, `~/.arbiter/config.yaml`, falling
/// back to the current directory when there's no home directory.
pub fn default_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".arbiter"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.yaml")
}

/// Parses a log level name.
pub fn parse_level(level: &str) -> Result<LevelFilter, ConfigError> {
    match level.trim().to_lowercase().as_str() {
        "off" => Ok(LevelFilter::Off),
        "error" => Ok(LevelFilter::Error),
        "warn" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        _ => Err(ConfigError::InvalidLogLevel(level.to_string())),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Errors reading the configuration
#[derive(Debug)]
pub enum ConfigError {
    /// The file couldn't be read
    Io(PathBuf, io::Error),
    /// The file isn't valid YAML, or doesn't fit the settings
    Parse(serde_yaml::Error),
    /// Unknown log level
    InvalidLogLevel(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(path, err) => write!(f, "{}: {}", path.display(), err),
            ConfigError::Parse(err) => write!(f, "invalid configuration: {}", err),
            ConfigError::InvalidLogLevel(level) => write!(f, "{}: invalid log level", level),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::InvalidLogLevel(_) => None,
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert!(!settings.log.enabled);
        assert_eq!(settings.log.file, PathBuf::from("arbiter.log"));
        assert_eq!(settings.log.level_filter().expect("valid level"), LevelFilter::Info);
        assert!(settings.display.show_board);
        assert!(settings.display.coordinates);
    }

    #[test]
    fn empty_text_gives_defaults() {
        assert_eq!(Settings::from_yaml("").expect("valid yaml"), Settings::default());
        assert_eq!(Settings::from_yaml("  \n").expect("valid yaml"), Settings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings = Settings::from_yaml("log:\n  enabled: true\n  level: debug\n")
            .expect("valid yaml");
        assert!(settings.log.enabled);
        assert_eq!(settings.log.level_filter().expect("valid level"), LevelFilter::Debug);
        assert_eq!(settings.log.file, PathBuf::from("arbiter.log"));
        assert_eq!(settings.display, DisplaySettings::default());

        let settings = Settings::from_yaml("display:\n  coordinates: false\n")
            .expect("valid yaml");
        assert!(settings.display.show_board);
        assert!(!settings.display.coordinates);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        match Settings::from_yaml("log:\n  level: loud\n") {
            Err(ConfigError::InvalidLogLevel(level)) => assert_eq!(level, "loud"),
            other => panic!("unexpected result: {:?}", other),
        }
        match Settings::from_yaml("log: [1, 2") {
            Err(ConfigError::Parse(_)) => { },
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn yaml_round_trip() {
        let mut settings = Settings::default();
        settings.log.enabled = true;
        settings.display.show_board = false;
        let yaml = settings.to_yaml().expect("serializable");
        assert_eq!(Settings::from_yaml(&yaml).expect("valid yaml"), settings);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = Path::new("this/file/does/not/exist.yaml");
        assert_eq!(Settings::load(path).expect("defaults"), Settings::default());
    }

    #[test]
    fn level_names() {
        assert_eq!(parse_level("off").expect("valid"), LevelFilter::Off);
        assert_eq!(parse_level("WARN").expect("valid"), LevelFilter::Warn);
        assert_eq!(parse_level("trace").expect("valid"), LevelFilter::Trace);
        assert!(parse_level("verbose").is_err());
    }

    #[test]
    fn default_path_ends_in_config_file() {
        let path = default_path();
        assert!(path.ends_with(".arbiter/config.yaml"));
    }
}
