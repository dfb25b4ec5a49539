// Errors from loading a DetectorConfig off disk. Never produced by the
// pipeline itself -- config loading always falls back to defaults rather
// than surfacing this to a caller (see config::DetectorConfig::load_from_file),
// but the typed error is kept for callers who want `from_json`'s strict form.

use std::fmt;

use crate::error::ErrorCode;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl ErrorCode for ConfigError {
    fn code(&self) -> i32 {
        match self {
            ConfigError::Io(_) => 3001,
            ConfigError::Parse(_) => 3002,
        }
    }

    fn message(&self) -> String {
        match self {
            ConfigError::Io(err) => format!("failed to read config file: {err}"),
            ConfigError::Parse(err) => format!("failed to parse config JSON: {err}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConfigError (code {}): {}", self.code(), self.message())
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}
