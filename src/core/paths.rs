use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Base cmdforge config directory (~/.config/cmdforge/, %APPDATA%\cmdforge on Windows)
pub fn cmdforge() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let appdata = env::var("APPDATA").map_err(|_| {
            Error::internal_unexpected(
                "APPDATA environment variable not set on Windows".to_string(),
            )
        })?;
        Ok(PathBuf::from(appdata).join("cmdforge"))
    }

    #[cfg(not(windows))]
    {
        let home = env::var("HOME").map_err(|_| {
            Error::internal_unexpected(
                "HOME environment variable not set on Unix-like system".to_string(),
            )
        })?;
        Ok(PathBuf::from(home).join(".config").join("cmdforge"))
    }
}

/// Global cmdforge.json config file path
pub fn cmdforge_json() -> Result<PathBuf> {
    Ok(cmdforge()?.join("cmdforge.json"))
}

/// Persisted command history
pub fn history_json() -> Result<PathBuf> {
    Ok(cmdforge()?.join("history.json"))
}
