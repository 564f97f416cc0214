//! Configuration loading and database path resolution

use crate::{Error, Result};
use std::path::PathBuf;

/// Database path resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. BREWLOG_DATABASE environment variable
/// 3. `database` key in the TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_database_path(cli_arg: Option<&str>) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Ok(PathBuf::from(path));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var("BREWLOG_DATABASE") {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = load_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(database) = config.get("database").and_then(|v| v.as_str()) {
                    return Ok(PathBuf::from(database));
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    Ok(default_data_dir().join("brewlog.db"))
}

/// Get default configuration file path for the platform
fn load_config_file() -> Result<PathBuf> {
    let config_path = if cfg!(target_os = "linux") {
        // Try ~/.config/brewlog/config.toml first, then /etc/brewlog/config.toml
        let user_config = dirs::config_dir().map(|d| d.join("brewlog").join("config.toml"));
        let system_config = PathBuf::from("/etc/brewlog/config.toml");

        if let Some(path) = user_config {
            if path.exists() {
                return Ok(path);
            }
        }
        if system_config.exists() {
            return Ok(system_config);
        }
        return Err(Error::Config("No config file found".to_string()));
    } else {
        dirs::config_dir()
            .map(|d| d.join("brewlog").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?
    };

    if config_path.exists() {
        Ok(config_path)
    } else {
        Err(Error::Config(format!(
            "Config file not found: {:?}",
            config_path
        )))
    }
}

/// Get OS-dependent default data folder path
fn default_data_dir() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/brewlog (or /var/lib/brewlog for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("brewlog"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/brewlog"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("brewlog"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/brewlog"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("brewlog"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\brewlog"))
    } else {
        PathBuf::from("./brewlog_data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_arg_takes_priority() {
        let path = resolve_database_path(Some("/tmp/override.db")).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/override.db"));
    }

    #[test]
    fn fallback_is_under_brewlog_dir() {
        // No CLI arg and (in CI) no env/config: should land on the compiled default
        if std::env::var("BREWLOG_DATABASE").is_ok() {
            return;
        }
        let path = resolve_database_path(None).unwrap();
        assert!(path.ends_with("brewlog.db") || path.to_string_lossy().contains("brewlog"));
    }
}
