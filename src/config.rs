//! Application configuration.

use crate::consts::cli_consts::{CONFIG_DIR_NAME, DEFAULT_EXPORT_DIR};
use crate::environment::Environment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{fs, io};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Root URL of the HotelSat server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Where exported spreadsheets and chart images are written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

impl Config {
    /// Create Config with the given settings.
    #[cfg(test)]
    pub fn new(api_url: Option<String>, export_dir: Option<PathBuf>) -> Self {
        Config {
            api_url,
            export_dir,
        }
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Loads the configuration if the file exists, falling back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, io::Error> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    pub fn save(&self, path: &Path) -> Result<(), io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Delete the configuration file. A missing file is not an error.
    pub fn clear(path: &Path) -> Result<(), io::Error> {
        if !path.ends_with("config.json") {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Path must end with config.json",
            ));
        }
        if !path.exists() {
            return Ok(());
        }
        fs::remove_file(path)
    }

    /// Resolve the server to talk to.
    ///
    /// An explicit URL (flag or environment variable) wins over the config file.
    pub fn resolve_environment(&self, explicit: Option<&str>) -> Result<Environment, String> {
        match explicit.or(self.api_url.as_deref()) {
            Some(url) => url
                .parse::<Environment>()
                .map_err(|_| format!("Invalid API URL: {}", url)),
            None => Ok(Environment::default()),
        }
    }

    /// Resolve the export directory, relative to the working directory by default.
    pub fn resolve_export_dir(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.export_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_DIR))
    }
}

/// Directory under the user's home holding the config file and logs.
pub fn get_config_dir() -> Result<PathBuf, io::Error> {
    let home_path = home::home_dir().ok_or(io::Error::new(
        io::ErrorKind::NotFound,
        "Home directory not found",
    ))?;
    Ok(home_path.join(CONFIG_DIR_NAME))
}

/// Path of the JSON configuration file.
pub fn get_config_path() -> Result<PathBuf, io::Error> {
    Ok(get_config_dir()?.join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    // Loading a saved configuration file should return the same configuration.
    fn test_load_recovers_saved_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config::new(
            Some("https://sat.example.com".to_string()),
            Some(PathBuf::from("/tmp/exports")),
        );
        config.save(&path).unwrap();

        let loaded_config = Config::load_from_file(&path).unwrap();
        assert_eq!(config, loaded_config);
    }

    #[test]
    // Saving a configuration should create directories if they don't exist.
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent_dir").join("config.json");

        let result = Config::default().save(&path);

        assert!(result.is_ok(), "Failed to save config");
        assert!(path.exists());
    }

    #[test]
    // Loading an invalid JSON file should return an error.
    fn test_load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut file = File::create(&path).unwrap();
        writeln!(file, "invalid json").unwrap();

        assert!(Config::load_from_file(&path).is_err());
    }

    #[test]
    // A missing config file yields the defaults.
    fn test_load_or_default_without_file() {
        let dir = tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_clear_refuses_foreign_paths() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "keep me").unwrap();

        assert!(Config::clear(&path).is_err());
        assert!(path.exists());
    }

    #[test]
    // The explicit URL takes precedence over the stored one.
    fn test_resolve_environment_precedence() {
        let config = Config::new(Some("https://stored.example.com".to_string()), None);

        let env = config
            .resolve_environment(Some("https://flag.example.com"))
            .unwrap();
        assert_eq!(env.server_url(), "https://flag.example.com");

        let env = config.resolve_environment(None).unwrap();
        assert_eq!(env.server_url(), "https://stored.example.com");

        let env = Config::default().resolve_environment(None).unwrap();
        assert_eq!(env, Environment::Local);

        assert!(config.resolve_environment(Some("not a url")).is_err());
    }
}
