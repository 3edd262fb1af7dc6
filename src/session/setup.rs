//! Session setup and initialization

use crate::api::{HotelApi, HotelApiClient};
use crate::config::{Config, get_config_path};
use crate::environment::Environment;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Session data for both TUI and headless modes
#[derive(Clone)]
pub struct SessionData {
    /// Client for the HotelSat backend
    pub api: Arc<dyn HotelApi>,
    /// Server the session talks to
    pub environment: Environment,
    /// Where downloads land unless a command overrides it
    pub export_dir: PathBuf,
}

impl std::fmt::Debug for SessionData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionData")
            .field("environment", &self.environment)
            .field("export_dir", &self.export_dir)
            .finish()
    }
}

/// Resolves the server and export directory, then builds the API client.
///
/// Command-line values win over the config file, which wins over the defaults.
/// A missing config file is not an error; an unreadable one is.
pub fn setup_session(
    api_url: Option<&str>,
    export_dir: Option<&Path>,
) -> Result<SessionData, Box<dyn Error>> {
    let config_path = get_config_path()?;
    let config = Config::load_or_default(&config_path)
        .map_err(|e| format!("Failed to load {}: {}", config_path.display(), e))?;
    session_from_config(&config, api_url, export_dir)
}

pub(crate) fn session_from_config(
    config: &Config,
    api_url: Option<&str>,
    export_dir: Option<&Path>,
) -> Result<SessionData, Box<dyn Error>> {
    let environment = config.resolve_environment(api_url)?;
    let export_dir = config.resolve_export_dir(export_dir);
    log::debug!(
        "Session on {:?}, exports in {}",
        environment,
        export_dir.display()
    );

    let api = HotelApiClient::new(environment.clone())?;
    Ok(SessionData {
        api: Arc::new(api),
        environment,
        export_dir,
    })
}
