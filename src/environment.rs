use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use crate::consts::cli_consts::{API_BASE_PATH, LOCAL_SERVER_URL};

/// The HotelSat server the console talks to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Development server on this machine.
    #[default]
    Local,
    /// Any other deployment, identified by its root URL.
    Custom { server_url: String },
}

impl Environment {
    /// Returns the root URL of the server, without a trailing slash.
    pub fn server_url(&self) -> String {
        match self {
            Environment::Local => LOCAL_SERVER_URL.to_string(),
            Environment::Custom { server_url } => server_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the REST base every endpoint is resolved against.
    pub fn api_base(&self) -> String {
        format!("{}{}", self.server_url(), API_BASE_PATH)
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "" => Err(()),
            "local" => Ok(Environment::Local),
            url if url.starts_with("http://") || url.starts_with("https://") => {
                Ok(Environment::Custom {
                    server_url: trimmed.trim_end_matches('/').to_string(),
                })
            }
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { server_url } => write!(f, "{}", server_url),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, API: {}", self, self.api_base())
    }
}
