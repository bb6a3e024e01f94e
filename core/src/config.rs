//! Client configuration from the environment.
//!
//! `.env` in the working directory is honoured when present.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `TODO_API_BASE_URL` | `http://localhost:5000` |
//! | `TODO_SESSION_DIR` | `<platform data dir>/todo-client` |

use std::env;
use std::path::PathBuf;

use tracing::{info, warn};

pub const API_BASE_URL_VAR: &str = "TODO_API_BASE_URL";
pub const SESSION_DIR_VAR: &str = "TODO_SESSION_DIR";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub session_dir: PathBuf,
}

impl ClientConfig {
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_base_url = match lookup(API_BASE_URL_VAR) {
            Some(url) if !url.trim().is_empty() => url.trim().to_string(),
            Some(_) => {
                warn!("{API_BASE_URL_VAR} is empty, using default: {DEFAULT_API_BASE_URL}");
                DEFAULT_API_BASE_URL.to_string()
            }
            None => {
                info!("{API_BASE_URL_VAR} not set, using default: {DEFAULT_API_BASE_URL}");
                DEFAULT_API_BASE_URL.to_string()
            }
        };

        let session_dir = lookup(SESSION_DIR_VAR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_session_dir);

        Self {
            api_base_url,
            session_dir,
        }
    }
}

fn default_session_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("todo-client")
}
