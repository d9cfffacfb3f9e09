use std::net::SocketAddr;
use std::path::PathBuf;

use crate::clock::TrackingZone;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Directory holding the persisted dataset.
    pub data_dir: PathBuf,
    /// Endpoint answering `?id=<creator>` with the creator profile.
    pub proxy_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Timezone in which calendar days are counted.
    pub zone: TrackingZone,
}
