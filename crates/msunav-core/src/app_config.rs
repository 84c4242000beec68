use std::path::PathBuf;

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

/// Runtime settings for the Navigator client and the CLI front end.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Root of the Navigator API; endpoint paths are joined onto it.
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// JSON file holding the last search for the `recent` command.
    pub state_path: PathBuf,
}
