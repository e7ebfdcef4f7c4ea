//! Application configuration. Data directory, ephemeral switch.

use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Base directory for the SQLite database. Read from STOCKROOM_DATA_DIR.
    pub data_dir: Option<String>,

    /// Use the in-memory store instead of SQLite. Read from STOCKROOM_EPHEMERAL.
    #[serde(default)]
    pub ephemeral: Option<bool>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("STOCKROOM"));
        if let Ok(path) = std::env::var("STOCKROOM_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the data directory. Defaults to ./data if unset.
    pub fn data_dir_or_default(&self) -> String {
        self.data_dir.clone().unwrap_or_else(|| "./data".to_string())
    }

    /// Returns true if the in-memory store was requested.
    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral.unwrap_or(false)
    }
}
