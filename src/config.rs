use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Server configuration, read from `QUADRANGLE_*` environment
/// variables with local-development defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub session_secret: String,
    /// When set, content lives in memory and is seeded at startup; no
    /// MongoDB required.
    pub demo_mode: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("mongodb_uri", "mongodb://localhost:27017")?
            .set_default("mongodb_database", "quadrangle")?
            .set_default("session_secret", "quadrangle-dev-secret")?
            .set_default("demo_mode", true)?
            .add_source(Environment::with_prefix("QUADRANGLE").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
