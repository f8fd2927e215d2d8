use serde::Deserialize;

/// Settings read from `config/*.yaml` and `APP_*` environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Interface the HTTP server binds to.
    pub address: String,
    pub port: u16,
    /// Path of the SQLite database file.
    pub database_url: String,
    /// Glob handed to tera, e.g. `templates/**/*`.
    pub templates_dir: String,
    /// Directory served under `/assets`.
    pub assets_dir: String,
    /// Signing key for flash message cookies; at least 64 bytes.
    #[serde(default)]
    pub secret_key: String,
}
