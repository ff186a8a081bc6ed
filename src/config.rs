//! Configuration types.

use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the pretrained model artifacts
    /// (`surrogate_tree.json`, `forest.json`, `labels.json`).
    pub artifact_dir: PathBuf,
    /// Port for the REST API when running in serve mode.
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            artifact_dir: PathBuf::from("./artifacts"),
            port: 8080,
        }
    }
}

impl AppConfig {
    /// Build the config from environment variables, falling back to defaults.
    ///
    /// * `OBESITY_TRIAGE_ARTIFACTS` — artifact directory.
    /// * `OBESITY_TRIAGE_PORT` — REST API port.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let artifact_dir = std::env::var("OBESITY_TRIAGE_ARTIFACTS")
            .map(PathBuf::from)
            .unwrap_or(defaults.artifact_dir);
        let port = std::env::var("OBESITY_TRIAGE_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        Self { artifact_dir, port }
    }
}
