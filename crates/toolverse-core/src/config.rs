//! Process configuration and data directory management.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 3004;
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_RESULT_LIMIT: usize = 5;

/// Paths to Toolverse data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Generative service configuration (`data/genai-config.json`).
    pub genai_config_file: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates the root if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            genai_config_file: root.join("genai-config.json"),
            root,
        })
    }
}

/// Top-level Toolverse configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolverseConfig {
    /// HTTP server port.
    pub port: u16,
    /// Quiet period before a search query settles, in milliseconds.
    pub debounce_ms: u64,
    /// Maximum number of search results surfaced at once.
    pub result_limit: usize,
    /// Optional JSON file replacing the built-in catalog.
    pub catalog_file: Option<PathBuf>,
    pub data_paths: DataPaths,
}

impl ToolverseConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        Self::from_lookup(data_dir, |key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(data_dir: impl AsRef<Path>, lookup: F) -> std::io::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT);
        let debounce_ms = parse_or(&lookup, "TOOLVERSE_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS);
        let result_limit = match parse_or(&lookup, "TOOLVERSE_RESULT_LIMIT", DEFAULT_RESULT_LIMIT) {
            0 => DEFAULT_RESULT_LIMIT,
            n => n,
        };
        let catalog_file = lookup("TOOLVERSE_CATALOG")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            port,
            debounce_ms,
            result_limit,
            catalog_file,
            data_paths: DataPaths::new(data_dir)?,
        })
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}", key, raw);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ToolverseConfig::from_lookup(dir.path(), |_| None).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.result_limit, 5);
        assert!(config.catalog_file.is_none());
        assert!(config
            .data_paths
            .genai_config_file
            .ends_with("genai-config.json"));
    }

    #[test]
    fn test_overrides_and_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let env: HashMap<&str, &str> = [
            ("PORT", "8080"),
            ("TOOLVERSE_DEBOUNCE_MS", "not-a-number"),
            ("TOOLVERSE_RESULT_LIMIT", "0"),
            ("TOOLVERSE_CATALOG", "/tmp/catalog.json"),
        ]
        .into_iter()
        .collect();

        let config =
            ToolverseConfig::from_lookup(dir.path(), |k| env.get(k).map(|v| v.to_string()))
                .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.debounce_ms, DEFAULT_DEBOUNCE_MS);
        assert_eq!(config.result_limit, DEFAULT_RESULT_LIMIT);
        assert_eq!(
            config.catalog_file.as_deref(),
            Some(Path::new("/tmp/catalog.json"))
        );
    }

    #[test]
    fn test_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("data");
        let paths = DataPaths::new(&nested).unwrap();
        assert!(paths.root.is_dir());
    }
}
