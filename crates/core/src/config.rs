//! Configuration for the heroes client.
//!
//! Config priority: explicit path > HEROES_CONFIG_DIR > XDG_CONFIG_HOME/heroes > platform config dir > defaults

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// API Configuration
// ============================================================================

/// Which transport backs the hero service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
  /// In-process emulation of the heroes endpoint, seeded with sample heroes
  #[default]
  Memory,
  /// Real HTTP server at `base_url`
  Http,
}

impl std::str::FromStr for Backend {
  type Err = String;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "memory" | "mem" | "in-memory" => Ok(Backend::Memory),
      "http" => Ok(Backend::Http),
      _ => Err(format!("Invalid backend: {}", s)),
    }
  }
}

/// Endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
  /// Transport to use (memory or http)
  pub backend: Backend,

  /// Server origin for the http backend (default: http://localhost:3000)
  pub base_url: String,

  /// Collection path relative to the origin (default: api/heroes)
  pub heroes_path: String,

  /// Per-request timeout in seconds. Unset means requests may hang until the server answers.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timeout_secs: Option<u64>,

  /// Simulated latency for the memory backend in milliseconds (default: 0)
  pub latency_ms: u64,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      backend: Backend::Memory,
      base_url: "http://localhost:3000".to_string(),
      heroes_path: "api/heroes".to_string(),
      timeout_secs: None,
      latency_ms: 0,
    }
  }
}

impl ApiConfig {
  pub fn timeout(&self) -> Option<Duration> {
    self.timeout_secs.map(Duration::from_secs)
  }

  pub fn latency(&self) -> Duration {
    Duration::from_millis(self.latency_ms)
  }
}

// ============================================================================
// Search Configuration
// ============================================================================

/// Search-as-you-type settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
  /// Quiet window a term must survive before it is queried (default: 300)
  pub debounce_ms: u64,
}

impl Default for SearchConfig {
  fn default() -> Self {
    Self { debounce_ms: 300 }
  }
}

impl SearchConfig {
  pub fn debounce(&self) -> Duration {
    Duration::from_millis(self.debounce_ms)
  }
}

// ============================================================================
// Logging Configuration
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
  /// Log level: "off", "error", "warn", "info", "debug", "trace"
  /// Default: "warn"
  pub level: String,
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      level: "warn".to_string(),
    }
  }
}

// ============================================================================
// Main Configuration
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  #[serde(default)]
  pub api: ApiConfig,

  #[serde(default)]
  pub search: SearchConfig,

  #[serde(default)]
  pub log: LogConfig,
}

impl Config {
  /// Load config from a specific file
  pub fn load_from(path: &Path) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|source| Error::ConfigParse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Resolve and load the effective config.
  ///
  /// An explicit path must exist and parse. The user config is optional, but
  /// a user config that exists and fails to parse is still an error.
  pub fn load(explicit: Option<&Path>) -> Result<Self> {
    if let Some(path) = explicit {
      return Self::load_from(path);
    }

    match Self::user_config_path() {
      Some(path) if path.exists() => Self::load_from(&path),
      _ => Ok(Self::default()),
    }
  }

  /// Get the user-level config path
  pub fn user_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("HEROES_CONFIG_DIR") {
      return Some(PathBuf::from(path).join("config.toml"));
    }

    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
      return Some(PathBuf::from(path).join("heroes").join("config.toml"));
    }

    dirs::config_dir().map(|p: PathBuf| p.join("heroes").join("config.toml"))
  }

  /// Render the config as TOML
  pub fn to_toml(&self) -> Result<String> {
    Ok(toml::to_string_pretty(self)?)
  }

  /// Generate a commented default config file
  pub fn generate_template() -> String {
    let defaults = Self::default();
    format!(
      r#"# Heroes client configuration
# Place in ~/.config/heroes/config.toml or pass --config <path>

[api]
# Backend: memory (in-process sample data) or http
backend = "memory"

# Server origin and collection path for the http backend
base_url = "{base_url}"
heroes_path = "{heroes_path}"

# Per-request timeout in seconds (unset = wait indefinitely)
# timeout_secs = 30

# Simulated latency for the memory backend (milliseconds)
latency_ms = {latency_ms}

[search]
# Quiet window before a typed term is searched (milliseconds)
debounce_ms = {debounce_ms}

[log]
# off, error, warn, info, debug, trace (RUST_LOG overrides)
level = "{level}"
"#,
      base_url = defaults.api.base_url,
      heroes_path = defaults.api.heroes_path,
      latency_ms = defaults.api.latency_ms,
      debounce_ms = defaults.search.debounce_ms,
      level = defaults.log.level,
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.api.backend, Backend::Memory);
    assert_eq!(config.api.heroes_path, "api/heroes");
    assert_eq!(config.api.timeout(), None);
    assert_eq!(config.search.debounce(), Duration::from_millis(300));
    assert_eq!(config.log.level, "warn");
  }

  #[test]
  fn test_backend_from_str() {
    assert_eq!("http".parse::<Backend>(), Ok(Backend::Http));
    assert_eq!("Memory".parse::<Backend>(), Ok(Backend::Memory));
    assert!("grpc".parse::<Backend>().is_err());
  }

  #[test]
  fn test_load_partial_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(
      &path,
      r#"
[api]
backend = "http"
timeout_secs = 5

[search]
debounce_ms = 150
"#,
    )
    .unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();
    assert_eq!(config.api.backend, Backend::Http);
    assert_eq!(config.api.timeout(), Some(Duration::from_secs(5)));
    assert_eq!(config.api.base_url, "http://localhost:3000");
    assert_eq!(config.search.debounce_ms, 150);
  }

  #[test]
  fn test_load_missing_explicit_path_fails() {
    let temp = TempDir::new().unwrap();
    let result = Config::load(Some(temp.path().join("nope.toml").as_path()));
    assert!(matches!(result, Err(Error::Io(_))));
  }

  #[test]
  fn test_load_invalid_toml_reports_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[api\nbackend = ").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("config.toml"));
  }

  #[test]
  fn test_template_parses_to_defaults() {
    let parsed: Config = toml::from_str(&Config::generate_template()).unwrap();
    let defaults = Config::default();
    assert_eq!(parsed.api.backend, defaults.api.backend);
    assert_eq!(parsed.api.base_url, defaults.api.base_url);
    assert_eq!(parsed.search.debounce_ms, defaults.search.debounce_ms);
  }

  #[test]
  fn test_toml_roundtrip() {
    let config = Config {
      api: ApiConfig {
        backend: Backend::Http,
        base_url: "http://heroes.test".to_string(),
        timeout_secs: Some(10),
        ..Default::default()
      },
      ..Default::default()
    };

    let parsed: Config = toml::from_str(&config.to_toml().unwrap()).unwrap();
    assert_eq!(parsed.api.backend, Backend::Http);
    assert_eq!(parsed.api.base_url, "http://heroes.test");
    assert_eq!(parsed.api.timeout_secs, Some(10));
  }
}
