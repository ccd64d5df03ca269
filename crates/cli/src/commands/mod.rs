//! CLI command implementations

mod config;
mod heroes;
mod search;

pub use config::{cmd_config_init, cmd_config_path, cmd_config_show};
pub use heroes::{cmd_add, cmd_delete, cmd_get, cmd_list, cmd_update};
pub use search::cmd_search;

use client::{HeroService, HttpTransport, MemoryTransport, MessageLog, Transport};
use heroes_core::{Backend, Config};
use std::sync::Arc;
use tracing::debug;

/// Build the hero service for the configured backend
pub fn connect(config: &Config) -> HeroService {
  let api = &config.api;
  let transport: Arc<dyn Transport> = match api.backend {
    Backend::Memory => Arc::new(
      MemoryTransport::new()
        .with_collection(api.heroes_path.as_str())
        .with_latency(api.latency()),
    ),
    Backend::Http => Arc::new(
      HttpTransport::new()
        .with_url(api.base_url.as_str())
        .with_timeout(api.timeout()),
    ),
  };

  debug!("Using {} backend at {}", transport.name(), api.heroes_path);
  HeroService::new(transport, MessageLog::new()).with_heroes_path(api.heroes_path.as_str())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_connect_memory_backend_with_custom_path() {
    let mut config = Config::default();
    config.api.heroes_path = "/v2/heroes/".to_string();

    let service = connect(&config);
    assert_eq!(service.transport_name(), "memory");
    assert_eq!(service.get_heroes().await.len(), 9);
  }

  #[test]
  fn test_connect_http_backend() {
    let mut config = Config::default();
    config.api.backend = Backend::Http;

    assert_eq!(connect(&config).transport_name(), "http");
  }
}
