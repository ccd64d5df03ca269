//! Logging setup for the heroes binary

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Parse log level from config string
fn parse_log_level(level: &str) -> LevelFilter {
  match level.to_lowercase().as_str() {
    "off" => LevelFilter::OFF,
    "error" => LevelFilter::ERROR,
    "warn" => LevelFilter::WARN,
    "info" => LevelFilter::INFO,
    "debug" => LevelFilter::DEBUG,
    "trace" => LevelFilter::TRACE,
    _ => LevelFilter::WARN,
  }
}

/// Initialize console logging on stderr.
///
/// The configured level is the default directive; RUST_LOG still overrides it.
pub fn init_cli_logging(level: &str) {
  let env_filter = EnvFilter::builder()
    .with_default_directive(parse_log_level(level).into())
    .from_env_lossy();

  tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_log_level() {
    assert_eq!(parse_log_level("debug"), LevelFilter::DEBUG);
    assert_eq!(parse_log_level("INFO"), LevelFilter::INFO);
    assert_eq!(parse_log_level("off"), LevelFilter::OFF);
  }

  #[test]
  fn test_unknown_level_falls_back_to_warn() {
    assert_eq!(parse_log_level("loud"), LevelFilter::WARN);
  }
}
