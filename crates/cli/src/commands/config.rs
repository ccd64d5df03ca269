//! Configuration commands

use anyhow::{Context, Result, bail};
use heroes_core::Config;
use std::path::{Path, PathBuf};

/// Show the effective configuration and where it came from
pub fn cmd_config_show(config: &Config, explicit: Option<&Path>) -> Result<()> {
  match explicit {
    Some(path) => println!("Using config: {:?}", path),
    None => match Config::user_config_path() {
      Some(path) if path.exists() => println!("Using user config: {:?}", path),
      _ => println!("Using default configuration (no config file found)"),
    },
  }
  println!();

  let toml_str = config.to_toml().context("Failed to render config")?;
  println!("{}", toml_str);
  Ok(())
}

/// Print the user config path
pub fn cmd_config_path() -> Result<()> {
  let path = Config::user_config_path().context("Could not determine user config path")?;
  println!("{}", path.display());
  Ok(())
}

/// Write the commented default config to `target` or the user config path
pub fn cmd_config_init(target: Option<PathBuf>, force: bool) -> Result<()> {
  let path = match target {
    Some(path) => path,
    None => Config::user_config_path().context("Could not determine user config path")?,
  };

  write_template(&path, force)?;
  println!("Created config: {:?}", path);
  Ok(())
}

fn write_template(path: &Path, force: bool) -> Result<()> {
  if path.exists() && !force {
    bail!("Config file already exists: {:?} (use --force to overwrite)", path);
  }

  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).with_context(|| format!("Failed to create {:?}", parent))?;
  }

  std::fs::write(path, Config::generate_template()).with_context(|| format!("Failed to write {:?}", path))?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_write_template_is_loadable() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("nested").join("config.toml");

    write_template(&path, false).unwrap();
    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.search.debounce_ms, 300);
  }

  #[test]
  fn test_write_template_refuses_overwrite_without_force() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[search]\ndebounce_ms = 50\n").unwrap();

    assert!(write_template(&path, false).is_err());
    assert_eq!(Config::load_from(&path).unwrap().search.debounce_ms, 50);

    write_template(&path, true).unwrap();
    assert_eq!(Config::load_from(&path).unwrap().search.debounce_ms, 300);
  }
}
