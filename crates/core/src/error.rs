use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
  #[error("Config {path}: {source}")]
  ConfigParse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("Config serialize: {0}")]
  ConfigSerialize(#[from] toml::ser::Error),

  #[error("IO: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
