pub mod config;
pub mod error;
pub mod hero;

pub use config::{ApiConfig, Backend, Config, LogConfig, SearchConfig};
pub use error::{Error, Result};
pub use hero::{Hero, HeroId, NewHero, dedup_by_id};
