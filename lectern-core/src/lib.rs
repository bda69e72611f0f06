pub mod config;
pub mod player;

pub use config::{ConfigError, PlayerConfig};
