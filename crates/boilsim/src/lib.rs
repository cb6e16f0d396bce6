pub mod config;
pub mod constants;
pub mod coupling;
pub mod error;
pub mod particles;
pub mod prelude;
pub mod simulation;
pub mod thermal;
pub mod tools;

pub use config::{get_config, reload_config};
