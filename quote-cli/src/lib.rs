pub mod app;
pub mod cli;
pub mod config;
pub mod logging;

pub use app::App;
pub use cli::Cli;
pub use config::{AppConfig, ConfigError};
