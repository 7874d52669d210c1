//! Core types for clwatch: application configuration and the search URL
//! builder with its option tables.

mod app_config;
mod config;
mod error;
pub mod search;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, SearchError};
pub use search::{resolve_options, SearchRequest, StaticOption, VarOption};
