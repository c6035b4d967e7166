pub mod adapters;
pub mod api;
pub mod client;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::GeminiClient;
pub use crate::api::{create_router, AppState};
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::advisor::Advisor;
pub use crate::utils::error::{AdvisorError, Result};
