use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, validate_url,
};

pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Checks shared by every config source.
pub(crate) fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    let api_key = config.api_key().map(str::to_string);
    let api_key = validate_required_field("GEMINI_API_KEY", &api_key)?;
    validate_non_empty_string("GEMINI_API_KEY", api_key)?;
    validate_non_empty_string("model", config.model())?;
    validate_url("api_base", config.api_base())?;
    validate_range("port", config.port(), 1, u16::MAX)?;
    validate_range("timeout_secs", config.request_timeout_secs(), 1, 600)?;
    Ok(())
}

#[cfg(feature = "cli")]
mod cli {
    use super::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS};
    use crate::adapters::gemini::{DEFAULT_API_BASE, DEFAULT_MODEL};
    use crate::core::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::Validate;
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "rural-advisor")]
    #[command(about = "Financial, business, loan and government-scheme advisor API")]
    pub struct CliConfig {
        #[arg(long, default_value = DEFAULT_HOST)]
        pub host: String,

        #[arg(long, default_value_t = DEFAULT_PORT)]
        pub port: u16,

        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        pub api_key: Option<String>,

        #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
        pub model: String,

        #[arg(long, env = "GEMINI_API_BASE", default_value = DEFAULT_API_BASE)]
        pub api_base: String,

        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        pub timeout_secs: u64,

        #[arg(long, help = "JSON file mapping scheme categories to scheme names")]
        pub schemes_file: Option<String>,

        #[arg(short, long, help = "TOML config file; replaces the flags above")]
        pub config: Option<String>,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl ConfigProvider for CliConfig {
        fn host(&self) -> &str {
            &self.host
        }

        fn port(&self) -> u16 {
            self.port
        }

        fn api_key(&self) -> Option<&str> {
            self.api_key.as_deref()
        }

        fn model(&self) -> &str {
            &self.model
        }

        fn api_base(&self) -> &str {
            &self.api_base
        }

        fn request_timeout_secs(&self) -> u64 {
            self.timeout_secs
        }

        fn schemes_file(&self) -> Option<&str> {
            self.schemes_file.as_deref()
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            super::validate_provider(self)
        }
    }

}
