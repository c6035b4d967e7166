use super::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS};
use crate::adapters::gemini::{DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::core::ConfigProvider;
use crate::utils::error::{AdvisorError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    pub schemes: Option<SchemesConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            json_logs: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    pub api_key: Option<String>,
    pub name: Option<String>,
    pub api_base: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemesConfig {
    pub file: Option<String>,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AdvisorError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AdvisorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GEMINI_API_KEY})；未設定的變數保留原字串
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn json_logs(&self) -> bool {
        self.server.json_logs
    }
}

impl ConfigProvider for TomlConfig {
    fn host(&self) -> &str {
        &self.server.host
    }

    fn port(&self) -> u16 {
        self.server.port
    }

    fn api_key(&self) -> Option<&str> {
        // 未替換的 ${VAR} 視為未設定
        self.model
            .api_key
            .as_deref()
            .filter(|key| !env_var_pattern().is_match(key))
    }

    fn model(&self) -> &str {
        self.model.name.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    fn api_base(&self) -> &str {
        self.model.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    fn request_timeout_secs(&self) -> u64 {
        self.model.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    fn schemes_file(&self) -> Option<&str> {
        self.schemes.as_ref().and_then(|s| s.file.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        super::validate_provider(self)
    }
}
