use magic_shop_core::{
    game::CELEBRATION_DELAY,
    llm_client::{DEFAULT_CHAT_MODEL, DEFAULT_TEMPERATURE, GEMINI_OPENAI_BASE},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub gemini_api_key: String,
    pub api_base: String,
    pub chat_model: String,
    pub temperature: f32,
    pub celebration_delay: Duration,
    pub log_level: Level,
    pub prompts_path: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ConfigError::MissingVar("GEMINI_API_KEY".to_string()))?;

        let api_base =
            std::env::var("LLM_API_BASE").unwrap_or_else(|_| GEMINI_OPENAI_BASE.to_string());

        let chat_model =
            std::env::var("CHAT_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string());

        let temperature = match std::env::var("TEMPERATURE") {
            Ok(raw) => {
                let value = raw.parse::<f32>().map_err(|e| {
                    ConfigError::InvalidValue("TEMPERATURE".to_string(), e.to_string())
                })?;
                if !(0.0..=2.0).contains(&value) {
                    return Err(ConfigError::InvalidValue(
                        "TEMPERATURE".to_string(),
                        format!("{} is outside 0.0..=2.0", value),
                    ));
                }
                value
            }
            Err(_) => DEFAULT_TEMPERATURE,
        };

        let celebration_delay = match std::env::var("CELEBRATION_DELAY_MS") {
            Ok(raw) => raw.parse::<u64>().map(Duration::from_millis).map_err(|e| {
                ConfigError::InvalidValue("CELEBRATION_DELAY_MS".to_string(), e.to_string())
            })?,
            Err(_) => CELEBRATION_DELAY,
        };

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let prompts_path = std::env::var("PROMPTS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./prompts"));

        Ok(Self {
            bind_address,
            gemini_api_key,
            api_base,
            chat_model,
            temperature,
            celebration_delay,
            log_level,
            prompts_path,
        })
    }
}
