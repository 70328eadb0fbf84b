pub mod chat;
use serde::{ Deserialize, Serialize };
use std::str::FromStr;
use std::fmt;
use thiserror::Error;

/// Placeholder key some deployments ship with; treated as "no credential".
pub const PLACEHOLDER_API_KEY: &str = "mock-key";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmType {
    OpenAI,
    Groq,
    DeepSeek,
    XAI,
}

impl LlmType {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            LlmType::OpenAI => "https://api.openai.com",
            LlmType::Groq => "https://api.groq.com/openai",
            LlmType::DeepSeek => "https://api.deepseek.com",
            LlmType::XAI => "https://api.x.ai",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LlmType::OpenAI => "gpt-3.5-turbo",
            LlmType::Groq => "llama-3.1-8b-instant",
            LlmType::DeepSeek => "deepseek-chat",
            LlmType::XAI => "grok-2-latest",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LlmType::OpenAI => "OpenAI",
            LlmType::Groq => "Groq",
            LlmType::DeepSeek => "DeepSeek",
            LlmType::XAI => "xAI",
        }
    }
}

impl fmt::Display for LlmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, PartialEq, Eq, Error)]
#[error("Invalid LLM type: '{0}'")]
pub struct ParseLlmTypeError(String);

impl FromStr for LlmType {
    type Err = ParseLlmTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(LlmType::OpenAI),
            "groq" => Ok(LlmType::Groq),
            "deepseek" => Ok(LlmType::DeepSeek),
            "xai" => Ok(LlmType::XAI),
            _ => Err(ParseLlmTypeError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    /// Non-2xx reply. `message` is the provider's own error text when it sent one.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
    },
    #[error("{0} API key is required")]
    MissingApiKey(LlmType),
    #[error("Invalid API key format: {0}")]
    InvalidApiKey(String),
    #[error("Malformed completion body: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub llm_type: LlmType,
    pub api_key: Option<String>,
    pub completion_model: Option<String>,
    pub base_url: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            llm_type: LlmType::OpenAI,
            api_key: None,
            completion_model: None,
            base_url: None,
            max_tokens: 500,
            temperature: 0.7,
        }
    }
}

impl LlmConfig {
    /// The key, if it is usable. Blank keys and the placeholder count as absent.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != PLACEHOLDER_API_KEY)
    }
}
