use clap::Parser;

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant for traffic management, traffic rules, and fines in India. Provide accurate, helpful information about traffic laws, violations, emergency procedures, and general traffic guidance.";

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Remote Completion Args ---
    /// Provider used when no static rule answers a message (openai, groq, deepseek, xai)
    #[arg(long, env = "CHAT_LLM_TYPE", default_value = "openai")]
    pub chat_llm_type: String,

    /// Base URL for the completion provider (e.g., https://api.openai.com)
    #[arg(long, env = "CHAT_BASE_URL")] // No default, let the client pick the provider default
    pub chat_base_url: Option<String>,

    /// API key for the completion provider. Leave empty to run on canned replies only.
    #[arg(long, env = "CHAT_API_KEY", default_value = "")]
    pub chat_api_key: String,

    /// Model name for chat completion (e.g., gpt-3.5-turbo)
    #[arg(long, env = "CHAT_MODEL")]
    pub chat_model: Option<String>,

    /// Upper bound on completion length.
    #[arg(long, env = "CHAT_MAX_TOKENS", default_value = "500")]
    pub chat_max_tokens: u32,

    /// Sampling temperature sent with each completion request.
    #[arg(long, env = "CHAT_TEMPERATURE", default_value = "0.7")]
    pub chat_temperature: f32,

    /// Seconds to wait for the provider before answering with the help text instead.
    #[arg(long, env = "CHAT_TIMEOUT_SECS", default_value = "15")]
    pub chat_timeout_secs: u64,

    /// System prompt placed ahead of the conversation in every completion request.
    #[arg(long, env = "SYSTEM_PROMPT", default_value = DEFAULT_SYSTEM_PROMPT)]
    pub system_prompt: String,

    // --- Server Args ---
    /// Host address and port for the WebSocket server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:4000")]
    pub server_addr: String,

    /// Port for the HTTP JSON API. The API is not started when unset.
    #[arg(long, env = "HTTP_PORT")]
    pub http_port: Option<u16>,

    /// Optional API Key required for clients to connect to the WebSocket server. If set, clients must provide this key.
    #[arg(long, env = "SERVER_API_KEY")]
    pub server_api_key: Option<String>,

    /// Optional path to the TLS certificate file (PEM format) for enabling WSS/HTTPS. Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format) for enabling WSS/HTTPS. Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse_without_any_flags() {
        let args = Args::try_parse_from(["traffix-assistant"]).unwrap();
        assert_eq!(args.chat_llm_type, "openai");
        assert_eq!(args.chat_max_tokens, 500);
        assert_eq!(args.chat_timeout_secs, 15);
        assert_eq!(args.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(args.http_port, None);
        assert!(!args.enable_tls);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "traffix-assistant",
            "--chat-llm-type",
            "groq",
            "--http-port",
            "8080",
            "--chat-timeout-secs",
            "3",
        ]).unwrap();
        assert_eq!(args.chat_llm_type, "groq");
        assert_eq!(args.http_port, Some(8080));
        assert_eq!(args.chat_timeout_secs, 3);
    }
}
