use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Host address and port for the server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:4000")]
    pub server_addr: String,

    // --- Chat LLM Provider Args ---
    /// Type of LLM provider for chat completion (groq, openai, ollama)
    #[arg(long, env = "CHAT_LLM_TYPE", default_value = "groq")]
    pub chat_llm_type: String,

    /// API Key for the Chat LLM provider (required for groq and openai)
    #[arg(long, env = "CHAT_API_KEY", default_value = "")]
    pub chat_api_key: String,

    /// Base URL for the Chat LLM provider API (e.g., https://api.groq.com/openai/v1)
    #[arg(long, env = "CHAT_BASE_URL")] // No default, let adapters handle defaults if None
    pub chat_base_url: Option<String>,

    /// Model name for chat completion
    #[arg(long, env = "CHAT_MODEL")] // No default, rely on adapter defaults if None
    pub chat_model: Option<String>,

    // --- History Store Args ---
    /// Conversation history store type (memory)
    #[arg(long, env = "HISTORY_TYPE", default_value = "memory")]
    pub history_type: String,

    /// Maximum number of user/assistant turns sent to the model per
    /// request, not counting the system turn. The stored transcript is
    /// never truncated.
    #[arg(long, env = "HISTORY_WINDOW", default_value = "30")]
    pub history_window: usize,

    // --- Prompt Args ---
    /// Optional path to a plain-text file overriding the built-in system prompt.
    #[arg(long, env = "PROMPTS_PATH")]
    pub prompts_path: Option<String>,

    // --- TLS Args ---
    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,

    /// Optional path to the TLS certificate file (PEM format). Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format). Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,
}

#[cfg(test)]
impl Default for Args {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:4000".to_string(),
            chat_llm_type: "groq".to_string(),
            chat_api_key: String::new(),
            chat_base_url: None,
            chat_model: None,
            history_type: "memory".to_string(),
            history_window: 30,
            prompts_path: None,
            enable_tls: false,
            tls_cert_path: None,
            tls_key_path: None,
        }
    }
}
