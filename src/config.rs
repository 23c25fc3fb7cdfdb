use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the versioned costume catalog file
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// API key for the external copy generator; absent means fallback-only mode
    #[serde(default)]
    pub generator_api_key: Option<String>,

    /// Copy generator base URL (chat-completions style endpoint)
    #[serde(default = "default_generator_api_url")]
    pub generator_api_url: String,

    /// Copy generator model name
    #[serde(default = "default_generator_model")]
    pub generator_model: String,

    /// Hard deadline for one generator call, in milliseconds
    #[serde(default = "default_generator_timeout_ms")]
    pub generator_timeout_ms: u64,

    /// Base URL used to resolve stock-photo image references
    #[serde(default = "default_image_search_url")]
    pub image_search_url: String,

    /// Placeholder image returned when a reference cannot be resolved
    #[serde(default = "default_placeholder_image_url")]
    pub placeholder_image_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_catalog_path() -> String {
    "data/catalog.json".to_string()
}

fn default_generator_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_generator_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_generator_timeout_ms() -> u64 {
    6_000
}

fn default_image_search_url() -> String {
    "https://images.unsplash.com/search".to_string()
}

fn default_placeholder_image_url() -> String {
    "https://placehold.co/600x800?text=Costume".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
