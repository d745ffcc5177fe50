use serde::Deserialize;

use crate::domain::DomainError;

/// Full application configuration: tunables plus prompt templates.
/// Loaded once at startup; nothing mutates it afterwards.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub config: Config,
    pub prompts: PromptsConfig,
}

impl AppConfig {
    /// Reads the optional YAML file named by `CONFIG_PATH`, then applies
    /// environment-variable overrides on top of it (or on the defaults).
    pub fn load() -> Result<Self, DomainError> {
        let mut app = match std::env::var("CONFIG_PATH") {
            Ok(path) => {
                let raw = std::fs::read_to_string(&path).map_err(|e| {
                    DomainError::configuration(format!("cannot read config {path}: {e}"))
                })?;
                serde_yaml::from_str(&raw).map_err(|e| {
                    DomainError::configuration(format!("invalid config {path}: {e}"))
                })?
            }
            Err(_) => Self::default(),
        };

        app.config.apply_env_overrides()?;
        Ok(app)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    pub vector_index: VectorIndexConfig,
    pub rag: RagConfig,
    pub cors: CorsConfig,
}

impl Config {
    fn apply_env_overrides(&mut self) -> Result<(), DomainError> {
        if let Ok(v) = std::env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = std::env::var("SERVER_PORT") {
            self.server.port = parse_env("SERVER_PORT", &v)?;
        }
        if let Ok(v) = std::env::var("LLM_PROVIDER") {
            self.llm.provider = v;
        }
        if let Ok(v) = std::env::var("LLM_MODEL") {
            self.llm.model = v;
        }
        if let Ok(v) = std::env::var("LLM_TEMPERATURE") {
            self.llm.temperature = parse_env("LLM_TEMPERATURE", &v)?;
        }
        if let Ok(v) = std::env::var("EMBEDDING_PROVIDER") {
            self.embedding.provider = v;
        }
        if let Ok(v) = std::env::var("EMBEDDING_MODEL") {
            self.embedding.model = v;
        }
        if let Ok(v) = std::env::var("EMBEDDING_DIMENSION") {
            self.embedding.dimension = parse_env("EMBEDDING_DIMENSION", &v)?;
        }
        if let Ok(v) = std::env::var("VECTOR_BACKEND") {
            self.vector_index.backend = v;
        }
        if let Ok(v) = std::env::var("QDRANT_URL") {
            self.vector_index.url = v;
        }
        if let Ok(v) = std::env::var("QDRANT_COLLECTION") {
            self.vector_index.collection = v;
        }
        if let Ok(v) = std::env::var("RAG_TOP_K") {
            self.rag.top_k = parse_env("RAG_TOP_K", &v)?;
        }
        if let Ok(v) = std::env::var("HISTORY_LIMIT") {
            self.rag.history_limit = parse_env("HISTORY_LIMIT", &v)?;
        }
        if let Ok(v) = std::env::var("CHUNK_SIZE") {
            self.rag.chunk_size = parse_env("CHUNK_SIZE", &v)?;
        }
        if let Ok(v) = std::env::var("CHUNK_OVERLAP") {
            self.rag.chunk_overlap = parse_env("CHUNK_OVERLAP", &v)?;
        }
        Ok(())
    }
}

fn parse_env<T>(key: &str, value: &str) -> Result<T, DomainError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| DomainError::configuration(format!("invalid {key}={value}: {e}")))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    pub temperature: f64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
        }
    }
}

/// `dimension` must match what the configured model actually produces;
/// the vector index collection is sized from it at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: String,
    pub model: String,
    pub dimension: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "hashed".to_string(),
            model: "text-embedding-3-small".to_string(),
            dimension: 384,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VectorIndexConfig {
    pub backend: String,
    pub url: String,
    pub collection: String,
}

impl Default for VectorIndexConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            url: "http://localhost:6334".to_string(),
            collection: "document_chunks".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    pub top_k: usize,
    pub history_limit: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            history_limit: 10,
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    /// System instruction used when retrieval produced context. The
    /// `{context}` placeholder is replaced with the joined chunk texts.
    pub context_system: String,
    /// System instruction used when no context was retrieved.
    pub general_system: String,
    /// Label prefixed to the degraded context-echo reply.
    pub fallback_label: String,
    /// Fixed reply when the model is unavailable and no context exists.
    pub unconfigured_reply: String,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            context_system: "You are a helpful AI assistant. Use the following context from \
                             uploaded documents to answer the user's question. If the context \
                             doesn't contain relevant information, you can use your general \
                             knowledge.\n\nContext from documents:\n{context}\n\nProvide a \
                             helpful and accurate response based on the context and \
                             conversation history."
                .to_string(),
            general_system: "You are a helpful AI assistant. Provide accurate and helpful \
                             responses to user questions."
                .to_string(),
            fallback_label: "Based on the uploaded documents, here is the most relevant \
                             information:"
                .to_string(),
            unconfigured_reply: "The language model is not configured right now. Set \
                                 LLM_PROVIDER and the matching API key to enable generated \
                                 responses."
                .to_string(),
        }
    }
}
