// Single source of truth for all default values.

// --- Database ---
pub const DEFAULT_DB_PATH: &str = "querent.db";
pub const DEFAULT_DB_POOL_SIZE: usize = 4;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Semantic cache ---
pub const DEFAULT_COLLECTION_NAME: &str = "sql_query_cache";
pub const DEFAULT_CACHE_SIMILARITY_THRESHOLD: f64 = 0.85;
pub const DEFAULT_CACHE_BACKEND: &str = "sqlite";
pub const DEFAULT_VECTOR_STORE_PATH: &str = "querent_vectors.db";
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6333";
pub const DEFAULT_QDRANT_TIMEOUT_SECS: u64 = 10;

// --- Feedback ---
pub const DEFAULT_FEEDBACK_PATH: &str = "feedback_data.json";
pub const DEFAULT_EXAMPLE_SIMILARITY_THRESHOLD: f64 = 0.30;
pub const DEFAULT_EXAMPLE_LIMIT: usize = 3;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "tfidf";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1536;
pub const DEFAULT_L1_CACHE_SIZE: u64 = 10_000;

// --- Generation ---
pub const DEFAULT_GENERATION_MODEL: &str = "gpt-4";
pub const DEFAULT_TEMPERATURE: f32 = 0.0;

// --- Shared HTTP ---
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
