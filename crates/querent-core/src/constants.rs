/// Querent system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Down votes at which a question pattern is classified critical.
pub const CRITICAL_DOWN_VOTES: u64 = 3;

/// Down votes at which a question pattern is classified poor.
pub const POOR_DOWN_VOTES: u64 = 2;

/// Up votes at which a question pattern is classified excellent.
pub const EXCELLENT_UP_VOTES: u64 = 3;

/// Up votes at which a question pattern is classified good.
pub const GOOD_UP_VOTES: u64 = 2;

/// Maximum number of example question/SQL pairs placed in a prompt.
pub const MAX_PROMPT_EXAMPLES: usize = 3;

/// Step actor names recorded in the resolution trail.
pub mod actors {
    pub const USER: &str = "user";
    pub const CACHE_AGENT: &str = "cache_agent";
    pub const SQL_GENERATOR: &str = "sql_generator";
    pub const EXECUTOR: &str = "executor";
}
