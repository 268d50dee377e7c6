//! Embedding memoization.

mod l1_memory;

pub use l1_memory::L1MemoryCache;
