use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkError {
    /// The counter bound was reached without finding a valid token.
    #[error("too many iterations: no valid counter up to {max_counter}")]
    TooManyIterations { max_counter: u64 },

    /// Caller cancellation or timeout stopped the search.
    #[error("work generation cancelled")]
    Cancelled,

    /// An unbounded search was asked for a difficulty no digest can meet.
    #[error("difficulty {difficulty} exceeds the {max} hex digits of the digest")]
    UnreachableDifficulty { difficulty: u8, max: usize },

    #[error("invalid pool config: {0}")]
    InvalidConfig(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("failed to start worker threads: {0}")]
    ThreadPool(String),
}
