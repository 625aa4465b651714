//! Error types for the config store.

/// Errors that can occur while loading or saving an orchestration config.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse/serialization error.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Agent id that cannot be used as a storage key.
    #[error("invalid agent id '{0}': use letters, digits, '-' or '_'")]
    InvalidAgentId(String),

    /// The rule set failed validation and was not written.
    #[error("fact definitions rejected: {}", .0.join("; "))]
    Rejected(Vec<String>),
}

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
