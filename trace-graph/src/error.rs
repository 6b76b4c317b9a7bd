/// Error type for configuration and file loading.
///
/// Graph operations themselves never fail: degenerate input resolves to an
/// inert node or an unchanged state instead.
#[derive(Debug, thiserror::Error)]
pub enum TraceGraphError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for trace graph configuration
pub type Result<T> = std::result::Result<T, TraceGraphError>;
