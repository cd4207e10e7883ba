#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// A required dependency coordinate or artifact predicate matched nothing.
    #[error("Not found: {0}")]
    NotFound(String),
    /// A type could not be resolved or decoded inside the loading context.
    #[error("Failed to load type {type_name}: {reason}")]
    Load { type_name: String, reason: String },
    /// Metadata on a well-formed candidate could not be read.
    #[error("Failed to read service metadata from {candidate}: {reason}")]
    Extraction { candidate: String, reason: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Generator failed: {0}")]
    Generator(String),
}

impl DiscoveryError {
    pub fn load(type_name: impl Into<String>, reason: impl ToString) -> Self {
        DiscoveryError::Load {
            type_name: type_name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn extraction(candidate: impl Into<String>, reason: impl ToString) -> Self {
        DiscoveryError::Extraction {
            candidate: candidate.into(),
            reason: reason.to_string(),
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, DiscoveryError>;
