pub mod error;
pub mod loading;
pub mod models;

// Re-export commonly used types
pub use error::{ApiResult, DiscoveryError};
pub use loading::LoadingContext;
pub use models::*;
