pub use servicescope_api::DiscoveryError;

pub type Result<T> = std::result::Result<T, DiscoveryError>;
