pub mod coordinate;
pub mod service;
pub mod types;

pub use coordinate::*;
pub use service::*;
pub use types::*;
