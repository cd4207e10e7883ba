pub mod error;
pub mod logging;

pub mod aggregator;
pub mod classpath;
pub mod config;
pub mod extractor;
pub mod generator;
pub mod introspector;
pub mod locator;
pub mod manifest;
pub mod scanner;
pub mod version;

#[cfg(test)]
mod testing;

pub use aggregator::ServiceClassAggregator;
pub use classpath::ClasspathContext;
pub use config::{ModuleSelector, ScanProfile};
pub use error::Result;
pub use extractor::MetadataExtractor;
pub use generator::{GeneratorAction, GeneratorInvocation};
pub use introspector::TypeIntrospector;
pub use locator::ArtifactLocator;
pub use manifest::DependencyManifest;
pub use scanner::{DiscoveryRequest, ServiceScanner};
pub use version::{ArtifactVersion, VersionResolver};
