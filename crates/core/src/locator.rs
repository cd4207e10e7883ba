use crate::error::{DiscoveryError, Result};
use servicescope_api::{Artifact, ArtifactPredicate};

/// Maps a predicate onto the resolved dependency graph.
pub struct ArtifactLocator;

impl ArtifactLocator {
    /// First artifact in graph order satisfying `predicate`.
    pub fn locate<'a>(artifacts: &'a [Artifact], predicate: &ArtifactPredicate) -> Result<&'a Artifact> {
        artifacts
            .iter()
            .find(|artifact| predicate.matches(&artifact.coordinate))
            .ok_or_else(|| {
                DiscoveryError::NotFound(format!(
                    "cannot find required library {predicate} on classpath"
                ))
            })
    }
}
