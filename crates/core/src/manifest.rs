//! Dependency graph handed over by the build.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use servicescope_api::{Artifact, DependencyCoordinate};
use std::path::Path;

/// `{"artifacts": [{"group", "name", "version", "location"}]}`
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyManifest {
    pub artifacts: Vec<Artifact>,
}

impl DependencyManifest {
    /// Reads a manifest; relative locations resolve against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut manifest: DependencyManifest = serde_json::from_str(&content)?;

        if let Some(base) = path.parent() {
            for artifact in &mut manifest.artifacts {
                if artifact.location.is_relative() {
                    artifact.location = base.join(&artifact.location);
                }
            }
        }
        Ok(manifest)
    }

    pub fn coordinates(&self) -> Vec<DependencyCoordinate> {
        self.artifacts.iter().map(|a| a.coordinate.clone()).collect()
    }
}
