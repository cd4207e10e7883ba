use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Group/name/version triple identifying one resolvable dependency.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyCoordinate {
    pub group: String, // e.g. "javax.servlet"
    pub name: String,  // e.g. "javax.servlet-api"
    pub version: String,
}

impl DependencyCoordinate {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// True when group and name match, whatever the version.
    pub fn is_module(&self, group: &str, name: &str) -> bool {
        self.group == group && self.name == name
    }
}

impl fmt::Display for DependencyCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}

/// A file on disk backing a coordinate (jar, or a directory of classes).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    #[serde(flatten)]
    pub coordinate: DependencyCoordinate,
    pub location: PathBuf,
}

impl Artifact {
    pub fn new(coordinate: DependencyCoordinate, location: impl Into<PathBuf>) -> Self {
        Self {
            coordinate,
            location: location.into(),
        }
    }
}

/// Selects artifacts out of a dependency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactPredicate {
    /// Group, name and version all match.
    Exact(DependencyCoordinate),
    /// Group and name match, any version.
    Module { group: String, name: String },
}

impl ArtifactPredicate {
    pub fn module(group: impl Into<String>, name: impl Into<String>) -> Self {
        ArtifactPredicate::Module {
            group: group.into(),
            name: name.into(),
        }
    }

    pub fn matches(&self, coordinate: &DependencyCoordinate) -> bool {
        match self {
            ArtifactPredicate::Exact(expected) => expected == coordinate,
            ArtifactPredicate::Module { group, name } => coordinate.is_module(group, name),
        }
    }
}

impl fmt::Display for ArtifactPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactPredicate::Exact(coordinate) => write!(f, "{coordinate}"),
            ArtifactPredicate::Module { group, name } => write!(f, "{group}:{name}:*"),
        }
    }
}
