//! Scan profile: the type names and dependency modules discovery keys on.
//!
//! The defaults describe a Cloud Endpoints Framework project on the
//! `javax.servlet` API.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A module identified by group and any of several artifact names.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ModuleSelector {
    pub group: String,
    pub names: Vec<String>,
}

impl ModuleSelector {
    pub fn new(group: &str, names: &[&str]) -> Self {
        Self {
            group: group.to_string(),
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ScanProfile {
    /// Supertype whose project subtypes are scanned.
    pub base_type: String,
    /// Annotation carrying service declarations.
    pub marker: String,
    /// Element of the marker holding the entry array.
    pub entries_element: String,
    /// Annotation type of each entry.
    pub entry_type: String,
    pub key_accessor: String,
    pub value_accessor: String,
    /// Entry key whose value lists service classes.
    pub services_key: String,
    /// Library defining the base type.
    pub framework: ModuleSelector,
    /// Library defining the marker, resolved to its newest declared version.
    pub servlet_api: ModuleSelector,
}

impl Default for ScanProfile {
    fn default() -> Self {
        Self {
            base_type: "com.google.api.server.spi.EndpointsServlet".to_string(),
            marker: "javax.servlet.annotation.WebServlet".to_string(),
            entries_element: "initParams".to_string(),
            entry_type: "javax.servlet.annotation.WebInitParam".to_string(),
            key_accessor: "name".to_string(),
            value_accessor: "value".to_string(),
            services_key: "services".to_string(),
            framework: ModuleSelector::new("com.google.endpoints", &["endpoints-framework"]),
            servlet_api: ModuleSelector::new("javax.servlet", &["javax.servlet-api", "servlet-api"]),
        }
    }
}

impl ScanProfile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
