use super::types::AnnotationValue;
use indexmap::IndexSet;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A project-authored type found to be a subtype of the base type.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateType {
    pub qualified_name: String,
    pub annotations: Vec<AnnotationValue>,
}

/// The marker attribute of one candidate, flattened to its key/value entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataAttribute {
    pub marker_name: String,
    pub entries: Vec<(String, String)>,
}

/// A trimmed, non-empty service identifier.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(into = "String", try_from = "String")]
pub struct ServiceName(String);

impl ServiceName {
    /// Trims `raw`; whitespace-only input yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Splits a comma-separated declaration, keeping token order.
    pub fn split_list(raw: &str) -> Vec<Self> {
        raw.split(',').filter_map(Self::parse).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ServiceName {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw).ok_or_else(|| format!("blank service name {raw:?}"))
    }
}

impl From<ServiceName> for String {
    fn from(name: ServiceName) -> Self {
        name.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ServiceName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ServiceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered, duplicate-free set of service names handed to the generator.
///
/// Only built by collecting names; later duplicates are dropped.
#[derive(Serialize, Debug, Clone, Default)]
#[serde(transparent)]
pub struct DiscoveryResult(IndexSet<ServiceName>);

// order matters: the generator receives names positionally
impl PartialEq for DiscoveryResult {
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().eq(other.0.iter())
    }
}

impl Eq for DiscoveryResult {}

impl FromIterator<ServiceName> for DiscoveryResult {
    fn from_iter<I: IntoIterator<Item = ServiceName>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<ServiceName> for DiscoveryResult {
    fn extend<I: IntoIterator<Item = ServiceName>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<'de> Deserialize<'de> for DiscoveryResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let names = Vec::<ServiceName>::deserialize(deserializer)?;
        Ok(names.into_iter().collect())
    }
}

impl DiscoveryResult {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, ServiceName> {
        self.0.iter()
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|n| n.to_string()).collect()
    }
}

impl<'a> IntoIterator for &'a DiscoveryResult {
    type Item = &'a ServiceName;
    type IntoIter = indexmap::set::Iter<'a, ServiceName>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
