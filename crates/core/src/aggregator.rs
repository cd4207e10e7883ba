use servicescope_api::{DiscoveryResult, ServiceName};

/// Merges configured and discovered service names.
pub struct ServiceClassAggregator;

impl ServiceClassAggregator {
    /// Configured names first, then discovered names per type in order.
    /// The first occurrence of a name fixes its position.
    pub fn aggregate<S: AsRef<str>>(configured: &[S], per_type: &[Vec<ServiceName>]) -> DiscoveryResult {
        let mut result: DiscoveryResult = configured
            .iter()
            .filter_map(|raw| ServiceName::parse(raw.as_ref()))
            .collect();
        for discovered in per_type {
            result.extend(discovered.iter().cloned());
        }
        result
    }
}
