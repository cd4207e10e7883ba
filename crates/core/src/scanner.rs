//! End-to-end service class discovery for one build.

use crate::aggregator::ServiceClassAggregator;
use crate::classpath::ClasspathContext;
use crate::config::ScanProfile;
use crate::error::{DiscoveryError, Result};
use crate::extractor::MetadataExtractor;
use crate::introspector::TypeIntrospector;
use crate::locator::ArtifactLocator;
use crate::version::VersionResolver;
use servicescope_api::{Artifact, ArtifactPredicate, DependencyCoordinate, DiscoveryResult};
use std::path::PathBuf;
use tracing::{debug, info};

/// Everything one discovery run needs from the build.
#[derive(Debug, Clone)]
pub struct DiscoveryRequest {
    /// Directory holding the project's compiled classes.
    pub compiled_output: PathBuf,
    /// Resolved compile-time dependency graph.
    pub dependencies: Vec<Artifact>,
    /// Service classes set explicitly by the user.
    pub configured: Vec<String>,
}

pub struct ServiceScanner {
    profile: ScanProfile,
}

impl ServiceScanner {
    pub fn new(profile: ScanProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &ScanProfile {
        &self.profile
    }

    /// Libraries that must follow the compiled output on the loading path:
    /// the newest servlet API, then the framework.
    pub fn required_artifacts<'a>(&self, dependencies: &'a [Artifact]) -> Result<Vec<&'a Artifact>> {
        let coordinates: Vec<DependencyCoordinate> =
            dependencies.iter().map(|a| a.coordinate.clone()).collect();

        let servlet_api = &self.profile.servlet_api;
        let newest = VersionResolver::newest(&coordinates, &servlet_api.group, &servlet_api.names)?;
        debug!("Using servlet API {}", newest);
        let servlet_jar = ArtifactLocator::locate(dependencies, &ArtifactPredicate::Exact(newest.clone()))?;

        let framework = &self.profile.framework;
        let framework_jar = framework
            .names
            .iter()
            .find_map(|name| {
                ArtifactLocator::locate(dependencies, &ArtifactPredicate::module(&framework.group, name)).ok()
            })
            .ok_or_else(|| {
                DiscoveryError::NotFound(format!(
                    "cannot find required library {}:{}:* on classpath",
                    framework.group,
                    framework.names.join("|")
                ))
            })?;

        Ok(vec![servlet_jar, framework_jar])
    }

    /// Runs the full pipeline. The loading context lives only inside this call.
    pub fn discover(&self, request: &DiscoveryRequest) -> Result<DiscoveryResult> {
        let required = self.required_artifacts(&request.dependencies)?;

        let context = ClasspathContext::for_build(&request.compiled_output, required.iter().copied())?;

        let candidates = TypeIntrospector::new(&self.profile.base_type).candidates_in(&context)?;
        let per_type = if candidates.is_empty() {
            Vec::new()
        } else {
            let extractor = MetadataExtractor::new(&context, &self.profile)?;
            let mut per_type = Vec::with_capacity(candidates.len());
            for candidate in &candidates {
                let names = extractor.extract_service_names(candidate)?;
                debug!("{} declares {} services", candidate.qualified_name, names.len());
                per_type.push(names);
            }
            per_type
        };
        drop(context);

        let result = ServiceClassAggregator::aggregate(&request.configured, &per_type);
        info!(
            "Discovered {} service classes ({} configured, {} annotated servlets)",
            result.len(),
            request.configured.len(),
            candidates.len()
        );
        Ok(result)
    }
}
