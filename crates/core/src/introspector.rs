use crate::classpath::ClasspathContext;
use crate::error::{DiscoveryError, Result};
use servicescope_api::{Artifact, CandidateType, LoadingContext};
use std::path::Path;
use tracing::debug;

/// Finds project-authored subtypes of a base type.
pub struct TypeIntrospector {
    base_type: String,
}

impl TypeIntrospector {
    pub fn new(base_type: impl Into<String>) -> Self {
        Self {
            base_type: base_type.into(),
        }
    }

    /// Opens a context over `compiled_output` followed by `required`, scans
    /// it and releases it before returning, on success and on failure.
    pub fn discover_candidates(
        &self,
        compiled_output: &Path,
        required: &[Artifact],
    ) -> Result<Vec<CandidateType>> {
        let context = ClasspathContext::for_build(compiled_output, required)?;
        self.candidates_in(&context)
    }

    /// Candidates among the context's project types, in enumeration order.
    pub fn candidates_in<C: LoadingContext + ?Sized>(&self, context: &C) -> Result<Vec<CandidateType>> {
        let base = context.resolve_type(&self.base_type)?.ok_or_else(|| {
            DiscoveryError::load(
                &self.base_type,
                "base type is not defined by any classpath entry",
            )
        })?;

        let mut candidates = Vec::new();
        for ty in context.project_types()? {
            // only project-authored types, and never the base type itself
            if ty.origin != 0 || ty.name == base.name {
                continue;
            }
            if context.is_subtype(&ty, &base)? {
                debug!("{} extends {}", ty.name, base.name);
                candidates.push(CandidateType {
                    qualified_name: ty.name.clone(),
                    annotations: ty.annotations.clone(),
                });
            }
        }

        debug!("Found {} subtypes of {}", candidates.len(), self.base_type);
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryContext;
    use servicescope_api::{TypeDescriptor, TypeKind};

    fn class(name: &str, super_name: Option<&str>, origin: usize) -> TypeDescriptor {
        TypeDescriptor {
            name: name.to_string(),
            kind: TypeKind::Class,
            super_name: super_name.map(str::to_string),
            interfaces: vec![],
            methods: vec![],
            annotations: vec![],
            origin,
        }
    }

    #[test]
    fn test_transitive_subtypes_are_candidates() {
        let context = MemoryContext::new(vec![
            class("app.Direct", Some("lib.Base"), 0),
            class("app.Indirect", Some("app.Direct"), 0),
            class("app.Unrelated", Some("java.lang.Object"), 0),
            class("lib.Base", Some("lib.HttpServlet"), 1),
            class("lib.HttpServlet", Some("java.lang.Object"), 2),
        ]);

        let candidates = TypeIntrospector::new("lib.Base").candidates_in(&context).unwrap();
        let names: Vec<&str> = candidates.iter().map(|c| c.qualified_name.as_str()).collect();
        assert_eq!(names, vec!["app.Direct", "app.Indirect"]);
    }

    #[test]
    fn test_interfaces_count_as_supertypes() {
        let mut service = class("app.Service", Some("java.lang.Object"), 0);
        service.interfaces.push("lib.Marker".to_string());
        let mut marker = class("lib.Marker", None, 1);
        marker.kind = TypeKind::Interface;

        let context = MemoryContext::new(vec![service, marker]);
        let candidates = TypeIntrospector::new("lib.Marker").candidates_in(&context).unwrap();
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_no_subtypes_is_empty_not_error() {
        let context = MemoryContext::new(vec![
            class("app.Plain", Some("java.lang.Object"), 0),
            class("lib.Base", None, 1),
        ]);

        let candidates = TypeIntrospector::new("lib.Base").candidates_in(&context).unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_unresolvable_base_is_load_error() {
        let context = MemoryContext::new(vec![class("app.Plain", None, 0)]);
        let err = TypeIntrospector::new("lib.Base").candidates_in(&context).unwrap_err();
        match err {
            DiscoveryError::Load { type_name, .. } => assert_eq!(type_name, "lib.Base"),
            other => panic!("Expected Load error, got {other:?}"),
        }
    }

    #[test]
    fn test_supertype_cycle_terminates() {
        let context = MemoryContext::new(vec![
            class("app.A", Some("app.B"), 0),
            class("app.B", Some("app.A"), 0),
            class("lib.Base", None, 1),
        ]);

        let candidates = TypeIntrospector::new("lib.Base").candidates_in(&context).unwrap();
        assert!(candidates.is_empty());
    }
}
