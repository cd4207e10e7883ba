//! Reads service declarations out of the marker annotation.
//!
//! With the default profile a candidate declares services as
//! `@WebServlet(initParams = @WebInitParam(name = "services", value = "a.Api,b.Api"))`.

use crate::config::ScanProfile;
use crate::error::{DiscoveryError, Result};
use servicescope_api::{
    AnnotationValue, CandidateType, ElementValue, LoadingContext, MetadataAttribute, ServiceName,
    TypeHandle, TypeKind,
};

pub struct MetadataExtractor<'p> {
    profile: &'p ScanProfile,
    marker: TypeHandle,
    entry_type: TypeHandle,
}

impl<'p> MetadataExtractor<'p> {
    /// Resolves the marker and entry annotation types through `context` and
    /// checks the entry type declares both accessors. Done once per run.
    pub fn new<C: LoadingContext + ?Sized>(context: &C, profile: &'p ScanProfile) -> Result<Self> {
        let marker = Self::require(context, &profile.marker)?;
        let entry_type = Self::require(context, &profile.entry_type)?;

        for accessor in [&profile.key_accessor, &profile.value_accessor] {
            if !entry_type.declares_method(accessor) {
                return Err(DiscoveryError::load(
                    &entry_type.name,
                    format!("annotation does not declare accessor {accessor}()"),
                ));
            }
        }

        Ok(Self {
            profile,
            marker,
            entry_type,
        })
    }

    fn require<C: LoadingContext + ?Sized>(context: &C, name: &str) -> Result<TypeHandle> {
        let ty = context
            .resolve_type(name)?
            .ok_or_else(|| DiscoveryError::load(name, "not defined by any classpath entry"))?;
        if ty.kind != TypeKind::Annotation {
            return Err(DiscoveryError::load(
                name,
                format!("expected an annotation type, found {:?}", ty.kind),
            ));
        }
        Ok(ty)
    }

    fn accessor(&self, candidate: &str, entry: &AnnotationValue, accessor: &str) -> Result<String> {
        match entry.element(accessor) {
            Some(ElementValue::String(value)) => Ok(value.clone()),
            Some(other) => Err(DiscoveryError::extraction(
                candidate,
                format!("{}.{accessor}() is not a string: {other:?}", entry.type_name),
            )),
            None => Err(DiscoveryError::extraction(
                candidate,
                format!("{}.{accessor}() has no value", entry.type_name),
            )),
        }
    }

    /// The marker attribute attached to `candidate`, `None` when absent.
    pub fn read_marker(&self, candidate: &CandidateType) -> Result<Option<MetadataAttribute>> {
        let Some(marker) = candidate
            .annotations
            .iter()
            .find(|a| a.type_name == self.marker.name)
        else {
            return Ok(None);
        };

        let name = &candidate.qualified_name;
        let values: &[ElementValue] = match marker.element(&self.profile.entries_element) {
            // element left at its default `{}`
            None => &[],
            Some(ElementValue::Array(values)) => values,
            // single-element arrays may be written without braces but still compile to arrays
            Some(single @ ElementValue::Annotation(_)) => std::slice::from_ref(single),
            Some(other) => {
                return Err(DiscoveryError::extraction(
                    name,
                    format!("{}() is not an array: {other:?}", self.profile.entries_element),
                ));
            }
        };

        let mut entries = Vec::with_capacity(values.len());
        for value in values {
            let entry = match value {
                ElementValue::Annotation(entry) if entry.type_name == self.entry_type.name => entry,
                other => {
                    return Err(DiscoveryError::extraction(
                        name,
                        format!("unexpected {} entry: {other:?}", self.profile.entries_element),
                    ));
                }
            };
            let key = self.accessor(name, entry, &self.profile.key_accessor)?;
            let value = self.accessor(name, entry, &self.profile.value_accessor)?;
            entries.push((key, value));
        }

        Ok(Some(MetadataAttribute {
            marker_name: marker.type_name.clone(),
            entries,
        }))
    }

    /// Service names declared by `candidate`, in declaration order.
    pub fn extract_service_names(&self, candidate: &CandidateType) -> Result<Vec<ServiceName>> {
        let Some(attribute) = self.read_marker(candidate)? else {
            return Ok(Vec::new());
        };

        Ok(attribute
            .entries
            .iter()
            .filter(|(key, _)| *key == self.profile.services_key)
            .flat_map(|(_, value)| ServiceName::split_list(value))
            .collect())
    }
}
