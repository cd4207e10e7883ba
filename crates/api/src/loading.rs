//! Scoped type-loading abstraction.
//!
//! A loading context resolves type names against an ordered list of
//! locations. Implementations are created for one discovery run and dropped
//! at its end; handles never outlive the context that produced them.

use crate::error::ApiResult;
use crate::models::{AnnotationValue, TypeHandle};
use std::collections::{HashSet, VecDeque};

pub trait LoadingContext {
    /// Resolve a binary type name. `Ok(None)` means no path entry defines it.
    fn resolve_type(&self, name: &str) -> ApiResult<Option<TypeHandle>>;

    /// Every type defined directly by the first path entry, in a stable order.
    fn project_types(&self) -> ApiResult<Vec<TypeHandle>>;

    /// Whether `sub` is assignable to `base`.
    ///
    /// Supertypes that do not resolve in this context (platform types) end
    /// the walk along that branch.
    fn is_subtype(&self, sub: &TypeHandle, base: &TypeHandle) -> ApiResult<bool> {
        if sub.name == base.name {
            return Ok(true);
        }

        let mut visited = HashSet::new();
        let mut queue: VecDeque<String> = sub.supertypes().map(str::to_string).collect();
        while let Some(name) = queue.pop_front() {
            if name == base.name {
                return Ok(true);
            }
            if !visited.insert(name.clone()) {
                continue;
            }
            if let Some(parent) = self.resolve_type(&name)? {
                queue.extend(parent.supertypes().map(str::to_string));
            }
        }
        Ok(false)
    }

    /// The annotation of type `marker` attached to `ty`, if any.
    fn read_attribute(&self, ty: &TypeHandle, marker: &str) -> Option<AnnotationValue> {
        ty.annotation(marker).cloned()
    }
}
