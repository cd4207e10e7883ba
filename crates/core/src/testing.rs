//! In-memory loading context for unit tests.

use crate::error::Result;
use servicescope_api::{LoadingContext, TypeDescriptor, TypeHandle};
use std::sync::Arc;

pub struct MemoryContext {
    types: Vec<TypeHandle>,
}

impl MemoryContext {
    pub fn new(types: Vec<TypeDescriptor>) -> Self {
        Self {
            types: types.into_iter().map(Arc::new).collect(),
        }
    }
}

impl LoadingContext for MemoryContext {
    fn resolve_type(&self, name: &str) -> Result<Option<TypeHandle>> {
        Ok(self.types.iter().find(|t| t.name == name).cloned())
    }

    fn project_types(&self) -> Result<Vec<TypeHandle>> {
        Ok(self.types.iter().filter(|t| t.origin == 0).cloned().collect())
    }
}
