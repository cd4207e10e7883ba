//! Introspectable type descriptors produced by a loading context.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared handle to a resolved type. Only valid for the context that produced it.
pub type TypeHandle = Arc<TypeDescriptor>;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
    Annotation,
    Enum,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    /// Binary name with dots, e.g. `com.example.Outer$Inner`.
    pub name: String,
    pub kind: TypeKind,
    pub super_name: Option<String>,
    pub interfaces: Vec<String>,
    /// Names of declared methods, constructors included.
    pub methods: Vec<String>,
    /// Runtime-visible annotations attached to the type itself.
    pub annotations: Vec<AnnotationValue>,
    /// Index of the context path entry the type was loaded from.
    pub origin: usize,
}

impl TypeDescriptor {
    /// Direct supertypes: super class first, then interfaces in declaration order.
    pub fn supertypes(&self) -> impl Iterator<Item = &str> {
        self.super_name
            .iter()
            .chain(self.interfaces.iter())
            .map(String::as_str)
    }

    pub fn declares_method(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m == name)
    }

    pub fn annotation(&self, type_name: &str) -> Option<&AnnotationValue> {
        self.annotations.iter().find(|a| a.type_name == type_name)
    }
}

/// A decoded annotation instance.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnnotationValue {
    pub type_name: String,
    pub elements: Vec<(String, ElementValue)>,
}

impl AnnotationValue {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            elements: Vec::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: ElementValue) -> Self {
        self.elements.push((name.into(), value));
        self
    }

    /// Explicitly present element value. Defaulted elements are not stored in class files.
    pub fn element(&self, name: &str) -> Option<&ElementValue> {
        self.elements
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "tag", content = "value", rename_all = "lowercase")]
pub enum ElementValue {
    String(String),
    /// Any non-string primitive constant, rendered as text.
    Constant(String),
    Enum { type_name: String, constant: String },
    Class(String),
    Annotation(AnnotationValue),
    Array(Vec<ElementValue>),
}

impl ElementValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ElementValue::String(s) => Some(s),
            _ => None,
        }
    }
}
