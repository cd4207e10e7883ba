//! Class file bytes -> `TypeDescriptor`.

use ristretto_classfile::attributes::{Annotation, AnnotationElement, Attribute};
use ristretto_classfile::{ClassAccessFlags, ClassFile, ConstantPool};
use servicescope_api::{AnnotationValue, ElementValue, TypeDescriptor, TypeKind};
use std::io::Cursor;

type DecodeResult<T> = std::result::Result<T, String>;

/// `com/example/Foo` -> `com.example.Foo`
pub fn binary_to_dotted(internal: &str) -> String {
    internal.replace('/', ".")
}

/// `Lcom/example/Foo;` -> `com.example.Foo`
fn descriptor_to_dotted(descriptor: &str) -> String {
    let inner = descriptor
        .strip_prefix('L')
        .and_then(|d| d.strip_suffix(';'))
        .unwrap_or(descriptor);
    binary_to_dotted(inner)
}

fn utf8(pool: &ConstantPool, index: u16) -> DecodeResult<String> {
    pool.try_get_utf8(index)
        .map(|s| s.to_string())
        .map_err(|e| format!("invalid utf8 constant #{index}: {e:?}"))
}

fn class_name(pool: &ConstantPool, index: u16) -> DecodeResult<String> {
    pool.try_get_class(index)
        .map(|s| binary_to_dotted(s))
        .map_err(|e| format!("invalid class constant #{index}: {e:?}"))
}

fn convert_element(pool: &ConstantPool, element: &AnnotationElement) -> DecodeResult<ElementValue> {
    let value = match element {
        AnnotationElement::String { const_value_index } => {
            ElementValue::String(utf8(pool, *const_value_index)?)
        }
        AnnotationElement::Byte { const_value_index }
        | AnnotationElement::Char { const_value_index }
        | AnnotationElement::Double { const_value_index }
        | AnnotationElement::Float { const_value_index }
        | AnnotationElement::Int { const_value_index }
        | AnnotationElement::Long { const_value_index }
        | AnnotationElement::Short { const_value_index }
        | AnnotationElement::Boolean { const_value_index } => {
            let constant = pool
                .try_get(*const_value_index)
                .map_err(|e| format!("invalid constant #{const_value_index}: {e:?}"))?;
            ElementValue::Constant(format!("{constant:?}"))
        }
        AnnotationElement::Enum {
            type_name_index,
            const_name_index,
        } => ElementValue::Enum {
            type_name: descriptor_to_dotted(&utf8(pool, *type_name_index)?),
            constant: utf8(pool, *const_name_index)?,
        },
        AnnotationElement::Class { class_info_index } => {
            ElementValue::Class(descriptor_to_dotted(&utf8(pool, *class_info_index)?))
        }
        AnnotationElement::Annotation { annotation } => {
            ElementValue::Annotation(convert_annotation(pool, annotation)?)
        }
        AnnotationElement::Array { values } => ElementValue::Array(
            values
                .iter()
                .map(|v| convert_element(pool, v))
                .collect::<DecodeResult<Vec<_>>>()?,
        ),
    };
    Ok(value)
}

fn convert_annotation(pool: &ConstantPool, annotation: &Annotation) -> DecodeResult<AnnotationValue> {
    let mut value = AnnotationValue::new(descriptor_to_dotted(&utf8(pool, annotation.type_index)?));
    for pair in &annotation.elements {
        let name = utf8(pool, pair.name_index)?;
        value.elements.push((name, convert_element(pool, &pair.value)?));
    }
    Ok(value)
}

fn convert_kind(flags: ClassAccessFlags) -> TypeKind {
    // ANNOTATION implies INTERFACE, check it first
    if flags.contains(ClassAccessFlags::ANNOTATION) {
        TypeKind::Annotation
    } else if flags.contains(ClassAccessFlags::INTERFACE) {
        TypeKind::Interface
    } else if flags.contains(ClassAccessFlags::ENUM) {
        TypeKind::Enum
    } else {
        TypeKind::Class
    }
}

/// Decode a class file loaded from path entry `origin`.
pub fn decode_class(bytes: Vec<u8>, origin: usize) -> DecodeResult<TypeDescriptor> {
    let class = ClassFile::from_bytes(&mut Cursor::new(bytes))
        .map_err(|e| format!("Failed to parse class: {e:?}"))?;
    let pool = &class.constant_pool;

    let name = class_name(pool, class.this_class)?;
    let super_name = match class.super_class {
        0 => None,
        index => Some(class_name(pool, index)?),
    };
    let interfaces = class
        .interfaces
        .iter()
        .map(|index| class_name(pool, *index))
        .collect::<DecodeResult<Vec<_>>>()?;
    let methods = class
        .methods
        .iter()
        .map(|method| utf8(pool, method.name_index))
        .collect::<DecodeResult<Vec<_>>>()?;

    let mut annotations = Vec::new();
    for attribute in &class.attributes {
        if let Attribute::RuntimeVisibleAnnotations {
            annotations: visible,
            ..
        } = attribute
        {
            for annotation in visible {
                annotations.push(convert_annotation(pool, annotation)?);
            }
        }
    }

    Ok(TypeDescriptor {
        name,
        kind: convert_kind(class.access_flags),
        super_name,
        interfaces,
        methods,
        annotations,
        origin,
    })
}
