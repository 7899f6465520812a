//! Concrete field addresses.
//!
//! A [`FieldPath`] pairs a [`Field`] with the index tuple of one instance and
//! renders as the entity path with the indices filled in:
//!
//! ```
//! use ome_model::{Field, FieldPath};
//!
//! let path = FieldPath::new(Field::PixelsSizeX, vec![0, 1]).unwrap();
//! assert_eq!(path.to_string(), "Image[0].Pixels[1].SizeX");
//!
//! let parsed: FieldPath = "Image[0].Pixels[1].SizeX".parse().unwrap();
//! assert_eq!(parsed, path);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{SchemaError, SchemaResult};
use crate::field::Field;

static INDEX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(\d+)\]").expect("index pattern is a valid regex")
});

static BY_TEMPLATE: LazyLock<HashMap<String, Field>> = LazyLock::new(|| {
    Field::descriptors()
        .iter()
        .map(|d| (d.path_template(), d.field))
        .collect()
});

/// A value field together with the indices of one instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldPath {
    field: Field,
    indices: Vec<usize>,
}

impl FieldPath {
    /// Creates a path, checking the index count against the field's arity.
    pub fn new(field: Field, indices: Vec<usize>) -> SchemaResult<Self> {
        let expected = field.arity();
        if indices.len() != expected {
            return Err(SchemaError::IndexCount {
                name: field.name().to_string(),
                expected,
                actual: indices.len(),
            });
        }
        Ok(Self { field, indices })
    }

    /// Parses a rendered path such as `Image[0].LogicalChannel[2].Name`.
    pub fn parse(path: &str) -> SchemaResult<Self> {
        let mut indices = Vec::new();
        for capture in INDEX_PATTERN.captures_iter(path) {
            let index = capture[1]
                .parse::<usize>()
                .map_err(|e| SchemaError::InvalidPath {
                    path: path.to_string(),
                    message: e.to_string(),
                })?;
            indices.push(index);
        }

        let template = INDEX_PATTERN.replace_all(path, "[]");
        let field = BY_TEMPLATE
            .get(template.as_ref())
            .copied()
            .ok_or_else(|| SchemaError::InvalidPath {
                path: path.to_string(),
                message: format!("no field matches template '{}'", template),
            })?;

        Self::new(field, indices)
    }

    /// Returns the addressed field.
    pub fn field(&self) -> Field {
        self.field
    }

    /// Returns the index tuple.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let descriptor = self.field.descriptor();
        if let Some(entity) = descriptor.entity {
            for (entity, index) in entity.chain().iter().zip(&self.indices) {
                write!(f, "{}[{}].", entity.name(), index)?;
            }
        }
        f.write_str(descriptor.property)
    }
}

impl FromStr for FieldPath {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldPath::parse(s)
    }
}
