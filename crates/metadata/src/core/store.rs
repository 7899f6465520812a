//! The Writer capability.

use ome_model::{Field, FieldPath, Value};

use crate::error::MetadataResult;

use super::root::MetadataRoot;

/// Write access to metadata.
///
/// Methods take `&self`: a store is typically shared between the code that
/// populates it directly and any aggregate it participates in, so stores
/// keep their mutable state behind interior mutability.
///
/// Counting fields have no setter; counts are derived from stored values.
pub trait MetadataStore {
    /// Replaces the store's contents with a fresh, empty root.
    fn create_root(&self) -> MetadataResult<()>;

    /// Returns a handle to the store's root, if it exposes one.
    fn root(&self) -> MetadataResult<Option<MetadataRoot>>;

    /// Replaces the store's root with `root`.
    fn set_root(&self, root: MetadataRoot) -> MetadataResult<()>;

    /// Stores `value` for the instance of `field` addressed by `indices`.
    fn set_value(&self, field: Field, indices: &[usize], value: &Value) -> MetadataResult<()>;
}

/// Convenience setters for any [`MetadataStore`].
pub trait MetadataStoreExt: MetadataStore {
    /// Stores anything convertible into a [`Value`].
    fn set(&self, field: Field, indices: &[usize], value: impl Into<Value>) -> MetadataResult<()> {
        self.set_value(field, indices, &value.into())
    }

    /// Stores a value at a rendered field path.
    fn set_at(&self, path: &FieldPath, value: impl Into<Value>) -> MetadataResult<()> {
        self.set_value(path.field(), path.indices(), &value.into())
    }
}

impl<T: MetadataStore + ?Sized> MetadataStoreExt for T {}
