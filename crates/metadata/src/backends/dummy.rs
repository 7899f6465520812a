//! A backend that knows nothing and stores nothing.

use ome_model::{Entity, Field, Value};

use crate::core::{MetadataDelegate, MetadataRetrieve, MetadataRoot, MetadataStore};
use crate::error::MetadataResult;

/// Reads are always unknown and writes are accepted and dropped.
///
/// Useful as a placeholder where a reader or writer is required but no
/// metadata should be kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct DummyMetadata;

impl DummyMetadata {
    /// Creates a dummy backend.
    pub fn new() -> Self {
        Self
    }
}

impl MetadataRetrieve for DummyMetadata {
    fn count(&self, _entity: Entity, _indices: &[usize]) -> Option<usize> {
        None
    }

    fn value(&self, _field: Field, _indices: &[usize]) -> Option<Value> {
        None
    }
}

impl MetadataStore for DummyMetadata {
    fn create_root(&self) -> MetadataResult<()> {
        Ok(())
    }

    fn root(&self) -> MetadataResult<Option<MetadataRoot>> {
        Ok(None)
    }

    fn set_root(&self, _root: MetadataRoot) -> MetadataResult<()> {
        Ok(())
    }

    fn set_value(&self, _field: Field, _indices: &[usize], _value: &Value) -> MetadataResult<()> {
        Ok(())
    }
}

impl MetadataDelegate for DummyMetadata {
    fn delegate_name(&self) -> &str {
        "dummy"
    }

    fn as_retrieve(&self) -> Option<&dyn MetadataRetrieve> {
        Some(self)
    }

    fn as_store(&self) -> Option<&dyn MetadataStore> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MetadataStoreExt;

    #[test]
    fn test_everything_is_unknown_and_dropped() {
        let dummy = DummyMetadata::new();
        dummy.set(Field::ImageName, &[0], "ignored").unwrap();
        // arity is not checked either
        dummy.set(Field::ImageName, &[], 3).unwrap();

        assert_eq!(dummy.value(Field::ImageName, &[0]), None);
        assert_eq!(dummy.count(Entity::Image, &[]), None);
        assert!(dummy.root().unwrap().is_none());
        dummy.set_root(MetadataRoot::new("anything")).unwrap();
        assert!(dummy.capabilities().retrieve && dummy.capabilities().store);
    }
}
