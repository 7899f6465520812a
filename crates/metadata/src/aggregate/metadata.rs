//! AggregateMetadata implementation.
//!
//! `AggregateMetadata` presents an ordered list of delegates as a single
//! reader and writer:
//!
//! - **Reads** (`count`, `value`): delegates exposing a read view are asked
//!   in registration order and the first known answer wins
//! - **Writes** (`set_value`, `create_root`): forwarded to every delegate
//!   exposing a write view, in registration order; the first error stops the
//!   fan-out and is returned unchanged
//! - **Root access** (`root`, `set_root`): always rejected
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use ome_metadata::aggregate::AggregateMetadata;
//! use ome_metadata::backends::InMemoryMetadata;
//! use ome_metadata::core::{MetadataRetrieve, MetadataRetrieveExt, MetadataStore, MetadataStoreExt};
//! use ome_model::{Entity, Field};
//!
//! let primary = Arc::new(InMemoryMetadata::with_name("primary"));
//! let mirror = Arc::new(InMemoryMetadata::with_name("mirror"));
//!
//! let aggregate = AggregateMetadata::builder()
//!     .delegate(primary.clone())
//!     .delegate(mirror.clone())
//!     .build();
//!
//! aggregate.set(Field::ImageName, &[0], "cells").unwrap();
//!
//! // both delegates received the write
//! assert_eq!(primary.string(Field::ImageName, &[0]).as_deref(), Some("cells"));
//! assert_eq!(mirror.string(Field::ImageName, &[0]).as_deref(), Some("cells"));
//! assert_eq!(aggregate.count(Entity::Image, &[]), Some(1));
//!
//! // root access has no multi-backend meaning
//! assert!(aggregate.root().is_err());
//! ```

use ome_model::{Entity, Field, Value};
use tracing::{debug, instrument, trace};

use crate::core::{
    DynDelegate, MetadataDelegate, MetadataRetrieve, MetadataRoot, MetadataStore,
};
use crate::error::{MetadataError, MetadataResult};

use super::registry::{DelegateRegistry, DelegateRegistryBuilder};

/// A known answer together with the delegate that supplied it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    /// The answer.
    pub value: T,
    /// Registry position of the answering delegate.
    pub position: usize,
    /// Name of the answering delegate.
    pub delegate_name: String,
}

/// Metadata facade over an ordered list of delegates.
#[derive(Debug, Clone, Default)]
pub struct AggregateMetadata {
    registry: DelegateRegistry,
}

impl AggregateMetadata {
    /// Creates an aggregate from delegates in read-priority order.
    pub fn new(delegates: impl IntoIterator<Item = DynDelegate>) -> Self {
        Self::from_registry(DelegateRegistry::new(delegates))
    }

    /// Creates an aggregate over an existing registry.
    pub fn from_registry(registry: DelegateRegistry) -> Self {
        Self { registry }
    }

    /// Returns a builder for an aggregate.
    pub fn builder() -> AggregateMetadataBuilder {
        AggregateMetadataBuilder::default()
    }

    /// Returns the registry.
    pub fn registry(&self) -> &DelegateRegistry {
        &self.registry
    }

    /// Returns the delegates in registration order.
    ///
    /// This is the way to reach an individual delegate's root.
    pub fn delegates(&self) -> &[DynDelegate] {
        self.registry.delegates()
    }

    /// Resolves a count and reports which delegate answered.
    pub fn resolve_count(&self, entity: Entity, indices: &[usize]) -> Option<Resolved<usize>> {
        self.first_known(|reader| reader.count(entity, indices))
    }

    /// Resolves a value and reports which delegate answered.
    pub fn resolve_value(&self, field: Field, indices: &[usize]) -> Option<Resolved<Value>> {
        self.first_known(|reader| reader.value(field, indices))
    }

    /// Asks each reader in order and returns the first known answer.
    fn first_known<T>(
        &self,
        read: impl Fn(&dyn MetadataRetrieve) -> Option<T>,
    ) -> Option<Resolved<T>> {
        for (position, delegate, reader) in self.registry.retrievers() {
            trace!(position, delegate = delegate.delegate_name(), "Consulting delegate");
            if let Some(value) = read(reader) {
                trace!(position, delegate = delegate.delegate_name(), "Resolved");
                return Some(Resolved {
                    value,
                    position,
                    delegate_name: delegate.delegate_name().to_string(),
                });
            }
        }
        None
    }

    /// Forwards a write to every writer in order, stopping at the first error.
    fn fan_out(
        &self,
        write: impl Fn(&dyn MetadataStore) -> MetadataResult<()>,
    ) -> MetadataResult<()> {
        for (position, delegate, store) in self.registry.stores() {
            trace!(position, delegate = delegate.delegate_name(), "Forwarding write");
            write(store)?;
        }
        Ok(())
    }
}

impl MetadataRetrieve for AggregateMetadata {
    fn count(&self, entity: Entity, indices: &[usize]) -> Option<usize> {
        self.resolve_count(entity, indices).map(|r| r.value)
    }

    fn value(&self, field: Field, indices: &[usize]) -> Option<Value> {
        self.resolve_value(field, indices).map(|r| r.value)
    }
}

impl MetadataStore for AggregateMetadata {
    #[instrument(level = "debug", skip(self))]
    fn create_root(&self) -> MetadataResult<()> {
        debug!(stores = self.registry.store_count(), "Creating roots");
        self.fan_out(|store| store.create_root())
    }

    fn root(&self) -> MetadataResult<Option<MetadataRoot>> {
        Err(MetadataError::UnsupportedRootAccess { operation: "root" })
    }

    fn set_root(&self, _root: MetadataRoot) -> MetadataResult<()> {
        Err(MetadataError::UnsupportedRootAccess {
            operation: "set_root",
        })
    }

    #[instrument(level = "debug", skip(self, value), fields(field = %field, indices = ?indices))]
    fn set_value(&self, field: Field, indices: &[usize], value: &Value) -> MetadataResult<()> {
        self.fan_out(|store| store.set_value(field, indices, value))
    }
}

impl MetadataDelegate for AggregateMetadata {
    fn delegate_name(&self) -> &str {
        "aggregate"
    }

    fn as_retrieve(&self) -> Option<&dyn MetadataRetrieve> {
        Some(self)
    }

    fn as_store(&self) -> Option<&dyn MetadataStore> {
        Some(self)
    }
}

/// Builder for [`AggregateMetadata`].
#[derive(Default)]
pub struct AggregateMetadataBuilder {
    registry: DelegateRegistryBuilder,
}

impl AggregateMetadataBuilder {
    /// Appends a delegate with the next-lowest read priority.
    pub fn delegate(mut self, delegate: DynDelegate) -> Self {
        self.registry = self.registry.delegate(delegate);
        self
    }

    /// Appends several delegates, preserving their order.
    pub fn delegates(mut self, delegates: impl IntoIterator<Item = DynDelegate>) -> Self {
        self.registry = self.registry.delegates(delegates);
        self
    }

    /// Builds the aggregate.
    pub fn build(self) -> AggregateMetadata {
        AggregateMetadata::from_registry(self.registry.build())
    }
}
