//! In-memory metadata backend.
//!
//! Values are kept in an ordered map keyed by field and index tuple. Counts
//! are not stored: the count of an entity below a parent instance is one
//! more than the highest index used by any stored value at or below that
//! entity. An empty store therefore knows it holds zero top-level instances,
//! while the count below a parent instance it has never seen is unknown.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ome_model::{Entity, Field, Value};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use uuid::Uuid;

use crate::core::{MetadataDelegate, MetadataRetrieve, MetadataRoot, MetadataStore};
use crate::error::{MetadataError, MetadataResult};

/// The storage root of an [`InMemoryMetadata`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryRoot {
    id: Uuid,
    created_at: DateTime<Utc>,
    values: BTreeMap<(Field, Vec<usize>), Value>,
}

impl MemoryRoot {
    /// Creates an empty root with a fresh id.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            values: BTreeMap::new(),
        }
    }

    /// Returns the root's id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns when the root was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no values are stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the stored value of `field` at `indices`.
    pub fn get(&self, field: Field, indices: &[usize]) -> Option<&Value> {
        self.values.get(&(field, indices.to_vec()))
    }

    /// Returns one more than the highest index of `entity` used below the
    /// parent instance `prefix`, or `None` if nothing is stored there.
    fn extent(&self, entity: Entity, prefix: &[usize]) -> Option<usize> {
        let position = entity.depth() - 1;
        self.values
            .keys()
            .filter(|(field, indices)| {
                field.entity().is_some_and(|e| e.descends_from(entity))
                    && indices.len() > position
                    && indices[..position] == *prefix
            })
            .map(|(_, indices)| indices[position] + 1)
            .max()
    }

    fn count(&self, entity: Entity, indices: &[usize]) -> Option<usize> {
        if indices.len() != entity.count_arity() {
            return None;
        }
        if let Some(extent) = self.extent(entity, indices) {
            return Some(extent);
        }
        match (entity.parent(), indices.split_last()) {
            (None, _) => Some(0),
            (Some(parent), Some((&last, prefix))) => {
                let parent_exists = self.extent(parent, prefix).is_some_and(|n| n > last);
                parent_exists.then_some(0)
            }
            (Some(_), None) => None,
        }
    }
}

impl Default for MemoryRoot {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    id: Uuid,
    created_at: DateTime<Utc>,
    entries: Vec<SnapshotEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEntry {
    field: Field,
    indices: Vec<usize>,
    value: Value,
}

/// A thread-safe, in-memory metadata store that can also be read back.
#[derive(Debug)]
pub struct InMemoryMetadata {
    name: String,
    root: RwLock<MemoryRoot>,
}

impl InMemoryMetadata {
    /// Creates an empty store named `memory`.
    pub fn new() -> Self {
        Self::with_name("memory")
    }

    /// Creates an empty store with the given name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: RwLock::new(MemoryRoot::new()),
        }
    }

    /// Returns the id of the current root.
    pub fn root_id(&self) -> Uuid {
        self.root.read().id
    }

    /// Returns the number of stored values.
    pub fn len(&self) -> usize {
        self.root.read().len()
    }

    /// Returns true if no values are stored.
    pub fn is_empty(&self) -> bool {
        self.root.read().is_empty()
    }

    /// Serializes the current root to pretty-printed JSON.
    pub fn to_json(&self) -> MetadataResult<String> {
        let root = self.root.read();
        let snapshot = Snapshot {
            id: root.id,
            created_at: root.created_at,
            entries: root
                .values
                .iter()
                .map(|((field, indices), value)| SnapshotEntry {
                    field: *field,
                    indices: indices.clone(),
                    value: value.clone(),
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Restores a store from JSON produced by [`to_json`](Self::to_json).
    ///
    /// Every entry is validated as if it had been written through
    /// [`set_value`](MetadataStore::set_value).
    pub fn from_json(name: impl Into<String>, json: &str) -> MetadataResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        let mut root = MemoryRoot {
            id: snapshot.id,
            created_at: snapshot.created_at,
            values: BTreeMap::new(),
        };
        for entry in snapshot.entries {
            check(entry.field, &entry.indices, &entry.value)?;
            root.values.insert((entry.field, entry.indices), entry.value);
        }
        Ok(Self {
            name: name.into(),
            root: RwLock::new(root),
        })
    }
}

impl Default for InMemoryMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Validates a write against the field's descriptor.
fn check(field: Field, indices: &[usize], value: &Value) -> MetadataResult<()> {
    if indices.len() != field.arity() {
        return Err(MetadataError::IndexArity {
            field,
            expected: field.arity(),
            actual: indices.len(),
        });
    }
    if value.value_type() != field.value_type() {
        return Err(MetadataError::TypeMismatch {
            field,
            expected: field.value_type(),
            actual: value.value_type(),
        });
    }
    Ok(())
}

impl MetadataRetrieve for InMemoryMetadata {
    fn count(&self, entity: Entity, indices: &[usize]) -> Option<usize> {
        self.root.read().count(entity, indices)
    }

    fn value(&self, field: Field, indices: &[usize]) -> Option<Value> {
        self.root.read().get(field, indices).cloned()
    }
}

impl MetadataStore for InMemoryMetadata {
    fn create_root(&self) -> MetadataResult<()> {
        let root = MemoryRoot::new();
        debug!(backend = %self.name, root_id = %root.id, "Created root");
        *self.root.write() = root;
        Ok(())
    }

    fn root(&self) -> MetadataResult<Option<MetadataRoot>> {
        Ok(Some(MetadataRoot::new(self.root.read().clone())))
    }

    fn set_root(&self, root: MetadataRoot) -> MetadataResult<()> {
        let Some(root) = root.downcast_ref::<MemoryRoot>() else {
            return Err(MetadataError::IncompatibleRoot {
                backend: self.name.clone(),
                expected: "MemoryRoot",
            });
        };
        *self.root.write() = root.clone();
        Ok(())
    }

    fn set_value(&self, field: Field, indices: &[usize], value: &Value) -> MetadataResult<()> {
        check(field, indices, value)?;
        trace!(backend = %self.name, %field, ?indices, "Storing value");
        self.root
            .write()
            .values
            .insert((field, indices.to_vec()), value.clone());
        Ok(())
    }
}

impl MetadataDelegate for InMemoryMetadata {
    fn delegate_name(&self) -> &str {
        &self.name
    }

    fn as_retrieve(&self) -> Option<&dyn MetadataRetrieve> {
        Some(self)
    }

    fn as_store(&self) -> Option<&dyn MetadataStore> {
        Some(self)
    }
}
