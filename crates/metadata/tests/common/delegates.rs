//! Scriptable delegates that record how the aggregate calls them.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use ome_metadata::core::{MetadataDelegate, MetadataRetrieve, MetadataRoot, MetadataStore};
use ome_metadata::error::{MetadataError, MetadataResult};
use ome_model::{Entity, Field, Value};
use parking_lot::Mutex;

/// A recorded `set_value` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedWrite {
    pub field: Field,
    pub indices: Vec<usize>,
    pub value: Value,
}

/// A delegate with fixed answers and configurable capabilities.
///
/// Reads come only from the scripted answers plus anything added through
/// [`MockDelegate::answer_value`] / [`MockDelegate::answer_count`]; writes
/// are recorded but never become readable. Capabilities can be switched at
/// any time with [`MockDelegate::set_capabilities`].
#[derive(Debug)]
pub struct MockDelegate {
    name: String,
    readable: AtomicBool,
    writable: AtomicBool,
    fail_writes: bool,
    counts: Mutex<HashMap<(Entity, Vec<usize>), usize>>,
    values: Mutex<HashMap<(Field, Vec<usize>), Value>>,
    reads: AtomicUsize,
    create_roots: AtomicUsize,
    writes: Mutex<Vec<RecordedWrite>>,
}

impl MockDelegate {
    fn with_capabilities(name: &str, readable: bool, writable: bool) -> Self {
        Self {
            name: name.to_string(),
            readable: AtomicBool::new(readable),
            writable: AtomicBool::new(writable),
            fail_writes: false,
            counts: Mutex::new(HashMap::new()),
            values: Mutex::new(HashMap::new()),
            reads: AtomicUsize::new(0),
            create_roots: AtomicUsize::new(0),
            writes: Mutex::new(Vec::new()),
        }
    }

    /// Exposes only a read view.
    pub fn reader(name: &str) -> Self {
        Self::with_capabilities(name, true, false)
    }

    /// Exposes only a write view.
    pub fn writer(name: &str) -> Self {
        Self::with_capabilities(name, false, true)
    }

    /// Exposes both views.
    pub fn read_write(name: &str) -> Self {
        Self::with_capabilities(name, true, true)
    }

    /// Exposes neither view.
    pub fn inert(name: &str) -> Self {
        Self::with_capabilities(name, false, false)
    }

    /// Answers `count(entity, indices)` with `count`.
    pub fn with_count(self, entity: Entity, indices: &[usize], count: usize) -> Self {
        self.answer_count(entity, indices, count);
        self
    }

    /// Answers `value(field, indices)` with `value`.
    pub fn with_value(self, field: Field, indices: &[usize], value: impl Into<Value>) -> Self {
        self.answer_value(field, indices, value);
        self
    }

    /// Starts answering `count(entity, indices)` with `count`.
    pub fn answer_count(&self, entity: Entity, indices: &[usize], count: usize) {
        self.counts.lock().insert((entity, indices.to_vec()), count);
    }

    /// Starts answering `value(field, indices)` with `value`.
    pub fn answer_value(&self, field: Field, indices: &[usize], value: impl Into<Value>) {
        self.values.lock().insert((field, indices.to_vec()), value.into());
    }

    /// Changes which views the delegate exposes from now on.
    pub fn set_capabilities(&self, readable: bool, writable: bool) {
        self.readable.store(readable, Ordering::SeqCst);
        self.writable.store(writable, Ordering::SeqCst);
    }

    /// Makes every write and `create_root` fail.
    pub fn failing(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Number of reads served by this delegate.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of successful `create_root` calls.
    pub fn create_root_calls(&self) -> usize {
        self.create_roots.load(Ordering::SeqCst)
    }

    /// Successful writes, in call order.
    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.writes.lock().clone()
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        self.writes.lock().len()
    }

    fn injected_failure(&self) -> MetadataError {
        MetadataError::backend(&self.name, "injected failure")
    }
}

impl MetadataRetrieve for MockDelegate {
    fn count(&self, entity: Entity, indices: &[usize]) -> Option<usize> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.counts.lock().get(&(entity, indices.to_vec())).copied()
    }

    fn value(&self, field: Field, indices: &[usize]) -> Option<Value> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.values.lock().get(&(field, indices.to_vec())).cloned()
    }
}

impl MetadataStore for MockDelegate {
    fn create_root(&self) -> MetadataResult<()> {
        if self.fail_writes {
            return Err(self.injected_failure());
        }
        self.create_roots.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn root(&self) -> MetadataResult<Option<MetadataRoot>> {
        Ok(Some(MetadataRoot::new(self.name.clone())))
    }

    fn set_root(&self, _root: MetadataRoot) -> MetadataResult<()> {
        Ok(())
    }

    fn set_value(&self, field: Field, indices: &[usize], value: &Value) -> MetadataResult<()> {
        if self.fail_writes {
            return Err(self.injected_failure());
        }
        self.writes.lock().push(RecordedWrite {
            field,
            indices: indices.to_vec(),
            value: value.clone(),
        });
        Ok(())
    }
}

impl MetadataDelegate for MockDelegate {
    fn delegate_name(&self) -> &str {
        &self.name
    }

    fn as_retrieve(&self) -> Option<&dyn MetadataRetrieve> {
        if self.readable.load(Ordering::SeqCst) {
            Some(self)
        } else {
            None
        }
    }

    fn as_store(&self) -> Option<&dyn MetadataStore> {
        if self.writable.load(Ordering::SeqCst) {
            Some(self)
        } else {
            None
        }
    }
}
