//! Ordered delegate registry.
//!
//! The registry is the only configuration surface of an aggregate: an
//! ordered list of delegates, fixed when the registry is built. Order is read
//! priority, so it must be chosen deliberately by the caller.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use ome_metadata::aggregate::{DelegateRegistry, RegistryWarning};
//! use ome_metadata::backends::{DummyMetadata, InMemoryMetadata};
//!
//! let (registry, warnings) = DelegateRegistry::builder()
//!     .delegate(Arc::new(InMemoryMetadata::new()))
//!     .delegate(Arc::new(DummyMetadata::new()))
//!     .build_with_warnings();
//!
//! assert_eq!(registry.len(), 2);
//! assert!(warnings.is_empty());
//! ```

use std::fmt;

use tracing::{debug, warn};

use crate::core::{CapabilitySet, DynDelegate, MetadataDelegate, MetadataRetrieve, MetadataStore};

/// An immutable, ordered list of delegates.
#[derive(Clone, Default)]
pub struct DelegateRegistry {
    delegates: Vec<DynDelegate>,
}

impl DelegateRegistry {
    /// Creates a registry from delegates in priority order.
    pub fn new(delegates: impl IntoIterator<Item = DynDelegate>) -> Self {
        Self::builder().delegates(delegates).build()
    }

    /// Returns a new registry builder.
    pub fn builder() -> DelegateRegistryBuilder {
        DelegateRegistryBuilder::new()
    }

    /// Returns the number of registered delegates.
    pub fn len(&self) -> usize {
        self.delegates.len()
    }

    /// Returns true if no delegates are registered.
    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }

    /// Returns the delegates in registration order.
    pub fn delegates(&self) -> &[DynDelegate] {
        &self.delegates
    }

    /// Returns the delegate at `position`.
    pub fn get(&self, position: usize) -> Option<&DynDelegate> {
        self.delegates.get(position)
    }

    /// Iterates over the delegates currently exposing a read view, in
    /// registration order, with their registry position.
    pub fn retrievers(
        &self,
    ) -> impl Iterator<Item = (usize, &dyn MetadataDelegate, &dyn MetadataRetrieve)> {
        self.delegates
            .iter()
            .enumerate()
            .filter_map(|(pos, d)| {
                let delegate: &dyn MetadataDelegate = d.as_ref();
                delegate.as_retrieve().map(|r| (pos, delegate, r))
            })
    }

    /// Iterates over the delegates currently exposing a write view, in
    /// registration order, with their registry position.
    pub fn stores(&self) -> impl Iterator<Item = (usize, &dyn MetadataDelegate, &dyn MetadataStore)> {
        self.delegates
            .iter()
            .enumerate()
            .filter_map(|(pos, d)| {
                let delegate: &dyn MetadataDelegate = d.as_ref();
                delegate.as_store().map(|s| (pos, delegate, s))
            })
    }

    /// Returns the number of delegates currently exposing a read view.
    pub fn retrieve_count(&self) -> usize {
        self.retrievers().count()
    }

    /// Returns the number of delegates currently exposing a write view.
    pub fn store_count(&self) -> usize {
        self.stores().count()
    }

    /// Returns the capabilities of each delegate, in registration order.
    pub fn capabilities(&self) -> Vec<CapabilitySet> {
        self.delegates.iter().map(|d| d.capabilities()).collect()
    }

    /// Checks the registry for configurations that are valid but likely
    /// unintended.
    pub fn validate(&self) -> Vec<RegistryWarning> {
        let mut warnings = Vec::new();
        if self.delegates.is_empty() {
            return warnings;
        }

        for (position, delegate) in self.delegates.iter().enumerate() {
            if delegate.capabilities().is_inert() {
                warnings.push(RegistryWarning::InertDelegate {
                    position,
                    name: delegate.delegate_name().to_string(),
                });
            }
        }

        if self.retrieve_count() == 0 {
            warnings.push(RegistryWarning::NoRetrieveDelegates);
        }
        if self.store_count() == 0 {
            warnings.push(RegistryWarning::NoStoreDelegates);
        }

        warnings
    }
}

impl fmt::Debug for DelegateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.delegates.iter().map(|d| d.delegate_name()))
            .finish()
    }
}

/// Builder for [`DelegateRegistry`].
#[derive(Default)]
pub struct DelegateRegistryBuilder {
    delegates: Vec<DynDelegate>,
}

impl DelegateRegistryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a delegate with the next-lowest read priority.
    pub fn delegate(mut self, delegate: DynDelegate) -> Self {
        self.delegates.push(delegate);
        self
    }

    /// Appends several delegates, preserving their order.
    pub fn delegates(mut self, delegates: impl IntoIterator<Item = DynDelegate>) -> Self {
        self.delegates.extend(delegates);
        self
    }

    /// Builds the registry. Warnings are logged but do not fail the build.
    pub fn build(self) -> DelegateRegistry {
        let (registry, _) = self.build_with_warnings();
        registry
    }

    /// Builds the registry and returns any warnings alongside it.
    pub fn build_with_warnings(self) -> (DelegateRegistry, Vec<RegistryWarning>) {
        let registry = DelegateRegistry {
            delegates: self.delegates,
        };

        let warnings = registry.validate();
        for warning in &warnings {
            warn!(%warning, "Delegate registry warning");
        }
        debug!(
            delegates = registry.len(),
            retrievers = registry.retrieve_count(),
            stores = registry.store_count(),
            "Built delegate registry"
        );

        (registry, warnings)
    }
}

/// Registry configurations that are valid but probably unintended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryWarning {
    /// A delegate exposes neither capability and will never be consulted.
    InertDelegate {
        /// Registry position of the delegate.
        position: usize,
        /// Name of the delegate.
        name: String,
    },

    /// No delegate can be read from; every read returns unknown.
    NoRetrieveDelegates,

    /// No delegate can be written to; every write is a no-op.
    NoStoreDelegates,
}

impl fmt::Display for RegistryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryWarning::InertDelegate { position, name } => write!(
                f,
                "delegate {} at position {} exposes no capabilities and will be skipped",
                name, position
            ),
            RegistryWarning::NoRetrieveDelegates => {
                write!(f, "no delegate can be read from - all reads will be unknown")
            }
            RegistryWarning::NoStoreDelegates => {
                write!(f, "no delegate can be written to - all writes will be dropped")
            }
        }
    }
}
