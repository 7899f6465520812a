//! Delegates and their capability views.
//!
//! A delegate is any backend that can take part in an aggregate. Rather than
//! inspecting a delegate's concrete type, the aggregate asks it for a typed
//! view of each capability. A backend opts into a capability by returning
//! `Some(self)` from the matching method:
//!
//! ```
//! use ome_metadata::core::{MetadataDelegate, MetadataRetrieve};
//! use ome_model::{Entity, Field, Value};
//!
//! struct ReadOnly;
//!
//! impl MetadataRetrieve for ReadOnly {
//!     fn count(&self, _: Entity, _: &[usize]) -> Option<usize> { None }
//!     fn value(&self, _: Field, _: &[usize]) -> Option<Value> { None }
//! }
//!
//! impl MetadataDelegate for ReadOnly {
//!     fn delegate_name(&self) -> &str { "read-only" }
//!     fn as_retrieve(&self) -> Option<&dyn MetadataRetrieve> { Some(self) }
//! }
//!
//! let caps = ReadOnly.capabilities();
//! assert!(caps.retrieve && !caps.store);
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::retrieve::MetadataRetrieve;
use super::store::MetadataStore;

/// A capability a delegate may implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Read access ([`MetadataRetrieve`]).
    Retrieve,
    /// Write access ([`MetadataStore`]).
    Store,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Retrieve => write!(f, "retrieve"),
            Capability::Store => write!(f, "store"),
        }
    }
}

/// The capabilities a delegate exposes at a given moment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet {
    /// Whether the delegate exposes a [`MetadataRetrieve`] view.
    pub retrieve: bool,
    /// Whether the delegate exposes a [`MetadataStore`] view.
    pub store: bool,
}

impl CapabilitySet {
    /// Returns true if the set contains `capability`.
    pub fn contains(&self, capability: Capability) -> bool {
        match capability {
            Capability::Retrieve => self.retrieve,
            Capability::Store => self.store,
        }
    }

    /// Returns true if neither capability is present.
    pub fn is_inert(&self) -> bool {
        !self.retrieve && !self.store
    }
}

/// A backend that can be registered with an aggregate.
///
/// Both views default to `None`, so a delegate implements only the
/// capabilities it opts into. Views are requested on every call and never
/// cached by callers.
pub trait MetadataDelegate: Send + Sync {
    /// Returns a short name used in logs and provenance.
    fn delegate_name(&self) -> &str;

    /// Returns the read view, if this delegate can be read from.
    fn as_retrieve(&self) -> Option<&dyn MetadataRetrieve> {
        None
    }

    /// Returns the write view, if this delegate can be written to.
    fn as_store(&self) -> Option<&dyn MetadataStore> {
        None
    }

    /// Returns the capabilities currently exposed.
    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet {
            retrieve: self.as_retrieve().is_some(),
            store: self.as_store().is_some(),
        }
    }
}

/// A shared, dynamically typed delegate.
pub type DynDelegate = Arc<dyn MetadataDelegate>;
