//! Capability traits and shared abstractions.
//!
//! - [`MetadataRetrieve`] - the Reader capability (`count`, `value`)
//! - [`MetadataStore`] - the Writer capability (`set_value`, root handling)
//! - [`MetadataDelegate`] - a backend exposing zero, one or both capability
//!   views, the unit registered with an aggregate
//! - [`MetadataRoot`] - opaque handle to a backend's storage root
//!
//! # Capability Matrix
//!
//! | Backend | Retrieve | Store |
//! |---------|----------|-------|
//! | `InMemoryMetadata` | yes | yes |
//! | `DummyMetadata` | yes (always unknown) | yes (no-op) |
//! | `FilterMetadata` | no | yes |
//! | `AggregateMetadata` | yes | yes |

mod delegate;
mod retrieve;
mod root;
mod store;

pub use delegate::{Capability, CapabilitySet, DynDelegate, MetadataDelegate};
pub use retrieve::{MetadataRetrieve, MetadataRetrieveExt, sentinel};
pub use root::MetadataRoot;
pub use store::{MetadataStore, MetadataStoreExt};
