//! OME Metadata Access Layer
//!
//! Uniform read and write access to OME imaging metadata, and a facade that
//! presents several backends as one.
//!
//! # Architecture
//!
//! - [`core`] - the two capabilities a backend may implement:
//!   [`MetadataRetrieve`](core::MetadataRetrieve) (reads, unknown is `None`)
//!   and [`MetadataStore`](core::MetadataStore) (writes), plus
//!   [`MetadataDelegate`](core::MetadataDelegate), which exposes them as
//!   optional views
//! - [`aggregate`] - [`AggregateMetadata`](aggregate::AggregateMetadata):
//!   priority-fallback reads and fan-out writes over an ordered
//!   [`DelegateRegistry`](aggregate::DelegateRegistry)
//! - [`backends`] - in-memory, dummy and sanitizing filter backends
//! - [`convert`] - copying everything a reader knows into a store
//!
//! Fields, entities and values come from the `ome-model` crate.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use ome_metadata::aggregate::AggregateMetadata;
//! use ome_metadata::backends::{DummyMetadata, InMemoryMetadata};
//! use ome_metadata::core::{DynDelegate, MetadataRetrieve, MetadataStore, MetadataStoreExt};
//! use ome_model::{Entity, Field, Value};
//!
//! let scratch = Arc::new(InMemoryMetadata::with_name("scratch"));
//! let aggregate = AggregateMetadata::new([
//!     Arc::new(DummyMetadata::new()) as DynDelegate,
//!     scratch.clone(),
//! ]);
//!
//! aggregate.create_root()?;
//! aggregate.set(Field::PixelsSizeX, &[0, 0], 1024)?;
//!
//! // the dummy never knows anything, so the scratch store answers
//! assert_eq!(aggregate.value(Field::PixelsSizeX, &[0, 0]), Some(Value::Integer(1024)));
//! assert_eq!(aggregate.count(Entity::Pixels, &[0]), Some(1));
//! # Ok::<(), ome_metadata::error::MetadataError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod aggregate;
pub mod backends;
pub mod convert;
pub mod core;
pub mod error;

pub use aggregate::{AggregateMetadata, DelegateRegistry, Resolved};
pub use convert::{ConversionSummary, convert_metadata};
pub use error::{MetadataError, MetadataResult};
