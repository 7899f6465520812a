//! Aggregating metadata facade.
//!
//! [`AggregateMetadata`] combines an ordered [`DelegateRegistry`] of backends
//! into one reader and writer. Reads take the first known answer in
//! registration order, writes are forwarded to every writable delegate, and
//! root access is rejected because several independent roots cannot be
//! presented as one.

mod metadata;
mod registry;

pub use metadata::{AggregateMetadata, AggregateMetadataBuilder, Resolved};
pub use registry::{DelegateRegistry, DelegateRegistryBuilder, RegistryWarning};
