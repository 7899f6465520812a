//! OME Metadata Schema Model
//!
//! This crate is the fixed schema catalog consumed by the metadata accessor
//! layer (`ome-metadata`). It contains no storage and no I/O; it only
//! describes which fields exist, how they are addressed and what type of
//! value they hold.
//!
//! # Contents
//!
//! - [`Entity`] - repeated entities (Image, Pixels, Detector, ...) and their
//!   parent/child structure. Every entity owns one counting field.
//! - [`Field`] / [`FieldDescriptor`] - the value-field catalog, one
//!   descriptor per field: schema name, addressing entity, property path and
//!   declared [`ValueType`].
//! - [`Value`] - a typed field value.
//! - [`FieldPath`] - a concrete address such as `Image[0].Pixels[0].SizeX`.
//!
//! # Example
//!
//! ```
//! use ome_model::{Entity, Field, ValueType};
//!
//! let descriptor = Field::PlaneTheZ.descriptor();
//! assert_eq!(descriptor.entity, Some(Entity::Plane));
//! assert_eq!(descriptor.arity(), 3);
//! assert_eq!(descriptor.value_type, ValueType::Integer);
//! assert_eq!(descriptor.path_template(), "Image[].Pixels[].Plane[].TheZ");
//!
//! // Counting fields take the parent's indices.
//! assert_eq!(Entity::Plane.count_arity(), 2);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod entity;
pub mod error;
pub mod field;
pub mod path;
pub mod value;

pub use entity::Entity;
pub use error::{SchemaError, SchemaResult};
pub use field::{Field, FieldDescriptor};
pub use path::FieldPath;
pub use value::{Value, ValueType};
