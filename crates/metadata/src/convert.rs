//! Copying metadata from a reader into a store.
//!
//! [`convert_metadata`] walks the entity tree top-down. For each entity it
//! asks the source how many instances exist below the current parent
//! instance, copies every known value of every instance, then descends into
//! the entity's children. An unknown count is treated as zero. Root-level
//! fields are copied last.

use ome_model::{Entity, Field};
use tracing::{debug, instrument};

use crate::core::{MetadataRetrieve, MetadataStore};
use crate::error::MetadataResult;

/// What a conversion copied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Entity instances visited.
    pub instances: usize,
    /// Values written to the destination.
    pub values: usize,
}

/// Copies every known value of `src` into `dest`.
///
/// The first write error stops the conversion; values copied before it stay
/// in `dest`.
#[instrument(level = "debug", skip_all)]
pub fn convert_metadata(
    src: &dyn MetadataRetrieve,
    dest: &dyn MetadataStore,
) -> MetadataResult<ConversionSummary> {
    let mut summary = ConversionSummary::default();

    for entity in Entity::roots() {
        convert_entity(src, dest, entity, &[], &mut summary)?;
    }
    for field in Field::root_fields() {
        copy_value(src, dest, field, &[], &mut summary)?;
    }

    debug!(
        instances = summary.instances,
        values = summary.values,
        "Converted metadata"
    );
    Ok(summary)
}

fn convert_entity(
    src: &dyn MetadataRetrieve,
    dest: &dyn MetadataStore,
    entity: Entity,
    parent: &[usize],
    summary: &mut ConversionSummary,
) -> MetadataResult<()> {
    let count = src.count(entity, parent).unwrap_or(0);
    let mut indices = parent.to_vec();
    indices.push(0);

    for index in 0..count {
        if let Some(last) = indices.last_mut() {
            *last = index;
        }
        summary.instances += 1;

        for field in Field::of_entity(entity) {
            copy_value(src, dest, field, &indices, summary)?;
        }
        for child in entity.children() {
            convert_entity(src, dest, child, &indices, summary)?;
        }
    }
    Ok(())
}

fn copy_value(
    src: &dyn MetadataRetrieve,
    dest: &dyn MetadataStore,
    field: Field,
    indices: &[usize],
    summary: &mut ConversionSummary,
) -> MetadataResult<()> {
    if let Some(value) = src.value(field, indices) {
        dest.set_value(field, indices, &value)?;
        summary.values += 1;
    }
    Ok(())
}
