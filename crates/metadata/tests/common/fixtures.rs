//! Fixture data and test setup helpers.

use std::sync::Arc;

use ome_metadata::backends::InMemoryMetadata;
use ome_metadata::core::{DynDelegate, MetadataStoreExt};
use ome_metadata::error::MetadataResult;
use ome_model::Field;
use tracing_subscriber::EnvFilter;

/// Installs a test subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Erases a concrete delegate into a registry entry.
pub fn dyn_delegate<D: ome_metadata::core::MetadataDelegate + 'static>(
    delegate: &Arc<D>,
) -> DynDelegate {
    delegate.clone()
}

/// Writes a small two-image acquisition into `store`.
///
/// Image 0 has one pixel set with three planes and two channels; image 1 has
/// only a name. Instrument 0 carries one detector and one objective.
pub fn seed_acquisition(store: &InMemoryMetadata) -> MetadataResult<()> {
    store.set(Field::Uuid, &[], "urn:uuid:6f1c2a5e-0000-4000-8000-000000000001")?;

    store.set(Field::ImageName, &[0], "embryo-t0")?;
    store.set(Field::ImageInstrumentRef, &[0], "Instrument:0")?;
    store.set(Field::PixelsId, &[0, 0], "Pixels:0:0")?;
    store.set(Field::PixelsSizeX, &[0, 0], 512)?;
    store.set(Field::PixelsSizeY, &[0, 0], 512)?;
    store.set(Field::PixelsSizeZ, &[0, 0], 3)?;
    store.set(Field::PixelsDimensionOrder, &[0, 0], "XYZCT")?;
    store.set(Field::PixelsBigEndian, &[0, 0], false)?;
    for z in 0..3 {
        store.set(Field::PlaneTheZ, &[0, 0, z], z as i32)?;
        store.set(Field::PlaneTimingDeltaT, &[0, 0, z], 0.25 * z as f64)?;
    }
    store.set(Field::LogicalChannelName, &[0, 0], "DAPI")?;
    store.set(Field::LogicalChannelName, &[0, 1], "GFP")?;
    store.set(Field::LogicalChannelEmWave, &[0, 1], 509)?;

    store.set(Field::ImageName, &[1], "embryo-t1")?;

    store.set(Field::InstrumentId, &[0], "Instrument:0")?;
    store.set(Field::DetectorId, &[0, 0], "Detector:0:0")?;
    store.set(Field::DetectorGain, &[0, 0], 1.5)?;
    store.set(Field::ObjectiveId, &[0, 0], "Objective:0:0")?;
    store.set(Field::ObjectiveLensNa, &[0, 0], 1.4)?;
    Ok(())
}

/// Number of values written by [`seed_acquisition`].
pub const SEEDED_VALUES: usize = 24;
