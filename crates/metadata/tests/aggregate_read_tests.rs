//! Integration tests for priority-fallback reads.

mod common;

use std::sync::Arc;

use common::{MockDelegate, dyn_delegate, init_tracing};
use ome_metadata::aggregate::AggregateMetadata;
use ome_metadata::backends::{DummyMetadata, InMemoryMetadata};
use ome_metadata::core::{
    DynDelegate, MetadataRetrieve, MetadataRetrieveExt, MetadataStoreExt, sentinel,
};
use ome_model::{Entity, Field, FieldPath, Value};

// ============================================================================
// Priority
// ============================================================================

/// The lowest-positioned delegate with a known count wins.
#[test]
fn test_image_count_follows_registry_order() {
    init_tracing();
    let d1 = Arc::new(MockDelegate::reader("d1"));
    let d2 = Arc::new(MockDelegate::reader("d2").with_count(Entity::Image, &[], 5));
    let d3 = Arc::new(MockDelegate::reader("d3").with_count(Entity::Image, &[], 7));

    let forward =
        AggregateMetadata::new([dyn_delegate(&d1), dyn_delegate(&d2), dyn_delegate(&d3)]);
    assert_eq!(forward.count(Entity::Image, &[]), Some(5));

    let reversed =
        AggregateMetadata::new([dyn_delegate(&d3), dyn_delegate(&d2), dyn_delegate(&d1)]);
    assert_eq!(reversed.count(Entity::Image, &[]), Some(7));
}

/// Delegates after the first known answer are never consulted.
#[test]
fn test_reads_stop_at_first_known_answer() {
    let d1 = Arc::new(MockDelegate::reader("d1"));
    let d2 = Arc::new(MockDelegate::reader("d2").with_value(Field::ImageName, &[0], "two"));
    let d3 = Arc::new(MockDelegate::reader("d3").with_value(Field::ImageName, &[0], "three"));

    let aggregate =
        AggregateMetadata::new([dyn_delegate(&d1), dyn_delegate(&d2), dyn_delegate(&d3)]);

    assert_eq!(aggregate.string(Field::ImageName, &[0]).as_deref(), Some("two"));
    assert_eq!(d1.reads(), 1);
    assert_eq!(d2.reads(), 1);
    assert_eq!(d3.reads(), 0);
}

/// A known zero count is an answer and stops the search.
#[test]
fn test_zero_count_is_known() {
    let d1 = Arc::new(MockDelegate::reader("d1").with_count(Entity::Plane, &[0, 0], 0));
    let d2 = Arc::new(MockDelegate::reader("d2").with_count(Entity::Plane, &[0, 0], 12));

    let aggregate = AggregateMetadata::new([dyn_delegate(&d1), dyn_delegate(&d2)]);

    assert_eq!(aggregate.count(Entity::Plane, &[0, 0]), Some(0));
    assert_eq!(d2.reads(), 0);
}

/// Fields are resolved independently; each may come from a different delegate.
#[test]
fn test_fields_resolve_independently() {
    let primary = Arc::new(
        MockDelegate::reader("primary")
            .with_value(Field::PixelsSizeX, &[0, 0], 512)
            .with_value(Field::PixelsSizeY, &[0, 0], 256),
    );
    let fallback = Arc::new(
        MockDelegate::reader("fallback")
            .with_value(Field::PixelsSizeX, &[0, 0], 1)
            .with_value(Field::PixelsSizeZ, &[0, 0], 30)
            .with_value(Field::PixelsSizeX, &[0, 1], 64),
    );

    let aggregate = AggregateMetadata::new([dyn_delegate(&primary), dyn_delegate(&fallback)]);

    assert_eq!(aggregate.integer(Field::PixelsSizeX, &[0, 0]), Some(512));
    assert_eq!(aggregate.integer(Field::PixelsSizeY, &[0, 0]), Some(256));
    assert_eq!(aggregate.integer(Field::PixelsSizeZ, &[0, 0]), Some(30));
    assert_eq!(aggregate.integer(Field::PixelsSizeX, &[0, 1]), Some(64));

    let resolved = aggregate.resolve_value(Field::PixelsSizeZ, &[0, 0]).unwrap();
    assert_eq!(resolved.position, 1);
    assert_eq!(resolved.delegate_name, "fallback");
}

/// Write-only and inert delegates are skipped for reads.
#[test]
fn test_reads_skip_delegates_without_read_view() {
    let writer = Arc::new(MockDelegate::writer("writer").with_value(Field::ImageName, &[0], "w"));
    let inert = Arc::new(MockDelegate::inert("inert").with_value(Field::ImageName, &[0], "i"));
    let reader = Arc::new(MockDelegate::reader("reader").with_value(Field::ImageName, &[0], "r"));

    let aggregate = AggregateMetadata::new([
        dyn_delegate(&writer),
        dyn_delegate(&inert),
        dyn_delegate(&reader),
    ]);

    assert_eq!(aggregate.string(Field::ImageName, &[0]).as_deref(), Some("r"));
    assert_eq!(writer.reads(), 0);
    assert_eq!(inert.reads(), 0);
}

// ============================================================================
// Sentinels
// ============================================================================

/// With no known answer anywhere, reads return the sentinel.
#[test]
fn test_unknown_everywhere_reads_sentinel() {
    let aggregate = AggregateMetadata::new([
        Arc::new(DummyMetadata::new()) as DynDelegate,
        Arc::new(MockDelegate::reader("empty")),
    ]);

    assert_eq!(aggregate.value(Field::DetectorGain, &[0, 0]), None);
    assert_eq!(aggregate.count(Entity::Detector, &[0]), None);
    assert_eq!(
        sentinel::count_to_legacy(aggregate.count(Entity::Detector, &[0])),
        sentinel::UNKNOWN_COUNT
    );
    assert!(aggregate.resolve_value(Field::DetectorGain, &[0, 0]).is_none());
}

/// An empty registry answers every read with the sentinel.
#[test]
fn test_empty_registry_reads_sentinel() {
    let aggregate = AggregateMetadata::new(Vec::<DynDelegate>::new());

    for field in Field::all() {
        let indices = vec![0; field.arity()];
        assert_eq!(aggregate.value(field, &indices), None, "{field}");
    }
    for &entity in Entity::ALL {
        let indices = vec![0; entity.count_arity()];
        assert_eq!(aggregate.count(entity, &indices), None, "{entity}");
    }
}

// ============================================================================
// Real backends
// ============================================================================

/// An in-memory store behind a dummy answers reads through the aggregate.
#[test]
fn test_memory_store_answers_behind_dummy() {
    let memory = Arc::new(InMemoryMetadata::with_name("memory"));
    common::seed_acquisition(&memory).unwrap();

    let aggregate = AggregateMetadata::new([
        Arc::new(DummyMetadata::new()) as DynDelegate,
        dyn_delegate(&memory),
    ]);

    assert_eq!(aggregate.count(Entity::Image, &[]), Some(2));
    assert_eq!(aggregate.count(Entity::Plane, &[0, 0]), Some(3));
    assert_eq!(aggregate.count(Entity::LogicalChannel, &[0]), Some(2));
    assert_eq!(aggregate.count(Entity::Pixels, &[1]), Some(0));
    assert_eq!(aggregate.float(Field::ObjectiveLensNa, &[0, 0]), Some(1.4));

    let path: FieldPath = "Image[0].LogicalChannel[1].Name".parse().unwrap();
    assert_eq!(aggregate.value_at(&path), Some(Value::from("GFP")));
}

/// A value of an unexpected type reads as unknown through typed accessors.
#[test]
fn test_typed_accessor_mismatch_is_unknown() {
    let memory = Arc::new(InMemoryMetadata::new());
    memory.set(Field::PixelsSizeX, &[0, 0], 512).unwrap();
    let aggregate = AggregateMetadata::new([dyn_delegate(&memory)]);

    assert_eq!(aggregate.float(Field::PixelsSizeX, &[0, 0]), None);
    assert_eq!(aggregate.integer(Field::PixelsSizeX, &[0, 0]), Some(512));
}

// ============================================================================
// Per-call dispatch
// ============================================================================

/// Capabilities are asked for on every call, so a delegate that starts
/// exposing views is used from the next call on.
#[test]
fn test_capability_changes_apply_to_next_call() {
    let toggled = Arc::new(MockDelegate::inert("toggled"));
    let aggregate = AggregateMetadata::new([dyn_delegate(&toggled)]);

    aggregate.set(Field::ImageName, &[0], "x").unwrap();
    assert_eq!(toggled.write_count(), 0);
    assert_eq!(aggregate.value(Field::ImageName, &[0]), None);
    assert_eq!(toggled.reads(), 0);

    toggled.set_capabilities(true, true);
    toggled.answer_value(Field::ImageName, &[0], "y");

    aggregate.set(Field::ImageName, &[0], "y").unwrap();
    assert_eq!(toggled.write_count(), 1);
    assert_eq!(toggled.writes()[0].value, Value::from("y"));
    assert_eq!(aggregate.string(Field::ImageName, &[0]).as_deref(), Some("y"));
    assert_eq!(aggregate.registry().retrieve_count(), 1);

    toggled.set_capabilities(false, false);
    assert_eq!(aggregate.value(Field::ImageName, &[0]), None);
}

/// Reads are not memoized: a later change in a delegate is visible through
/// the same aggregate.
#[test]
fn test_reads_see_later_delegate_changes() {
    let memory = Arc::new(InMemoryMetadata::new());
    let scripted = Arc::new(MockDelegate::reader("scripted"));
    let aggregate = AggregateMetadata::new([dyn_delegate(&scripted), dyn_delegate(&memory)]);

    assert_eq!(aggregate.count(Entity::Pixels, &[0]), None);

    memory.set(Field::PixelsSizeX, &[0, 0], 256).unwrap();
    assert_eq!(aggregate.count(Entity::Pixels, &[0]), Some(1));

    scripted.answer_count(Entity::Pixels, &[0], 4);
    assert_eq!(aggregate.count(Entity::Pixels, &[0]), Some(4));
    assert_eq!(scripted.reads(), 3);
}
