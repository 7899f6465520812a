//! The Reader capability.

use chrono::{DateTime, Utc};
use ome_model::{Entity, Field, FieldPath, Value};

/// Read access to metadata.
///
/// Both operations report "unknown" as `None`: a backend that does not hold
/// a value, does not support a field, or is handed an index tuple of the
/// wrong length simply answers `None`. Reads never fail.
///
/// `Some(0)` from [`count`](MetadataRetrieve::count) is a known answer
/// ("there are no instances") and is distinct from `None`.
pub trait MetadataRetrieve {
    /// Returns the number of `entity` instances below the parent instance
    /// addressed by `indices` (`entity.count_arity()` indices).
    fn count(&self, entity: Entity, indices: &[usize]) -> Option<usize>;

    /// Returns the value of `field` for the instance addressed by `indices`.
    fn value(&self, field: Field, indices: &[usize]) -> Option<Value>;
}

/// Typed convenience accessors for any [`MetadataRetrieve`].
///
/// A stored value of a different type than requested reads as `None`.
pub trait MetadataRetrieveExt: MetadataRetrieve {
    /// Reads a string value.
    fn string(&self, field: Field, indices: &[usize]) -> Option<String> {
        match self.value(field, indices)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Reads an integer value.
    fn integer(&self, field: Field, indices: &[usize]) -> Option<i32> {
        self.value(field, indices)?.as_integer()
    }

    /// Reads a float value.
    fn float(&self, field: Field, indices: &[usize]) -> Option<f64> {
        self.value(field, indices)?.as_float()
    }

    /// Reads a boolean value.
    fn boolean(&self, field: Field, indices: &[usize]) -> Option<bool> {
        self.value(field, indices)?.as_boolean()
    }

    /// Reads a timestamp value.
    fn timestamp(&self, field: Field, indices: &[usize]) -> Option<DateTime<Utc>> {
        self.value(field, indices)?.as_timestamp()
    }

    /// Reads the value at a rendered field path.
    fn value_at(&self, path: &FieldPath) -> Option<Value> {
        self.value(path.field(), path.indices())
    }
}

impl<T: MetadataRetrieve + ?Sized> MetadataRetrieveExt for T {}

/// Conversions to and from the legacy integer count form, where `-1` means
/// "unknown".
pub mod sentinel {
    /// The legacy "unknown" count.
    pub const UNKNOWN_COUNT: i32 = -1;

    /// Converts a count to its legacy integer form.
    ///
    /// Counts that do not fit in an `i32` saturate at `i32::MAX`.
    pub fn count_to_legacy(count: Option<usize>) -> i32 {
        match count {
            Some(n) => i32::try_from(n).unwrap_or(i32::MAX),
            None => UNKNOWN_COUNT,
        }
    }

    /// Converts a legacy integer count. Any negative count is unknown.
    pub fn count_from_legacy(count: i32) -> Option<usize> {
        usize::try_from(count).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::sentinel::*;
    use super::*;

    struct Fixed;

    impl MetadataRetrieve for Fixed {
        fn count(&self, _entity: Entity, _indices: &[usize]) -> Option<usize> {
            None
        }

        fn value(&self, field: Field, _indices: &[usize]) -> Option<Value> {
            match field {
                Field::PixelsSizeX => Some(Value::Integer(512)),
                Field::ImageName => Some(Value::from("cells")),
                _ => None,
            }
        }
    }

    #[test]
    fn test_typed_accessors() {
        assert_eq!(Fixed.integer(Field::PixelsSizeX, &[0, 0]), Some(512));
        assert_eq!(Fixed.string(Field::ImageName, &[0]).as_deref(), Some("cells"));
        // wrong type reads as unknown
        assert_eq!(Fixed.string(Field::PixelsSizeX, &[0, 0]), None);
        assert_eq!(Fixed.float(Field::DetectorGain, &[0, 0]), None);
    }

    #[test]
    fn test_value_at() {
        let path: FieldPath = "Image[0].Pixels[0].SizeX".parse().unwrap();
        assert_eq!(Fixed.value_at(&path), Some(Value::Integer(512)));
    }

    #[test]
    fn test_legacy_counts() {
        assert_eq!(count_to_legacy(None), -1);
        assert_eq!(count_to_legacy(Some(0)), 0);
        assert_eq!(count_to_legacy(Some(5)), 5);
        assert_eq!(count_from_legacy(-1), None);
        assert_eq!(count_from_legacy(-7), None);
        assert_eq!(count_from_legacy(3), Some(3));
    }
}
