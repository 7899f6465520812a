//! Opaque storage-root handles.

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

/// An opaque handle to a backend's storage root.
///
/// Each backend decides what its root is; callers can only pass the handle
/// back to a compatible backend or downcast it when they know the concrete
/// type. Cloning shares the underlying root.
#[derive(Clone)]
pub struct MetadataRoot {
    inner: Arc<dyn Any + Send + Sync>,
    kind: &'static str,
}

impl MetadataRoot {
    /// Wraps a backend root.
    pub fn new<T: Any + Send + Sync>(root: T) -> Self {
        Self {
            inner: Arc::new(root),
            kind: type_name::<T>(),
        }
    }

    /// Returns the concrete root if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Returns true if the root is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Returns the type name of the wrapped root.
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl fmt::Debug for MetadataRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataRoot")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
