//! Sanitizing write-only wrapper.
//!
//! `FilterMetadata` sits in front of another store and strips unprintable
//! characters from string values before passing every call through. It has
//! no read view, so inside an aggregate it only ever receives writes.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use ome_metadata::backends::{FilterConfig, FilterMetadata, InMemoryMetadata};
//! use ome_metadata::core::{MetadataRetrieveExt, MetadataStoreExt};
//! use ome_model::Field;
//!
//! let target = Arc::new(InMemoryMetadata::new());
//! let filter = FilterMetadata::with_config(target.clone(), FilterConfig::default());
//!
//! filter.set(Field::ImageName, &[0], "cells\u{7}\tstack").unwrap();
//! assert_eq!(target.string(Field::ImageName, &[0]).as_deref(), Some("cells\tstack"));
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use ome_model::{Field, Value};
use serde::{Deserialize, Serialize};

use crate::core::{MetadataDelegate, MetadataRoot, MetadataStore};
use crate::error::MetadataResult;

/// Configuration for [`FilterMetadata`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Whether string values are sanitized at all.
    pub enabled: bool,
    /// Keep horizontal tabs.
    pub keep_tabs: bool,
    /// Keep line feeds.
    pub keep_newlines: bool,
    /// Also drop everything outside printable ASCII.
    pub ascii_only: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            keep_tabs: true,
            keep_newlines: true,
            ascii_only: false,
        }
    }
}

impl FilterConfig {
    /// A configuration that passes values through untouched.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Returns true if `c` survives sanitizing.
    fn keeps(&self, c: char) -> bool {
        match c {
            '\t' => self.keep_tabs,
            '\n' => self.keep_newlines,
            c if c.is_control() => false,
            c => !self.ascii_only || c.is_ascii_graphic() || c == ' ',
        }
    }

    /// Sanitizes a string, borrowing it when nothing is removed.
    pub fn sanitize<'a>(&self, s: &'a str) -> Cow<'a, str> {
        if !self.enabled || s.chars().all(|c| self.keeps(c)) {
            return Cow::Borrowed(s);
        }
        Cow::Owned(s.chars().filter(|&c| self.keeps(c)).collect())
    }
}

/// A store wrapper that sanitizes string values.
pub struct FilterMetadata {
    store: Arc<dyn MetadataStore + Send + Sync>,
    config: FilterConfig,
}

impl FilterMetadata {
    /// Wraps `store` with the default configuration.
    pub fn new(store: Arc<dyn MetadataStore + Send + Sync>) -> Self {
        Self::with_config(store, FilterConfig::default())
    }

    /// Wraps `store` with the given configuration.
    pub fn with_config(store: Arc<dyn MetadataStore + Send + Sync>, config: FilterConfig) -> Self {
        Self { store, config }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }
}

impl std::fmt::Debug for FilterMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterMetadata")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl MetadataStore for FilterMetadata {
    fn create_root(&self) -> MetadataResult<()> {
        self.store.create_root()
    }

    fn root(&self) -> MetadataResult<Option<MetadataRoot>> {
        self.store.root()
    }

    fn set_root(&self, root: MetadataRoot) -> MetadataResult<()> {
        self.store.set_root(root)
    }

    fn set_value(&self, field: Field, indices: &[usize], value: &Value) -> MetadataResult<()> {
        match value {
            Value::String(s) => match self.config.sanitize(s) {
                Cow::Borrowed(_) => self.store.set_value(field, indices, value),
                Cow::Owned(clean) => self.store.set_value(field, indices, &Value::String(clean)),
            },
            _ => self.store.set_value(field, indices, value),
        }
    }
}

impl MetadataDelegate for FilterMetadata {
    fn delegate_name(&self) -> &str {
        "filter"
    }

    fn as_store(&self) -> Option<&dyn MetadataStore> {
        Some(self)
    }
}
