//! Shared test infrastructure for the metadata layer.
//!
//! Each integration test binary pulls this in with `mod common;` and uses
//! only part of it.
#![allow(dead_code)]

pub mod delegates;
pub mod fixtures;

pub use delegates::*;
pub use fixtures::*;
