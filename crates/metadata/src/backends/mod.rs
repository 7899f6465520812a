//! Concrete metadata backends.
//!
//! | Backend | Read view | Write view | Keeps values |
//! |---------|-----------|------------|--------------|
//! | [`InMemoryMetadata`] | yes | yes | yes |
//! | [`DummyMetadata`] | yes | yes | no |
//! | [`FilterMetadata`] | no | yes | in the wrapped store |

mod dummy;
mod filter;
mod memory;

pub use dummy::DummyMetadata;
pub use filter::{FilterConfig, FilterMetadata};
pub use memory::{InMemoryMetadata, MemoryRoot};
