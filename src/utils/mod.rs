//! Shared utilities.

mod case;
mod hash;

pub use case::snake_to_camel;
pub use hash::{content_hash, json_hash};
