//! In-memory SPDX document graph.
//!
//! The [`Document`] owns every entity in flat vectors; entities refer to each
//! other only by SPDX identifier. The builder creates the graph in one pass
//! and everything downstream (validator, writer, property layer) reads it
//! through `&Document`.
//!
//! ```ignore
//! let parsed = parse_tag_value(&text)?;
//! for package in &parsed.document.packages {
//!     println!("{} files", parsed.document.files_of(&package.spdx_id).count());
//! }
//! ```

mod checksum;
mod document;
mod file;
mod license;
mod metadata;
mod package;
mod relationship;
pub mod spdx3;

pub use checksum::*;
pub use document::*;
pub use file::*;
pub use license::*;
pub use metadata::*;
pub use package::*;
pub use relationship::*;
