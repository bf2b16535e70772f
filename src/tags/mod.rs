//! # Tags Module
//!
//! Labeled frame intervals produced by an upstream tagger, and the loaders that
//! read them from disk.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use clip_partition::tags::TagLoader;
//!
//! # fn main() -> anyhow::Result<()> {
//! let file = TagLoader::load("tags.toml")?;
//! let tags = file.tag_set(file.no_frames.unwrap_or(100))?;
//!
//! println!("Loaded {} intervals over labels {:?}", tags.len(), tags.labels());
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod types;
pub use loader::{TagFile, TagLoader};
pub use types::{Frame, TagInterval, TagSet};
