//! # clip-partition
//!
//! Split a tagged video into clips at the cheapest set of cut points.
//!
//! The input is a set of labeled frame intervals (what a tagger saw, and
//! when) plus the frame count. Every clip pays a fixed penalty, and every tag
//! active inside a clip charges its weight times the clip length. The
//! library searches all clip boundaries drawn from tag boundaries and returns
//! the division points of the cheapest split.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clip_partition::{config::Config, tags::TagLoader, Partitioner};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::from_file("partition.toml")?;
//! let file = TagLoader::load("tags.toml")?;
//! let no_frames = file.no_frames.unwrap_or(300);
//!
//! let partitioner = Partitioner::new(config)?;
//! let result = partitioner.partition(&file.tag_set(no_frames)?, no_frames)?;
//!
//! for clip in result.clips() {
//!     println!("{}..{}", clip.start, clip.end);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`tags`] - Tag intervals and tag document loading
//! - [`partition`] - Cut points, segment scoring, the segment graph and solvers
//! - [`config`] - Configuration management
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod partition;
pub mod tags;

// Re-export commonly used types for convenience
pub use crate::{
    config::Config,
    error::{PartitionError, Result},
    partition::{partition, Partition, Partitioner, SolverStrategy},
    tags::{Frame, TagInterval, TagSet},
};
