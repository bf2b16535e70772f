//! # Partition Module
//!
//! Finds where to cut a tagged video into clips. Every tag boundary is a
//! candidate cut point; every pair of candidates is a candidate clip whose
//! cost is the weighted content it would skip, plus a fixed penalty per clip.
//! The cheapest chain of clips from frame 0 to the last frame is a shortest
//! path in the resulting DAG.
//!
//! ## Usage
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use clip_partition::{partition, TagSet};
//!
//! # fn main() -> clip_partition::Result<()> {
//! let tags: TagSet = vec![("cat", 3, 9), ("dog", 5, 8), ("people", 0, 6)]
//!     .into_iter()
//!     .collect();
//!
//! let divisions = partition(&tags, 9, &BTreeMap::new(), 1.0, 3.0)?;
//! assert_eq!(divisions, vec![3, 9]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Limits
//!
//! Segment enumeration is quadratic in the number of distinct tag boundaries
//! and scoring multiplies that by the tag count. Per-clip tag counts in the
//! thousands are fine; whole-film annotations should be split first.

pub mod boundaries;
pub mod cost;
pub mod graph;
pub mod partitioner;
pub mod segments;
pub mod solver;
pub use boundaries::extract_cut_points;
pub use cost::CostModel;
pub use graph::SegmentGraph;
pub use partitioner::{partition, Partition, Partitioner, LARGE_CANDIDATE_COUNT};
pub use segments::{enumerate_segments, Segment};
pub use solver::{shortest_path, SolvedPath, SolverStrategy};
