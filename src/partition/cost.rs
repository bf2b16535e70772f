use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::config::PartitionConfig;
use crate::partition::segments::Segment;
use crate::tags::{Frame, TagSet};

/// Weighted skip cost of candidate clips
#[derive(Debug, Clone, PartialEq)]
pub struct CostModel {
    cost_table: BTreeMap<String, f64>,
    default_cost: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self::new(BTreeMap::new(), 1.0)
    }
}

impl CostModel {
    pub fn new(cost_table: BTreeMap<String, f64>, default_cost: f64) -> Self {
        Self {
            cost_table,
            default_cost,
        }
    }

    pub fn from_config(config: &PartitionConfig) -> Self {
        Self::new(config.cost_table.clone(), config.default_cost)
    }

    /// Weight of a label, falling back to the default
    pub fn weight(&self, label: &str) -> f64 {
        self.cost_table
            .get(label)
            .copied()
            .unwrap_or(self.default_cost)
    }

    /// Skip cost of `[start, end)`
    ///
    /// Every tag active anywhere in the segment charges its weight times the
    /// full segment length, not just the overlapping part. Each tag instance
    /// counts separately, so two occurrences of one label charge twice.
    pub fn segment_cost(&self, start: Frame, end: Frame, tags: &TagSet) -> f64 {
        let length = end.saturating_sub(start) as f64;

        tags.iter()
            .filter(|tag| tag.overlaps(start, end))
            .map(|tag| self.weight(&tag.label) * length)
            .sum()
    }

    /// Score segments in input order
    ///
    /// With a pool the segments are scored on its workers. Each segment sums
    /// over the tags in the same order either way, so both paths give
    /// bit-identical costs.
    pub fn score_segments(
        &self,
        segments: &[(Frame, Frame)],
        tags: &TagSet,
        pool: Option<&rayon::ThreadPool>,
    ) -> Vec<Segment> {
        let score = |&(start, end): &(Frame, Frame)| Segment {
            start,
            end,
            cost: self.segment_cost(start, end, tags),
        };

        match pool {
            Some(pool) => pool.install(|| segments.par_iter().map(score).collect()),
            None => segments.iter().map(score).collect(),
        }
    }
}
