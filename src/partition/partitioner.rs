use std::collections::BTreeMap;
use std::ops::Range;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    config::{Config, PartitionConfig, SolverConfig},
    error::{ConfigError, InputError, Result},
    partition::{
        boundaries::extract_cut_points,
        cost::CostModel,
        graph::SegmentGraph,
        segments::enumerate_segments,
        solver::shortest_path,
    },
    tags::{Frame, TagSet},
};

/// Candidate point count above which the quadratic segment enumeration gets
/// expensive enough to mention in the logs
pub const LARGE_CANDIDATE_COUNT: usize = 4096;

/// Result of partitioning one video
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Partition {
    /// Frames before which a cut happens. Never contains 0 (the implicit
    /// start of the first clip) and always ends with `no_frames`.
    pub divisions: Vec<Frame>,

    /// Total skip cost plus penalties of the chosen clips
    pub cost: f64,

    pub no_frames: Frame,
}

impl Partition {
    /// Divisions strictly inside the video
    pub fn interior_cuts(&self) -> &[Frame] {
        match self.divisions.split_last() {
            Some((_, interior)) => interior,
            None => &[],
        }
    }

    /// Number of cuts strictly inside the video
    pub fn cut_count(&self) -> usize {
        self.interior_cuts().len()
    }

    /// Clip boundaries including the leading 0
    pub fn path(&self) -> Vec<Frame> {
        std::iter::once(0).chain(self.divisions.iter().copied()).collect()
    }

    /// Clips as half-open frame ranges, covering `[0, no_frames)` in order
    pub fn clips(&self) -> Vec<Range<Frame>> {
        self.path()
            .windows(2)
            .map(|pair| pair[0]..pair[1])
            .collect()
    }
}

/// Splits tagged videos into clips
///
/// The pipeline for one call:
/// 1. Candidate cut points - every tag boundary plus both ends of the video
/// 2. Candidate segments - every ordered pair of cut points
/// 3. Scoring - weighted skip cost per segment, in parallel for large inputs
/// 4. Graph - one edge per segment, weighted by cost plus penalty
/// 5. Solving - cheapest path from frame 0 to the last frame
pub struct Partitioner {
    partition: PartitionConfig,
    solver: SolverConfig,
    cost_model: CostModel,
    pool: Option<rayon::ThreadPool>,
}

impl Partitioner {
    /// Create a partitioner, validating the configuration first
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let pool = if config.solver.parallel {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.solver.threads)
                .build()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "solver.threads".to_string(),
                    value: e.to_string(),
                })?;
            Some(pool)
        } else {
            None
        };

        Ok(Self {
            cost_model: CostModel::from_config(&config.partition),
            partition: config.partition,
            solver: config.solver,
            pool,
        })
    }

    /// Single-threaded partitioner with default solver settings
    pub fn sequential(partition: PartitionConfig) -> Result<Self> {
        Self::new(Config {
            partition,
            solver: SolverConfig {
                parallel: false,
                ..SolverConfig::default()
            },
        })
    }

    pub fn config(&self) -> &PartitionConfig {
        &self.partition
    }

    /// Compute the cheapest split of `[0, no_frames)` into clips
    pub fn partition(&self, tags: &TagSet, no_frames: Frame) -> Result<Partition> {
        debug!(
            "Partitioning {} tags over {} frames (penalty {}, {} solver)",
            tags.len(),
            no_frames,
            self.partition.penalty,
            self.solver.strategy
        );

        let points = extract_cut_points(tags, no_frames)?;
        self.check_cost_bound(tags, no_frames, points.len())?;
        if points.len() > LARGE_CANDIDATE_COUNT {
            warn!(
                "{} candidate cut points, enumerating {} segments",
                points.len(),
                points.len() * (points.len() - 1) / 2
            );
        }

        let pairs = enumerate_segments(&points);
        debug!("{} cut points, {} candidate segments", points.len(), pairs.len());

        let pool = self
            .pool
            .as_ref()
            .filter(|_| pairs.len() >= self.solver.parallel_threshold);
        debug!("Scoring segments {}", if pool.is_some() { "in parallel" } else { "sequentially" });
        let segments = self.cost_model.score_segments(&pairs, tags, pool);

        let graph = SegmentGraph::from_segments(&points, &segments, self.partition.penalty);
        debug!("Built segment graph with {} edges", graph.edge_count());

        let path = shortest_path(&graph, 0, no_frames, self.solver.strategy)?;
        let partition = Partition {
            divisions: path.vertices[1..].to_vec(),
            cost: path.cost,
            no_frames,
        };

        info!(
            "Split {} frames into {} clips (cost {:.2})",
            no_frames,
            partition.divisions.len(),
            partition.cost
        );
        Ok(partition)
    }

    /// Reject inputs whose path costs would overflow `f64`
    ///
    /// A tag charges at most its weight times `no_frames` across one path,
    /// and a path has fewer hops than there are cut points.
    fn check_cost_bound(&self, tags: &TagSet, no_frames: Frame, point_count: usize) -> Result<()> {
        let total_weight: f64 = tags.iter().map(|tag| self.cost_model.weight(&tag.label)).sum();
        let bound = total_weight * no_frames as f64
            + self.partition.penalty * point_count.saturating_sub(1) as f64;

        if !bound.is_finite() {
            return Err(InputError::CostOverflow {
                total_weight,
                no_frames,
            }
            .into());
        }

        Ok(())
    }
}

/// Division points for `tags` over `[0, no_frames)`
///
/// Returns the frames before which a cut happens, excluding 0 and ending with
/// `no_frames`. Labels missing from `cost_table` weigh `default_cost`.
pub fn partition(
    tags: &TagSet,
    no_frames: Frame,
    cost_table: &BTreeMap<String, f64>,
    default_cost: f64,
    penalty: f64,
) -> Result<Vec<Frame>> {
    let partitioner = Partitioner::sequential(PartitionConfig {
        penalty,
        default_cost,
        cost_table: cost_table.clone(),
    })?;

    Ok(partitioner.partition(tags, no_frames)?.divisions)
}
