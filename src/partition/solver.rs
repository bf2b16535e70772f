use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PartitionError, Result};
use crate::partition::graph::SegmentGraph;
use crate::tags::Frame;

/// Shortest-path algorithm used over the segment graph
///
/// Both strategies return the same path. When several paths tie on cost
/// (within [`TIE_TOLERANCE`]), each vertex keeps the smallest predecessor
/// that reaches it at minimum cost, so the chosen path is the one whose last
/// hop starts earliest, applied recursively back to the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverStrategy {
    /// Single pass over vertices in increasing frame order, O(V + E)
    #[default]
    Topological,

    /// Binary-heap relaxation, O(E log V)
    Dijkstra,
}

impl fmt::Display for SolverStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Topological => write!(f, "topological"),
            Self::Dijkstra => write!(f, "dijkstra"),
        }
    }
}

impl FromStr for SolverStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "topological" | "dag" => Ok(Self::Topological),
            "dijkstra" | "heap" => Ok(Self::Dijkstra),
            other => Err(format!(
                "unknown solver strategy '{}' (expected topological or dijkstra)",
                other
            )),
        }
    }
}

/// Minimum-cost path through the segment graph
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedPath {
    /// Visited vertices, source and target included
    pub vertices: Vec<Frame>,

    /// Sum of edge weights along the path
    pub cost: f64,
}

/// Find the cheapest path from `source` to `target`
pub fn shortest_path(
    graph: &SegmentGraph,
    source: Frame,
    target: Frame,
    strategy: SolverStrategy,
) -> Result<SolvedPath> {
    let unreachable = || PartitionError::Unreachable {
        from: source,
        to: target,
    };

    let (Some(s), Some(t)) = (graph.index_of(source), graph.index_of(target)) else {
        return Err(unreachable());
    };

    let dist = match strategy {
        SolverStrategy::Topological => relax_in_order(graph, s, t),
        SolverStrategy::Dijkstra => relax_by_heap(graph, s, t),
    };

    if !dist[t].is_finite() {
        return Err(unreachable());
    }

    let path = trace_back(graph, &dist, s, t).ok_or_else(unreachable)?;
    let vertices = graph.vertices();
    let cost = path
        .windows(2)
        .filter_map(|hop| graph.edge(vertices[hop[0]], vertices[hop[1]]))
        .sum();

    Ok(SolvedPath {
        vertices: path.into_iter().map(|i| vertices[i]).collect(),
        cost,
    })
}

/// Relative slack under which two path costs count as equal
///
/// Costs that agree in exact arithmetic can differ in the last bits once
/// summed in a different order, so exact `f64` comparison would let rounding
/// decide ties.
pub const TIE_TOLERANCE: f64 = 1e-9;

fn tie_bound(cost: f64) -> f64 {
    cost + TIE_TOLERANCE * cost.abs().max(1.0)
}

/// Walk back from `t`, taking at each vertex the smallest predecessor whose
/// distance plus edge weight matches the vertex distance within tolerance
fn trace_back(graph: &SegmentGraph, dist: &[f64], s: usize, t: usize) -> Option<Vec<usize>> {
    let vertices = graph.vertices();
    let mut path = vec![t];
    let mut current = t;

    while current != s {
        let bound = tie_bound(dist[current]);
        current = (s..current).find(|&i| {
            dist[i].is_finite()
                && graph
                    .edge(vertices[i], vertices[current])
                    .map_or(false, |weight| dist[i] + weight <= bound)
        })?;
        path.push(current);
    }

    path.reverse();
    Some(path)
}

/// Dynamic programming in topological (increasing frame) order
fn relax_in_order(graph: &SegmentGraph, s: usize, t: usize) -> Vec<f64> {
    let vertices = graph.vertices();
    let mut dist = vec![f64::INFINITY; vertices.len()];
    dist[s] = 0.0;

    for i in s..t {
        if !dist[i].is_finite() {
            continue;
        }

        for (to, weight) in graph.successors(vertices[i]) {
            let Some(j) = graph.index_of(to).filter(|&j| j > i && j <= t) else {
                continue;
            };
            dist[j] = dist[j].min(dist[i] + weight);
        }
    }

    dist
}

#[derive(Debug, PartialEq)]
struct QueueEntry {
    cost: f64,
    index: usize,
}

impl Eq for QueueEntry {}

// Reversed so the max-heap pops the cheapest entry, lowest index first
impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Settles every vertex up to `t`, so the trace back sees final distances
fn relax_by_heap(graph: &SegmentGraph, s: usize, t: usize) -> Vec<f64> {
    let vertices = graph.vertices();
    let mut dist = vec![f64::INFINITY; vertices.len()];
    let mut settled = vec![false; vertices.len()];
    let mut heap = BinaryHeap::new();

    dist[s] = 0.0;
    heap.push(QueueEntry { cost: 0.0, index: s });

    while let Some(QueueEntry { cost, index: i }) = heap.pop() {
        if settled[i] || cost > dist[i] {
            continue;
        }
        settled[i] = true;

        for (to, weight) in graph.successors(vertices[i]) {
            let Some(j) = graph
                .index_of(to)
                .filter(|&j| j > i && j <= t && !settled[j])
            else {
                continue;
            };

            let candidate = dist[i] + weight;
            if candidate < dist[j] {
                dist[j] = candidate;
                heap.push(QueueEntry { cost: candidate, index: j });
            }
        }
    }

    dist
}
