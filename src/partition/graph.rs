use std::collections::BTreeMap;

use crate::partition::segments::Segment;
use crate::tags::Frame;

/// Weighted DAG over candidate cut points
///
/// Edges always run from a smaller to a larger frame, so the graph has no
/// cycles. An edge `u -> v` weighs the skip cost of `[u, v)` plus the cut
/// penalty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentGraph {
    vertices: Vec<Frame>,
    edges: BTreeMap<Frame, BTreeMap<Frame, f64>>,
}

impl SegmentGraph {
    /// Graph over `points` with no edges yet
    pub fn new(points: &[Frame]) -> Self {
        let mut vertices = points.to_vec();
        vertices.sort_unstable();
        vertices.dedup();

        Self {
            vertices,
            edges: BTreeMap::new(),
        }
    }

    /// Build the full graph from scored segments
    pub fn from_segments(points: &[Frame], segments: &[Segment], penalty: f64) -> Self {
        let mut graph = Self::new(points);
        for segment in segments {
            graph.insert_edge(segment.start, segment.end, segment.cost + penalty);
        }
        graph
    }

    /// Set the weight of `from -> to`. A repeated edge replaces the old
    /// weight instead of adding to it.
    pub fn insert_edge(&mut self, from: Frame, to: Frame, weight: f64) {
        self.edges.entry(from).or_default().insert(to, weight);
    }

    pub fn edge(&self, from: Frame, to: Frame) -> Option<f64> {
        self.edges.get(&from).and_then(|targets| targets.get(&to)).copied()
    }

    /// Outgoing edges of `from`, by increasing target
    pub fn successors(&self, from: Frame) -> impl Iterator<Item = (Frame, f64)> + '_ {
        self.edges
            .get(&from)
            .into_iter()
            .flat_map(|targets| targets.iter().map(|(&to, &weight)| (to, weight)))
    }

    /// Vertices in increasing order, which is also a topological order
    pub fn vertices(&self) -> &[Frame] {
        &self.vertices
    }

    pub fn contains(&self, vertex: Frame) -> bool {
        self.vertices.binary_search(&vertex).is_ok()
    }

    /// Position of a vertex in [`SegmentGraph::vertices`]
    pub fn index_of(&self, vertex: Frame) -> Option<usize> {
        self.vertices.binary_search(&vertex).ok()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeMap::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(start: Frame, end: Frame, cost: f64) -> Segment {
        Segment { start, end, cost }
    }

    #[test]
    fn test_penalty_is_added_to_every_edge() {
        let segments = vec![segment(0, 3, 3.0), segment(0, 9, 27.0), segment(3, 9, 18.0)];
        let graph = SegmentGraph::from_segments(&[0, 3, 9], &segments, 3.0);

        assert_eq!(graph.edge(0, 3), Some(6.0));
        assert_eq!(graph.edge(0, 9), Some(30.0));
        assert_eq!(graph.edge(3, 9), Some(21.0));
        assert_eq!(graph.edge(9, 3), None);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_repeated_edge_is_not_summed() {
        let mut graph = SegmentGraph::new(&[0, 5]);
        graph.insert_edge(0, 5, 4.0);
        graph.insert_edge(0, 5, 4.0);

        assert_eq!(graph.edge(0, 5), Some(4.0));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_successors_are_ordered() {
        let mut graph = SegmentGraph::new(&[9, 0, 3, 3]);
        graph.insert_edge(0, 9, 1.0);
        graph.insert_edge(0, 3, 2.0);

        assert_eq!(graph.vertices(), &[0, 3, 9]);
        let successors: Vec<_> = graph.successors(0).collect();
        assert_eq!(successors, vec![(3, 2.0), (9, 1.0)]);
        assert_eq!(graph.successors(9).count(), 0);
        assert_eq!(graph.index_of(9), Some(2));
        assert!(!graph.contains(4));
    }
}
