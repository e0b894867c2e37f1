//! Per-frame proximity graph over the particle field.
//!
//! Every frame the adjacency lists and the connection line buffer are
//! discarded and rebuilt from scratch with an all-pairs distance test. At a
//! few hundred particles that is cheap, and nothing stale can survive from
//! one frame to the next.
//!
//! The line buffer is allocated once for the worst case of `n * (n - 1) / 2`
//! segments. Only the first [`ProximityGraph::segment_count`] segments are
//! meaningful after a rebuild; the tail holds leftovers from earlier frames.

use glam::Vec3;

/// Floats per line segment: two endpoints, three coordinates each.
pub const FLOATS_PER_SEGMENT: usize = 6;

/// Adjacency relation plus the packed connection lines for one frame.
#[derive(Debug, Clone)]
pub struct ProximityGraph {
    adjacency: Vec<Vec<usize>>,
    lines: Box<[f32]>,
    segment_count: usize,
    connection_distance: f32,
}

impl ProximityGraph {
    /// Create a graph for `node_count` particles with every buffer sized up
    /// front.
    pub fn new(node_count: usize, connection_distance: f32) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
            lines: vec![0.0; max_segments(node_count) * FLOATS_PER_SEGMENT].into_boxed_slice(),
            segment_count: 0,
            connection_distance,
        }
    }

    /// Recompute the adjacency relation and connection lines from
    /// `positions`.
    ///
    /// A pair `(i, j)` with `i < j` is connected when its distance is strictly
    /// below the connection distance. `j` is appended to `i`'s list and `i` to
    /// `j`'s, so each list is ordered by partner index, not by proximity.
    /// Positions beyond the capacity given to [`ProximityGraph::new`] are
    /// ignored.
    pub fn rebuild(&mut self, positions: &[Vec3]) {
        for neighbors in &mut self.adjacency {
            neighbors.clear();
        }
        self.segment_count = 0;

        let n = positions.len().min(self.adjacency.len());
        let threshold_sq = self.connection_distance * self.connection_distance;
        let mut cursor = 0;

        for i in 0..n {
            let a = positions[i];
            for j in (i + 1)..n {
                let b = positions[j];
                if a.distance_squared(b) >= threshold_sq {
                    continue;
                }

                self.lines[cursor..cursor + 3].copy_from_slice(&a.to_array());
                self.lines[cursor + 3..cursor + 6].copy_from_slice(&b.to_array());
                cursor += FLOATS_PER_SEGMENT;

                self.adjacency[i].push(j);
                self.adjacency[j].push(i);
            }
        }

        self.segment_count = cursor / FLOATS_PER_SEGMENT;
    }

    /// Number of nodes the graph was sized for.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    #[inline]
    pub fn connection_distance(&self) -> f32 {
        self.connection_distance
    }

    /// Current neighbors of `index`. Out-of-range indices have none.
    #[inline]
    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.adjacency.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    #[inline]
    pub fn adjacency(&self) -> &[Vec<usize>] {
        &self.adjacency
    }

    /// Number of valid line segments (and edges) this frame.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Capacity of the line buffer, in segments.
    #[inline]
    pub fn segment_capacity(&self) -> usize {
        self.lines.len() / FLOATS_PER_SEGMENT
    }

    /// The meaningful prefix of the line buffer.
    #[inline]
    pub fn segments(&self) -> &[f32] {
        &self.lines[..self.segment_count * FLOATS_PER_SEGMENT]
    }

    /// The whole fixed-capacity line buffer, including stale tail data.
    #[inline]
    pub fn line_buffer(&self) -> &[f32] {
        &self.lines
    }

    /// Endpoints of segment `k`, if it is valid this frame.
    pub fn segment(&self, k: usize) -> Option<(Vec3, Vec3)> {
        if k >= self.segment_count {
            return None;
        }
        let s = &self.lines[k * FLOATS_PER_SEGMENT..(k + 1) * FLOATS_PER_SEGMENT];
        Some((Vec3::new(s[0], s[1], s[2]), Vec3::new(s[3], s[4], s[5])))
    }

    /// Valid segments as raw bytes, ready for a vertex buffer upload.
    pub fn segment_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.segments())
    }
}

/// Worst-case edge count for `n` nodes.
#[inline]
pub fn max_segments(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(graph: &ProximityGraph) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for (i, neighbors) in graph.adjacency().iter().enumerate() {
            for &j in neighbors {
                if i < j {
                    out.push((i, j));
                }
            }
        }
        out
    }

    #[test]
    fn test_capacity_is_worst_case() {
        let graph = ProximityGraph::new(180, 3.0);
        assert_eq!(graph.segment_capacity(), 180 * 179 / 2);
        assert_eq!(graph.line_buffer().len(), 180 * 179 / 2 * 6);
        assert_eq!(max_segments(0), 0);
        assert_eq!(max_segments(1), 0);
    }

    #[test]
    fn test_four_point_configuration() {
        // 0-1 at 1.0, 1-2 at 2.5, 0-2 at 3.5, 3 far away from all
        let positions = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(3.5, 0.0, 0.0),
            Vec3::new(0.0, 10.0, 0.0),
        ];
        let mut graph = ProximityGraph::new(4, 3.0);
        graph.rebuild(&positions);

        assert_eq!(edges(&graph), vec![(0, 1), (1, 2)]);
        assert_eq!(graph.segment_count(), 2);
        assert_eq!(graph.neighbors(0), &[1]);
        assert_eq!(graph.neighbors(1), &[0, 2]);
        assert_eq!(graph.neighbors(2), &[1]);
        assert!(graph.neighbors(3).is_empty());

        assert_eq!(graph.segment(0), Some((positions[0], positions[1])));
        assert_eq!(graph.segment(1), Some((positions[1], positions[2])));
        assert_eq!(graph.segment(2), None);
    }

    #[test]
    fn test_threshold_is_strict() {
        let positions = [Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0)];
        let mut graph = ProximityGraph::new(2, 3.0);
        graph.rebuild(&positions);
        assert_eq!(graph.segment_count(), 0);
    }

    #[test]
    fn test_neighbor_order_follows_index() {
        // Node 0 is closer to 2 than to 1, but 1 is listed first
        let positions = [
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.5, 0.0, 0.0),
        ];
        let mut graph = ProximityGraph::new(3, 3.0);
        graph.rebuild(&positions);
        assert_eq!(graph.neighbors(0), &[1, 2]);
    }

    #[test]
    fn test_rebuild_discards_previous_frame() {
        let mut graph = ProximityGraph::new(2, 3.0);
        graph.rebuild(&[Vec3::ZERO, Vec3::X]);
        assert_eq!(graph.segment_count(), 1);

        graph.rebuild(&[Vec3::ZERO, Vec3::new(9.0, 0.0, 0.0)]);
        assert_eq!(graph.segment_count(), 0);
        assert!(graph.neighbors(0).is_empty());
        assert!(graph.neighbors(1).is_empty());
        assert!(graph.segments().is_empty());
        // Stale data stays in the tail; only the count says it is invalid
        assert_eq!(graph.line_buffer()[3], 1.0);
    }

    #[test]
    fn test_symmetric_dense_cluster() {
        let positions: Vec<Vec3> = (0..30)
            .map(|i| {
                let t = i as f32 * 0.37;
                Vec3::new(t.sin() * 2.0, t.cos() * 2.0, (t * 0.5).sin())
            })
            .collect();
        let mut graph = ProximityGraph::new(positions.len(), 3.0);
        graph.rebuild(&positions);

        for (i, neighbors) in graph.adjacency().iter().enumerate() {
            for &j in neighbors {
                assert!(graph.neighbors(j).contains(&i));
            }
        }
        let total: usize = graph.adjacency().iter().map(Vec::len).sum();
        assert_eq!(total, graph.segment_count() * 2);
    }

    #[test]
    fn test_segment_bytes_length() {
        let mut graph = ProximityGraph::new(3, 3.0);
        graph.rebuild(&[Vec3::ZERO, Vec3::X, Vec3::Y]);
        assert_eq!(graph.segment_count(), 3);
        assert_eq!(graph.segment_bytes().len(), 3 * FLOATS_PER_SEGMENT * 4);
    }

    #[test]
    fn test_empty_graph() {
        let mut graph = ProximityGraph::new(0, 3.0);
        graph.rebuild(&[]);
        assert_eq!(graph.segment_count(), 0);
        assert!(graph.neighbors(0).is_empty());
    }
}
