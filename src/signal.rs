//! Signal pulses walking the proximity graph.
//!
//! A fixed pool of signals performs random walks over the current adjacency
//! relation. Each signal is in one of three states:
//!
//! - **Seeking**: no target yet.
//! - **Traveling**: moving from `source` toward `target`, `progress < 1`.
//! - **Arrived**: `progress >= 1`; the target becomes the new source.
//!
//! Once per frame, before moving, a seeking or arrived signal looks up the
//! neighbors of its source and picks one uniformly at random. A source with
//! no neighbors respawns the signal at a random particle with no target; it
//! tries again next frame.
//!
//! The router owns one line segment (head and tail of the trail) per signal,
//! so the segment buffer never changes size. Seeking signals write a
//! zero-length segment at the origin.

use glam::Vec3;
use rand::Rng;
use tracing::trace;

use crate::graph::{ProximityGraph, FLOATS_PER_SEGMENT};

/// Routing phase of a [`Signal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalState {
    Seeking,
    Traveling,
    Arrived,
}

/// One pulse traveling along the graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signal {
    pub source: usize,
    pub target: Option<usize>,
    /// Fraction of the current edge covered, starting at 0.
    pub progress: f32,
}

impl Signal {
    /// A seeking signal parked at `source`.
    pub fn at(source: usize) -> Self {
        Self {
            source,
            target: None,
            progress: 0.0,
        }
    }

    /// A signal already on the edge `source -> target`.
    pub fn traveling(source: usize, target: usize, progress: f32) -> Self {
        Self {
            source,
            target: Some(target),
            progress,
        }
    }

    pub fn state(&self) -> SignalState {
        match self.target {
            None => SignalState::Seeking,
            Some(_) if self.progress >= 1.0 => SignalState::Arrived,
            Some(_) => SignalState::Traveling,
        }
    }
}

/// Fixed-size signal pool and its trail segments.
#[derive(Debug, Clone)]
pub struct SignalRouter {
    signals: Vec<Signal>,
    segments: Box<[f32]>,
    node_count: usize,
    speed: f32,
    trail_length: f32,
    respawns: u64,
}

impl SignalRouter {
    /// Create `signal_count` seeking signals at random particles.
    ///
    /// With no particles every signal parks at index 0 and stays seeking.
    pub fn new<R: Rng>(
        signal_count: usize,
        node_count: usize,
        speed: f32,
        trail_length: f32,
        rng: &mut R,
    ) -> Self {
        let signals = (0..signal_count)
            .map(|_| Signal::at(random_node(node_count, rng)))
            .collect();
        Self::from_signals(signals, node_count, speed, trail_length)
    }

    /// Build a router around pre-set signals.
    pub fn from_signals(
        signals: Vec<Signal>,
        node_count: usize,
        speed: f32,
        trail_length: f32,
    ) -> Self {
        let segments = vec![0.0; signals.len() * FLOATS_PER_SEGMENT].into_boxed_slice();
        Self {
            signals,
            segments,
            node_count,
            speed,
            trail_length,
            respawns: 0,
        }
    }

    /// Step every signal one frame against the current graph and project
    /// its trail between the current `positions` of its endpoints.
    pub fn advance<R: Rng>(&mut self, graph: &ProximityGraph, positions: &[Vec3], rng: &mut R) {
        for (slot, signal) in self.signals.iter_mut().enumerate() {
            let out = &mut self.segments[slot * FLOATS_PER_SEGMENT..(slot + 1) * FLOATS_PER_SEGMENT];

            if self.node_count == 0 {
                out.fill(0.0);
                continue;
            }

            if signal.state() != SignalState::Traveling {
                if let Some(arrived_at) = signal.target {
                    signal.source = arrived_at;
                }

                let neighbors = graph.neighbors(signal.source);
                if neighbors.is_empty() {
                    let stranded = signal.source;
                    *signal = Signal::at(rng.gen_range(0..self.node_count));
                    self.respawns += 1;
                    trace!(slot, stranded, source = signal.source, "signal respawned");
                } else {
                    signal.target = Some(neighbors[rng.gen_range(0..neighbors.len())]);
                    signal.progress = 0.0;
                }
            }

            let Some(target) = signal.target else {
                out.fill(0.0);
                continue;
            };

            signal.progress += self.speed;

            let (Some(&from), Some(&to)) = (positions.get(signal.source), positions.get(target))
            else {
                out.fill(0.0);
                continue;
            };

            let head_t = signal.progress.min(1.0);
            let tail_t = (head_t - self.trail_length).max(0.0);
            let head = from.lerp(to, head_t);
            let tail = from.lerp(to, tail_t);

            out[..3].copy_from_slice(&head.to_array());
            out[3..].copy_from_slice(&tail.to_array());
        }
    }

    #[inline]
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Total respawns since creation.
    #[inline]
    pub fn respawns(&self) -> u64 {
        self.respawns
    }

    /// One head/tail segment per signal, always `len() * 6` floats.
    #[inline]
    pub fn segment_buffer(&self) -> &[f32] {
        &self.segments
    }

    /// Head and tail of signal `slot`'s trail as of the last advance.
    pub fn segment(&self, slot: usize) -> Option<(Vec3, Vec3)> {
        let s = self
            .segments
            .get(slot * FLOATS_PER_SEGMENT..(slot + 1) * FLOATS_PER_SEGMENT)?;
        Some((Vec3::new(s[0], s[1], s[2]), Vec3::new(s[3], s[4], s[5])))
    }

    pub fn segment_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.segments)
    }
}

fn random_node<R: Rng>(node_count: usize, rng: &mut R) -> usize {
    if node_count == 0 {
        0
    } else {
        rng.gen_range(0..node_count)
    }
}
