//! # pulsenet - Animated particle network
//!
//! A slowly drifting cloud of particles, linked whenever two of them come
//! close, with bright signal pulses running random walks along the links.
//!
//! The simulation is plain CPU code with no window or GPU dependency. Each
//! frame produces flat `f32` line buffers ready to upload as vertex data.
//! Enable the `viewer` feature for a wgpu window that draws them.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pulsenet::prelude::*;
//!
//! let mut network = NeuralNetwork::new(NetworkConfig::default().with_seed(7))?;
//!
//! let latch = HoverLatch::new();
//! network.set_hover_callback(latch.observer());
//!
//! loop {
//!     network.step(Some(Vec2::new(0.2, -0.1)));
//!     upload(network.graph().segments());
//!     upload(network.router().segment_buffer());
//! }
//! ```
//!
//! ## Frame Pipeline
//!
//! | Stage | Type | Output |
//! |-------|------|--------|
//! | Drift and bounce | [`ParticleField`] | positions |
//! | Link nearby pairs | [`ProximityGraph`] | adjacency, connection segments |
//! | Route pulses | [`SignalRouter`] | one trail segment per signal |
//! | Rotate and pick | [`ViewController`] | model matrix, hover events |
//!
//! [`NeuralNetwork::step`] runs the four stages in that order.
//!
//! ## Line Buffers
//!
//! Both buffers hold segments as six floats: `x1 y1 z1 x2 y2 z2`.
//!
//! - Connections: only the first [`ProximityGraph::segment_count`] segments
//!   are valid. Capacity is `N * (N - 1) / 2`.
//! - Signals: always exactly one segment per signal. A signal still looking
//!   for a target writes a zero-length segment at the origin.
//!
//! ## Determinism
//!
//! All randomness flows through one RNG seeded from
//! [`NetworkConfig::seed`]. Two networks built from the same seeded config
//! and fed the same pointer input stay identical frame for frame.

pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod graph;
pub mod network;
pub mod overlay;
pub mod shaders;
pub mod signal;
pub mod time;
pub mod view;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use bytemuck;
pub use camera::{Camera, Ray};
pub use config::NetworkConfig;
pub use error::ConfigError;
#[cfg(feature = "viewer")]
pub use error::ViewerError;
pub use field::{NodeInstance, Particle, ParticleField};
pub use glam::{Vec2, Vec3};
pub use graph::ProximityGraph;
pub use network::NeuralNetwork;
pub use overlay::{HoverLatch, PhraseCarousel};
pub use signal::{Signal, SignalRouter, SignalState};
pub use time::FrameClock;
pub use view::{HoverCallback, ViewController};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use pulsenet::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::NetworkConfig;
    pub use crate::error::ConfigError;
    pub use crate::field::Particle;
    pub use crate::network::NeuralNetwork;
    pub use crate::overlay::{HoverLatch, PhraseCarousel};
    pub use crate::signal::{Signal, SignalState};
    pub use crate::time::FrameClock;
    pub use crate::{Vec2, Vec3};
}
