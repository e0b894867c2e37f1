//! The per-frame pipeline tying every component together.

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::NetworkConfig;
use crate::error::ConfigError;
use crate::field::{Particle, ParticleField};
use crate::graph::ProximityGraph;
use crate::signal::SignalRouter;
use crate::view::ViewController;

/// Particle field, proximity graph, signal pool and view state, advanced
/// together one frame at a time.
///
/// Each [`step`](Self::step) runs, in order:
///
/// 1. [`ParticleField::advance`]
/// 2. [`ProximityGraph::rebuild`] from the new positions
/// 3. [`SignalRouter::advance`] over the fresh adjacency
/// 4. [`ViewController::apply`] with the pointer
///
/// All randomness comes from one RNG. Build with
/// [`NetworkConfig::with_seed`] for reproducible runs.
pub struct NeuralNetwork {
    config: NetworkConfig,
    rng: StdRng,
    field: ParticleField,
    graph: ProximityGraph,
    router: SignalRouter,
    view: ViewController,
    frame: u64,
}

impl NeuralNetwork {
    /// Validate `config` and spawn a randomized network.
    pub fn new(config: NetworkConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = rng_for(config.seed);
        let field = ParticleField::spawn(
            config.particle_count,
            config.spawn_half_extent,
            config.max_drift_speed,
            config.boundary,
            &mut rng,
        );
        Ok(Self::assemble(config, field, rng))
    }

    /// Build a network around pre-set particles. The particle count of
    /// `config` is replaced by the number of particles given.
    pub fn from_particles<I>(config: NetworkConfig, particles: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = Particle>,
    {
        config.validate()?;
        let rng = rng_for(config.seed);
        let field = ParticleField::from_particles(particles, config.boundary);
        let config = NetworkConfig {
            particle_count: field.len(),
            ..config
        };
        Ok(Self::assemble(config, field, rng))
    }

    fn assemble(config: NetworkConfig, field: ParticleField, mut rng: StdRng) -> Self {
        let graph = ProximityGraph::new(field.len(), config.connection_distance);
        let router = SignalRouter::new(
            config.signal_count,
            field.len(),
            config.signal_speed,
            config.signal_length,
            &mut rng,
        );
        let view = ViewController::new(&config);

        info!(
            particles = field.len(),
            signals = router.len(),
            seed = ?config.seed,
            "network ready"
        );

        Self {
            config,
            rng,
            field,
            graph,
            router,
            view,
            frame: 0,
        }
    }

    /// Advance one frame. `pointer` is in normalized device coordinates, or
    /// `None` when the pointer is outside the view.
    pub fn step(&mut self, pointer: Option<Vec2>) {
        self.field.advance();
        self.graph.rebuild(self.field.positions());
        self.router
            .advance(&self.graph, self.field.positions(), &mut self.rng);
        self.view.apply(pointer, self.field.positions());
        self.frame += 1;
    }

    /// Install the hover callback forwarded to the overlay.
    pub fn set_hover_callback<F>(&mut self, callback: F)
    where
        F: FnMut(bool) + 'static,
    {
        self.view.set_hover_callback(callback);
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.view.set_aspect(aspect);
    }

    #[inline]
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    #[inline]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    #[inline]
    pub fn graph(&self) -> &ProximityGraph {
        &self.graph
    }

    #[inline]
    pub fn router(&self) -> &SignalRouter {
        &self.router
    }

    #[inline]
    pub fn view(&self) -> &ViewController {
        &self.view
    }

    /// Frames stepped since creation.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        self.field.positions()
    }
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_default_network_shapes() {
        let net = NeuralNetwork::new(NetworkConfig::default().with_seed(1)).unwrap();
        assert_eq!(net.field().len(), 180);
        assert_eq!(net.graph().node_count(), 180);
        assert_eq!(net.router().len(), 12);
        assert_eq!(net.frame(), 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = NeuralNetwork::new(NetworkConfig::default().with_boundary(-1.0));
        assert!(matches!(
            result,
            Err(ConfigError::NonPositive {
                field: "boundary",
                ..
            })
        ));
    }

    #[test]
    fn test_step_rebuilds_graph_from_moved_positions() {
        let mut net = NeuralNetwork::new(NetworkConfig::default().with_seed(2)).unwrap();
        net.step(None);

        let positions = net.positions().to_vec();
        let mut expected = ProximityGraph::new(positions.len(), 3.0);
        expected.rebuild(&positions);
        assert_eq!(net.graph().adjacency(), expected.adjacency());
        assert_eq!(net.graph().segment_count(), expected.segment_count());
        assert_eq!(net.frame(), 1);
    }

    #[test]
    fn test_from_particles_overrides_count() {
        let net = NeuralNetwork::from_particles(
            NetworkConfig::default().with_particle_count(999),
            [Particle::new(Vec3::ZERO, Vec3::ZERO)],
        )
        .unwrap();
        assert_eq!(net.config().particle_count, 1);
        assert_eq!(net.field().len(), 1);
    }

    #[test]
    fn test_hover_callback_reaches_view() {
        let mut net = NeuralNetwork::from_particles(
            NetworkConfig::default().with_seed(3),
            [Particle::new(Vec3::ZERO, Vec3::ZERO)],
        )
        .unwrap();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        net.set_hover_callback(move |h| sink.borrow_mut().push(h));

        net.step(Some(Vec2::ZERO));
        net.step(Some(Vec2::new(-0.9, 0.9)));
        assert_eq!(*events.borrow(), vec![true, false]);
    }

    #[test]
    fn test_empty_network_steps() {
        let mut net = NeuralNetwork::new(
            NetworkConfig::default()
                .with_particle_count(0)
                .with_seed(4),
        )
        .unwrap();
        for _ in 0..5 {
            net.step(Some(Vec2::ZERO));
        }
        assert_eq!(net.graph().segment_count(), 0);
        assert!(net.router().segment_buffer().iter().all(|&v| v == 0.0));
        assert_eq!(net.view().hovered(), None);
    }
}
