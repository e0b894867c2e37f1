//! Network configuration builder.
//!
//! ```ignore
//! use pulsenet::NetworkConfig;
//!
//! let config = NetworkConfig::new()
//!     .with_particle_count(240)
//!     .with_connection_distance(2.5)
//!     .with_seed(7);
//! ```

use tracing::debug;

use crate::constants;
use crate::error::ConfigError;

/// Tunables for a [`NeuralNetwork`](crate::NeuralNetwork).
///
/// Defaults come from [`constants`]. Use method chaining to override.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    pub particle_count: usize,
    pub connection_distance: f32,
    pub particle_size: f32,
    pub boundary: f32,
    pub spawn_half_extent: f32,
    pub max_drift_speed: f32,
    pub signal_count: usize,
    pub signal_speed: f32,
    pub signal_length: f32,
    pub rotation_drift: f32,
    pub tilt_scale: f32,
    pub tilt_smoothing: f32,
    /// Fixed RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            particle_count: constants::PARTICLE_COUNT,
            connection_distance: constants::CONNECTION_DISTANCE,
            particle_size: constants::PARTICLE_SIZE,
            boundary: constants::BOUNDARY,
            spawn_half_extent: constants::SPAWN_HALF_EXTENT,
            max_drift_speed: constants::MAX_DRIFT_SPEED,
            signal_count: constants::SIGNAL_COUNT,
            signal_speed: constants::SIGNAL_SPEED,
            signal_length: constants::SIGNAL_LENGTH,
            rotation_drift: constants::ROTATION_DRIFT,
            tilt_scale: constants::TILT_SCALE,
            tilt_smoothing: constants::TILT_SMOOTHING,
            seed: None,
        }
    }
}

impl NetworkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_connection_distance(mut self, distance: f32) -> Self {
        self.connection_distance = distance;
        self
    }

    pub fn with_particle_size(mut self, size: f32) -> Self {
        self.particle_size = size;
        self
    }

    /// Set the half-width of the reflecting cube.
    pub fn with_boundary(mut self, boundary: f32) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_spawn_half_extent(mut self, extent: f32) -> Self {
        self.spawn_half_extent = extent;
        self
    }

    pub fn with_max_drift_speed(mut self, speed: f32) -> Self {
        self.max_drift_speed = speed;
        self
    }

    pub fn with_signal_count(mut self, count: usize) -> Self {
        self.signal_count = count;
        self
    }

    /// Set how much progress a signal gains per frame.
    pub fn with_signal_speed(mut self, speed: f32) -> Self {
        self.signal_speed = speed;
        self
    }

    /// Set the trail length as a fraction of the edge (0.0 - 1.0).
    pub fn with_signal_length(mut self, length: f32) -> Self {
        self.signal_length = length;
        self
    }

    pub fn with_rotation_drift(mut self, drift: f32) -> Self {
        self.rotation_drift = drift;
        self
    }

    pub fn with_tilt(mut self, scale: f32, smoothing: f32) -> Self {
        self.tilt_scale = scale;
        self.tilt_smoothing = smoothing;
        self
    }

    /// Fix the RNG seed so that runs are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every tunable. Zero particles and zero signals are accepted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("connection_distance", self.connection_distance)?;
        positive("particle_size", self.particle_size)?;
        positive("boundary", self.boundary)?;
        positive("spawn_half_extent", self.spawn_half_extent)?;
        positive("signal_speed", self.signal_speed)?;
        non_negative("max_drift_speed", self.max_drift_speed)?;
        non_negative("tilt_scale", self.tilt_scale)?;
        finite("rotation_drift", self.rotation_drift)?;
        within("signal_length", self.signal_length, 0.0, 1.0)?;
        within("tilt_smoothing", self.tilt_smoothing, 0.0, 1.0)?;
        within("spawn_half_extent", self.spawn_half_extent, 0.0, self.boundary)?;

        debug!(
            particles = self.particle_count,
            signals = self.signal_count,
            "network config validated"
        );
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn within(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
