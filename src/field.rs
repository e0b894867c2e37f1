//! Drifting point masses inside a reflecting cube.
//!
//! Particles never interact with each other. Each frame every particle moves
//! by its velocity, then any axis whose coordinate has left the cube has its
//! velocity component negated. The check runs after the move, so a particle
//! that starts inside the cube overshoots the wall by at most one frame's
//! step on that axis before heading back.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::Rng;

use crate::constants::NODE_PALETTE;

/// A single simulated point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// Displacement per frame.
    pub velocity: Vec3,
    pub color: Vec3,
}

impl Particle {
    /// A white particle at `position` moving by `velocity` each frame.
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            color: Vec3::ONE,
        }
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }
}

/// Per-node data uploaded for instanced rendering.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct NodeInstance {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Positions, velocities and colors of every particle, stored column-wise so
/// that the proximity pass can borrow positions as one contiguous slice.
#[derive(Debug, Clone)]
pub struct ParticleField {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    colors: Vec<Vec3>,
    boundary: f32,
}

impl ParticleField {
    /// Spawn `count` particles uniformly within `±half_extent`, each drifting
    /// by up to `±max_speed` per axis and colored from [`NODE_PALETTE`].
    pub fn spawn<R: Rng>(
        count: usize,
        half_extent: f32,
        max_speed: f32,
        boundary: f32,
        rng: &mut R,
    ) -> Self {
        let particles = (0..count).map(|_| {
            let position = Vec3::new(
                symmetric(rng, half_extent),
                symmetric(rng, half_extent),
                symmetric(rng, half_extent),
            );
            let velocity = Vec3::new(
                symmetric(rng, max_speed),
                symmetric(rng, max_speed),
                symmetric(rng, max_speed),
            );
            let color = NODE_PALETTE[rng.gen_range(0..NODE_PALETTE.len())];
            Particle::new(position, velocity).with_color(color)
        });
        Self::from_particles(particles, boundary)
    }

    /// Build a field from pre-set particles.
    pub fn from_particles<I>(particles: I, boundary: f32) -> Self
    where
        I: IntoIterator<Item = Particle>,
    {
        let particles = particles.into_iter();
        let (lower, _) = particles.size_hint();
        let mut field = Self {
            positions: Vec::with_capacity(lower),
            velocities: Vec::with_capacity(lower),
            colors: Vec::with_capacity(lower),
            boundary,
        };
        for p in particles {
            field.positions.push(p.position);
            field.velocities.push(p.velocity);
            field.colors.push(p.color);
        }
        field
    }

    /// Move every particle one frame and reflect off the cube walls.
    pub fn advance(&mut self) {
        let b = self.boundary;
        for (pos, vel) in self.positions.iter_mut().zip(self.velocities.iter_mut()) {
            *pos += *vel;

            if pos.x.abs() > b {
                vel.x = -vel.x;
            }
            if pos.y.abs() > b {
                vel.y = -vel.y;
            }
            if pos.z.abs() > b {
                vel.z = -vel.z;
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn boundary(&self) -> f32 {
        self.boundary
    }

    /// Current position of particle `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn position(&self, index: usize) -> Vec3 {
        self.positions[index]
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn particle(&self, index: usize) -> Option<Particle> {
        Some(Particle {
            position: *self.positions.get(index)?,
            velocity: self.velocities[index],
            color: self.colors[index],
        })
    }

    /// Write one render instance per particle into `out`.
    ///
    /// Only the first `min(len(), out.len())` slots are touched.
    pub fn fill_instances(&self, out: &mut [NodeInstance]) {
        for ((slot, pos), color) in out.iter_mut().zip(&self.positions).zip(&self.colors) {
            *slot = NodeInstance {
                position: pos.to_array(),
                color: color.to_array(),
            };
        }
    }
}

fn symmetric<R: Rng>(rng: &mut R, half: f32) -> f32 {
    if half > 0.0 {
        rng.gen_range(-half..half)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_advance_adds_velocity() {
        let mut field = ParticleField::from_particles(
            [Particle::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.5, -0.25, 0.0))],
            6.0,
        );
        field.advance();
        assert_eq!(field.position(0), Vec3::new(1.5, 1.75, 3.0));
        assert_eq!(field.velocities()[0], Vec3::new(0.5, -0.25, 0.0));
    }

    #[test]
    fn test_reflects_after_crossing_wall() {
        let mut field = ParticleField::from_particles(
            [Particle::new(Vec3::new(5.9, 0.0, 0.0), Vec3::new(0.2, 0.0, 0.0))],
            6.0,
        );

        field.advance();
        // Moved past the wall, velocity flipped for the next frame
        assert!((field.position(0).x - 6.1).abs() < 1e-5);
        assert_eq!(field.velocities()[0].x, -0.2);

        field.advance();
        assert!((field.position(0).x - 5.9).abs() < 1e-5);
        assert_eq!(field.velocities()[0].x, -0.2);
    }

    #[test]
    fn test_reflects_each_axis_independently() {
        let mut field = ParticleField::from_particles(
            [Particle::new(
                Vec3::new(-5.95, 5.95, 0.0),
                Vec3::new(-0.1, 0.1, 0.1),
            )],
            6.0,
        );
        field.advance();
        assert_eq!(field.velocities()[0], Vec3::new(0.1, -0.1, 0.1));
    }

    #[test]
    fn test_overshoot_is_bounded_by_one_step() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = ParticleField::spawn(200, 5.0, 0.3, 6.0, &mut rng);
        let max_step = field
            .velocities()
            .iter()
            .map(|v| v.abs().max_element())
            .fold(0.0f32, f32::max);

        for _ in 0..2_000 {
            field.advance();
            for pos in field.positions() {
                assert!(pos.abs().max_element() <= 6.0 + max_step + 1e-4);
            }
        }
    }

    #[test]
    fn test_spawn_respects_extents() {
        let mut rng = StdRng::seed_from_u64(11);
        let field = ParticleField::spawn(500, 5.0, 0.005, 6.0, &mut rng);
        assert_eq!(field.len(), 500);
        for i in 0..field.len() {
            let p = field.particle(i).unwrap();
            assert!(p.position.abs().max_element() <= 5.0);
            assert!(p.velocity.abs().max_element() <= 0.005);
            assert!(NODE_PALETTE.contains(&p.color));
        }
    }

    #[test]
    fn test_empty_field_advances() {
        let mut field = ParticleField::from_particles([], 6.0);
        field.advance();
        assert!(field.is_empty());
        assert_eq!(field.particle(0), None);
    }

    #[test]
    fn test_fill_instances() {
        let field = ParticleField::from_particles(
            [
                Particle::new(Vec3::X, Vec3::ZERO),
                Particle::new(Vec3::Y, Vec3::ZERO).with_color(Vec3::new(0.1, 0.2, 0.3)),
            ],
            6.0,
        );
        let mut out = [NodeInstance::zeroed(); 2];
        field.fill_instances(&mut out);
        assert_eq!(out[0].position, [1.0, 0.0, 0.0]);
        assert_eq!(out[0].color, [1.0, 1.0, 1.0]);
        assert_eq!(out[1].color, [0.1, 0.2, 0.3]);
    }
}
