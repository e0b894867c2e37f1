//! Compile-time tunables for the particle network.
//!
//! These seed [`NetworkConfig::default`](crate::NetworkConfig). Changing them
//! changes density and pacing of the animation, never its rules.

use glam::Vec3;

// ── Particles ────────────────────────────────────────────────────────────────

/// Number of particles in the field.
pub const PARTICLE_COUNT: usize = 180;

/// Particles closer than this (world units) are connected.
pub const CONNECTION_DISTANCE: f32 = 3.0;

/// Radius of a rendered node, also used as the hover pick radius.
pub const PARTICLE_SIZE: f32 = 0.06;

/// Half-width of the reflecting cube.
pub const BOUNDARY: f32 = 6.0;

/// Particles spawn uniformly within ±this on each axis.
pub const SPAWN_HALF_EXTENT: f32 = 5.0;

/// Spawn velocity is uniform within ±this per axis, per frame.
pub const MAX_DRIFT_SPEED: f32 = 0.005;

// ── Signals ──────────────────────────────────────────────────────────────────

/// Size of the fixed signal pool.
pub const SIGNAL_COUNT: usize = 12;

/// Progress added per frame while traveling (~25 frames per edge).
pub const SIGNAL_SPEED: f32 = 0.04;

/// Trail length as a fraction of the current edge.
pub const SIGNAL_LENGTH: f32 = 0.25;

// ── View ─────────────────────────────────────────────────────────────────────

/// Background yaw added every frame, in radians.
pub const ROTATION_DRIFT: f32 = 0.001;

/// Pointer-to-tilt scale, in radians per unit of normalized pointer.
pub const TILT_SCALE: f32 = 0.1;

/// Exponential smoothing factor applied to tilt each frame.
pub const TILT_SMOOTHING: f32 = 0.05;

pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 12.0);
pub const CAMERA_FOV_DEGREES: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;

/// Linear fog toward the background between these view depths.
pub const FOG_NEAR: f32 = 5.0;
pub const FOG_FAR: f32 = 25.0;

// ── Colors ───────────────────────────────────────────────────────────────────

/// Node colors, picked uniformly per particle at spawn. White is listed twice
/// on purpose so that roughly a third of the nodes are bright.
pub const NODE_PALETTE: [Vec3; 6] = [
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(0x2b as f32 / 255.0, 0x05 as f32 / 255.0, 0x05 as f32 / 255.0),
    Vec3::new(0x05 as f32 / 255.0, 0x05 as f32 / 255.0, 0x2b as f32 / 255.0),
    Vec3::new(0x1a as f32 / 255.0, 0x02 as f32 / 255.0, 0x02 as f32 / 255.0),
    Vec3::new(0x02 as f32 / 255.0, 0x02 as f32 / 255.0, 0x1a as f32 / 255.0),
];

/// Connection lines: light pink (#FFB6C1).
pub const CONNECTION_COLOR: Vec3 = Vec3::new(1.0, 0xb6 as f32 / 255.0, 0xc1 as f32 / 255.0);
pub const CONNECTION_OPACITY: f32 = 0.35;

/// Signal trails: cyan (#00FFFF).
pub const SIGNAL_COLOR: Vec3 = Vec3::new(0.0, 1.0, 1.0);
pub const SIGNAL_OPACITY: f32 = 0.9;

// ── Overlay ──────────────────────────────────────────────────────────────────

/// Seconds between phrase changes.
pub const PHRASE_INTERVAL_SECS: f32 = 3.0;

/// Full passes through the phrase list before the carousel stops.
pub const PHRASE_LOOPS: usize = 3;
