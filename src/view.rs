//! Background rotation, pointer tilt and hover detection.
//!
//! The whole network hangs in one rotating group. Its yaw drifts at a
//! constant rate; its pitch and roll ease toward a tilt derived from the
//! pointer, so noisy pointer input never makes the scene jump.
//!
//! Hover detection casts the pointer ray into the group's local space and
//! tests it against a small sphere at every particle. The hover callback
//! fires on transitions only: `true` when the pointer enters a node, `false`
//! when it leaves. Moving straight from one node to another reports a leave
//! followed by an enter.

use std::f32::consts::TAU;

use glam::{EulerRot, Mat4, Vec2, Vec3};
use tracing::debug;

use crate::camera::{Camera, Ray};
use crate::config::NetworkConfig;

/// Receives `true` on pointer enter and `false` on pointer leave.
pub type HoverCallback = Box<dyn FnMut(bool)>;

/// Rotation and pointer state of the network group.
pub struct ViewController {
    /// Euler angles applied in XYZ order.
    rotation: Vec3,
    drift: f32,
    tilt_scale: f32,
    smoothing: f32,
    camera: Camera,
    aspect: f32,
    pick_radius: f32,
    pointer: Vec2,
    hovered: Option<usize>,
    on_hover: Option<HoverCallback>,
}

impl ViewController {
    pub fn new(config: &NetworkConfig) -> Self {
        Self {
            rotation: Vec3::ZERO,
            drift: config.rotation_drift,
            tilt_scale: config.tilt_scale,
            smoothing: config.tilt_smoothing,
            camera: Camera::new(),
            aspect: 1.0,
            pick_radius: config.particle_size,
            pointer: Vec2::ZERO,
            hovered: None,
            on_hover: None,
        }
    }

    /// Install the callback that reports pointer enter/leave on nodes.
    pub fn set_hover_callback<F>(&mut self, callback: F)
    where
        F: FnMut(bool) + 'static,
    {
        self.on_hover = Some(Box::new(callback));
    }

    /// Viewport width over height, used to build pointer rays.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Run one frame: rotate, then re-pick the node under the pointer.
    ///
    /// `pointer` is in normalized device coordinates. `None` means the
    /// pointer is outside the view: tilt keeps easing toward the last known
    /// pointer and any hovered node is left.
    pub fn apply(&mut self, pointer: Option<Vec2>, positions: &[Vec3]) {
        if let Some(p) = pointer {
            self.pointer = p;
        }
        self.apply_rotation(self.pointer);

        let hit = pointer.and_then(|p| self.pick(p, positions));
        self.set_hovered(hit);
    }

    /// Advance the drift and ease the tilt toward `pointer`.
    pub fn apply_rotation(&mut self, pointer: Vec2) {
        self.rotation.y = (self.rotation.y + self.drift).rem_euclid(TAU);

        let target_x = pointer.y * self.tilt_scale;
        let target_z = -pointer.x * self.tilt_scale;
        self.rotation.x += (target_x - self.rotation.x) * self.smoothing;
        self.rotation.z += (target_z - self.rotation.z) * self.smoothing;
    }

    /// Index of the nearest node under `pointer`, if any.
    pub fn pick(&self, pointer: Vec2, positions: &[Vec3]) -> Option<usize> {
        let ray = self.camera.ray_through(pointer, self.aspect);
        let to_local = self.model_matrix().inverse();
        let local = Ray {
            origin: to_local.transform_point3(ray.origin),
            direction: to_local.transform_vector3(ray.direction).normalize_or(ray.direction),
        };

        positions
            .iter()
            .enumerate()
            .filter_map(|(i, &p)| local.intersect_sphere(p, self.pick_radius).map(|t| (i, t)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    fn set_hovered(&mut self, next: Option<usize>) {
        if next == self.hovered {
            return;
        }
        let previous = std::mem::replace(&mut self.hovered, next);
        debug!(?previous, ?next, "hover changed");

        if let Some(callback) = self.on_hover.as_mut() {
            if previous.is_some() {
                callback(false);
            }
            if next.is_some() {
                callback(true);
            }
        }
    }

    /// Group transform: rotation only, Euler XYZ.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    #[inline]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    #[inline]
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }
}
