//! Error types for pulsenet.
//!
//! The simulation itself cannot fail once built. Errors come from
//! rejecting a malformed [`NetworkConfig`](crate::NetworkConfig) and, with
//! the `viewer` feature, from window and GPU setup.

use thiserror::Error;

/// A tunable that cannot drive the simulation.
///
/// Zero particles or zero signals are not errors: they produce an empty
/// but well-behaved network.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be finite (got {value})")]
    NonFinite { field: &'static str, value: f32 },

    #[error("{field} must be finite and greater than zero (got {value})")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must be finite and not negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must lie within {min}..={max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

/// Errors that can occur while opening or driving the viewer window.
#[cfg(feature = "viewer")]
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("invalid network configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create GPU surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter found; a WebGPU/Vulkan/Metal/DX12 capable GPU is required")]
    NoAdapter,

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,

    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
