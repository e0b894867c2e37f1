//! WGSL sources and the uniform layouts they read.
//!
//! Both shaders share [`FrameUniforms`] at `@group(0) @binding(0)`. Linear
//! fog fades everything toward the black background between the fog near
//! and far distances, measured as view-space depth.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Per-frame camera, group transform and fog parameters.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    /// Fog near, fog far, node radius, unused.
    pub params: [f32; 4],
}

impl FrameUniforms {
    pub fn new(view: Mat4, proj: Mat4, model: Mat4, fog: (f32, f32), node_radius: f32) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            params: [fog.0, fog.1, node_radius, 0.0],
        }
    }
}

/// Flat color of a line batch. Lines are blended additively.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LineStyle {
    pub color: [f32; 3],
    pub opacity: f32,
}

impl LineStyle {
    pub fn new(color: Vec3, opacity: f32) -> Self {
        Self {
            color: color.to_array(),
            opacity,
        }
    }
}

/// Camera-facing discs, one instance per node.
///
/// Vertex buffer 0 is per-instance `NodeInstance` data: position at
/// location 0, color at location 1. Draw 6 vertices per instance.
pub const NODE_SHADER: &str = r#"
struct FrameUniforms {
    view: mat4x4<f32>,
    proj: mat4x4<f32>,
    model: mat4x4<f32>,
    params: vec4<f32>,
};

@group(0) @binding(0) var<uniform> frame: FrameUniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
    @location(1) corner: vec2<f32>,
    @location(2) depth: f32,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) position: vec3<f32>,
    @location(1) color: vec3<f32>,
) -> VertexOutput {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
    );
    let corner = corners[vertex_index % 6u];

    let view_pos = frame.view * frame.model * vec4<f32>(position, 1.0);
    let offset = vec4<f32>(corner * frame.params.z, 0.0, 0.0);

    var out: VertexOutput;
    out.clip_position = frame.proj * (view_pos + offset);
    out.color = color;
    out.corner = corner;
    out.depth = -view_pos.z;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    if dot(in.corner, in.corner) > 1.0 {
        discard;
    }
    let fog = smoothstep(frame.params.x, frame.params.y, in.depth);
    return vec4<f32>(in.color * (1.0 - fog), 1.0);
}
"#;

/// Line list in group-local space, one vertex per endpoint.
///
/// `@group(0) @binding(1)` holds the [`LineStyle`] of the batch. Fog scales
/// the color down so that additive blending fades distant lines out.
pub const LINE_SHADER: &str = r#"
struct FrameUniforms {
    view: mat4x4<f32>,
    proj: mat4x4<f32>,
    model: mat4x4<f32>,
    params: vec4<f32>,
};

struct LineStyle {
    color: vec3<f32>,
    opacity: f32,
};

@group(0) @binding(0) var<uniform> frame: FrameUniforms;
@group(0) @binding(1) var<uniform> style: LineStyle;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) depth: f32,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> VertexOutput {
    let view_pos = frame.view * frame.model * vec4<f32>(position, 1.0);

    var out: VertexOutput;
    out.clip_position = frame.proj * view_pos;
    out.depth = -view_pos.z;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let fog = smoothstep(frame.params.x, frame.params.y, in.depth);
    return vec4<f32>(style.color * (1.0 - fog), style.opacity);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sizes_match_wgsl_layout() {
        // Three mat4x4 and one vec4
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 208);
        // vec3 followed by f32 packs into 16 bytes
        assert_eq!(std::mem::size_of::<LineStyle>(), 16);
    }

    #[test]
    fn test_frame_uniform_params() {
        let uniforms = FrameUniforms::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY, (5.0, 25.0), 0.06);
        assert_eq!(uniforms.params, [5.0, 25.0, 0.06, 0.0]);
        assert_eq!(uniforms.model, Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn test_shaders_expose_entry_points() {
        for source in [NODE_SHADER, LINE_SHADER] {
            assert!(source.contains("fn vs_main"));
            assert!(source.contains("fn fs_main"));
        }
    }
}
