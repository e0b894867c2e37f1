//! Validation of the built-in WGSL shaders with naga.
//!
//! Catches syntax and type errors without a GPU, and checks that the WGSL
//! uniform structs have the same size as their Rust counterparts.

use pulsenet::shaders::{FrameUniforms, LineStyle, LINE_SHADER, NODE_SHADER};

fn parse_and_validate(code: &str) -> Result<naga::Module, String> {
    let module = naga::front::wgsl::parse_str(code)
        .map_err(|e| format!("WGSL parse error: {:?}", e))?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| format!("WGSL validation error: {:?}", e))?;

    Ok(module)
}

fn struct_span(module: &naga::Module, name: &str) -> Option<u32> {
    module
        .types
        .iter()
        .find(|(_, ty)| ty.name.as_deref() == Some(name))
        .and_then(|(_, ty)| match ty.inner {
            naga::TypeInner::Struct { span, .. } => Some(span),
            _ => None,
        })
}

fn has_entry_point(module: &naga::Module, name: &str, stage: naga::ShaderStage) -> bool {
    module
        .entry_points
        .iter()
        .any(|ep| ep.name == name && ep.stage == stage)
}

#[test]
fn test_node_shader_is_valid() {
    let module = parse_and_validate(NODE_SHADER).unwrap();
    assert!(has_entry_point(&module, "vs_main", naga::ShaderStage::Vertex));
    assert!(has_entry_point(&module, "fs_main", naga::ShaderStage::Fragment));
}

#[test]
fn test_line_shader_is_valid() {
    let module = parse_and_validate(LINE_SHADER).unwrap();
    assert!(has_entry_point(&module, "vs_main", naga::ShaderStage::Vertex));
    assert!(has_entry_point(&module, "fs_main", naga::ShaderStage::Fragment));
}

#[test]
fn test_frame_uniforms_layout_matches() {
    let expected = std::mem::size_of::<FrameUniforms>() as u32;
    for source in [NODE_SHADER, LINE_SHADER] {
        let module = parse_and_validate(source).unwrap();
        assert_eq!(struct_span(&module, "FrameUniforms"), Some(expected));
    }
}

#[test]
fn test_line_style_layout_matches() {
    let module = parse_and_validate(LINE_SHADER).unwrap();
    assert_eq!(
        struct_span(&module, "LineStyle"),
        Some(std::mem::size_of::<LineStyle>() as u32)
    );
}
