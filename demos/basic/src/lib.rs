//! Consumes the registry generated by this crate's build script.
//!
//! Runtime code asks for compiled byte code by shader source name. A SPIR-V
//! blob is expected for every registered shader; a DXIL blob exists only
//! where the offline compile produced one.

#[allow(non_upper_case_globals, dead_code)]
mod registry {
    include!(concat!(env!("OUT_DIR"), "/shader_registry.rs"));
}

pub use registry::{ShaderByte, ShaderByteItem, SHADER_BYTE_MAP, SHADER_BYTE_TABLE};

/// SPIR-V byte code for the shader compiled from `name`,
/// e.g. `"lighting/Basic.vert.glsl"`.
pub fn spv_byte_code(name: &str) -> Option<&'static [u8]> {
    match SHADER_BYTE_MAP.get(name) {
        Some(bytes) if bytes.spv.is_present() => Some(bytes.spv.data),
        _ => {
            tracing::error!(shader = name, "no SPIR-V byte code registered");
            None
        }
    }
}

/// DXIL byte code for the shader compiled from `name`. Absent for shaders
/// the offline compile only produced SPIR-V for.
pub fn dxil_byte_code(name: &str) -> Option<&'static [u8]> {
    match SHADER_BYTE_MAP.get(name) {
        Some(bytes) if bytes.dxil.is_present() => Some(bytes.dxil.data),
        _ => {
            tracing::debug!(shader = name, "no DXIL byte code registered");
            None
        }
    }
}
