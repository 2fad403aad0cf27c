//! Synthesizes a compiled-artifact tree, then generates the shader registry
//! from it. A real build would run the offline shader compilers here instead;
//! the generator only cares that the trees are populated when it runs.

use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let assets_root = out_dir.join("shader-assets");

    write_artifact(&assets_root.join("Spv/Fullscreen.vert.spv"), &spv_blob(0x11, 96))?;
    write_artifact(&assets_root.join("Spv/lighting/Basic.vert.spv"), &spv_blob(0x22, 128))?;
    write_artifact(&assets_root.join("Spv/lighting/Shadow.frag.spv"), &spv_blob(0x33, 160))?;
    // Only Basic has a DXIL sibling; Shadow and Fullscreen exercise the
    // absent-format path.
    write_artifact(
        &assets_root.join("Dxil/lighting/Basic.vert.dxil"),
        &dxil_blob(0x22, 144),
    )?;

    shader_registry::build_support::generate_for_build_script(&assets_root)?;
    Ok(())
}

fn write_artifact(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Deterministic stand-in for a SPIR-V module: magic word plus a tagged
/// byte pattern.
fn spv_blob(tag: u8, len: usize) -> Vec<u8> {
    let mut blob = 0x0723_0203u32.to_le_bytes().to_vec();
    blob.extend((0..len).map(|i| tag ^ (i as u8).wrapping_mul(31)));
    blob
}

/// Deterministic stand-in for a DXIL container: `DXBC` fourcc plus a tagged
/// byte pattern.
fn dxil_blob(tag: u8, len: usize) -> Vec<u8> {
    let mut blob = b"DXBC".to_vec();
    blob.extend((0..len).map(|i| tag ^ (i as u8).wrapping_mul(29)));
    blob
}
