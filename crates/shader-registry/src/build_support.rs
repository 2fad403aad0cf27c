//! Registry generation helpers for consumer `build.rs` scripts.
//!
//! These run the generator against a populated artifact tree and emit the
//! appropriate `cargo:` directives.
//!
//! # Usage
//!
//! In your `build.rs`:
//!
//! ```rust,ignore
//! fn main() -> anyhow::Result<()> {
//!     shader_registry::build_support::generate_for_build_script(
//!         std::path::Path::new("assets/Generated"),
//!     )?;
//!     Ok(())
//! }
//! ```
//!
//! Then include the generated registry from a module of your crate:
//!
//! ```rust,ignore
//! #[allow(non_upper_case_globals, dead_code)]
//! mod registry {
//!     include!(concat!(env!("OUT_DIR"), "/shader_registry.rs"));
//! }
//! ```
//!
//! The generated code builds its lookup map with `once_cell::sync::Lazy`, so
//! the including crate must depend on `once_cell`.

use std::path::{Path, PathBuf};

use crate::emit::{generate, GeneratorConfig, RegistrySummary, ASSETS_DIR_ENV};
use crate::error::{RegistryError, Result};

/// File name of the generated registry under `OUT_DIR`.
pub const REGISTRY_FILE: &str = "shader_registry.rs";

/// Run the generator over `<assets_root>/Spv` and `<assets_root>/Dxil`,
/// writing the registry to `<OUT_DIR>/shader_registry.rs`.
///
/// On success this prints `cargo:rerun-if-changed` for both format roots and
/// every discovered artifact, and `cargo:rustc-env` for [`ASSETS_DIR_ENV`] so
/// the relative references inside the generated text resolve when the
/// consumer crate is compiled.
///
/// # Panics
///
/// Panics if `OUT_DIR` is unset, i.e. when called outside a build script.
pub fn generate_for_build_script(assets_root: &Path) -> Result<RegistrySummary> {
    let out_dir = std::env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo for build scripts");
    let output = PathBuf::from(out_dir).join(REGISTRY_FILE);

    // include_bytes! paths must resolve from wherever rustc runs, so the env
    // var has to carry an absolute root.
    let assets_root = std::fs::canonicalize(assets_root).map_err(|e| RegistryError::Io {
        path: assets_root.to_path_buf(),
        source: e,
    })?;

    let config = GeneratorConfig::for_assets_root(assets_root.as_path(), output);
    let summary = generate(&config)?;

    println!("cargo:rerun-if-changed={}", config.spv_root.display());
    println!("cargo:rerun-if-changed={}", config.dxil_root.display());
    for artifact in summary.spv_artifacts.iter().chain(&summary.dxil_artifacts) {
        println!("cargo:rerun-if-changed={}", artifact.display());
    }
    println!("cargo:rustc-env={}={}", ASSETS_DIR_ENV, assets_root.display());

    Ok(summary)
}
