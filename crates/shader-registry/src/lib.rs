//! Build-time shader-binary registry generation.
//!
//! Walks two trees of compiled shader artifacts (SPIR-V and DXIL) under a
//! generated-assets root and emits a single Rust source file that embeds
//! every artifact with `include_bytes!` and maps each logical shader source
//! name (`lighting/Basic.vert.glsl`) to its compiled byte blobs in both
//! formats. Shader compilation itself is out of scope; the surrounding build
//! populates the trees before the generator runs.
//!
//! # Overview
//!
//! - [`collect`] discovers artifacts in deterministic order.
//! - [`ident`] derives logical identities and embedded symbol names.
//! - [`generate`] / [`render`] produce the four-section generated source.
//! - [`build_support`] wires the generator into a consumer's `build.rs`.
//! - `shader-registry-gen` is the same thing as a standalone build step.
//!
//! The generated registry exposes `SHADER_BYTE_TABLE`, a static table in
//! discovery order, and `SHADER_BYTE_MAP`, a lazily built lookup over it. A
//! SPIR-V blob is always present for every entry; the DXIL blob is present
//! only when a sibling artifact exists, and is the empty slice otherwise.

pub mod build_support;
pub mod collect;
pub mod emit;
pub mod error;
pub mod ident;

// Re-export primary types at crate root for convenience.
pub use collect::{collect, Artifact};
pub use emit::{generate, render, GeneratorConfig, RegistrySummary, ASSETS_DIR_ENV};
pub use error::{RegistryError, Result};
