//! Logical-identity and symbol-identity derivation.
//!
//! The naming contract ties three names together for every shader:
//!
//! - source unit: `lighting/Basic.vert.glsl`
//! - SPIR-V artifact: `lighting/Basic.vert.spv` (DXIL: `.dxil`)
//! - embedded symbols: `SPV_lighting_Basic_vert` / `DXIL_lighting_Basic_vert`
//!
//! Suffixes are stripped by name, never by positional slicing, so a change in
//! suffix conventions shows up as a visible mismatch instead of a silently
//! truncated identity. Both formats share one sanitizer, which keeps the two
//! embedded symbols for a shader in lockstep by construction.

use crate::error::{RegistryError, Result};

/// Filename suffix of SPIR-V artifacts (Format A).
pub const SPV_SUFFIX: &str = ".spv";
/// Filename suffix of DXIL artifacts (Format B).
pub const DXIL_SUFFIX: &str = ".dxil";
/// Filename suffix of the shader source unit a logical identity names.
pub const SOURCE_SUFFIX: &str = ".glsl";

/// Shared stem of an artifact: its format-root-relative path with the format
/// suffix stripped.
///
/// An artifact that does not carry the expected suffix keeps its full name as
/// the stem. The walk embeds every regular file, so stray files still get a
/// well-defined (and collision-checked) identity rather than a sliced one.
pub fn artifact_stem<'a>(local_path: &'a str, suffix: &str) -> &'a str {
    match local_path.strip_suffix(suffix) {
        Some(stem) => stem,
        None => {
            tracing::warn!(path = local_path, suffix, "artifact without expected format suffix");
            local_path
        }
    }
}

/// Canonical name of the shader source unit, e.g. `lighting/Basic.vert.glsl`.
/// Directory structure is kept intact.
pub fn logical_identity(stem: &str) -> String {
    format!("{stem}{SOURCE_SUFFIX}")
}

/// Sanitize a stem into a valid Rust identifier fragment.
///
/// ASCII alphanumerics and `_` pass through; every other character (path
/// separators, dots, hyphens) becomes `_`. A stem that sanitizes to nothing,
/// or that would start a symbol with a digit, is rejected.
pub fn sanitize_symbol_stem(stem: &str) -> Result<String> {
    if stem.is_empty() {
        return Err(RegistryError::InvalidSymbol {
            path: stem.to_owned(),
            reason: "empty stem".to_owned(),
        });
    }

    let sanitized: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    // The `SPV_`/`DXIL_` prefixes make a leading digit legal, but keep the
    // stem a standalone identifier anyway so callers can reuse it freely.
    if sanitized.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(RegistryError::InvalidSymbol {
            path: stem.to_owned(),
            reason: "sanitized stem starts with a digit".to_owned(),
        });
    }

    Ok(sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_strips_the_format_suffix_by_name() {
        assert_eq!(artifact_stem("lighting/Basic.vert.spv", SPV_SUFFIX), "lighting/Basic.vert");
        assert_eq!(artifact_stem("lighting/Basic.vert.dxil", DXIL_SUFFIX), "lighting/Basic.vert");
    }

    #[test]
    fn stem_without_suffix_is_kept_whole() {
        assert_eq!(artifact_stem("lighting/readme.txt", SPV_SUFFIX), "lighting/readme.txt");
    }

    #[test]
    fn logical_identity_appends_the_source_suffix() {
        assert_eq!(logical_identity("lighting/Basic.vert"), "lighting/Basic.vert.glsl");
    }

    #[test]
    fn sanitizer_replaces_separators_and_dots() {
        assert_eq!(
            sanitize_symbol_stem("lighting/Basic.vert").unwrap(),
            "lighting_Basic_vert"
        );
        assert_eq!(sanitize_symbol_stem("post-fx/blur").unwrap(), "post_fx_blur");
    }

    #[test]
    fn both_formats_derive_the_same_symbol_stem() {
        let spv = sanitize_symbol_stem(artifact_stem("fx/Tone.frag.spv", SPV_SUFFIX)).unwrap();
        let dxil = sanitize_symbol_stem(artifact_stem("fx/Tone.frag.dxil", DXIL_SUFFIX)).unwrap();
        assert_eq!(spv, dxil);
    }

    #[test]
    fn leading_digit_is_rejected() {
        assert!(matches!(
            sanitize_symbol_stem("2d/Blit.vert"),
            Err(RegistryError::InvalidSymbol { .. })
        ));
    }

    #[test]
    fn empty_stem_is_rejected() {
        assert!(matches!(
            sanitize_symbol_stem(""),
            Err(RegistryError::InvalidSymbol { .. })
        ));
    }
}
