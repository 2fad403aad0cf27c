//! Registry emission.
//!
//! Produces the generated Rust source from the collector's output. The whole
//! artifact is rendered to an in-memory string first and written in a single
//! step only when every section rendered cleanly, so a failed run never
//! leaves a partial registry behind.
//!
//! The generated file has four sections, in fixed order:
//!
//! 1. a `@generated` banner,
//! 2. one `include_bytes!` embedding directive per artifact (all SPIR-V
//!    artifacts first, then all DXIL artifacts, in collector order),
//! 3. the `ShaderByteItem` / `ShaderByte` record declarations,
//! 4. the `SHADER_BYTE_TABLE` literal plus the lazily built
//!    `SHADER_BYTE_MAP` lookup over it.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::collect::{collect, Artifact};
use crate::error::{RegistryError, Result};
use crate::ident::{artifact_stem, logical_identity, sanitize_symbol_stem, DXIL_SUFFIX, SPV_SUFFIX};

/// Compile-time env var the embedded references are resolved against. The
/// consumer's `build.rs` supplies it via `cargo:rustc-env` (see
/// [`crate::build_support`]), which keeps the references in the generated
/// text relative to the generated-assets root.
pub const ASSETS_DIR_ENV: &str = "SHADER_ASSETS_DIR";

/// Directory of SPIR-V artifacts under the assets root.
pub const SPV_DIR: &str = "Spv";
/// Directory of DXIL artifacts under the assets root.
pub const DXIL_DIR: &str = "Dxil";

const SPV_SYMBOL_PREFIX: &str = "SPV_";
const DXIL_SYMBOL_PREFIX: &str = "DXIL_";

/// Where the generator reads artifacts from and writes the registry to.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Generated-assets root; embedded references are relative to this.
    pub assets_root: PathBuf,
    /// SPIR-V artifact tree. Must exist under `assets_root`.
    pub spv_root: PathBuf,
    /// DXIL artifact tree. May be entirely absent.
    pub dxil_root: PathBuf,
    /// Output path of the generated registry source.
    pub output: PathBuf,
}

impl GeneratorConfig {
    /// Conventional layout: `<assets_root>/Spv` and `<assets_root>/Dxil`.
    pub fn for_assets_root(assets_root: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        let assets_root = assets_root.into();
        Self {
            spv_root: assets_root.join(SPV_DIR),
            dxil_root: assets_root.join(DXIL_DIR),
            assets_root,
            output: output.into(),
        }
    }
}

/// What a generator run discovered, for logging and `cargo:` directives.
#[derive(Debug, Clone)]
pub struct RegistrySummary {
    /// Every SPIR-V artifact embedded, as walked.
    pub spv_artifacts: Vec<PathBuf>,
    /// Every DXIL artifact embedded, as walked.
    pub dxil_artifacts: Vec<PathBuf>,
    /// Number of table entries (one per SPIR-V artifact).
    pub entries: usize,
}

/// Run the generator and write the registry source to `config.output`,
/// overwriting any previous content.
pub fn generate(config: &GeneratorConfig) -> Result<RegistrySummary> {
    let (text, summary) = build(config)?;
    std::fs::write(&config.output, text).map_err(|e| RegistryError::Io {
        path: config.output.clone(),
        source: e,
    })?;
    tracing::info!(
        spv = summary.spv_artifacts.len(),
        dxil = summary.dxil_artifacts.len(),
        entries = summary.entries,
        output = %config.output.display(),
        "wrote shader registry"
    );
    Ok(summary)
}

/// Render the registry source without touching the output path.
pub fn render(config: &GeneratorConfig) -> Result<String> {
    build(config).map(|(text, _)| text)
}

fn build(config: &GeneratorConfig) -> Result<(String, RegistrySummary)> {
    let spv = collect(&config.spv_root, &config.assets_root)?;
    let dxil = collect(&config.dxil_root, &config.assets_root)?;

    if spv.is_empty() && !dxil.is_empty() {
        tracing::warn!(
            spv_root = %config.spv_root.display(),
            "SPIR-V tree is empty; the registry will contain no entries"
        );
    }

    // DXIL presence by shared stem, precomputed once instead of probing the
    // filesystem per entry. Table entries only reference DXIL symbols this
    // map proves exist, so the two formats cannot drift apart.
    let dxil_stems: HashMap<&str, &Artifact> = dxil
        .iter()
        .map(|a| (artifact_stem(&a.local_path, DXIL_SUFFIX), a))
        .collect();

    let dxil_symbols = symbol_stems(&dxil, DXIL_SUFFIX)?;
    let (spv_symbols, entries) = derive_entries(&spv, &dxil_stems)?;

    let mut out = String::new();
    render_banner(&mut out);
    render_embeds(&mut out, &spv, &spv_symbols, SPV_SYMBOL_PREFIX);
    render_embeds(&mut out, &dxil, &dxil_symbols, DXIL_SYMBOL_PREFIX);
    out.push_str(STRUCT_DECLS);
    render_table(&mut out, &entries);

    let summary = RegistrySummary {
        spv_artifacts: spv.into_iter().map(|a| a.path).collect(),
        dxil_artifacts: dxil.into_iter().map(|a| a.path).collect(),
        entries: entries.len(),
    };
    Ok((out, summary))
}

/// One row of the generated table.
struct TableEntry {
    identity: String,
    symbol_stem: String,
    has_dxil: bool,
}

/// Sanitized symbol stems for a format's artifacts, indexed like the artifact
/// list. Fails on stems that collide after sanitizing.
fn symbol_stems(artifacts: &[Artifact], suffix: &str) -> Result<Vec<String>> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    let mut stems = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let stem = sanitize_symbol_stem(artifact_stem(&artifact.local_path, suffix))?;
        if let Some(first) = seen.insert(stem.clone(), &artifact.local_path) {
            return Err(RegistryError::SymbolCollision {
                symbol: stem,
                first: first.to_owned(),
                second: artifact.local_path.clone(),
            });
        }
        stems.push(stem);
    }
    Ok(stems)
}

/// Derive the table rows and the SPIR-V symbol stems in one pass.
///
/// The identity check runs before the symbol check for each artifact, so a
/// pair of artifacts that collides both ways is reported as the identity
/// collision it fundamentally is.
fn derive_entries(
    spv: &[Artifact],
    dxil_stems: &HashMap<&str, &Artifact>,
) -> Result<(Vec<String>, Vec<TableEntry>)> {
    let mut seen_identity: HashMap<String, &str> = HashMap::new();
    let mut seen_symbol: HashMap<String, &str> = HashMap::new();
    let mut symbols = Vec::with_capacity(spv.len());
    let mut entries = Vec::with_capacity(spv.len());
    for artifact in spv {
        let stem = artifact_stem(&artifact.local_path, SPV_SUFFIX);
        let identity = logical_identity(stem);
        if let Some(first) = seen_identity.insert(identity.clone(), &artifact.local_path) {
            return Err(RegistryError::IdentityCollision {
                identity,
                first: first.to_owned(),
                second: artifact.local_path.clone(),
            });
        }
        let symbol_stem = sanitize_symbol_stem(stem)?;
        if let Some(first) = seen_symbol.insert(symbol_stem.clone(), &artifact.local_path) {
            return Err(RegistryError::SymbolCollision {
                symbol: symbol_stem,
                first: first.to_owned(),
                second: artifact.local_path.clone(),
            });
        }
        symbols.push(symbol_stem.clone());
        entries.push(TableEntry {
            identity,
            symbol_stem,
            has_dxil: dxil_stems.contains_key(stem),
        });
    }
    Ok((symbols, entries))
}

fn render_banner(out: &mut String) {
    out.push_str(
        "// @generated by shader-registry. Do not edit.\n\
         //\n\
         // Rebuilt from scratch on every generator run; entries absent from this\n\
         // run's artifact trees do not survive. Include from a module that allows\n\
         // `non_upper_case_globals` and `dead_code`.\n\n",
    );
}

fn render_embeds(out: &mut String, artifacts: &[Artifact], stems: &[String], prefix: &str) {
    for (artifact, stem) in artifacts.iter().zip(stems) {
        out.push_str(&format!(
            "pub static {prefix}{stem}: &[u8] =\n    \
             include_bytes!(concat!(env!(\"{ASSETS_DIR_ENV}\"), \"/{path}\"));\n",
            path = artifact.embed_path,
        ));
    }
    if !artifacts.is_empty() {
        out.push('\n');
    }
}

const STRUCT_DECLS: &str = "\
/// One embedded byte blob. An absent format is the empty slice, not an error.
#[derive(Debug, Clone, Copy)]
pub struct ShaderByteItem {
    pub data: &'static [u8],
}

impl ShaderByteItem {
    pub const EMPTY: Self = Self { data: &[] };

    pub fn byte_count(&self) -> u32 {
        self.data.len() as u32
    }

    pub fn is_present(&self) -> bool {
        !self.data.is_empty()
    }
}

/// Compiled byte blobs for one logical shader, per target format.
#[derive(Debug, Clone, Copy)]
pub struct ShaderByte {
    pub spv: ShaderByteItem,
    pub dxil: ShaderByteItem,
}

";

fn render_table(out: &mut String, entries: &[TableEntry]) {
    if entries.is_empty() {
        out.push_str("pub static SHADER_BYTE_TABLE: &[(&str, ShaderByte)] = &[];\n");
    } else {
        out.push_str("pub static SHADER_BYTE_TABLE: &[(&str, ShaderByte)] = &[\n");
        for entry in entries {
            let dxil = if entry.has_dxil {
                format!(
                    "ShaderByteItem {{ data: {DXIL_SYMBOL_PREFIX}{} }}",
                    entry.symbol_stem
                )
            } else {
                "ShaderByteItem::EMPTY".to_owned()
            };
            out.push_str(&format!(
                "    (\n        \
                 \"{identity}\",\n        \
                 ShaderByte {{\n            \
                 spv: ShaderByteItem {{ data: {SPV_SYMBOL_PREFIX}{stem} }},\n            \
                 dxil: {dxil},\n        \
                 }},\n    ),\n",
                identity = entry.identity,
                stem = entry.symbol_stem,
            ));
        }
        out.push_str("];\n");
    }

    out.push_str(
        "\npub static SHADER_BYTE_MAP: once_cell::sync::Lazy<\n    \
         std::collections::HashMap<&'static str, &'static ShaderByte>,\n\
         > = once_cell::sync::Lazy::new(|| {\n    \
         SHADER_BYTE_TABLE.iter().map(|(name, bytes)| (*name, bytes)).collect()\n\
         });\n",
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_tree(root: &Path, files: &[(&str, &[u8])]) {
        for (rel, bytes) in files {
            let path = root.join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, bytes).unwrap();
        }
    }

    fn config(root: &Path) -> GeneratorConfig {
        GeneratorConfig::for_assets_root(root, root.join("shader_registry.rs"))
    }

    #[test]
    fn concrete_scenario_basic_and_shadow() {
        let dir = tempfile::tempdir().unwrap();
        write_tree(
            dir.path(),
            &[
                ("Spv/lighting/Basic.vert.spv", b"aaaa".as_slice()),
                ("Spv/lighting/Shadow.frag.spv", b"bbbb".as_slice()),
                ("Dxil/lighting/Basic.vert.dxil", b"cccc".as_slice()),
            ],
        );

        let text = render(&config(dir.path())).unwrap();

        // Two SPIR-V embeds, one DXIL embed, referencing assets-root-relative
        // paths with forward slashes.
        assert!(text.contains(
            "pub static SPV_lighting_Basic_vert: &[u8] =\n    \
             include_bytes!(concat!(env!(\"SHADER_ASSETS_DIR\"), \"/Spv/lighting/Basic.vert.spv\"));"
        ));
        assert!(text.contains("pub static SPV_lighting_Shadow_frag: &[u8] ="));
        assert!(text.contains("pub static DXIL_lighting_Basic_vert: &[u8] ="));

        // Two table entries; only Basic has a DXIL reference.
        assert!(text.contains("\"lighting/Basic.vert.glsl\""));
        assert!(text.contains("\"lighting/Shadow.frag.glsl\""));
        assert!(text.contains("dxil: ShaderByteItem { data: DXIL_lighting_Basic_vert }"));
        // Only the Shadow entry has an absent DXIL reference.
        assert_eq!(text.matches("dxil: ShaderByteItem::EMPTY").count(), 1);
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let dir = tempfile::tempdir().unwrap();
        write_tree(dir.path(), &[("Spv/a.spv", b"a".as_slice())]);

        let text = render(&config(dir.path())).unwrap();
        let banner = text.find("// @generated").unwrap();
        let embed = text.find("pub static SPV_a").unwrap();
        let decls = text.find("pub struct ShaderByteItem").unwrap();
        let table = text.find("pub static SHADER_BYTE_TABLE").unwrap();
        let map = text.find("pub static SHADER_BYTE_MAP").unwrap();
        assert!(banner < embed && embed < decls && decls < table && table < map);
    }

    #[test]
    fn output_is_deterministic_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        write_tree(
            dir.path(),
            &[
                ("Spv/z.frag.spv", b"z".as_slice()),
                ("Spv/a.vert.spv", b"a".as_slice()),
                ("Spv/sub/m.comp.spv", b"m".as_slice()),
                ("Dxil/a.vert.dxil", b"d".as_slice()),
            ],
        );

        let cfg = config(dir.path());
        assert_eq!(render(&cfg).unwrap(), render(&cfg).unwrap());
    }

    #[test]
    fn missing_dxil_tree_leaves_every_entry_without_dxil() {
        let dir = tempfile::tempdir().unwrap();
        write_tree(dir.path(), &[("Spv/a.vert.spv", b"a".as_slice())]);

        let text = render(&config(dir.path())).unwrap();
        assert!(text.contains("dxil: ShaderByteItem::EMPTY"));
        assert!(!text.contains("DXIL_"));
    }

    #[test]
    fn empty_spv_tree_yields_empty_table_but_keeps_dxil_embeds() {
        let dir = tempfile::tempdir().unwrap();
        write_tree(dir.path(), &[("Dxil/a.vert.dxil", b"d".as_slice())]);
        std::fs::create_dir_all(dir.path().join("Spv")).unwrap();

        let text = render(&config(dir.path())).unwrap();
        assert!(text.contains("pub static SHADER_BYTE_TABLE: &[(&str, ShaderByte)] = &[];"));
        assert!(text.contains("pub static DXIL_a_vert: &[u8] ="));
    }

    #[test]
    fn identity_collision_fails_loudly() {
        let dir = tempfile::tempdir().unwrap();
        // "a" keeps its full name as stem, so it collides with "a.spv".
        write_tree(
            dir.path(),
            &[("Spv/a", b"x".as_slice()), ("Spv/a.spv", b"y".as_slice())],
        );

        let err = render(&config(dir.path())).unwrap_err();
        assert!(matches!(err, RegistryError::IdentityCollision { .. }));
    }

    #[test]
    fn symbol_collision_fails_loudly() {
        let dir = tempfile::tempdir().unwrap();
        write_tree(
            dir.path(),
            &[
                ("Spv/a.b.spv", b"x".as_slice()),
                ("Spv/a_b.spv", b"y".as_slice()),
            ],
        );

        let err = render(&config(dir.path())).unwrap_err();
        assert!(matches!(err, RegistryError::SymbolCollision { .. }));
    }

    #[test]
    fn failed_generation_writes_no_output() {
        let dir = tempfile::tempdir().unwrap();
        write_tree(
            dir.path(),
            &[("Spv/a", b"x".as_slice()), ("Spv/a.spv", b"y".as_slice())],
        );

        let cfg = config(dir.path());
        assert!(generate(&cfg).is_err());
        assert!(!cfg.output.exists());
    }

    #[test]
    fn generate_writes_the_rendered_text() {
        let dir = tempfile::tempdir().unwrap();
        write_tree(dir.path(), &[("Spv/a.vert.spv", b"a".as_slice())]);

        let cfg = config(dir.path());
        let summary = generate(&cfg).unwrap();
        assert_eq!(summary.entries, 1);
        assert_eq!(summary.spv_artifacts.len(), 1);
        assert!(summary.dxil_artifacts.is_empty());
        assert_eq!(std::fs::read_to_string(&cfg.output).unwrap(), render(&cfg).unwrap());
    }
}
