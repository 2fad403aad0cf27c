//! Deterministic artifact discovery.
//!
//! Every regular file under a format root is treated as an artifact to embed;
//! no extension filtering is applied. Traversal order is lexicographic by
//! file name at every directory level, so repeated runs over the same tree
//! produce the same sequence and therefore byte-identical generated output.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{RegistryError, Result};

/// A compiled shader artifact discovered under a format root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// On-disk path, as walked.
    pub path: PathBuf,
    /// Path relative to the generated-assets root, `/`-separated. This is
    /// what the embedding directive references.
    pub embed_path: String,
    /// Path relative to the format root, `/`-separated. This is what logical
    /// identities and symbol stems are derived from.
    pub local_path: String,
}

/// Recursively enumerate every regular file under `root`.
///
/// `assets_root` is the generated-assets root the format roots live under;
/// embedded references are emitted relative to it.
///
/// A missing `root` yields an empty vec: optional format trees (the DXIL tree
/// on platforms that skip that backend) are an absence signal, not an error.
/// Any other filesystem failure is fatal.
pub fn collect(root: &Path, assets_root: &Path) -> Result<Vec<Artifact>> {
    match std::fs::symlink_metadata(root) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(root = %root.display(), "format root missing, treating as empty");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(RegistryError::Io {
                path: root.to_path_buf(),
                source: e,
            })
        }
        Ok(_) => {}
    }

    let mut artifacts = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let embed_path = slash_path(entry.path().strip_prefix(assets_root).map_err(|_| {
            RegistryError::RootNotUnderAssets {
                root: root.to_path_buf(),
                assets: assets_root.to_path_buf(),
            }
        })?)?;
        // strip_prefix(root) cannot fail for entries produced by the walk.
        let local_path = slash_path(entry.path().strip_prefix(root).unwrap_or(entry.path()))?;
        artifacts.push(Artifact {
            path: entry.into_path(),
            embed_path,
            local_path,
        });
    }

    tracing::debug!(root = %root.display(), count = artifacts.len(), "collected artifacts");
    Ok(artifacts)
}

/// Join path components with `/` regardless of platform separator.
fn slash_path(path: &Path) -> Result<String> {
    let mut out = String::new();
    for component in path.iter() {
        let part = component.to_str().ok_or_else(|| RegistryError::NonUtf8Path {
            path: path.to_path_buf(),
        })?;
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(part);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"x").unwrap();
    }

    #[test]
    fn missing_root_is_empty_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = collect(&dir.path().join("Dxil"), dir.path()).unwrap();
        assert!(artifacts.is_empty());
    }

    #[test]
    fn enumerates_nested_files_in_lexicographic_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("Spv");
        touch(&root.join("lighting/Shadow.frag.spv"));
        touch(&root.join("lighting/Basic.vert.spv"));
        touch(&root.join("Fullscreen.vert.spv"));

        let artifacts = collect(&root, dir.path()).unwrap();
        let local: Vec<_> = artifacts.iter().map(|a| a.local_path.as_str()).collect();
        assert_eq!(
            local,
            [
                "Fullscreen.vert.spv",
                "lighting/Basic.vert.spv",
                "lighting/Shadow.frag.spv",
            ]
        );
    }

    #[test]
    fn embed_paths_are_relative_to_the_assets_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("Spv");
        touch(&root.join("lighting/Basic.vert.spv"));

        let artifacts = collect(&root, dir.path()).unwrap();
        assert_eq!(artifacts[0].embed_path, "Spv/lighting/Basic.vert.spv");
    }

    #[test]
    fn root_outside_assets_root_is_rejected() {
        let assets = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        touch(&elsewhere.path().join("Basic.vert.spv"));

        let err = collect(elsewhere.path(), assets.path()).unwrap_err();
        assert!(matches!(err, RegistryError::RootNotUnderAssets { .. }));
    }

    #[test]
    fn repeated_runs_agree() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("Spv");
        for name in ["b.spv", "a.spv", "sub/c.spv", "sub/a.spv"] {
            touch(&root.join(name));
        }
        let first = collect(&root, dir.path()).unwrap();
        let second = collect(&root, dir.path()).unwrap();
        assert_eq!(first, second);
    }
}
