//! Error taxonomy for registry generation.
//!
//! A missing format tree is deliberately *not* represented here: optional
//! trees collapse to an empty artifact list in [`crate::collect`]. Everything
//! below is fatal and aborts generation before any output is written, since a
//! partial registry would silently drop shaders at link time.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal generation failures.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Directory traversal failed below an existing root.
    #[error("filesystem traversal failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// Reading or writing a concrete path failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Embedded references are emitted as text, so artifact paths must be
    /// valid UTF-8.
    #[error("artifact path {path} is not valid UTF-8")]
    NonUtf8Path { path: PathBuf },

    /// A format root must live under the generated-assets root, otherwise no
    /// relative embedding path exists for its artifacts.
    #[error("format root {root} is not under the assets root {assets}")]
    RootNotUnderAssets { root: PathBuf, assets: PathBuf },

    /// Two SPIR-V artifacts derived the same logical identity. Last-write-wins
    /// would silently shadow one of them, so this fails loudly instead.
    #[error("artifacts {first} and {second} both map to logical identity \"{identity}\"")]
    IdentityCollision {
        identity: String,
        first: String,
        second: String,
    },

    /// Two artifacts of the same format sanitized to the same embedded
    /// symbol; the generated source would not compile.
    #[error("artifacts {first} and {second} both sanitize to symbol {symbol}")]
    SymbolCollision {
        symbol: String,
        first: String,
        second: String,
    },

    /// The sanitized symbol stem is not a valid Rust identifier.
    #[error("cannot derive a symbol from {path}: {reason}")]
    InvalidSymbol { path: String, reason: String },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
