//! Standalone registry generation, for builds that invoke the generator as a
//! discrete pipeline step rather than through a `build.rs`. Exits non-zero on
//! any failure so the surrounding build can stop.

use std::path::PathBuf;

use anyhow::{bail, Context};
use shader_registry::{generate, GeneratorConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [assets_root, output] = args.as_slice() else {
        bail!("usage: shader-registry-gen <assets-root> <output>");
    };

    let config = GeneratorConfig::for_assets_root(PathBuf::from(assets_root), PathBuf::from(output));
    generate(&config).context("registry generation failed")?;
    Ok(())
}
