//! Write the combined JSON Schema document under `schemas/` at the workspace root.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gca_models::write_schema;

fn output_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join("schemas")
        .join("openapi_schemas.json")
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the destination path
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let path = write_schema(output_path()).context("failed to generate schema document")?;
    println!("Wrote schema to {}", path.display());
    Ok(())
}
