//! `cefbuild emit` — write only the constants header.

use std::path::Path;

use anyhow::{Context, Result};

/// Probe the interpreter and write the constants header.
pub fn run(python: &str, destination: &Path) -> Result<()> {
    let facts = cefbuild_platform::probe(python)
        .with_context(|| format!("probing interpreter {python:?}"))?;
    cefbuild_spec::emit(&facts, destination)?;
    println!("Generated {}", destination.display());
    Ok(())
}
