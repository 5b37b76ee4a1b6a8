//! `cefbuild probe` — print the platform facts.

use anyhow::{bail, Context, Result};

use cefbuild_platform::PlatformFacts;

/// Probe the interpreter and print the resulting facts.
pub fn run(python: &str, format: Option<&str>) -> Result<()> {
    let facts = cefbuild_platform::probe(python)
        .with_context(|| format!("probing interpreter {python:?}"))?;
    print_facts(&facts, format)
}

/// Print facts in the requested format.
pub fn print_facts(facts: &PlatformFacts, format: Option<&str>) -> Result<()> {
    match format {
        Some("json") => {
            println!("{}", serde_json::to_string_pretty(facts)?);
        }
        None | Some("text") => {
            println!("=== Platform Facts ===");
            println!("  OS family:   {:?} (uname {:?})", facts.os_family, facts.sysname);
            println!("  Word size:   {}", facts.word_size.tag());
            println!(
                "  Interpreter: {}.{} (tag {:?})",
                facts.python_major, facts.python_minor, facts.version_tag
            );
            println!("  Extension:   {}", facts.extension_name());
        }
        Some(other) => bail!("unknown format: {other:?} (expected \"text\" or \"json\")"),
    }
    Ok(())
}
