//! `cefbuild plan` — build and print the link plan.

use anyhow::{bail, Context, Result};

use cefbuild_platform::PlatformFacts;
use cefbuild_spec::{build_link_plan, LibraryKind, LinkPlan};

/// Probe the interpreter, build the plan, and print it.
pub fn run(python: &str, format: Option<&str>) -> Result<()> {
    let facts = cefbuild_platform::probe(python)
        .with_context(|| format!("probing interpreter {python:?}"))?;
    let plan = build_link_plan(&facts)?;
    print_plan(&plan, format)
}

/// Print a link plan in the requested format.
pub fn print_plan(plan: &LinkPlan, format: Option<&str>) -> Result<()> {
    match format {
        Some("json") => {
            println!("{}", serde_json::to_string_pretty(plan)?);
        }
        None | Some("text") => {
            println!("=== Link Plan ===");
            println!("Compiler flags: {}", plan.compiler_flags.join(" "));
            println!("Linker flags:   {}", plan.linker_flags.join(" "));
            println!();
            println!("Include dirs ({}):", plan.include_dirs.len());
            for dir in &plan.include_dirs {
                println!("  {}", dir.display());
            }
            println!();
            println!("Library search dirs:");
            for dir in &plan.library_search_dirs {
                println!("  {}", dir.display());
            }
            println!();
            println!("Libraries (dependency order, dependents first):");
            for lib in &plan.libraries {
                let kind = match lib.kind {
                    LibraryKind::Shared => "shared",
                    LibraryKind::Static => "static",
                };
                println!("  {:<20} [{kind}]", lib.name);
            }
        }
        Some(other) => bail!("unknown format: {other:?} (expected \"text\" or \"json\")"),
    }
    Ok(())
}
