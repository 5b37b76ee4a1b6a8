//! `cefbuild configure` — the full probe / emit / plan pipeline.
//!
//! Fails fast: no file is written and nothing is handed to the toolchain
//! once any fact or table lookup fails.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use cefbuild_platform::PlatformFacts;
use cefbuild_spec::build_link_plan;

use crate::commands::{plan, probe};

/// Run the full configuration pipeline.
pub fn run(python: &str, constants_out: &Path, format: Option<&str>, dry_run: bool) -> Result<()> {
    let facts = cefbuild_platform::probe(python)
        .with_context(|| format!("probing interpreter {python:?}"))?;
    configure_with_facts(&facts, constants_out, format, dry_run)
}

/// The pipeline after probing; split out so tests can inject facts.
///
/// The plan is built before the constants write so an unsupported platform
/// aborts with no file touched.
pub fn configure_with_facts(
    facts: &PlatformFacts,
    constants_out: &Path,
    format: Option<&str>,
    dry_run: bool,
) -> Result<()> {
    let link_plan = build_link_plan(facts)?;

    if !dry_run {
        cefbuild_spec::emit(facts, constants_out)?;
    }

    match format {
        Some("json") => {
            let report = json!({
                "facts": facts,
                "constants-path": constants_out,
                "constants-written": !dry_run,
                "link-plan": link_plan,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            probe::print_facts(facts, format)?;
            println!();
            if dry_run {
                println!("Constants: skipped (dry run), would write {}", constants_out.display());
            } else {
                println!("Constants: generated {}", constants_out.display());
            }
            println!();
            plan::print_plan(&link_plan, format)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cefbuild_spec::constants::parse_constants;

    fn facts() -> PlatformFacts {
        PlatformFacts::from_report("Linux", "64bit", 3, 11).unwrap()
    }

    #[test]
    fn configure_writes_constants_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("compile_time_constants.pxi");

        configure_with_facts(&facts(), &dest, None, false).unwrap();

        let text = std::fs::read_to_string(&dest).unwrap();
        let (sysname, major) = parse_constants(&text).unwrap();
        assert_eq!(sysname, "Linux");
        assert_eq!(major, 3);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("compile_time_constants.pxi");

        configure_with_facts(&facts(), &dest, None, true).unwrap();
        assert!(!dest.exists());
    }

    #[test]
    fn unsupported_platform_aborts_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("compile_time_constants.pxi");
        let facts = PlatformFacts::from_report("Darwin", "32bit", 3, 11).unwrap();

        let result = configure_with_facts(&facts, &dest, None, false);
        assert!(result.is_err());
        assert!(!dest.exists());
    }

    #[test]
    fn json_report_covers_facts_and_plan() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("compile_time_constants.pxi");
        configure_with_facts(&facts(), &dest, Some("json"), false).unwrap();
    }
}
