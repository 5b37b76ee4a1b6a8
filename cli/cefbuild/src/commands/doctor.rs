//! `cefbuild doctor` — environment diagnostics.

use std::path::Path;
use std::process::Command;

use anyhow::Result;

use cefbuild_spec::constants::parse_constants;

use crate::manifest::CefbuildManifest;

/// Print diagnostic information about the interpreter, toolchain, and
/// project configuration. Diagnostics never fail the command; problems are
/// reported inline.
pub fn run(project_dir: &Path, python: &str) -> Result<()> {
    println!("=== cefbuild Doctor ===");
    println!();

    println!("cefbuild version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("--- Interpreter ---");
    match cefbuild_platform::probe(python) {
        Ok(facts) => {
            println!("  {python}: {}.{} on {}", facts.python_major, facts.python_minor, facts.sysname);
            println!("  Word size: {}", facts.word_size.tag());
            println!("  Extension: {}", facts.extension_name());
            match cefbuild_spec::build_link_plan(&facts) {
                Ok(plan) => println!("  Link plan: {} libraries", plan.libraries.len()),
                Err(e) => println!("  Link plan: error — {e}"),
            }
        }
        Err(e) => {
            println!("  {python}: error — {e}");
        }
    }
    println!();

    println!("--- System Tools ---");
    print_tool_status("cc", &["--version"]);
    print_tool_status("ld", &["--version"]);
    println!();

    println!("--- Project Status ---");
    match CefbuildManifest::find_and_load(project_dir) {
        Ok(Some((manifest, dir))) => {
            println!("  cefbuild.toml: found at {}", dir.display());
            println!("  Interpreter:   {}", manifest.resolve_python(None));
            println!(
                "  Constants:     {}",
                manifest.resolve_constants_path(None).display()
            );
        }
        Ok(None) => {
            println!("  cefbuild.toml: not found (defaults apply)");
        }
        Err(e) => {
            println!("  cefbuild.toml: error — {e}");
        }
    }

    let constants = project_dir.join(cefbuild_spec::CONSTANTS_FILE_NAME);
    match std::fs::read_to_string(&constants) {
        Ok(text) => match parse_constants(&text) {
            Some((sysname, major)) => {
                println!("  {}: {sysname} / {major}", constants.display());
            }
            None => {
                println!("  {}: present but unparseable", constants.display());
            }
        },
        Err(_) => {
            println!("  {}: not generated yet", constants.display());
        }
    }

    Ok(())
}

fn print_tool_status(name: &str, args: &[&str]) {
    match Command::new(name).args(args).output() {
        Ok(output) => {
            let version = String::from_utf8_lossy(&output.stdout);
            let first_line = version.lines().next().unwrap_or("(unknown version)");
            println!("  {name}: {first_line}");
        }
        Err(_) => {
            println!("  {name}: not found");
        }
    }
}
