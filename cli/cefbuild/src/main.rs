//! cefbuild CLI — build configurator for the CEF-embedding Python extension.

mod commands;
mod manifest;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use manifest::CefbuildManifest;

#[derive(Parser)]
#[command(name = "cefbuild", version, about = "Build configurator for the CEF Python extension")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe the environment, generate constants, and build the link plan
    Configure {
        /// Interpreter executable to probe
        #[arg(long)]
        python: Option<String>,
        /// Destination for the generated constants header
        #[arg(long)]
        constants_out: Option<PathBuf>,
        /// Output format (text, json)
        #[arg(long)]
        format: Option<String>,
        /// Compute everything but write no files
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the probed platform facts
    Probe {
        /// Interpreter executable to probe
        #[arg(long)]
        python: Option<String>,
        /// Output format (text, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Print the link plan for the probed platform
    Plan {
        /// Interpreter executable to probe
        #[arg(long)]
        python: Option<String>,
        /// Output format (text, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Write only the generated constants header
    Emit {
        /// Interpreter executable to probe
        #[arg(long)]
        python: Option<String>,
        /// Destination for the generated constants header
        #[arg(long)]
        constants_out: Option<PathBuf>,
    },
    /// Check interpreter, toolchain, and project status
    Doctor {
        /// Interpreter executable to probe
        #[arg(long)]
        python: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let manifest = match CefbuildManifest::find_and_load(&cwd)? {
        Some((manifest, _)) => manifest,
        None => CefbuildManifest::default(),
    };

    match cli.command {
        Commands::Configure {
            python,
            constants_out,
            format,
            dry_run,
        } => {
            let python = manifest.resolve_python(python.as_deref());
            let destination = manifest.resolve_constants_path(constants_out.as_deref());
            commands::configure::run(&python, &destination, format.as_deref(), dry_run)
        }

        Commands::Probe { python, format } => {
            let python = manifest.resolve_python(python.as_deref());
            commands::probe::run(&python, format.as_deref())
        }

        Commands::Plan { python, format } => {
            let python = manifest.resolve_python(python.as_deref());
            commands::plan::run(&python, format.as_deref())
        }

        Commands::Emit {
            python,
            constants_out,
        } => {
            let python = manifest.resolve_python(python.as_deref());
            let destination = manifest.resolve_constants_path(constants_out.as_deref());
            commands::emit::run(&python, &destination)
        }

        Commands::Doctor { python } => {
            let python = manifest.resolve_python(python.as_deref());
            commands::doctor::run(&cwd, &python)
        }
    }
}
