//! One-shot interpreter probe.
//!
//! Runs the host interpreter once with a short report script and parses its
//! output into [`PlatformFacts`]. The script reads `platform.uname()` for
//! the OS name rather than environment-derived fields, which are empty on
//! some interpreter builds.

use std::process::Command;

use crate::error::{ProbeError, Result};
use crate::facts::PlatformFacts;

/// The inline report script: four lines, one value per line.
const REPORT_SCRIPT: &str = "import platform, sys\n\
     print(platform.uname()[0])\n\
     print(platform.architecture()[0])\n\
     print(sys.version_info.major)\n\
     print(sys.version_info.minor)\n";

/// Probe the given interpreter executable for platform facts.
///
/// One-shot and read-only: a single interpreter invocation, no retries, no
/// filesystem writes. Any failure is fatal to the build — configuration
/// cannot proceed without a platform identity.
pub fn probe(python: &str) -> Result<PlatformFacts> {
    let output = Command::new(python)
        .arg("-c")
        .arg(REPORT_SCRIPT)
        .output()
        .map_err(|source| ProbeError::InterpreterQuery {
            python: python.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(ProbeError::MalformedReport {
            python: python.to_string(),
            detail: format!(
                "interpreter exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    let report = String::from_utf8_lossy(&output.stdout).into_owned();
    parse_report(python, &report)
}

/// Parse the four-line probe report into facts.
pub fn parse_report(python: &str, report: &str) -> Result<PlatformFacts> {
    let mut lines = report.lines();
    let sysname = lines.next().unwrap_or("").trim();
    let bits = lines.next().unwrap_or("").trim();
    let major = lines.next().unwrap_or("").trim();
    let minor = lines.next().unwrap_or("").trim();

    if major.is_empty() || minor.is_empty() {
        return Err(ProbeError::MalformedReport {
            python: python.to_string(),
            detail: format!("expected 4 report lines, got {:?}", report.trim()),
        });
    }

    let major: u32 = major.parse().map_err(|_| ProbeError::MalformedReport {
        python: python.to_string(),
        detail: format!("major version is not an integer: {major:?}"),
    })?;
    let minor: u32 = minor.parse().map_err(|_| ProbeError::MalformedReport {
        python: python.to_string(),
        detail: format!("minor version is not an integer: {minor:?}"),
    })?;

    PlatformFacts::from_report(sysname, bits, major, minor)
}
