//! Generated compile-time constants header.
//!
//! The extension's Cython source includes `compile_time_constants.pxi` at
//! its own compile time. The file carries exactly two `DEF` definitions:
//! the uname sysname (quoted string) and the interpreter major version
//! (bare integer). Native conditional code compares the string byte-exact,
//! so the value is never re-cased or normalized here.

use std::fs;
use std::io::Write;
use std::path::Path;

use cefbuild_platform::PlatformFacts;

use crate::error::{Result, SpecError};

/// File name of the generated header, fixed by the extension source layout.
pub const CONSTANTS_FILE_NAME: &str = "compile_time_constants.pxi";

/// Render the constants header for the given facts.
///
/// Pure half of [`emit`]; same facts always produce byte-identical text.
pub fn render(facts: &PlatformFacts) -> String {
    let mut out = String::new();
    out.push_str("# This file was generated by cefbuild\n");
    out.push_str(&format!("DEF UNAME_SYSNAME = \"{}\"\n", facts.sysname));
    out.push_str(&format!("DEF PY_MAJOR_VERSION = {}\n", facts.python_major));
    out
}

/// Write the constants header to `destination`, creating or truncating it.
///
/// The write goes to a sibling temporary file which is then renamed over
/// the destination, so a concurrent reader never observes a partial file
/// and concurrent emitters are last-writer-wins. A failure (missing parent
/// directory, permissions) surfaces as [`SpecError::Write`] and leaves no
/// partial file at the destination.
pub fn emit(facts: &PlatformFacts, destination: &Path) -> Result<()> {
    let contents = render(facts);

    let file_name = destination
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| CONSTANTS_FILE_NAME.to_string());
    let tmp_path = destination.with_file_name(format!(".{file_name}.tmp"));

    let write_err = |source: std::io::Error| SpecError::Write {
        path: destination.to_path_buf(),
        source,
    };

    {
        let mut tmp = fs::File::create(&tmp_path).map_err(write_err)?;
        tmp.write_all(contents.as_bytes()).map_err(write_err)?;
        tmp.sync_all().map_err(write_err)?;
    }

    if let Err(source) = fs::rename(&tmp_path, destination) {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_err(source));
    }
    Ok(())
}

/// Parse a constants header back into `(sysname, major_version)`.
///
/// Round-trip check used by tests and `cefbuild doctor`.
pub fn parse_constants(text: &str) -> Option<(String, u32)> {
    let mut sysname = None;
    let mut major = None;
    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("DEF UNAME_SYSNAME = ") {
            sysname = Some(rest.trim().trim_matches('"').to_string());
        } else if let Some(rest) = line.strip_prefix("DEF PY_MAJOR_VERSION = ") {
            major = rest.trim().parse().ok();
        }
    }
    Some((sysname?, major?))
}
