//! Immutable platform facts derived from the probe.

use serde::{Deserialize, Serialize};

use crate::error::{ProbeError, Result};

/// Operating system family of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OsFamily {
    /// Linux (any distribution).
    Linux,
    /// Microsoft Windows.
    Windows,
    /// Apple macOS (uname reports "Darwin").
    MacOs,
    /// Anything else uname may report (BSDs, Solaris, ...).
    Other,
}

impl OsFamily {
    /// Classify a uname sysname string.
    pub fn from_sysname(sysname: &str) -> Self {
        match sysname {
            "Linux" => OsFamily::Linux,
            "Windows" => OsFamily::Windows,
            "Darwin" => OsFamily::MacOs,
            _ => OsFamily::Other,
        }
    }
}

/// Pointer width of the interpreter build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WordSize {
    /// 32-bit interpreter.
    Bits32,
    /// 64-bit interpreter.
    Bits64,
}

impl WordSize {
    /// Directory-name tag matching the extension source tree layout
    /// (`lib_32bit` / `lib_64bit`).
    pub fn tag(&self) -> &'static str {
        match self {
            WordSize::Bits32 => "32bit",
            WordSize::Bits64 => "64bit",
        }
    }
}

/// The facts one build invocation is keyed on.
///
/// Computed once by the probe and passed by shared reference to the
/// constants emitter and the link plan builder; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlatformFacts {
    /// OS family classification.
    pub os_family: OsFamily,
    /// The raw uname sysname, preserved byte-exact for emission.
    pub sysname: String,
    /// Word size of the interpreter build.
    pub word_size: WordSize,
    /// Interpreter major version.
    pub python_major: u32,
    /// Interpreter minor version.
    pub python_minor: u32,
    /// Extension naming tag: major and minor concatenated with no
    /// separator and no padding ("27", "39", "312").
    pub version_tag: String,
}

impl PlatformFacts {
    /// Build facts from the raw values the interpreter reports.
    ///
    /// This is the pure construction path; [`crate::probe::probe`] feeds it
    /// from a live interpreter. `bits` must be exactly `"32bit"` or
    /// `"64bit"` — anything else is a hard error, never a guess.
    pub fn from_report(sysname: &str, bits: &str, major: u32, minor: u32) -> Result<Self> {
        let word_size = match bits {
            "32bit" => WordSize::Bits32,
            "64bit" => WordSize::Bits64,
            other => {
                return Err(ProbeError::UnsupportedArchitecture {
                    reported: other.to_string(),
                })
            }
        };

        let sysname = sysname.trim();
        if sysname.is_empty() {
            return Err(ProbeError::UnknownOperatingSystem);
        }

        Ok(Self {
            os_family: OsFamily::from_sysname(sysname),
            sysname: sysname.to_string(),
            word_size,
            python_major: major,
            python_minor: minor,
            version_tag: format!("{major}{minor}"),
        })
    }

    /// Module name the configured extension will be built as
    /// (e.g. `cefpython_py311`).
    pub fn extension_name(&self) -> String {
        format!("cefpython_py{}", self.version_tag)
    }
}
