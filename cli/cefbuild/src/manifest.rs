//! `cefbuild.toml` manifest parsing and option resolution.
//!
//! The manifest is entirely optional: the configurator runs with no flags
//! and no manifest at all, reading only the ambient environment. When
//! present it supplies defaults that CLI flags still override.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default interpreter executable when neither flag nor manifest names one.
#[cfg(windows)]
pub const DEFAULT_PYTHON: &str = "python";
#[cfg(not(windows))]
pub const DEFAULT_PYTHON: &str = "python3";

/// Default constants destination: two levels above the setup directory,
/// where the extension source expects to include it from.
pub const DEFAULT_CONSTANTS_PATH: &str = "./../../compile_time_constants.pxi";

/// The top-level manifest structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CefbuildManifest {
    /// Build option overrides.
    #[serde(default)]
    pub build: Option<BuildConfig>,
}

/// The `[build]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildConfig {
    /// Interpreter executable to probe.
    #[serde(default)]
    pub python: Option<String>,
    /// Destination for the generated constants header.
    #[serde(default)]
    pub constants_path: Option<String>,
}

impl CefbuildManifest {
    /// Search upward from `start_dir` for a `cefbuild.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join("cefbuild.toml");
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: CefbuildManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing cefbuild.toml")
    }

    /// Resolve the interpreter executable: flag > manifest > default.
    pub fn resolve_python(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .or_else(|| self.build.as_ref().and_then(|b| b.python.clone()))
            .unwrap_or_else(|| DEFAULT_PYTHON.to_string())
    }

    /// Resolve the constants destination: flag > manifest > default.
    pub fn resolve_constants_path(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| {
                self.build
                    .as_ref()
                    .and_then(|b| b.constants_path.as_ref().map(PathBuf::from))
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONSTANTS_PATH))
    }
}
