//! Host platform and interpreter probing for the cefbuild configurator.
//!
//! The extension module is compiled against a specific host interpreter, so
//! every downstream decision (constants header, link plan) is keyed on a
//! small set of facts gathered here:
//! - **OS family** and the raw uname sysname string
//! - **Word size** of the interpreter build (32 or 64 bit)
//! - **Interpreter version** (major/minor tuple)

pub mod error;
pub mod facts;
pub mod probe;

pub use error::{ProbeError, Result};
pub use facts::{OsFamily, PlatformFacts, WordSize};
pub use probe::probe;
