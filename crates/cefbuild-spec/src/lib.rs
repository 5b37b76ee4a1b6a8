//! Build specification for the CEF-embedding extension module.
//!
//! Two independent consumers of [`cefbuild_platform::PlatformFacts`]:
//! - [`constants`] writes the generated `compile_time_constants.pxi`
//!   header the extension source includes at compile time.
//! - [`plan`] assembles the full native compile/link specification,
//!   including the dependency-ordered static library list.

pub mod constants;
pub mod error;
pub mod plan;

pub use constants::{emit, render, CONSTANTS_FILE_NAME};
pub use error::{Result, SpecError};
pub use plan::{build_link_plan, LibraryKind, LibrarySpec, LinkPlan};
