//! Native compile/link specification.
//!
//! A closed-world table keyed by `(os_family, word_size)` produces the
//! complete flag, path, and library lists the toolchain needs. Library
//! order is a hard invariant: static linkers resolve undefined symbols only
//! against libraries not yet consumed, so if library A references symbols
//! defined in B, A must come before B. Getting this wrong does not fail
//! the link — it fails at import time with undefined-symbol errors.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use cefbuild_platform::{OsFamily, PlatformFacts, WordSize};

use crate::error::{Result, SpecError};

/// Link kind of a native library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LibraryKind {
    /// Resolved from a shared object at link time.
    Shared,
    /// Linked into the extension from a `.a`/`.lib` archive.
    Static,
}

/// One native library the extension links against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibrarySpec {
    /// Library name as passed to the linker (no `lib` prefix, no suffix).
    pub name: String,
    /// Shared or static.
    pub kind: LibraryKind,
}

impl LibrarySpec {
    fn shared(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: LibraryKind::Shared,
        }
    }

    fn static_(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: LibraryKind::Static,
        }
    }
}

/// The complete native build specification for one platform.
///
/// Built once per invocation from [`PlatformFacts`] and never mutated;
/// handed to the external toolchain invoker as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LinkPlan {
    /// Extra compiler flags, in order.
    pub compiler_flags: Vec<String>,
    /// Extra linker flags, in order.
    pub linker_flags: Vec<String>,
    /// Header search paths. Candidates that do not exist on a given
    /// distribution are harmless no-ops for the compiler's include search.
    pub include_dirs: Vec<PathBuf>,
    /// Library search paths, in order.
    pub library_search_dirs: Vec<PathBuf>,
    /// Libraries in strict dependency order: dependents first.
    pub libraries: Vec<LibrarySpec>,
}

/// Source-tree include paths shared by every platform.
const COMMON_INCLUDE_DIRS: &[&str] = &["./../", "./../../", "./../../cython_includes/"];

/// GTK 2 header locations across known distribution layouts.
///
/// Header placement is not standardized across distributions, so the plan
/// carries candidates for each known layout instead of probing the
/// filesystem. Unused entries cost nothing.
const GTK_INCLUDE_DIRS: &[&str] = &[
    "/usr/include/gtk-2.0",
    "/usr/include/glib-2.0",
    "/usr/include/gtk-unix-print-2.0",
    "/usr/include/cairo",
    "/usr/include/pango-1.0",
    "/usr/include/gdk-pixbuf-2.0",
    "/usr/include/atk-1.0",
    // Ubuntu/Debian multiarch
    "/usr/lib/x86_64-linux-gnu/gtk-2.0/include",
    "/usr/lib/x86_64-linux-gnu/gtk-unix-print-2.0",
    "/usr/lib/x86_64-linux-gnu/glib-2.0/include",
    "/usr/lib/i386-linux-gnu/gtk-2.0/include",
    "/usr/lib/i386-linux-gnu/gtk-unix-print-2.0",
    "/usr/lib/i386-linux-gnu/glib-2.0/include",
    // Fedora
    "/usr/lib64/gtk-2.0/include",
    "/usr/lib64/gtk-unix-print-2.0",
    "/usr/lib64/glib-2.0/include",
    "/usr/lib/gtk-2.0/include",
    "/usr/lib/gtk-2.0/gtk-unix-print-2.0",
    "/usr/lib/glib-2.0/include",
];

/// This project's own static libraries, in dependency order: the CEF C++
/// wrapper, then the application glue, the client handler, and the
/// low-level utilities last. Each earlier library references symbols
/// defined by the later ones.
const PROJECT_STATIC_LIBS: &[&str] =
    &["cefpythonapp", "client_handler", "cpp_utils"];

/// Build the link plan for the given facts.
///
/// Deterministic and side-effect-free: everything is selected from static
/// tables keyed by the facts, never from filesystem probing. An
/// unrecognized `(os_family, word_size)` pair is a hard
/// [`SpecError::UnsupportedPlatform`] — no default table, no partial plan.
pub fn build_link_plan(facts: &PlatformFacts) -> Result<LinkPlan> {
    match (facts.os_family, facts.word_size) {
        (OsFamily::Linux, _) => Ok(linux_plan(facts)),
        (OsFamily::Windows, _) => Ok(windows_plan(facts)),
        (OsFamily::MacOs, WordSize::Bits64) => Ok(macos_plan(facts)),
        (os_family, word_size) => Err(SpecError::UnsupportedPlatform {
            os_family,
            word_size,
        }),
    }
}

/// Library search paths shared by every platform: the word-size-tagged
/// local CEF binaries directory plus this project's sub-component outputs.
fn common_library_search_dirs(facts: &PlatformFacts) -> Vec<PathBuf> {
    vec![
        PathBuf::from(format!("./lib_{}", facts.word_size.tag())),
        PathBuf::from("./../../client_handler/"),
        // libcefpythonapp is built by the subprocess component.
        PathBuf::from("./../../subprocess/"),
        PathBuf::from("./../../cpp_utils/"),
    ]
}

fn strings(flags: &[&str]) -> Vec<String> {
    flags.iter().map(|f| f.to_string()).collect()
}

fn paths(dirs: &[&str]) -> Vec<PathBuf> {
    dirs.iter().copied().map(PathBuf::from).collect()
}

fn linux_plan(facts: &PlatformFacts) -> LinkPlan {
    let mut include_dirs = paths(COMMON_INCLUDE_DIRS);
    include_dirs.extend(paths(GTK_INCLUDE_DIRS));

    // GTK/X11 come first: they are needed only transitively, so nothing
    // after them may be expected to resolve their symbols.
    let mut libraries = vec![
        LibrarySpec::shared("X11"),
        LibrarySpec::shared("gobject-2.0"),
        LibrarySpec::shared("glib-2.0"),
        LibrarySpec::shared("gtk-x11-2.0"),
        LibrarySpec::static_("cef_dll_wrapper"),
    ];
    libraries.extend(PROJECT_STATIC_LIBS.iter().copied().map(LibrarySpec::static_));

    LinkPlan {
        // -flto fixes undefined symbols coming out of CEF's include/base/
        // headers; it only eliminates cross-unit dead code when paired
        // with section splitting here and --gc-sections at link time.
        compiler_flags: strings(&["-flto", "-fdata-sections", "-ffunction-sections", "-std=gnu++11"]),
        linker_flags: strings(&["-flto", "-Wl,--gc-sections"]),
        include_dirs,
        library_search_dirs: common_library_search_dirs(facts),
        libraries,
    }
}

fn windows_plan(facts: &PlatformFacts) -> LinkPlan {
    let mut libraries = vec![
        LibrarySpec::shared("User32"),
        LibrarySpec::shared("Gdi32"),
        LibrarySpec::shared("libcef"),
        LibrarySpec::static_("libcef_dll_wrapper"),
    ];
    libraries.extend(PROJECT_STATIC_LIBS.iter().copied().map(LibrarySpec::static_));

    LinkPlan {
        // /GL+/LTCG is the MSVC whole-program pair; /Gy;/Gw split
        // functions and data so /OPT:REF can drop the unreferenced ones.
        compiler_flags: strings(&["/EHsc", "/GL", "/Gy", "/Gw"]),
        linker_flags: strings(&["/LTCG", "/OPT:REF", "/OPT:ICF"]),
        include_dirs: paths(COMMON_INCLUDE_DIRS),
        library_search_dirs: common_library_search_dirs(facts),
        libraries,
    }
}

fn macos_plan(facts: &PlatformFacts) -> LinkPlan {
    let mut libraries = vec![LibrarySpec::static_("cef_dll_wrapper")];
    libraries.extend(PROJECT_STATIC_LIBS.iter().copied().map(LibrarySpec::static_));

    LinkPlan {
        compiler_flags: strings(&["-flto", "-fdata-sections", "-ffunction-sections", "-std=gnu++11"]),
        linker_flags: strings(&["-flto", "-Wl,-dead_strip", "-framework", "AppKit"]),
        include_dirs: paths(COMMON_INCLUDE_DIRS),
        library_search_dirs: common_library_search_dirs(facts),
        libraries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(sysname: &str, bits: &str) -> PlatformFacts {
        PlatformFacts::from_report(sysname, bits, 3, 11).unwrap()
    }

    fn names(plan: &LinkPlan) -> Vec<&str> {
        plan.libraries.iter().map(|l| l.name.as_str()).collect()
    }

    fn index_of(plan: &LinkPlan, name: &str) -> usize {
        plan.libraries
            .iter()
            .position(|l| l.name == name)
            .unwrap_or_else(|| panic!("{name} missing from plan"))
    }

    fn supported_pairs() -> Vec<PlatformFacts> {
        vec![
            facts("Linux", "32bit"),
            facts("Linux", "64bit"),
            facts("Windows", "32bit"),
            facts("Windows", "64bit"),
            facts("Darwin", "64bit"),
        ]
    }

    #[test]
    fn linux_golden_library_order() {
        let plan = build_link_plan(&facts("Linux", "64bit")).unwrap();
        assert_eq!(
            names(&plan),
            [
                "X11",
                "gobject-2.0",
                "glib-2.0",
                "gtk-x11-2.0",
                "cef_dll_wrapper",
                "cefpythonapp",
                "client_handler",
                "cpp_utils",
            ]
        );
    }

    #[test]
    fn windows_golden_library_order() {
        let plan = build_link_plan(&facts("Windows", "64bit")).unwrap();
        assert_eq!(
            names(&plan),
            [
                "User32",
                "Gdi32",
                "libcef",
                "libcef_dll_wrapper",
                "cefpythonapp",
                "client_handler",
                "cpp_utils",
            ]
        );
    }

    #[test]
    fn macos_golden_library_order() {
        let plan = build_link_plan(&facts("Darwin", "64bit")).unwrap();
        assert_eq!(
            names(&plan),
            ["cef_dll_wrapper", "cefpythonapp", "client_handler", "cpp_utils"]
        );
    }

    #[test]
    fn dependents_precede_dependencies_on_every_platform() {
        for f in supported_pairs() {
            let plan = build_link_plan(&f).unwrap();
            let wrapper = plan
                .libraries
                .iter()
                .position(|l| l.name.ends_with("cef_dll_wrapper"))
                .expect("CEF wrapper must never be omitted");
            let app = index_of(&plan, "cefpythonapp");
            let handler = index_of(&plan, "client_handler");
            let utils = index_of(&plan, "cpp_utils");

            assert!(wrapper < app, "wrapper before app glue ({:?})", f.os_family);
            assert!(app < handler, "app glue before handler ({:?})", f.os_family);
            assert!(handler < utils, "handler before utils ({:?})", f.os_family);
            assert_eq!(
                utils,
                plan.libraries.len() - 1,
                "utility library is always last ({:?})",
                f.os_family
            );
        }
    }

    #[test]
    fn linux_includes_gtk_header_candidates() {
        let plan = build_link_plan(&facts("Linux", "64bit")).unwrap();
        for candidate in [
            "/usr/include/gtk-2.0",
            "/usr/lib/x86_64-linux-gnu/glib-2.0/include",
            "/usr/lib64/gtk-2.0/include",
        ] {
            assert!(
                plan.include_dirs.contains(&PathBuf::from(candidate)),
                "missing GTK candidate {candidate}"
            );
        }
    }

    #[test]
    fn non_linux_plans_carry_no_gtk_paths() {
        for f in [facts("Windows", "64bit"), facts("Darwin", "64bit")] {
            let plan = build_link_plan(&f).unwrap();
            assert!(!plan
                .include_dirs
                .iter()
                .any(|d| d.to_string_lossy().contains("gtk")));
        }
    }

    #[test]
    fn search_dirs_are_word_size_tagged() {
        let plan = build_link_plan(&facts("Linux", "32bit")).unwrap();
        assert_eq!(plan.library_search_dirs[0], PathBuf::from("./lib_32bit"));
        let plan = build_link_plan(&facts("Linux", "64bit")).unwrap();
        assert_eq!(plan.library_search_dirs[0], PathBuf::from("./lib_64bit"));
    }

    #[test]
    fn lto_and_section_stripping_are_paired() {
        for f in supported_pairs() {
            let plan = build_link_plan(&f).unwrap();
            let compile_side = (plan.compiler_flags.iter().any(|fl| fl == "-flto")
                && plan.compiler_flags.iter().any(|fl| fl == "-ffunction-sections"))
                || plan.compiler_flags.iter().any(|fl| fl == "/GL");
            let link_side = plan
                .linker_flags
                .iter()
                .any(|fl| fl == "-Wl,--gc-sections" || fl == "-Wl,-dead_strip" || fl == "/LTCG");
            assert!(compile_side && link_side, "{:?}", f.os_family);
        }
    }

    #[test]
    fn unsupported_pair_is_a_hard_error() {
        let err = build_link_plan(&facts("Darwin", "32bit")).unwrap_err();
        assert!(matches!(
            err,
            SpecError::UnsupportedPlatform {
                os_family: OsFamily::MacOs,
                word_size: WordSize::Bits32,
            }
        ));

        let err = build_link_plan(&facts("FreeBSD", "64bit")).unwrap_err();
        assert!(matches!(
            err,
            SpecError::UnsupportedPlatform {
                os_family: OsFamily::Other,
                ..
            }
        ));
    }

    #[test]
    fn plan_round_trips_through_json() {
        let plan = build_link_plan(&facts("Linux", "64bit")).unwrap();
        let json = serde_json::to_string(&plan).unwrap();
        let back: LinkPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plan);
    }
}
