//! Error types for platform probing.

/// Errors that can occur while probing the host platform.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The interpreter reported a word size other than 32 or 64 bit.
    #[error("unsupported architecture: interpreter reported {reported:?} (expected \"32bit\" or \"64bit\")")]
    UnsupportedArchitecture {
        /// The raw architecture string the interpreter reported.
        reported: String,
    },

    /// The OS identification string came back empty even from uname.
    #[error("unknown operating system: uname sysname is empty")]
    UnknownOperatingSystem,

    /// The interpreter executable could not be spawned.
    #[error("failed to run interpreter {python:?}: {source}")]
    InterpreterQuery {
        /// The executable that was invoked.
        python: String,
        /// The underlying spawn/wait error.
        #[source]
        source: std::io::Error,
    },

    /// The interpreter ran but its report could not be parsed.
    #[error("malformed probe report from {python:?}: {detail}")]
    MalformedReport {
        /// The executable that was invoked.
        python: String,
        /// Description of what was wrong with the output.
        detail: String,
    },
}

/// Result type for probe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;
