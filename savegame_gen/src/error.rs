//! Error types for savegame header generation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code used for every failure that does not carry the compiler's own status.
pub const UNEXPECTED_EXIT_CODE: i32 = 1;

#[derive(Error, Debug)]
pub enum GenerateError {
    /// The host OS is not one flatc is shipped for.
    #[error("Unsupported OS '{0}'.")]
    UnsupportedPlatform(String),

    /// The resolved flatc path is missing or not a regular file.
    #[error("`flatc` executable not found at '{}'.", .0.display())]
    ExecutableNotFound(PathBuf),

    /// flatc ran and exited non-zero (or was killed before reporting a status).
    #[error("Error running `flatc` on `{schema}`: {}", .stderr.trim_end())]
    CompilerInvocationFailed {
        schema: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to create output directory '{}'", .path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to execute '{}'", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read config file '{}'", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file '{}'", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl GenerateError {
    /// Process exit code this error should terminate with.
    ///
    /// A failed compiler run propagates flatc's own status; everything else
    /// collapses to [`UNEXPECTED_EXIT_CODE`].
    pub fn exit_code(&self) -> i32 {
        match self {
            GenerateError::CompilerInvocationFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => UNEXPECTED_EXIT_CODE,
        }
    }
}
