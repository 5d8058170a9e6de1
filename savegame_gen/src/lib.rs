//! Savegame FlatBuffers header generation.
//!
//! Locates the vendored `flatc` binary for the host OS and runs it over the
//! engine's savegame schemas. The compiler and the generated code are owned
//! elsewhere; this crate only dispatches the command.
//!
//! # Example
//!
//! ```no_run
//! use savegame_gen::{generate_headers, GeneratorConfig, HostPlatform, Layout, SystemRunner};
//! use std::path::Path;
//!
//! let config = GeneratorConfig::for_layout(Layout::Scripts, Path::new("Scripts"));
//! let report = generate_headers(&config, &HostPlatform, &SystemRunner)?;
//! println!("generated {} schema(s)", report.schemas.len());
//! # Ok::<(), savegame_gen::GenerateError>(())
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod platform;
pub mod runner;

pub use config::{ConfigFile, GeneratorConfig, Layout};
pub use error::{GenerateError, UNEXPECTED_EXIT_CODE};
pub use generator::{generate_headers, GenerationReport};
pub use platform::{resolve_executable, FixedPlatform, HostPlatform, Platform, PlatformProbe};
pub use runner::{DryRunRunner, Invocation, ProcessOutput, ProcessRunner, SystemRunner};
