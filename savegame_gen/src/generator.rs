//! Savegame header generation.
//!
//! Resolve flatc → create output dir → run flatc once per schema, stopping
//! at the first failure. Headers already generated by earlier schemas are
//! left in place.

use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::platform::{resolve_executable, PlatformProbe};
use crate::runner::{Invocation, ProcessRunner};
use std::fs;
use std::path::PathBuf;

/// Result of a fully successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub flatc: PathBuf,
    /// Schemas processed, in order.
    pub schemas: Vec<String>,
}

/// Runs flatc over every configured schema.
pub fn generate_headers(
    config: &GeneratorConfig,
    probe: &dyn PlatformProbe,
    runner: &dyn ProcessRunner,
) -> Result<GenerationReport, GenerateError> {
    log::info!("Generating savegame FlatBuffers headers...");
    config.validate()?;

    let flatc = resolve_executable(&config.flatc_dir, &config.flatc_name, probe)?;

    fs::create_dir_all(&config.output_dir).map_err(|source| GenerateError::CreateOutputDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let output_dir = config
        .pass_output_dir
        .then_some(config.output_dir.as_path());

    let mut processed = Vec::with_capacity(config.schemas.len());
    for schema in &config.schemas {
        log::info!("Processing `{}`...", schema);

        let invocation = Invocation::flatc(
            &flatc,
            &config.language,
            &config.schema_path(schema),
            output_dir,
        );
        log::debug!("Running: {}", invocation);

        let output = runner
            .run(&invocation)
            .map_err(|source| GenerateError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        let stdout = output.stdout_lossy();
        if !stdout.trim().is_empty() {
            log::debug!("flatc: {}", stdout.trim_end());
        }

        if !output.is_success() {
            return Err(GenerateError::CompilerInvocationFailed {
                schema: schema.clone(),
                code: output.exit_code,
                stderr: output.stderr_lossy(),
            });
        }
        processed.push(schema.clone());
    }

    log::info!("Savegame FlatBuffers header generation complete.");
    Ok(GenerationReport {
        flatc,
        schemas: processed,
    })
}
