use anyhow::{Context, Result};
use clap::Parser;
use savegame_gen::{
    generate_headers, ConfigFile, DryRunRunner, FixedPlatform, GenerateError, GeneratorConfig,
    HostPlatform, Layout, PlatformProbe, ProcessRunner, SystemRunner, UNEXPECTED_EXIT_CODE,
};
use std::path::PathBuf;

/// Picked up from the helper root when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "savegame_gen.json";

#[derive(Parser, Debug)]
#[command(name = "generate-savegame")]
#[command(about = "Generate savegame FlatBuffers headers with the vendored flatc", long_about = None)]
#[command(version)]
struct Args {
    /// Schema files to compile, relative to the schemas directory
    schemas: Vec<String>,

    /// Directory the helper lives in; layout paths are relative to it.
    /// Defaults to the layout's helper directory under the current (engine root) directory
    #[arg(long, env = "SAVEGAME_ROOT")]
    root: Option<PathBuf>,

    /// Directory arrangement: scripts (<engine>/Scripts) or tools (<engine>/Tools/FlatBuffers)
    #[arg(long, env = "SAVEGAME_LAYOUT", default_value_t = Layout::Scripts)]
    layout: Layout,

    /// JSON file overriding layout defaults
    #[arg(long, env = "SAVEGAME_CONFIG")]
    config: Option<PathBuf>,

    /// Override host OS detection (windows, linux, macos)
    #[arg(long, env = "SAVEGAME_PLATFORM")]
    platform: Option<String>,

    /// Directory holding the Windows/, Linux/ and MacOs/ flatc binaries
    #[arg(long, env = "SAVEGAME_FLATC_DIR")]
    flatc_dir: Option<PathBuf>,

    #[arg(long, env = "SAVEGAME_SCHEMAS_DIR")]
    schemas_dir: Option<PathBuf>,

    #[arg(long, env = "SAVEGAME_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// flatc output language flag, without the leading dashes
    #[arg(long = "lang", env = "SAVEGAME_LANG")]
    language: Option<String>,

    /// Pass `-o <output-dir>` to flatc instead of generating into the working directory
    #[arg(long)]
    pass_output_dir: bool,

    /// Print the flatc commands without running them
    #[arg(long)]
    dry_run: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    // Try ensuring .env is loaded if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let level = std::str::FromStr::from_str(&args.log_level).unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    // The final diagnostic bypasses the log filter so `--log-level off` still reports failures
    if let Err(err) = run(args) {
        let code = match err.downcast_ref::<GenerateError>() {
            Some(gen_err) => {
                match gen_err {
                    GenerateError::CompilerInvocationFailed { stderr, .. } => {
                        eprintln!("Error running `flatc`: {}", stderr.trim_end())
                    }
                    _ => eprintln!("Error: {:#}", err),
                }
                gen_err.exit_code()
            }
            None => {
                eprintln!("Error: {:#}", err);
                UNEXPECTED_EXIT_CODE
            }
        };
        std::process::exit(code);
    }
}

fn run(args: Args) -> Result<()> {
    let config = build_config(&args)?;
    log::debug!("Configuration: {:?}", config);

    let probe: Box<dyn PlatformProbe> = match args.platform {
        Some(os) => Box::new(FixedPlatform(os)),
        None => Box::new(HostPlatform),
    };
    let runner: Box<dyn ProcessRunner> = if args.dry_run {
        Box::new(DryRunRunner)
    } else {
        Box::new(SystemRunner)
    };

    let report = generate_headers(&config, probe.as_ref(), runner.as_ref())?;
    if !config.pass_output_dir {
        log::info!(
            "Headers were written to the working directory; move them to {}",
            config.output_dir.display()
        );
    }
    log::debug!(
        "Processed {} schema(s) with {}",
        report.schemas.len(),
        report.flatc.display()
    );
    Ok(())
}

fn build_config(args: &Args) -> Result<GeneratorConfig> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => {
            let engine_root =
                std::env::current_dir().context("Failed to determine current directory")?;
            args.layout.helper_dir(&engine_root)
        }
    };
    let mut config = GeneratorConfig::for_layout(args.layout, &root);

    let config_path = args.config.clone().or_else(|| {
        let candidate = root.join(DEFAULT_CONFIG_FILE);
        candidate.is_file().then_some(candidate)
    });
    if let Some(path) = config_path {
        log::debug!("Loading config from {}", path.display());
        let file = ConfigFile::load(&path)?;
        let base = path.parent().map(PathBuf::from).unwrap_or_default();
        config.apply_file(file, &base);
    }

    if let Some(dir) = &args.flatc_dir {
        config.flatc_dir = dir.clone();
    }
    if let Some(dir) = &args.schemas_dir {
        config.schemas_dir = dir.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(language) = &args.language {
        config.language = language.clone();
    }
    if !args.schemas.is_empty() {
        config.schemas = args.schemas.clone();
    }
    if args.pass_output_dir {
        config.pass_output_dir = true;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_cli_overrides_beat_defaults() {
        let args = Args::parse_from([
            "generate-savegame",
            "--root",
            "/engine/Tools/FlatBuffers",
            "--layout",
            "tools",
            "--lang",
            "rust",
            "--pass-output-dir",
            "a.fbs",
            "b.fbs",
        ]);
        let config = build_config(&args).unwrap();

        assert_eq!(config.flatc_dir, PathBuf::from("/engine/Tools/FlatBuffers"));
        assert_eq!(config.language, "rust");
        assert_eq!(config.schemas, vec!["a.fbs", "b.fbs"]);
        assert!(config.pass_output_dir);
    }

    #[test]
    fn test_default_root_is_helper_dir_under_cwd() {
        let args = Args::parse_from(["generate-savegame"]);
        let config = build_config(&args).unwrap();
        let cwd = std::env::current_dir().unwrap();

        assert_eq!(config.flatc_dir, cwd.join("Scripts").join("Tools").join("flatc"));
    }
}
