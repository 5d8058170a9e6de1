//! Generator configuration.
//!
//! Defaults mirror where the helper historically lived in the engine tree.
//! A JSON file and CLI flags can override any field; precedence is
//! CLI > file > layout defaults.

use crate::error::GenerateError;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_FLATC_NAME: &str = "flatc";
pub const DEFAULT_LANGUAGE: &str = "cpp";
pub const DEFAULT_SCHEMA: &str = "savegame.fbs";

const SAVEGAME_DIR: &str = "Source/Engine/Services/Savegame";

/// Where the helper sits relative to the engine source tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// `<engine>/Scripts`, flatc vendored under `Scripts/Tools/flatc`.
    #[default]
    Scripts,
    /// `<engine>/Tools/FlatBuffers`, flatc vendored next to the helper.
    Tools,
}

impl Layout {
    /// Where the helper lives inside an engine checkout rooted at `engine_root`.
    pub fn helper_dir(self, engine_root: &Path) -> PathBuf {
        match self {
            Layout::Scripts => engine_root.join("Scripts"),
            Layout::Tools => engine_root.join("Tools").join("FlatBuffers"),
        }
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scripts" => Ok(Layout::Scripts),
            "tools" => Ok(Layout::Tools),
            other => Err(format!(
                "unknown layout '{}' (expected 'scripts' or 'tools')",
                other
            )),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Scripts => f.write_str("scripts"),
            Layout::Tools => f.write_str("tools"),
        }
    }
}

/// Everything `generate_headers` needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Directory holding the per-OS flatc subdirectories.
    pub flatc_dir: PathBuf,
    pub flatc_name: String,
    pub schemas_dir: PathBuf,
    /// Created before flatc runs. Only handed to flatc when `pass_output_dir` is set.
    pub output_dir: PathBuf,
    /// Processed in order; the first failure stops the batch.
    pub schemas: Vec<String>,
    /// Passed to flatc as `--<language>`.
    pub language: String,
    /// Append `-o <output_dir>` to the flatc command.
    ///
    /// Off by default: headers land in flatc's working directory and have to
    /// be moved into `output_dir` by hand.
    pub pass_output_dir: bool,
}

impl GeneratorConfig {
    /// Default configuration for a helper living in `root`.
    pub fn for_layout(layout: Layout, root: &Path) -> Self {
        let (flatc_dir, engine_root) = match layout {
            Layout::Scripts => (root.join("Tools").join(DEFAULT_FLATC_NAME), root.join("..")),
            Layout::Tools => (root.to_path_buf(), root.join("..").join("..")),
        };
        let savegame = engine_root.join(SAVEGAME_DIR);

        Self {
            flatc_dir,
            flatc_name: DEFAULT_FLATC_NAME.to_string(),
            schemas_dir: savegame.join("Schemas"),
            output_dir: savegame.join("Generated"),
            schemas: vec![DEFAULT_SCHEMA.to_string()],
            language: DEFAULT_LANGUAGE.to_string(),
            pass_output_dir: false,
        }
    }

    /// Overlays the fields set in `file`. Relative paths resolve against `base`.
    pub fn apply_file(&mut self, file: ConfigFile, base: &Path) {
        if let Some(dir) = file.flatc_dir {
            self.flatc_dir = base.join(dir);
        }
        if let Some(name) = file.flatc_name {
            self.flatc_name = name;
        }
        if let Some(dir) = file.schemas_dir {
            self.schemas_dir = base.join(dir);
        }
        if let Some(dir) = file.output_dir {
            self.output_dir = base.join(dir);
        }
        if let Some(schemas) = file.schemas {
            self.schemas = schemas;
        }
        if let Some(language) = file.language {
            self.language = language;
        }
        if let Some(pass) = file.pass_output_dir {
            self.pass_output_dir = pass;
        }
    }

    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.schemas.is_empty() {
            return Err(GenerateError::InvalidConfig(
                "schema list is empty".to_string(),
            ));
        }
        if self.schemas.iter().any(|s| s.trim().is_empty()) {
            return Err(GenerateError::InvalidConfig(
                "schema list contains an empty name".to_string(),
            ));
        }
        if self.flatc_name.trim().is_empty() {
            return Err(GenerateError::InvalidConfig(
                "flatc name is empty".to_string(),
            ));
        }
        let language = self.language.trim_start_matches('-');
        if language.is_empty() || language.contains(char::is_whitespace) {
            return Err(GenerateError::InvalidConfig(format!(
                "invalid output language '{}'",
                self.language
            )));
        }
        Ok(())
    }

    pub fn schema_path(&self, schema: &str) -> PathBuf {
        self.schemas_dir.join(schema)
    }
}

/// On-disk overrides, e.g. `savegame_gen.json`:
///
/// ```json
/// { "schemas": ["savegame.fbs", "settings.fbs"], "language": "cpp" }
/// ```
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub flatc_dir: Option<PathBuf>,
    pub flatc_name: Option<String>,
    pub schemas_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub schemas: Option<Vec<String>>,
    pub language: Option<String>,
    pub pass_output_dir: Option<bool>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, GenerateError> {
        let content = fs::read_to_string(path).map_err(|source| GenerateError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| GenerateError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripts_layout_defaults() {
        let root = Path::new("/engine/Scripts");
        let config = GeneratorConfig::for_layout(Layout::Scripts, root);

        assert_eq!(config.flatc_dir, root.join("Tools/flatc"));
        assert_eq!(
            config.schemas_dir,
            root.join("../Source/Engine/Services/Savegame/Schemas")
        );
        assert_eq!(
            config.output_dir,
            root.join("../Source/Engine/Services/Savegame/Generated")
        );
        assert_eq!(config.schemas, vec!["savegame.fbs".to_string()]);
        assert_eq!(config.language, "cpp");
        assert!(!config.pass_output_dir);
    }

    #[test]
    fn test_tools_layout_defaults() {
        let root = Path::new("/engine/Tools/FlatBuffers");
        let config = GeneratorConfig::for_layout(Layout::Tools, root);

        assert_eq!(config.flatc_dir, root);
        assert_eq!(
            config.schemas_dir,
            root.join("../../Source/Engine/Services/Savegame/Schemas")
        );
        assert_eq!(
            config.output_dir,
            root.join("../../Source/Engine/Services/Savegame/Generated")
        );
    }

    #[test]
    fn test_helper_dir_resolves_back_to_engine_root() {
        let engine = Path::new("/engine");

        let scripts =
            GeneratorConfig::for_layout(Layout::Scripts, &Layout::Scripts.helper_dir(engine));
        assert_eq!(scripts.flatc_dir, Path::new("/engine/Scripts/Tools/flatc"));
        assert_eq!(
            scripts.schemas_dir,
            Path::new("/engine/Scripts/../Source/Engine/Services/Savegame/Schemas")
        );

        let tools =
            GeneratorConfig::for_layout(Layout::Tools, &Layout::Tools.helper_dir(engine));
        assert_eq!(tools.flatc_dir, Path::new("/engine/Tools/FlatBuffers"));
        assert_eq!(
            tools.output_dir,
            Path::new(
                "/engine/Tools/FlatBuffers/../../Source/Engine/Services/Savegame/Generated"
            )
        );
    }

    #[test]
    fn test_layout_from_str() {
        assert_eq!("scripts".parse::<Layout>().unwrap(), Layout::Scripts);
        assert_eq!("Tools".parse::<Layout>().unwrap(), Layout::Tools);
        assert!("bin".parse::<Layout>().is_err());
    }

    #[test]
    fn test_apply_file_overrides_and_resolves_relative_paths() {
        let mut config = GeneratorConfig::for_layout(Layout::Scripts, Path::new("/root"));
        let file: ConfigFile = serde_json::from_str(
            r#"{
                "flatc_dir": "vendor/flatc",
                "schemas_dir": "/abs/schemas",
                "schemas": ["a.fbs", "b.fbs"],
                "pass_output_dir": true
            }"#,
        )
        .unwrap();

        config.apply_file(file, Path::new("/cfg"));

        assert_eq!(config.flatc_dir, Path::new("/cfg/vendor/flatc"));
        assert_eq!(config.schemas_dir, Path::new("/abs/schemas"));
        assert_eq!(config.schemas, vec!["a.fbs", "b.fbs"]);
        assert!(config.pass_output_dir);
        // Untouched fields keep their defaults
        assert_eq!(config.language, "cpp");
        assert_eq!(config.flatc_name, "flatc");
    }

    #[test]
    fn test_config_file_rejects_unknown_fields() {
        let result: Result<ConfigFile, _> = serde_json::from_str(r#"{ "schema": "x.fbs" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_and_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            ConfigFile::load(&missing),
            Err(GenerateError::ConfigRead { .. })
        ));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(
            ConfigFile::load(&bad),
            Err(GenerateError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_validate() {
        let mut config = GeneratorConfig::for_layout(Layout::Scripts, Path::new("."));
        assert!(config.validate().is_ok());

        config.schemas.clear();
        assert!(matches!(
            config.validate(),
            Err(GenerateError::InvalidConfig(_))
        ));

        config.schemas = vec!["  ".to_string()];
        assert!(config.validate().is_err());

        config.schemas = vec![DEFAULT_SCHEMA.to_string()];
        config.language = "--".to_string();
        assert!(config.validate().is_err());
    }
}
