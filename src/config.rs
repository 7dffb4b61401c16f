//! Generator configuration (`chaingen.yaml`).
//!
//! Every setting has a default, so the file is optional. Values are resolved
//! with the precedence CLI flag > environment variable > config file > default;
//! see [`ConfigOverrides::apply`].

use crate::codegen::{QuoteStyle, DEFAULT_HEADER};
use crate::error::GenerateError;
use crate::schema::SchemaKind;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "chaingen.yaml";

pub const ENV_SOURCE_DIR: &str = "CHAINGEN_SOURCE_DIR";
pub const ENV_OUTPUT: &str = "CHAINGEN_OUTPUT";
pub const ENV_SCHEMA: &str = "CHAINGEN_SCHEMA";

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory holding one document per chain
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Path of the generated TypeScript module
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// File names in `source_dir` that are never read
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub schema: SchemaKind,

    #[serde(default)]
    pub quote_style: QuoteStyle,

    /// First line of the generated module
    #[serde(default = "default_header")]
    pub header: String,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("cosmos_chains")
}

fn default_output() -> PathBuf {
    PathBuf::from("src/cosmos/chain-infos.ts")
}

fn default_exclude() -> Vec<String> {
    vec!["example.yaml".to_string()]
}

fn default_header() -> String {
    DEFAULT_HEADER.to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            output: default_output(),
            exclude: default_exclude(),
            schema: SchemaKind::default(),
            quote_style: QuoteStyle::default(),
            header: default_header(),
        }
    }
}

impl GeneratorConfig {
    /// Parse a config from YAML text.
    pub fn from_yaml_str(contents: &str) -> Result<Self, String> {
        // An empty file deserializes to null, which is not a mapping.
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents).map_err(|e| format!("Failed to parse YAML: {}", e))
    }

    /// Load a config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GenerateError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| GenerateError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_yaml_str(&contents).map_err(|message| GenerateError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Load `path` if given, otherwise `chaingen.yaml` when it exists, otherwise defaults.
    ///
    /// A path named explicitly must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, GenerateError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Whether `file_name` is on the exclude list.
    pub fn is_excluded(&self, file_name: &str) -> bool {
        self.exclude.iter().any(|excluded| excluded == file_name)
    }
}

/// Values that take priority over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub source_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub schema: Option<SchemaKind>,
    pub quote_style: Option<QuoteStyle>,
}

impl ConfigOverrides {
    /// Apply CLI values, then environment values, on top of `config`.
    ///
    /// `env` looks up an environment variable; pass `|key| std::env::var(key).ok()`
    /// in production.
    pub fn apply<E>(self, mut config: GeneratorConfig, env: E) -> Result<GeneratorConfig, String>
    where
        E: Fn(&str) -> Option<String>,
    {
        if let Some(source_dir) = self.source_dir.or_else(|| env(ENV_SOURCE_DIR).map(PathBuf::from)) {
            config.source_dir = source_dir;
        }

        if let Some(output) = self.output.or_else(|| env(ENV_OUTPUT).map(PathBuf::from)) {
            config.output = output;
        }

        match self.schema {
            Some(schema) => config.schema = schema,
            None => {
                if let Some(schema) = env(ENV_SCHEMA) {
                    config.schema = SchemaKind::from_str(schema.trim(), true).map_err(|_| {
                        format!(
                            "Unsupported schema: '{}' (from {}). Supported schemas: full, basic",
                            schema, ENV_SCHEMA
                        )
                    })?;
                }
            }
        }

        if let Some(quote_style) = self.quote_style {
            config.quote_style = quote_style;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.source_dir, PathBuf::from("cosmos_chains"));
        assert_eq!(config.output, PathBuf::from("src/cosmos/chain-infos.ts"));
        assert!(config.is_excluded("example.yaml"));
        assert!(!config.is_excluded("osmosis.yaml"));
        assert_eq!(config.schema, SchemaKind::Full);
        assert_eq!(config.quote_style, QuoteStyle::Escaped);
        assert_eq!(config.header, "import { ChainInfo } from './types/globals'");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = GeneratorConfig::from_yaml_str(
            "source_dir: chains\nschema: basic\nquote_style: verbatim\n",
        )
        .unwrap();

        assert_eq!(config.source_dir, PathBuf::from("chains"));
        assert_eq!(config.schema, SchemaKind::Basic);
        assert_eq!(config.quote_style, QuoteStyle::Verbatim);
        assert_eq!(config.output, PathBuf::from("src/cosmos/chain-infos.ts"));
        assert_eq!(config.exclude, vec!["example.yaml".to_string()]);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(GeneratorConfig::from_yaml_str("\n").unwrap(), GeneratorConfig::default());
    }

    #[test]
    fn test_unknown_yaml_keys_rejected() {
        let err = GeneratorConfig::from_yaml_str("sourcedir: chains\n").unwrap_err();
        assert!(err.contains("Failed to parse YAML"));
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.yaml");
        let err = GeneratorConfig::load(Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, GenerateError::Config { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("chaingen.yaml");
        std::fs::write(&path, "exclude:\n  - example.yaml\n  - template.yaml\n").unwrap();

        let config = GeneratorConfig::load(Some(path.as_path())).unwrap();
        assert!(config.is_excluded("template.yaml"));
    }

    #[test]
    fn test_cli_overrides_env_overrides_file() {
        let env: HashMap<&str, &str> = [
            (ENV_SOURCE_DIR, "env_chains"),
            (ENV_OUTPUT, "env/out.ts"),
            (ENV_SCHEMA, "basic"),
        ]
        .into_iter()
        .collect();
        let lookup = |key: &str| env.get(key).map(|v| v.to_string());

        let file = GeneratorConfig::from_yaml_str("source_dir: file_chains\n").unwrap();
        let overrides = ConfigOverrides {
            source_dir: Some(PathBuf::from("cli_chains")),
            ..Default::default()
        };

        let config = overrides.apply(file, lookup).unwrap();
        assert_eq!(config.source_dir, PathBuf::from("cli_chains"));
        assert_eq!(config.output, PathBuf::from("env/out.ts"));
        assert_eq!(config.schema, SchemaKind::Basic);
    }

    #[test]
    fn test_no_overrides_keeps_file_values() {
        let file = GeneratorConfig::from_yaml_str("output: gen/chains.ts\n").unwrap();
        let config = ConfigOverrides::default().apply(file, no_env).unwrap();
        assert_eq!(config.output, PathBuf::from("gen/chains.ts"));
    }

    #[test]
    fn test_bad_schema_env_is_reported() {
        let lookup = |key: &str| (key == ENV_SCHEMA).then(|| "nested".to_string());
        let err = ConfigOverrides::default()
            .apply(GeneratorConfig::default(), lookup)
            .unwrap_err();
        assert!(err.contains("Unsupported schema"));
        assert!(err.contains(ENV_SCHEMA));
    }

    #[test]
    fn test_schema_env_ignores_case_and_padding() {
        let lookup = |key: &str| (key == ENV_SCHEMA).then(|| " Basic ".to_string());
        let config = ConfigOverrides::default()
            .apply(GeneratorConfig::default(), lookup)
            .unwrap();
        assert_eq!(config.schema, SchemaKind::Basic);
    }
}
