use crate::cli::ScoreArgs;
use crate::scoring::DimensionMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Dataset file looked up next to the executable when no path is given
pub const DEFAULT_DATA_FILE: &str = "comparison_data.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("Failed to write config file {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Dimension {old:?} maps to {new:?}, which is itself renamed")]
    ChainedDimension { old: String, new: String },

    #[error("Cannot locate the executable directory: {0}")]
    Executable(std::io::Error),
}

/// Configuration file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreConfig {
    /// Dataset to score
    #[serde(default)]
    pub data_path: Option<PathBuf>,

    /// Rename rubric dimensions before scoring
    #[serde(default)]
    pub normalize_dimensions: bool,

    /// Old label -> new label
    #[serde(default)]
    pub dimension_map: DimensionMap,
}

impl ScoreConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: ScoreConfig =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    /// Reject rename tables that would not settle after one run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some((old, new)) = self.dimension_map.chained_entry() {
            return Err(ConfigError::ChainedDimension {
                old: old.to_string(),
                new: new.to_string(),
            });
        }
        Ok(())
    }

    /// Generate a sample configuration
    pub fn sample() -> Self {
        Self {
            data_path: Some(PathBuf::from(DEFAULT_DATA_FILE)),
            normalize_dimensions: true,
            ..Default::default()
        }
    }
}

/// Settings for one scoring run, after merging arguments over the config file
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSettings {
    pub input: PathBuf,
    pub output: PathBuf,
    /// `Some` when dimension normalization is enabled
    pub dimension_map: Option<DimensionMap>,
    pub dry_run: bool,
    pub summary_json: Option<PathBuf>,
}

impl ScoreSettings {
    /// Command-line values win over the config file. Without either, the
    /// dataset is `comparison_data.json` beside the executable.
    pub fn resolve(args: ScoreArgs, config: ScoreConfig) -> Result<Self, ConfigError> {
        let input = match args.input.or(config.data_path) {
            Some(path) => path,
            None => default_data_path()?,
        };
        let output = args.output.unwrap_or_else(|| input.clone());
        let normalize = args.normalize_dimensions || config.normalize_dimensions;

        Ok(Self {
            input,
            output,
            dimension_map: normalize.then_some(config.dimension_map),
            dry_run: args.dry_run,
            summary_json: args.summary_json,
        })
    }
}

fn default_data_path() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe().map_err(ConfigError::Executable)?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(DEFAULT_DATA_FILE))
}
