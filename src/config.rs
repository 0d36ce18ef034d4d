use clap::{ArgAction, Parser, Subcommand};
use config::{
    Config as ConfigCrate, // Need this for builder
    ConfigError as ConfigCrateError,
    Environment,
    File,
    Map,
    Source,
    Value,
};
use directories::ProjectDirs;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use crate::model::{Kind, NodeId};
use crate::persistence::DEFAULT_STORAGE_KEY;

const DEFAULT_PRETTY_JSON: bool = false;
const DEFAULT_SEED_CANVAS: bool = true;
const DEFAULT_LOG_LEVEL: &str = "warn";
const ENV_PREFIX: &str = "WIDGET_TREE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] ConfigCrateError),
    #[error("Failed to determine a storage directory; pass --storage-dir")]
    DirectoryNotFound,
    #[error("Validation error: {0}")]
    ValidationError(String),
}

// Optional fields allow for layered config (defaults -> file -> env -> args).
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
struct FileConfig {
    storage_dir: Option<PathBuf>,
    storage_key: Option<String>,
    pretty_json: Option<bool>,
    seed_canvas: Option<bool>,
    log_level: Option<String>,
}

/// Resolved settings. Every field has a value once layering is done.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the `<storage_key>.json` blob.
    pub storage_dir: PathBuf,
    pub storage_key: String,
    pub pretty_json: bool,
    /// Give an empty canvas one container on startup.
    pub seed_canvas: bool,
    pub log_level: String,
}

impl Config {
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Warn)
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Edit a persisted widget component tree", long_about = None)]
pub struct CliArgs {
    /// Path to a custom configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the resolved configuration and exit
    #[arg(long, global = true)]
    pub debug_config: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    storage_key: Option<String>,
    #[arg(long, global = true)]
    pretty_json: Option<bool>,
    #[arg(long, global = true)]
    seed_canvas: Option<bool>,
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the component tree as an outline
    Show {
        /// Print the persisted JSON instead
        #[arg(long)]
        json: bool,
    },
    /// List the component kinds and their properties
    Kinds,
    /// Add a default component at the root or into a container
    Add {
        kind: Kind,
        #[arg(long)]
        into: Option<NodeId>,
    },
    /// Patch properties with key=value pairs (values parse as JSON when they can)
    Set {
        id: NodeId,
        #[arg(required = true)]
        assignments: Vec<String>,
    },
    /// Remove a component and its subtree
    Remove { id: NodeId },
    /// Swap a component with its previous sibling
    MoveUp { id: NodeId },
    /// Swap a component with its next sibling
    MoveDown { id: NodeId },
    /// Move the sibling at FROM to TO, among the roots or in --container
    Reorder {
        from: usize,
        to: usize,
        #[arg(long)]
        container: Option<NodeId>,
    },
    /// Wrap sibling components in a new container
    Group {
        #[arg(required = true, num_args = 2..)]
        ids: Vec<NodeId>,
    },
    /// Replace a container by its children
    Ungroup { id: NodeId },
    /// Copy a component and paste the copy at the root or into --into
    Duplicate {
        id: NodeId,
        #[arg(long)]
        into: Option<NodeId>,
    },
}

impl Command {
    /// Whether the command can change the component tree.
    pub fn edits_tree(&self) -> bool {
        !matches!(self, Command::Show { .. } | Command::Kinds)
    }
}

/// Resolves configuration from the config file, the environment and `args`.
pub fn load_config(args: &CliArgs) -> Result<Config, ConfigError> {
    let env_source = Environment::with_prefix(ENV_PREFIX).separator("__");
    let env_map: Map<String, Value> = env_source.collect()?;

    build_config_from_args(args, Some(env_map))
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "widget-tree")
}

// Separate function to allow testing with specific args and override sources
fn build_config_from_args(
    args: &CliArgs,
    override_source: Option<Map<String, Value>>,
) -> Result<Config, ConfigError> {
    let config_file_path = args
        .config
        .clone()
        .or_else(|| project_dirs().map(|dirs| dirs.config_dir().join("config.toml")));

    let mut config_builder = ConfigCrate::builder();

    if let Some(ref path) = config_file_path {
        config_builder = config_builder.add_source(File::from(path.clone()).required(false));
    }

    // Overrides (environment or a test map) win over the file.
    if let Some(overrides) = override_source {
        for (key, value) in overrides {
            config_builder = config_builder.set_override(&key, value)?;
        }
    }

    let loaded_sources: FileConfig = config_builder.build()?.try_deserialize()?;

    // args > overrides > file > defaults
    let storage_dir = match args.storage_dir.clone().or(loaded_sources.storage_dir) {
        Some(dir) => dir,
        None => project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(ConfigError::DirectoryNotFound)?,
    };

    let log_level = match args.verbose {
        0 => args
            .log_level
            .clone()
            .or(loaded_sources.log_level)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    let config = Config {
        storage_dir,
        storage_key: args
            .storage_key
            .clone()
            .or(loaded_sources.storage_key)
            .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
        pretty_json: args
            .pretty_json
            .or(loaded_sources.pretty_json)
            .unwrap_or(DEFAULT_PRETTY_JSON),
        seed_canvas: args
            .seed_canvas
            .or(loaded_sources.seed_canvas)
            .unwrap_or(DEFAULT_SEED_CANVAS),
        log_level,
    };

    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let key = config.storage_key.trim();
    if key.is_empty() {
        return Err(ConfigError::ValidationError(
            "storage_key must not be empty".to_string(),
        ));
    }
    if key.contains(['/', '\\']) {
        return Err(ConfigError::ValidationError(format!(
            "storage_key '{}' must not contain path separators",
            key
        )));
    }
    if LevelFilter::from_str(&config.log_level).is_err() {
        return Err(ConfigError::ValidationError(format!(
            "unknown log_level '{}'",
            config.log_level
        )));
    }
    Ok(())
}
