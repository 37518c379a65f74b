//! # Artboard Replay
//!
//! Headless host for artboard-core. Loads a scene and a pointer script,
//! drives an [`EditorSession`] through every step and reports the result.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p artboard-replay -- --scene scene.json --script drag.json --pretty
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `ReplayConfig` - Resolved input and output paths
//! - `Step` - One scripted host event
//! - `ReplayReport` - Final scene, selection and history position

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod script;

pub use script::Step;

use std::fs;
use std::path::{Path, PathBuf};

use artboard_core::{EditorConfig, EditorError, EditorSession, Scene, Selection};
use clap::Parser;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

/// Command-line arguments for artboard-replay.
#[derive(Debug, Clone, Parser)]
#[command(name = "artboard-replay")]
#[command(about = "Replay pointer scripts against an artboard scene")]
#[command(version)]
pub struct CliArgs {
    /// Scene file, a JSON array of elements
    #[arg(long, env = "ARTBOARD_SCENE")]
    pub scene: PathBuf,

    /// Script file, a JSON array of steps
    #[arg(long, env = "ARTBOARD_SCRIPT")]
    pub script: PathBuf,

    /// Editor configuration file
    #[arg(long, env = "ARTBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the report
    #[arg(long)]
    pub pretty: bool,
}

/// Errors raised while loading replay inputs.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A script could not be parsed.
    #[error("invalid script {path}: {source}")]
    Script {
        /// Script file.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },

    /// A scene or config document was rejected by the editor.
    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// Replay inputs and output settings.
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Scene file.
    pub scene_path: PathBuf,
    /// Script file.
    pub script_path: PathBuf,
    /// Optional editor configuration file.
    pub config_path: Option<PathBuf>,
    /// Report destination, stdout when `None`.
    pub output: Option<PathBuf>,
    /// Pretty-print the report.
    pub pretty: bool,
}

impl From<CliArgs> for ReplayConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            scene_path: args.scene,
            script_path: args.script,
            config_path: args.config,
            output: args.output,
            pretty: args.pretty,
        }
    }
}

/// Outcome of a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    /// Committed scene after the last step.
    pub scene: Scene,
    /// Selection after the last step.
    pub selection: Selection,
    /// Number of history entries.
    pub history_len: usize,
    /// History cursor.
    pub cursor: usize,
    /// Number of steps applied.
    pub steps: usize,
}

impl ReplayReport {
    /// Serialize the report.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self, pretty: bool) -> Result<String, ReplayError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        json.map_err(|e| ReplayError::Editor(EditorError::Serialization(e)))
    }
}

fn read(path: &Path) -> Result<String, ReplayError> {
    fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a scene file.
///
/// # Errors
///
/// Returns an error if the file is unreadable or not a valid scene.
pub fn load_scene(path: &Path) -> Result<Scene, ReplayError> {
    Ok(Scene::from_json(&read(path)?)?)
}

/// Load a script file.
///
/// # Errors
///
/// Returns an error if the file is unreadable or not a valid script.
pub fn load_script(path: &Path) -> Result<Vec<Step>, ReplayError> {
    serde_json::from_str(&read(path)?).map_err(|source| ReplayError::Script {
        path: path.to_path_buf(),
        source,
    })
}

/// Load an editor configuration, or the defaults when no path is given.
///
/// # Errors
///
/// Returns an error if the file is unreadable or holds invalid values.
pub fn load_editor_config(path: Option<&Path>) -> Result<EditorConfig, ReplayError> {
    match path {
        Some(path) => Ok(EditorConfig::from_json(&read(path)?)?),
        None => Ok(EditorConfig::default()),
    }
}

/// Run `steps` against a fresh session. A gesture still open after the last
/// step is ended like a pointer release.
#[must_use]
pub fn replay(scene: Scene, config: EditorConfig, steps: &[Step]) -> ReplayReport {
    let mut session = EditorSession::new(scene, config);
    for step in steps {
        step.apply(&mut session);
    }
    if session.gesture().is_some() {
        debug!("closing gesture left open by script");
        session.pointer_up();
    }

    let history = session.history();
    ReplayReport {
        scene: (**session.committed_scene()).clone(),
        selection: session.selection().clone(),
        history_len: history.len(),
        cursor: history.cursor(),
        steps: steps.len(),
    }
}

/// Load every input named by `config` and replay the script.
///
/// # Errors
///
/// Returns an error if any input cannot be loaded.
pub fn run_replay(config: &ReplayConfig) -> Result<ReplayReport, ReplayError> {
    let scene = load_scene(&config.scene_path)?;
    let steps = load_script(&config.script_path)?;
    let editor_config = load_editor_config(config.config_path.as_deref())?;
    info!(
        elements = scene.len(),
        steps = steps.len(),
        "replaying {}",
        config.script_path.display()
    );

    let report = replay(scene, editor_config, &steps);
    info!(history = report.history_len, cursor = report.cursor, "replay finished");
    Ok(report)
}
