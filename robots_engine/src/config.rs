//! Configuration loading for a simulation run.

use crate::error::Result;
use crate::program::Program;
use crate::render::TerminalRenderer;
use crate::replay::create_replay_logger;
use crate::simulation::{FailurePolicy, Simulation};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure. Every field has a default so a file only needs to
/// mention what it changes.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// What to do with robots that cannot be placed (`"abort"` or `"skip"`).
    pub failure_policy: FailurePolicy,
    pub render: RenderConfig,
    pub replay: ReplayConfig,
}

/// Terminal animation settings
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Animate the run in the terminal (default: false)
    pub enabled: bool,

    /// Pause after each drawn frame in milliseconds (default: 150)
    pub frame_delay_ms: u64,

    /// Mark scented cells on the grid (default: true)
    pub show_scents: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            enabled: false,
            frame_delay_ms: 150,
            show_scents: true,
        }
    }
}

/// Replay output settings
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReplayConfig {
    /// File the JSON replay is written to. No replay is written when unset.
    pub path: Option<String>,
}

impl SimulationConfig {
    pub fn load(path: &Path) -> Result<SimulationConfig> {
        let contents = fs::read_to_string(path)?;
        SimulationConfig::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<SimulationConfig> {
        Ok(toml::from_str(contents)?)
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.render.frame_delay_ms)
    }

    /// Builds a simulation of `program` wired up according to this configuration.
    pub fn simulation(&self, program: Program) -> Simulation {
        let replay_logger = create_replay_logger(self.replay.path.clone(), &program);
        let simulation = Simulation::new(program)
            .with_policy(self.failure_policy)
            .with_replay_logger(replay_logger);

        if self.render.enabled {
            simulation.with_renderer(Box::new(TerminalRenderer::stdout(
                self.frame_delay(),
                self.render.show_scents,
            )))
        } else {
            simulation
        }
    }
}
