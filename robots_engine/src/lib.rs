//! # robots_engine
//!
//! The simulation engine for the Martian Robots problem.
//!
//! Robots are placed on a bounded rectangular planet and follow strings of `L`, `R` and `F`
//! instructions. A robot that moves off the grid is lost and leaves a scent on the cell it
//! fell from, which keeps later robots from being lost over the same edge.
//!
//! ```
//! use robots_engine::{run, Program};
//!
//! let program = Program::parse("5 3\n1 1 E\nRFRFRFRF\n3 2 N\nFRRFLLFFRRFLL").unwrap();
//! let reports = run(&program).unwrap();
//!
//! assert_eq!(reports[0].to_string(), "1 1 E");
//! assert_eq!(reports[1].to_string(), "3 3 N LOST");
//! ```

pub mod config;
pub mod error;
pub mod planet;
pub mod program;
pub mod render;
pub mod replay;
pub mod robot;
pub mod simulation;

pub use config::SimulationConfig;
pub use error::{Error, Result, RobotError};
pub use planet::Planet;
pub use program::{Program, RandomProgramOptions, RobotSpec};
pub use render::{Frame, Renderer, TerminalRenderer};
pub use replay::{create_replay_logger, MemoryReplayLogger, ReplayLogger};
pub use robot::{Heading, Instruction, Movement, Robot, RobotReport};
pub use simulation::{run, FailurePolicy, Simulation, SkippedRobot};

#[cfg(feature = "python")]
use pyo3::exceptions::PyValueError;
#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Runs a program given in the text input format and returns the final robot reports.
#[cfg(feature = "python")]
#[pyfunction]
fn simulate(contents: &str) -> PyResult<Vec<RobotReport>> {
    Program::parse(contents)
        .and_then(|program| run(&program))
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

#[cfg(feature = "python")]
#[pymodule]
fn robots_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Heading>()?;
    m.add_class::<RobotReport>()?;
    m.add_function(wrap_pyfunction!(simulate, m)?)?;
    Ok(())
}
