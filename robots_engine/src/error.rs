//! Error types for the robots engine.

use thiserror::Error;

/// Reasons a robot cannot be placed on a planet.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RobotError {
    /// The starting cell lies outside the planet's grid.
    #[error("robot placement out of bounds: {x}, {y}")]
    OutOfBounds { x: i64, y: i64 },

    /// The heading character is not one of `N`, `E`, `S` or `W`.
    #[error("invalid heading: {0:?}")]
    InvalidHeading(char),
}

/// Errors raised while loading or running a program.
#[derive(Debug, Error)]
pub enum Error {
    /// The input text does not have the expected line or token shape.
    #[error("malformed input on line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    /// A robot entry could not be constructed.
    /// `index` is the zero-based position of the entry in the program.
    #[error("robot entry {index}: {source}")]
    Robot {
        index: usize,
        #[source]
        source: RobotError,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("replay serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            reason: reason.into(),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_formatting_a_robot_error_the_entry_index_and_cause_are_included() {
        let error = Error::Robot {
            index: 2,
            source: RobotError::OutOfBounds { x: 6, y: 1 },
        };

        assert_eq!(
            error.to_string(),
            "robot entry 2: robot placement out of bounds: 6, 1"
        );
    }

    #[test]
    fn when_formatting_a_malformed_input_error_the_line_is_included() {
        let error = Error::malformed(1, "expected two integers");

        assert_eq!(
            error.to_string(),
            "malformed input on line 1: expected two integers"
        );
    }
}
