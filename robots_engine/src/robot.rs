use crate::error::RobotError;
use crate::planet::Planet;
#[cfg(feature = "python")]
use pyo3::prelude::*;
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use serde::Serialize;
use std::fmt;

/// The direction a robot is facing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[cfg_attr(feature = "python", pyclass(module = "robots_engine", eq, eq_int))]
pub enum Heading {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "W")]
    West,
}

// Clockwise from north, so a right turn is the next entry and a left turn the previous one.
const COMPASS: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

impl Heading {
    pub fn from_char(value: char) -> Option<Heading> {
        match value {
            'N' => Some(Heading::North),
            'E' => Some(Heading::East),
            'S' => Some(Heading::South),
            'W' => Some(Heading::West),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Heading::North => 'N',
            Heading::East => 'E',
            Heading::South => 'S',
            Heading::West => 'W',
        }
    }

    pub fn rotate_left(self) -> Heading {
        COMPASS[(self.index() + COMPASS.len() - 1) % COMPASS.len()]
    }

    pub fn rotate_right(self) -> Heading {
        COMPASS[(self.index() + 1) % COMPASS.len()]
    }

    /// The `(dx, dy)` step taken when moving forward. North increases `y`.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Heading::North => (0, 1),
            Heading::East => (1, 0),
            Heading::South => (0, -1),
            Heading::West => (-1, 0),
        }
    }

    fn index(self) -> usize {
        match self {
            Heading::North => 0,
            Heading::East => 1,
            Heading::South => 2,
            Heading::West => 3,
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl Distribution<Heading> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Heading {
        COMPASS[rng.gen_range(0..COMPASS.len())]
    }
}

/// A single robot instruction.
///
/// Characters other than `L`, `R` and `F` are kept as [`Instruction::Unknown`]
/// and do nothing when executed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Instruction {
    Left,
    Right,
    Forward,
    Unknown(char),
}

impl Instruction {
    pub fn as_char(self) -> char {
        match self {
            Instruction::Left => 'L',
            Instruction::Right => 'R',
            Instruction::Forward => 'F',
            Instruction::Unknown(value) => value,
        }
    }
}

impl From<char> for Instruction {
    fn from(value: char) -> Instruction {
        match value {
            'L' => Instruction::Left,
            'R' => Instruction::Right,
            'F' => Instruction::Forward,
            other => Instruction::Unknown(other),
        }
    }
}

impl Distribution<Instruction> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Instruction {
        // Forward is twice as likely as each turn
        match rng.gen_range(0..4) {
            0 => Instruction::Left,
            1 => Instruction::Right,
            _ => Instruction::Forward,
        }
    }
}

/// What happened when a robot executed an instruction.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Movement {
    /// The robot turned on the spot.
    Turned,
    /// The robot advanced one cell.
    Moved,
    /// The move would have left the grid but a scent held the robot back.
    Held,
    /// The robot fell off the grid.
    Lost,
    /// The instruction is not recognised.
    Ignored,
    /// The robot was already lost so nothing happened.
    Frozen,
}

/// The observable state of a robot.
///
/// Used both for the per-instruction step stream and for the final report of a robot.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[cfg_attr(feature = "python", pyclass(module = "robots_engine", get_all))]
pub struct RobotReport {
    pub id: usize,
    pub x: i64,
    pub y: i64,
    pub heading: Heading,
    pub lost: bool,
}

impl fmt::Display for RobotReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.heading)?;
        if self.lost {
            write!(f, " LOST")?;
        }
        Ok(())
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl RobotReport {
    fn __str__(&self) -> String {
        self.to_string()
    }
}

/// A robot roaming a [`Planet`].
///
/// The planet is not owned by the robot. It is passed in for each instruction so the
/// same planet, and its scents, can be shared by every robot of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Robot {
    id: usize,
    x: i64,
    y: i64,
    heading: Heading,
    lost: bool,
}

impl Robot {
    /// Places a new robot on the planet.
    ///
    /// # Arguments
    /// * `id` - The identifier reported for this robot.
    /// * `x`, `y` - The starting cell, which must lie on the planet.
    /// * `heading` - One of `N`, `E`, `S` or `W`.
    /// * `planet` - The planet the robot is placed on.
    pub fn new(
        id: usize,
        x: i64,
        y: i64,
        heading: char,
        planet: &Planet,
    ) -> Result<Robot, RobotError> {
        if !planet.contains(x, y) {
            return Err(RobotError::OutOfBounds { x, y });
        }

        let heading = Heading::from_char(heading).ok_or(RobotError::InvalidHeading(heading))?;

        Ok(Robot {
            id,
            x,
            y,
            heading,
            lost: false,
        })
    }

    /// Executes the instruction written as `instruction`.
    pub fn execute_instruction(&mut self, instruction: char, planet: &mut Planet) -> Movement {
        self.execute(Instruction::from(instruction), planet)
    }

    pub fn execute(&mut self, instruction: Instruction, planet: &mut Planet) -> Movement {
        if self.lost {
            return Movement::Frozen;
        }

        match instruction {
            Instruction::Left => {
                self.heading = self.heading.rotate_left();
                Movement::Turned
            }
            Instruction::Right => {
                self.heading = self.heading.rotate_right();
                Movement::Turned
            }
            Instruction::Forward => self.forward(planet),
            Instruction::Unknown(_) => Movement::Ignored,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn x(&self) -> i64 {
        self.x
    }

    pub fn y(&self) -> i64 {
        self.y
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn is_lost(&self) -> bool {
        self.lost
    }

    pub fn report(&self) -> RobotReport {
        RobotReport {
            id: self.id,
            x: self.x,
            y: self.y,
            heading: self.heading,
            lost: self.lost,
        }
    }

    fn forward(&mut self, planet: &mut Planet) -> Movement {
        let (dx, dy) = self.heading.delta();
        let (to_x, to_y) = (self.x + dx, self.y + dy);

        if planet.contains(to_x, to_y) {
            self.x = to_x;
            self.y = to_y;
            return Movement::Moved;
        }

        // The scent is looked up on the cell being left, never on the cell past the edge
        if planet.has_scent_at(self.x, self.y) {
            return Movement::Held;
        }

        planet.add_scent(self.x, self.y);
        self.lost = true;

        Movement::Lost
    }
}
