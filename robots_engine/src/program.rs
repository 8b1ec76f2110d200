use crate::error::{Error, Result};
use crate::planet::Planet;
use crate::robot::{Heading, Instruction};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use std::fmt;
use std::iter::Peekable;
use std::str::FromStr;

/// The starting state and instructions of one robot, exactly as read from the input.
///
/// The heading is kept as the raw character so an unknown heading can be reported when the
/// robot is placed rather than when the input is read.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RobotSpec {
    pub x: i64,
    pub y: i64,
    pub heading: char,
    pub instructions: String,
}

impl RobotSpec {
    pub fn new(x: i64, y: i64, heading: char, instructions: &str) -> RobotSpec {
        RobotSpec {
            x,
            y,
            heading,
            instructions: instructions.to_string(),
        }
    }

    pub fn instructions(&self) -> impl Iterator<Item = Instruction> + '_ {
        self.instructions.chars().map(Instruction::from)
    }
}

/// A planet size followed by the robots to run on it, in order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Program {
    pub x_boundary: u32,
    pub y_boundary: u32,
    pub robots: Vec<RobotSpec>,
}

/// Settings for [`Program::random`].
#[derive(Clone, Debug)]
pub struct RandomProgramOptions {
    pub x_boundary: u32,
    pub y_boundary: u32,
    pub robots: usize,
    pub max_instructions: usize,
}

impl Default for RandomProgramOptions {
    fn default() -> Self {
        RandomProgramOptions {
            x_boundary: 5,
            y_boundary: 3,
            robots: 3,
            max_instructions: 20,
        }
    }
}

impl Program {
    pub fn new(x_boundary: u32, y_boundary: u32) -> Program {
        Program {
            x_boundary,
            y_boundary,
            robots: Vec::new(),
        }
    }

    pub fn with_robot(mut self, robot: RobotSpec) -> Program {
        self.robots.push(robot);
        self
    }

    /// Reads a program from text.
    ///
    /// The first non-blank line holds the planet boundaries `"X Y"`. Each robot then takes a
    /// start line `"X Y H"` and the line right after it holds its instructions, which may be
    /// empty. Blank lines are allowed before the boundary line and before each start line.
    pub fn parse(contents: &str) -> Result<Program> {
        let boundaries = Regex::new(r"^([0-9]+)\s+([0-9]+)$").expect("boundary pattern is valid");
        let start =
            Regex::new(r"^(-?[0-9]+)\s+(-?[0-9]+)\s+(\S)$").expect("start pattern is valid");

        let mut lines = contents
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .peekable();

        let (line, text) = next_non_blank(&mut lines)
            .ok_or_else(|| Error::malformed(1, "missing planet boundary line"))?;
        let captures = boundaries.captures(text).ok_or_else(|| {
            Error::malformed(
                line,
                format!("expected planet boundaries \"X Y\", found {:?}", text),
            )
        })?;

        let mut program = Program::new(
            parse_number(&captures[1], line)?,
            parse_number(&captures[2], line)?,
        );

        while let Some((line, text)) = next_non_blank(&mut lines) {
            let captures = start.captures(text).ok_or_else(|| {
                Error::malformed(
                    line,
                    format!("expected robot start \"X Y H\", found {:?}", text),
                )
            })?;

            let heading = captures[3]
                .chars()
                .next()
                .ok_or_else(|| Error::malformed(line, "missing heading"))?;
            // A start line on the last line of input simply has no instructions
            let instructions = lines.next().map_or("", |(_, text)| text);

            program.robots.push(RobotSpec::new(
                parse_number(&captures[1], line)?,
                parse_number(&captures[2], line)?,
                heading,
                instructions,
            ));
        }

        Ok(program)
    }

    /// Generates a valid program from a seed. The same seed always yields the same program.
    pub fn random(seed: u64, options: &RandomProgramOptions) -> Program {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut program = Program::new(options.x_boundary, options.y_boundary);

        for _ in 0..options.robots {
            let x = rng.gen_range(0..=options.x_boundary);
            let y = rng.gen_range(0..=options.y_boundary);
            let heading: Heading = rng.gen();
            let length = rng.gen_range(0..=options.max_instructions);
            let instructions: String = (0..length)
                .map(|_| rng.gen::<Instruction>().as_char())
                .collect();

            program.robots.push(RobotSpec::new(
                i64::from(x),
                i64::from(y),
                heading.as_char(),
                &instructions,
            ));
        }

        program
    }

    /// A fresh planet, without scents, sized for this program.
    pub fn planet(&self) -> Planet {
        Planet::new(self.x_boundary, self.y_boundary)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.x_boundary, self.y_boundary)?;
        for robot in &self.robots {
            writeln!(f, "{} {} {}", robot.x, robot.y, robot.heading)?;
            writeln!(f, "{}", robot.instructions)?;
        }
        Ok(())
    }
}

impl FromStr for Program {
    type Err = Error;

    fn from_str(contents: &str) -> Result<Program> {
        Program::parse(contents)
    }
}

fn next_non_blank<'a, I>(lines: &mut Peekable<I>) -> Option<(usize, &'a str)>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    while lines.next_if(|(_, text)| text.is_empty()).is_some() {}
    lines.next()
}

fn parse_number<T: FromStr>(text: &str, line: usize) -> Result<T> {
    text.parse()
        .map_err(|_| Error::malformed(line, format!("number out of range: {}", text)))
}
