use crate::error::{Error, Result, RobotError};
use crate::planet::Planet;
use crate::program::{Program, RobotSpec};
use crate::render::{Frame, Renderer};
use crate::replay::{NoOpReplayLogger, ReplayLogger};
use crate::robot::{Movement, Robot, RobotReport};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// What to do with a robot entry that cannot be placed on the planet.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the whole run with an error.
    #[default]
    Abort,
    /// Record the entry as skipped and carry on with the next one.
    Skip,
}

/// A robot entry that was left out of the run under [`FailurePolicy::Skip`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SkippedRobot {
    pub index: usize,
    pub error: RobotError,
}

/// Runs a program: every robot in order, each to the end of its instructions, on one
/// shared planet.
///
/// Scents left by a robot are seen by every robot after it in the same run. Calling
/// [`Simulation::start`] begins a new run on a planet without scents.
pub struct Simulation {
    program: Program,
    planet: Planet,
    policy: FailurePolicy,
    next_entry: usize,
    next_id: usize,
    aborted: Option<(usize, RobotError)>,
    reports: Vec<RobotReport>,
    skipped: Vec<SkippedRobot>,
    replay_logger: Box<dyn ReplayLogger>,
    renderer: Option<Box<dyn Renderer>>,
}

impl Simulation {
    pub fn new(program: Program) -> Simulation {
        let planet = program.planet();

        Simulation {
            program,
            planet,
            policy: FailurePolicy::default(),
            next_entry: 0,
            next_id: 1,
            aborted: None,
            reports: Vec::new(),
            skipped: Vec::new(),
            replay_logger: Box::new(NoOpReplayLogger),
            renderer: None,
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Simulation {
        self.policy = policy;
        self
    }

    pub fn with_replay_logger(mut self, replay_logger: Box<dyn ReplayLogger>) -> Simulation {
        self.replay_logger = replay_logger;
        self
    }

    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Simulation {
        self.renderer = Some(renderer);
        self
    }

    /// Resets the planet, the robot ids and everything recorded by a previous run.
    pub fn start(&mut self) {
        self.planet = self.program.planet();
        self.next_entry = 0;
        self.next_id = 1;
        self.aborted = None;
        self.reports.clear();
        self.skipped.clear();
        self.replay_logger.clear();
    }

    /// Runs the next robot entry to the end of its instructions.
    ///
    /// Returns `Ok(None)` once every entry has been processed. Under
    /// [`FailurePolicy::Skip`] entries that cannot be placed are passed over. Under
    /// [`FailurePolicy::Abort`] the first such entry ends the run, and every later call
    /// returns the same error until [`Simulation::start`] is called.
    pub fn step(&mut self) -> Result<Option<RobotReport>> {
        if let Some((index, source)) = &self.aborted {
            return Err(Error::Robot {
                index: *index,
                source: source.clone(),
            });
        }

        while let Some(spec) = self.program.robots.get(self.next_entry).cloned() {
            let index = self.next_entry;
            self.next_entry += 1;

            match Robot::new(self.next_id, spec.x, spec.y, spec.heading, &self.planet) {
                Ok(robot) => {
                    self.next_id += 1;
                    return self.drive(index, robot, &spec).map(Some);
                }
                Err(source) => match self.policy {
                    FailurePolicy::Abort => {
                        warn!(entry = index, error = %source, "Aborting run");
                        self.aborted = Some((index, source.clone()));
                        return Err(Error::Robot { index, source });
                    }
                    FailurePolicy::Skip => {
                        warn!(entry = index, error = %source, "Skipping robot entry");
                        self.replay_logger.log_skip(index, source.to_string());
                        self.skipped.push(SkippedRobot {
                            index,
                            error: source,
                        });
                    }
                },
            }
        }

        Ok(None)
    }

    /// Starts a new run and processes every robot entry.
    ///
    /// Returns the final report of every robot in input order. The replay, if any, is
    /// saved when the run ends, including a run aborted by a bad entry.
    pub fn run(&mut self) -> Result<Vec<RobotReport>> {
        self.start();

        info!(
            x_boundary = self.planet.x_boundary(),
            y_boundary = self.planet.y_boundary(),
            robots = self.program.robots.len(),
            "Starting run"
        );

        let outcome = self.run_to_completion();

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.finish()?;
        }
        self.replay_logger.save()?;
        outcome?;

        info!(
            reports = self.reports.len(),
            skipped = self.skipped.len(),
            scents = self.planet.scent_count(),
            "Finished run"
        );

        Ok(self.reports.clone())
    }

    pub fn is_finished(&self) -> bool {
        self.aborted.is_some() || self.next_entry >= self.program.robots.len()
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn planet(&self) -> &Planet {
        &self.planet
    }

    pub fn reports(&self) -> &[RobotReport] {
        &self.reports
    }

    pub fn skipped(&self) -> &[SkippedRobot] {
        &self.skipped
    }

    pub fn replay_logger(&self) -> &dyn ReplayLogger {
        self.replay_logger.as_ref()
    }

    fn run_to_completion(&mut self) -> Result<()> {
        while self.step()?.is_some() {}
        Ok(())
    }

    fn drive(&mut self, index: usize, mut robot: Robot, spec: &RobotSpec) -> Result<RobotReport> {
        info!(
            robot = robot.id(),
            entry = index,
            x = robot.x(),
            y = robot.y(),
            heading = %robot.heading(),
            "Placing robot"
        );
        self.replay_logger.log_placement(index, robot.report());
        self.render(robot.report(), None)?;

        for instruction in spec.instructions() {
            let movement = robot.execute(instruction, &mut self.planet);
            let instruction = instruction.as_char();

            debug!(
                robot = robot.id(),
                %instruction,
                ?movement,
                x = robot.x(),
                y = robot.y(),
                heading = %robot.heading(),
                "Executed instruction"
            );
            self.replay_logger.log_step(index, instruction, movement, robot.report());

            match movement {
                Movement::Lost => {
                    info!(robot = robot.id(), x = robot.x(), y = robot.y(), "Robot lost");
                    self.replay_logger.log_scent(index, robot.report());
                }
                Movement::Held => {
                    debug!(robot = robot.id(), x = robot.x(), y = robot.y(), "Scent held robot");
                }
                _ => {}
            }

            if movement != Movement::Frozen {
                self.render(robot.report(), Some(instruction))?;
            }
        }

        let report = robot.report();
        info!(robot = report.id, report = %report, "Robot finished");
        self.replay_logger.log_report(&report);
        self.reports.push(report);

        Ok(report)
    }

    fn render(&mut self, robot: RobotReport, instruction: Option<char>) -> Result<()> {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.draw(&Frame {
                planet: &self.planet,
                robot,
                instruction,
                finished: &self.reports,
            })?;
        }

        Ok(())
    }
}

/// Runs `program` once with the default settings.
pub fn run(program: &Program) -> Result<Vec<RobotReport>> {
    Simulation::new(program.clone()).run()
}
