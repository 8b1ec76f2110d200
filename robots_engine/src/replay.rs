use crate::error::Result;
use crate::program::Program;
use crate::robot::{Movement, RobotReport};
use serde::Serialize;
use serde_json::json;
use std::{fs::File, io::BufWriter};
use tracing::info;
use uuid::Uuid;

/// Creates the replay logger for a run of `program`.
///
/// Without a filename nothing is recorded. With one, every event of the run is kept in
/// memory and written to that file as JSON when the run finishes.
pub fn create_replay_logger(filename: Option<String>, program: &Program) -> Box<dyn ReplayLogger> {
    match filename {
        None => Box::new(NoOpReplayLogger {}),
        Some(filename) => Box::new(JsonReplayLogger::new(filename, program)),
    }
}

/// Receives the step-by-step history of a run.
///
/// Every method has a no-op default so loggers only implement what they record.
pub trait ReplayLogger {
    #[allow(unused_variables)]
    fn log_event(&mut self, event: Event) {}

    #[allow(unused_variables)]
    fn log_report(&mut self, report: &RobotReport) {}

    fn clear(&mut self) {}

    fn save(&self) -> Result<()> {
        Ok(())
    }

    /// The events recorded so far, oldest first.
    fn events(&self) -> &[Event] {
        &[]
    }

    fn log_placement(&mut self, entry: usize, state: RobotReport) {
        self.log_event(Event::new(EventType::Place, entry).with_state(state));
    }

    fn log_step(
        &mut self,
        entry: usize,
        instruction: char,
        movement: Movement,
        state: RobotReport,
    ) {
        let mut event = Event::new(EventType::Step, entry).with_state(state);
        event.instruction = Some(instruction);
        event.movement = Some(movement);
        self.log_event(event);
    }

    fn log_scent(&mut self, entry: usize, state: RobotReport) {
        self.log_event(Event::new(EventType::Scent, entry).with_state(state));
    }

    fn log_skip(&mut self, entry: usize, reason: String) {
        let mut event = Event::new(EventType::Skip, entry);
        event.reason = Some(reason);
        self.log_event(event);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum EventType {
    /// A robot was placed on the planet.
    Place,
    /// A robot executed one instruction.
    Step,
    /// A robot was lost and left a scent at its last cell.
    Scent,
    /// A robot entry could not be placed and was skipped.
    Skip,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Event {
    pub event_type: EventType,
    /// Position of the robot entry in the program.
    pub entry: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movement: Option<Movement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<RobotReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Event {
    fn new(event_type: EventType, entry: usize) -> Event {
        Event {
            event_type,
            entry,
            instruction: None,
            movement: None,
            state: None,
            reason: None,
        }
    }

    fn with_state(mut self, state: RobotReport) -> Event {
        self.state = Some(state);
        self
    }
}

pub(crate) struct NoOpReplayLogger;
impl ReplayLogger for NoOpReplayLogger {}

/// Keeps the events and reports of the current run in memory.
#[derive(Debug, Default)]
pub struct MemoryReplayLogger {
    events: Vec<Event>,
    reports: Vec<RobotReport>,
}

impl MemoryReplayLogger {
    pub fn new() -> MemoryReplayLogger {
        MemoryReplayLogger::default()
    }

    pub fn reports(&self) -> &[RobotReport] {
        &self.reports
    }
}

impl ReplayLogger for MemoryReplayLogger {
    fn log_event(&mut self, event: Event) {
        self.events.push(event);
    }

    fn log_report(&mut self, report: &RobotReport) {
        self.reports.push(*report);
    }

    fn clear(&mut self) {
        self.events.clear();
        self.reports.clear();
    }

    fn events(&self) -> &[Event] {
        &self.events
    }
}

struct JsonReplayLogger {
    filename: String,
    run_id: Uuid,
    x_boundary: u32,
    y_boundary: u32,
    program_contents: String,
    log: MemoryReplayLogger,
}

impl JsonReplayLogger {
    fn new(filename: String, program: &Program) -> JsonReplayLogger {
        JsonReplayLogger {
            filename,
            run_id: Uuid::new_v4(),
            x_boundary: program.x_boundary,
            y_boundary: program.y_boundary,
            program_contents: program.to_string(),
            log: MemoryReplayLogger::new(),
        }
    }
}

impl ReplayLogger for JsonReplayLogger {
    fn log_event(&mut self, event: Event) {
        self.log.log_event(event);
    }

    fn log_report(&mut self, report: &RobotReport) {
        self.log.log_report(report);
    }

    fn clear(&mut self) {
        // Each run gets its own identity
        self.run_id = Uuid::new_v4();
        self.log.clear();
    }

    fn events(&self) -> &[Event] {
        self.log.events()
    }

    fn save(&self) -> Result<()> {
        let file = File::create(&self.filename)?;

        let data = json!({
            "run_id": self.run_id.to_string(),
            "planet": {
                "x_boundary": self.x_boundary,
                "y_boundary": self.y_boundary,
            },
            "program": self.program_contents,
            "events": self.log.events(),
            "reports": self.log.reports(),
        });

        let mut writer = BufWriter::new(&file);
        serde_json::to_writer_pretty(&mut writer, &data)?;

        info!(filename = %self.filename, run_id = %self.run_id, "Saved replay");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robot::Heading;
    use std::fs;

    fn state(x: i64, y: i64, heading: Heading, lost: bool) -> RobotReport {
        RobotReport {
            id: 1,
            x,
            y,
            heading,
            lost,
        }
    }

    #[test]
    fn when_no_filename_is_given_nothing_is_recorded() {
        let program = Program::new(5, 3);
        let mut logger = create_replay_logger(None, &program);

        logger.log_placement(0, state(1, 1, Heading::East, false));

        assert!(logger.events().is_empty());
        assert!(logger.save().is_ok());
    }

    #[test]
    fn when_logging_in_memory_events_are_kept_in_order() {
        let mut logger = MemoryReplayLogger::new();

        logger.log_placement(0, state(3, 3, Heading::North, false));
        logger.log_step(0, 'F', Movement::Lost, state(3, 3, Heading::North, true));
        logger.log_scent(0, state(3, 3, Heading::North, true));
        logger.log_skip(1, "robot placement out of bounds: 6, 1".to_string());

        let types: Vec<EventType> = logger.events().iter().map(|e| e.event_type).collect();
        assert_eq!(
            types,
            vec![
                EventType::Place,
                EventType::Step,
                EventType::Scent,
                EventType::Skip
            ]
        );
        assert_eq!(logger.events()[1].instruction, Some('F'));
        assert_eq!(logger.events()[1].movement, Some(Movement::Lost));
        assert_eq!(logger.events()[3].entry, 1);
    }

    #[test]
    fn when_clearing_the_memory_logger_events_and_reports_are_dropped() {
        let mut logger = MemoryReplayLogger::new();
        logger.log_placement(0, state(0, 0, Heading::South, false));
        logger.log_report(&state(0, 0, Heading::South, false));

        logger.clear();

        assert!(logger.events().is_empty());
        assert!(logger.reports().is_empty());
    }

    #[test]
    fn when_saving_a_json_replay_the_file_contains_the_run() {
        let filename = std::env::temp_dir()
            .join(format!("robots_replay_{}.json", Uuid::new_v4()))
            .to_string_lossy()
            .to_string();
        let program = Program::parse("5 3\n3 3 N\nF").unwrap();
        let mut logger = create_replay_logger(Some(filename.clone()), &program);

        logger.log_placement(0, state(3, 3, Heading::North, false));
        logger.log_step(0, 'F', Movement::Lost, state(3, 3, Heading::North, true));
        logger.log_report(&state(3, 3, Heading::North, true));
        logger.save().unwrap();

        let saved: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&filename).unwrap()).unwrap();
        fs::remove_file(&filename).unwrap();

        assert_eq!(saved["planet"]["x_boundary"], 5);
        assert_eq!(saved["planet"]["y_boundary"], 3);
        assert_eq!(saved["run_id"].as_str().unwrap().len(), 36);
        assert_eq!(saved["events"].as_array().unwrap().len(), 2);
        assert_eq!(saved["events"][1]["event_type"], "Step");
        assert_eq!(saved["events"][1]["movement"], "Lost");
        assert_eq!(saved["reports"][0]["heading"], "N");
        assert_eq!(saved["reports"][0]["lost"], true);
    }
}
