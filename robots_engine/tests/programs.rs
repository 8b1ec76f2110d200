use robots_engine::{
    run, Error, FailurePolicy, Heading, Program, RobotError, Simulation, SimulationConfig,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn test_data(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/test_data")
        .join(name)
}

fn load(name: &str) -> Program {
    Program::parse(&fs::read_to_string(test_data(name)).unwrap()).unwrap()
}

#[test]
fn when_running_the_classic_fixture_the_expected_reports_are_produced() {
    let reports = run(&load("classic.txt")).unwrap();

    let lines: Vec<String> = reports.iter().map(|report| report.to_string()).collect();
    assert_eq!(lines, vec!["1 1 E", "3 3 N LOST", "2 3 S"]);
    assert_eq!(
        reports.iter().map(|report| report.id).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(reports[2].heading, Heading::South);
}

#[test]
fn when_a_fixture_has_an_out_of_bounds_robot_the_run_aborts_with_its_index() {
    match run(&load("out_of_bounds.txt")) {
        Err(Error::Robot { index, source }) => {
            assert_eq!(index, 1);
            assert_eq!(source, RobotError::OutOfBounds { x: 6, y: 1 });
        }
        other => panic!("Expected a robot error, got {:?}", other),
    }
}

#[test]
fn when_a_fixture_is_run_with_the_skip_config_the_bad_robot_is_left_out() {
    let config = SimulationConfig::load(&test_data("config.toml")).unwrap();
    assert_eq!(config.failure_policy, FailurePolicy::Skip);

    let mut simulation = config.simulation(load("out_of_bounds.txt"));
    let reports = simulation.run().unwrap();

    // Without the second robot nobody leaves a scent at (3, 3)
    let lines: Vec<String> = reports.iter().map(|report| report.to_string()).collect();
    assert_eq!(lines, vec!["1 1 E", "3 3 N LOST"]);
    assert_eq!(simulation.skipped().len(), 1);
    assert_eq!(simulation.skipped()[0].index, 1);
}

#[test]
fn when_the_boundary_line_is_malformed_no_robot_is_run() {
    match Program::parse("five three\n1 1 E\nRFRFRFRF") {
        Err(Error::MalformedInput { line, .. }) => assert_eq!(line, 1),
        other => panic!("Expected a malformed input error, got {:?}", other),
    }
}

#[test]
fn when_independent_runs_share_a_program_they_do_not_share_scents() {
    let program = load("classic.txt");
    let mut first = Simulation::new(program.clone());
    let mut second = Simulation::new(program);

    let first_reports = first.run().unwrap();
    let second_reports = second.run().unwrap();

    assert_eq!(first_reports, second_reports);
    assert_eq!(first.planet(), second.planet());
}

#[test]
fn when_running_the_cli_on_a_file_one_line_is_printed_per_robot() {
    let output = Command::new(env!("CARGO_BIN_EXE_robots"))
        .arg(test_data("classic.txt"))
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "1 1 E\n3 3 N LOST\n2 3 S\n"
    );
}

#[test]
fn when_running_the_cli_with_a_bad_robot_it_fails_unless_skipping() {
    let failed = Command::new(env!("CARGO_BIN_EXE_robots"))
        .arg(test_data("out_of_bounds.txt"))
        .output()
        .unwrap();

    assert!(!failed.status.success());
    assert!(String::from_utf8(failed.stderr)
        .unwrap()
        .contains("robot placement out of bounds: 6, 1"));

    let skipped = Command::new(env!("CARGO_BIN_EXE_robots"))
        .arg(test_data("out_of_bounds.txt"))
        .arg("--skip-malformed")
        .output()
        .unwrap();

    assert!(skipped.status.success());
    assert_eq!(
        String::from_utf8(skipped.stdout).unwrap(),
        "1 1 E\n3 3 N LOST\n"
    );
}
