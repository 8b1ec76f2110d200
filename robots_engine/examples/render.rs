use robots_engine::{Program, RandomProgramOptions, Simulation, TerminalRenderer};
use std::time::Duration;

fn main() {
    let options = RandomProgramOptions {
        x_boundary: 12,
        y_boundary: 8,
        robots: 6,
        max_instructions: 40,
    };
    let program = Program::random(0, &options);
    let renderer = TerminalRenderer::stdout(Duration::from_millis(80), true);

    let mut simulation = Simulation::new(program).with_renderer(Box::new(renderer));
    let reports = simulation.run().unwrap();

    println!();
    for report in reports {
        println!("Robot {}: {}", report.id, report);
    }
}
