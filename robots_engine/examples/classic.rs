use robots_engine::{run, Program};
use std::fs;
use std::path::Path;

fn main() {
    let program_file = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/test_data/classic.txt");
    let contents = match fs::read_to_string(program_file) {
        Ok(contents) => contents,
        Err(e) => panic!("Error reading program file: {}", e),
    };

    let program = match Program::parse(&contents) {
        Ok(program) => program,
        Err(e) => panic!("Error parsing program: {}", e),
    };

    match run(&program) {
        Ok(reports) => reports.iter().for_each(|report| println!("{}", report)),
        Err(e) => panic!("Error running program: {}", e),
    }
}
