use crate::error::Result;
use crate::planet::Planet;
use crate::robot::{Heading, RobotReport};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Color, Print, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{stdout, Stdout, Write};
use std::thread;
use std::time::Duration;

/// A snapshot of the run handed to a [`Renderer`] after a robot is placed and after
/// each instruction it executes.
pub struct Frame<'a> {
    pub planet: &'a Planet,
    /// The robot currently executing its instructions.
    pub robot: RobotReport,
    /// The instruction just executed, `None` right after placement.
    pub instruction: Option<char>,
    /// Final reports of the robots that already finished, in input order.
    pub finished: &'a [RobotReport],
}

/// Turns simulation snapshots into something a person can watch.
pub trait Renderer {
    fn draw(&mut self, frame: &Frame<'_>) -> Result<()>;

    /// Called once when the run is over.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// What to print for one grid cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Glyph {
    pub symbol: char,
    pub color: Color,
}

/// Draws the planet as a character grid using crossterm.
///
/// The origin is drawn in the bottom left corner so north points up the screen.
pub struct TerminalRenderer<W: Write> {
    out: W,
    frame_delay: Duration,
    show_scents: bool,
}

impl TerminalRenderer<Stdout> {
    pub fn stdout(frame_delay: Duration, show_scents: bool) -> TerminalRenderer<Stdout> {
        TerminalRenderer::new(stdout(), frame_delay, show_scents)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, frame_delay: Duration, show_scents: bool) -> TerminalRenderer<W> {
        TerminalRenderer {
            out,
            frame_delay,
            show_scents,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn draw(&mut self, frame: &Frame<'_>) -> Result<()> {
        let step = frame
            .instruction
            .map_or_else(|| "placed".to_string(), |instruction| instruction.to_string());

        // Display information about the run
        queue!(
            self.out,
            Clear(ClearType::All),
            MoveTo(0, 0),
            Hide,
            Print(format!(
                "Planet: {} x {}\r\nScents: {}\r\n",
                frame.planet.x_boundary(),
                frame.planet.y_boundary(),
                frame.planet.scent_count()
            )),
            SetForegroundColor(robot_to_color(frame.robot.id)),
            Print(format!("Robot {}: {} ({})\r\n\r\n", frame.robot.id, frame.robot, step)),
            SetForegroundColor(Color::Reset)
        )?;

        // Display the grid, top row first
        for y in (0..=i64::from(frame.planet.y_boundary())).rev() {
            for x in 0..=i64::from(frame.planet.x_boundary()) {
                let glyph = cell_glyph(frame, x, y, self.show_scents);
                queue!(
                    self.out,
                    SetForegroundColor(glyph.color),
                    Print(glyph.symbol),
                    Print(' '),
                    SetForegroundColor(Color::Reset)
                )?;
            }
            queue!(self.out, Print("\r\n"))?;
        }

        // Display the robots that already finished
        queue!(self.out, Print("\r\n"))?;
        for report in frame.finished {
            queue!(
                self.out,
                Print(format!("Robot {}: {}\r\n", report.id, report))
            )?;
        }

        self.out.flush()?;

        if !self.frame_delay.is_zero() {
            thread::sleep(self.frame_delay);
        }

        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        queue!(self.out, Show)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Picks the glyph for cell `(x, y)`.
///
/// The active robot is drawn over finished robots, which are drawn over scents.
pub fn cell_glyph(frame: &Frame<'_>, x: i64, y: i64, show_scents: bool) -> Glyph {
    let at = |report: &RobotReport| report.x == x && report.y == y;

    if at(&frame.robot) {
        return Glyph {
            symbol: robot_symbol(&frame.robot),
            color: robot_to_color(frame.robot.id),
        };
    }

    // Later robots are drawn over earlier ones
    if let Some(report) = frame.finished.iter().rev().find(|report| at(report)) {
        return Glyph {
            symbol: robot_symbol(report),
            color: Color::DarkGrey,
        };
    }

    if show_scents && frame.planet.has_scent_at(x, y) {
        return Glyph {
            symbol: '~',
            color: Color::Yellow,
        };
    }

    Glyph {
        symbol: '.',
        color: Color::Reset,
    }
}

pub fn robot_symbol(report: &RobotReport) -> char {
    if report.lost {
        return 'X';
    }

    match report.heading {
        Heading::North => '^',
        Heading::East => '>',
        Heading::South => 'v',
        Heading::West => '<',
    }
}

pub fn robot_to_color(id: usize) -> Color {
    const PALETTE: [Color; 6] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::DarkYellow,
    ];

    PALETTE[id % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(id: usize, x: i64, y: i64, heading: Heading, lost: bool) -> RobotReport {
        RobotReport {
            id,
            x,
            y,
            heading,
            lost,
        }
    }

    #[test]
    fn when_picking_glyphs_the_active_robot_shows_its_heading() {
        let planet = Planet::new(5, 3);
        let frame = Frame {
            planet: &planet,
            robot: report(1, 2, 1, Heading::West, false),
            instruction: Some('L'),
            finished: &[],
        };

        assert_eq!(cell_glyph(&frame, 2, 1, true).symbol, '<');
        assert_eq!(cell_glyph(&frame, 1, 1, true).symbol, '.');
    }

    #[test]
    fn when_picking_glyphs_lost_robots_are_marked_with_an_x() {
        assert_eq!(robot_symbol(&report(1, 3, 3, Heading::North, true)), 'X');
        assert_eq!(robot_symbol(&report(1, 3, 3, Heading::South, false)), 'v');
    }

    #[test]
    fn when_picking_glyphs_scents_are_only_shown_when_enabled() {
        let mut planet = Planet::new(5, 3);
        planet.add_scent(0, 3);
        let frame = Frame {
            planet: &planet,
            robot: report(2, 1, 1, Heading::North, false),
            instruction: None,
            finished: &[],
        };

        assert_eq!(cell_glyph(&frame, 0, 3, true).symbol, '~');
        assert_eq!(cell_glyph(&frame, 0, 3, false).symbol, '.');
    }

    #[test]
    fn when_picking_glyphs_the_active_robot_is_drawn_over_finished_robots_and_scents() {
        let mut planet = Planet::new(5, 3);
        planet.add_scent(3, 3);
        let finished = [report(1, 3, 3, Heading::North, true)];
        let frame = Frame {
            planet: &planet,
            robot: report(2, 3, 3, Heading::East, false),
            instruction: Some('F'),
            finished: &finished,
        };

        assert_eq!(cell_glyph(&frame, 3, 3, true).symbol, '>');

        let frame = Frame {
            robot: report(2, 0, 0, Heading::East, false),
            ..frame
        };
        assert_eq!(
            cell_glyph(&frame, 3, 3, true),
            Glyph {
                symbol: 'X',
                color: Color::DarkGrey
            }
        );
    }

    #[test]
    fn when_drawing_to_a_buffer_every_row_of_the_grid_is_written() {
        let planet = Planet::new(2, 1);
        let finished = [report(1, 2, 1, Heading::East, false)];
        let frame = Frame {
            planet: &planet,
            robot: report(2, 0, 0, Heading::North, false),
            instruction: None,
            finished: &finished,
        };
        let mut renderer = TerminalRenderer::new(Vec::new(), Duration::ZERO, true);

        renderer.draw(&frame).unwrap();
        renderer.finish().unwrap();
        let output = String::from_utf8(renderer.into_inner()).unwrap();

        assert!(output.contains("Planet: 2 x 1"));
        assert!(output.contains("Robot 2: 0 0 N (placed)"));
        assert!(output.contains("Robot 1: 2 1 E"));
        assert!(output.contains('^'));
        assert!(output.contains('>'));
    }
}
