//! Compact SVG path strings: `M0,0L10,0S10,0 10,2`.
//!
//! A command is a single letter followed by space-separated `x,y` pairs.

mod parser;
mod rounding;

pub use parser::parse_path;
pub use rounding::{round_corners, round_path_corners};

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

impl PathPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: PathPoint) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

impl fmt::Display for PathPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", format_coord(self.x), format_coord(self.y))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathCommand {
    pub command: char,
    pub points: Vec<PathPoint>,
}

impl PathCommand {
    pub fn new(command: char, points: Vec<PathPoint>) -> Self {
        Self { command, points }
    }

    /// The point the pen ends on after this command, if it moves the pen.
    pub fn terminal_point(&self) -> Option<PathPoint> {
        self.points.last().copied()
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command)?;
        for (idx, point) in self.points.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{point}")?;
        }
        Ok(())
    }
}

/// Serialize commands back into the compact grammar.
pub fn format_path(commands: &[PathCommand]) -> String {
    commands.iter().map(|command| command.to_string()).collect()
}

/// Build an `M..L..` polyline through the given points.
pub fn polyline(points: &[PathPoint]) -> Vec<PathCommand> {
    points
        .iter()
        .enumerate()
        .map(|(idx, point)| PathCommand::new(if idx == 0 { 'M' } else { 'L' }, vec![*point]))
        .collect()
}

fn format_coord(value: f64) -> String {
    // Avoid "-0" in output.
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_compact_grammar() {
        let commands = vec![
            PathCommand::new('M', vec![PathPoint::new(0.0, 0.0)]),
            PathCommand::new('L', vec![PathPoint::new(8.5, -0.0)]),
            PathCommand::new(
                'S',
                vec![PathPoint::new(10.0, 0.0), PathPoint::new(10.0, 2.25)],
            ),
        ];
        assert_eq!(format_path(&commands), "M0,0L8.5,0S10,0 10,2.25");
    }

    #[test]
    fn polyline_starts_with_move() {
        let path = polyline(&[
            PathPoint::new(1.0, 2.0),
            PathPoint::new(3.0, 4.0),
            PathPoint::new(5.0, 6.0),
        ]);
        assert_eq!(format_path(&path), "M1,2L3,4L5,6");
        assert!(polyline(&[]).is_empty());
    }
}
