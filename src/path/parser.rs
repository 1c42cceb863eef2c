use super::{PathCommand, PathPoint};
use crate::error::{Result, TimelineError};

/// Parse a compact path-command string into typed commands.
///
/// Every command is a letter followed by zero or more `x,y` pairs separated
/// by whitespace. The first command must be a moveto. Close-path commands
/// take no points; curve commands must carry whole control-point groups.
pub fn parse_path(input: &str) -> Result<Vec<PathCommand>> {
    let mut cursor = Cursor::new(input);
    let mut commands = Vec::new();

    cursor.skip_whitespace();
    while let Some(ch) = cursor.peek() {
        let offset = cursor.pos;
        if !ch.is_ascii_alphabetic() {
            return Err(TimelineError::parse(
                offset,
                format!("expected a command letter, found '{ch}'"),
            ));
        }
        cursor.bump();
        let arity = command_arity(ch).ok_or_else(|| {
            TimelineError::parse(offset, format!("unsupported path command '{ch}'"))
        })?;

        let mut points = Vec::new();
        loop {
            cursor.skip_whitespace();
            match cursor.peek() {
                None => break,
                Some(next) if next.is_ascii_alphabetic() => break,
                Some(_) => points.push(cursor.pair()?),
            }
        }

        check_arity(ch, arity, points.len(), offset)?;
        if commands.is_empty() && !ch.eq_ignore_ascii_case(&'m') {
            return Err(TimelineError::parse(offset, "path must start with a moveto"));
        }
        commands.push(PathCommand::new(ch, points));
    }

    if commands.is_empty() {
        return Err(TimelineError::parse(0, "empty path"));
    }
    Ok(commands)
}

#[derive(Debug, Clone, Copy)]
enum Arity {
    None,
    /// At least one group of this many points.
    Groups(usize),
}

fn command_arity(ch: char) -> Option<Arity> {
    match ch.to_ascii_uppercase() {
        'Z' => Some(Arity::None),
        'M' | 'L' | 'T' => Some(Arity::Groups(1)),
        'S' | 'Q' => Some(Arity::Groups(2)),
        'C' => Some(Arity::Groups(3)),
        _ => None,
    }
}

fn check_arity(ch: char, arity: Arity, count: usize, offset: usize) -> Result<()> {
    match arity {
        Arity::None if count > 0 => Err(TimelineError::parse(
            offset,
            format!("'{ch}' takes no coordinates"),
        )),
        Arity::Groups(size) if count == 0 || count % size != 0 => Err(TimelineError::parse(
            offset,
            format!("'{ch}' expects pairs in groups of {size}, got {count}"),
        )),
        _ => Ok(()),
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(ch) if ch.is_whitespace()) {
            self.bump();
        }
    }

    fn pair(&mut self) -> Result<PathPoint> {
        let x = self.number()?;
        self.skip_whitespace();
        if self.peek() != Some(',') {
            return Err(TimelineError::parse(self.pos, "expected ',' between coordinates"));
        }
        self.bump();
        self.skip_whitespace();
        let y = self.number()?;
        Ok(PathPoint::new(x, y))
    }

    fn number(&mut self) -> Result<f64> {
        let start = self.pos;
        if matches!(self.peek(), Some('+' | '-')) {
            self.bump();
        }
        let mut digits = 0;
        while matches!(self.peek(), Some(ch) if ch.is_ascii_digit()) {
            self.bump();
            digits += 1;
        }
        if self.peek() == Some('.') {
            self.bump();
            while matches!(self.peek(), Some(ch) if ch.is_ascii_digit()) {
                self.bump();
                digits += 1;
            }
        }
        if digits == 0 {
            return Err(TimelineError::parse(start, "expected a number"));
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let mark = self.pos;
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            let mut exp_digits = 0;
            while matches!(self.peek(), Some(ch) if ch.is_ascii_digit()) {
                self.bump();
                exp_digits += 1;
            }
            if exp_digits == 0 {
                return Err(TimelineError::parse(mark, "malformed exponent"));
            }
        }
        self.src[start..self.pos]
            .parse::<f64>()
            .map_err(|err| TimelineError::parse(start, err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_line_generator_output() {
        let commands = parse_path("M407,111L407,81S407,71 417,71L467,71").unwrap();
        assert_eq!(commands.len(), 4);
        assert_eq!(commands[0].command, 'M');
        assert_eq!(commands[0].points, vec![PathPoint::new(407.0, 111.0)]);
        assert_eq!(commands[2].command, 'S');
        assert_eq!(
            commands[2].points,
            vec![PathPoint::new(407.0, 71.0), PathPoint::new(417.0, 71.0)]
        );
    }

    #[test]
    fn parses_decimals_signs_and_close() {
        let commands = parse_path(" M -1.5, 2e1 L 3.25,-4 Z ").unwrap();
        assert_eq!(commands[0].points, vec![PathPoint::new(-1.5, 20.0)]);
        assert_eq!(commands[1].points, vec![PathPoint::new(3.25, -4.0)]);
        assert_eq!(commands[2].command, 'Z');
        assert!(commands[2].points.is_empty());
    }

    #[test]
    fn rejects_missing_comma() {
        let err = parse_path("M0 0L1,1").unwrap_err();
        assert!(matches!(err, TimelineError::Parse { offset: 3, .. }), "{err:?}");
    }

    #[test]
    fn rejects_garbage_numbers() {
        assert!(parse_path("M0,0Lx,1").is_err());
        assert!(parse_path("M0,0L1e,1").is_err());
        assert!(parse_path("M0,0L.,1").is_err());
    }

    #[test]
    fn rejects_unsupported_and_structural_errors() {
        assert!(matches!(
            parse_path("M0,0H10"),
            Err(TimelineError::Parse { offset: 4, .. })
        ));
        assert!(parse_path("").is_err());
        assert!(parse_path("   ").is_err());
        assert!(parse_path("L1,1").is_err());
        assert!(parse_path("M0,0L").is_err());
        assert!(parse_path("M0,0S1,1").is_err());
        assert!(parse_path("M0,0Z1,1").is_err());
        assert!(parse_path("5,5").is_err());
    }
}
