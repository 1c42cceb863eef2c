use super::{PathCommand, PathPoint, format_path, parse_path};
use crate::error::Result;

const IGNORE_EPSILON: f64 = 1e-9;

/// Round the corners of a path string.
///
/// Vertices whose x-coordinate appears in `x_to_ignore` stay sharp.
pub fn round_path_corners(path: &str, radius: f64, x_to_ignore: &[f64]) -> Result<String> {
    let commands = parse_path(path)?;
    Ok(format_path(&round_corners(&commands, radius, x_to_ignore)))
}

/// Insert a smooth-curve command at every interior vertex.
///
/// For each vertex `p2` between `p1` and `p3` the tangency distance
/// `radius / tan(angle / 2)` is measured along both adjacent edges. The
/// command ending at `p2` is shortened to the first tangency point and an
/// `S` command through `p2` to the second tangency point is inserted.
/// Commands without points (close-path) pass through and do not take part
/// in vertex triples.
pub fn round_corners(commands: &[PathCommand], radius: f64, x_to_ignore: &[f64]) -> Vec<PathCommand> {
    let mut rounded: Vec<PathCommand> = Vec::with_capacity(commands.len() * 2);
    let mut p1: Option<PathPoint> = None;
    let mut p2: Option<PathPoint> = None;
    let mut p3: Option<PathPoint> = None;

    for command in commands {
        let Some(end) = command.terminal_point() else {
            rounded.push(command.clone());
            continue;
        };
        p1 = p2;
        p2 = p3;
        p3 = Some(end);

        if let (Some(a), Some(b), Some(c)) = (p1, p2, p3) {
            let distance = tangency_distance(radius, corner_angle(a, b, c) / 2.0);
            let ignored = x_to_ignore
                .iter()
                .any(|x| (x - b.x).abs() < IGNORE_EPSILON);
            if distance != 0.0 && distance.is_finite() && !ignored {
                if let Some(last) = rounded.last_mut().and_then(|prev| prev.points.last_mut()) {
                    *last = shift_towards(b, a, distance);
                }
                rounded.push(PathCommand::new('S', vec![b, shift_towards(b, c, distance)]));
            }
        }
        rounded.push(command.clone());
    }

    rounded
}

/// Angle at `p2` from the directions of the incoming and outgoing edges.
fn corner_angle(p1: PathPoint, p2: PathPoint, p3: PathPoint) -> f64 {
    let incoming = (p1.y - p2.y).atan2(p1.x - p2.x);
    let outgoing = (p2.y - p3.y).atan2(p2.x - p3.x);
    incoming.abs() - outgoing.abs()
}

/// Adjacent side of the right triangle formed by the radius and the bisector.
fn tangency_distance(radius: f64, half_angle: f64) -> f64 {
    radius / half_angle.tan()
}

/// Point at `distance` from `vertex` along the segment towards `target`.
fn shift_towards(vertex: PathPoint, target: PathPoint, distance: f64) -> PathPoint {
    let length = vertex.distance_to(target);
    if length == 0.0 {
        return vertex;
    }
    let ratio = distance.abs() / length;
    PathPoint::new(
        round2(vertex.x + ratio * (target.x - vertex.x)),
        round2(vertex.y + ratio * (target.y - vertex.y)),
    )
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
