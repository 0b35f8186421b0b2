//! Axis-separated sliding collision.

use crate::{
    classify::CellQuery,
    types::{GridPos, Point},
};

const MAX_SUBSTEPS: f64 = 4096.0;

/// Moves `position` by `delta`, stopping each axis independently at solid cells.
///
/// Long moves are split into equal sub-steps no longer than `max_substep` so a single
/// frame can never carry the probe across a one-cell wall.
pub fn try_move<Q: CellQuery + ?Sized>(
    cells: &Q,
    position: Point,
    delta: Point,
    margin: f64,
    max_substep: f64,
) -> Point {
    if !(delta.x.is_finite() && delta.y.is_finite()) || (delta.x == 0.0 && delta.y == 0.0) {
        return position;
    }

    let longest = delta.x.abs().max(delta.y.abs());
    let substeps = (longest / max_substep).ceil().clamp(1.0, MAX_SUBSTEPS);
    let step = Point::new(delta.x / substeps, delta.y / substeps);

    let mut current = position;
    for _ in 0..substeps as u32 {
        let y = current.y;
        current.x = slide(cells, current.x, step.x, margin, |x| Point::new(x, y));
        let x = current.x;
        current.y = slide(cells, current.y, step.y, margin, |y| Point::new(x, y));
    }
    current
}

fn slide<Q: CellQuery + ?Sized>(
    cells: &Q,
    coordinate: f64,
    step: f64,
    margin: f64,
    probe_point: impl Fn(f64) -> Point,
) -> f64 {
    if step == 0.0 {
        return coordinate;
    }
    let probe = probe_point(coordinate + step + margin * step.signum());
    if cells.is_walkable(GridPos::containing(probe)) { coordinate + step } else { coordinate }
}
