//! Grid DDA raycasting against any [`CellQuery`].

use crate::{
    classify::CellQuery,
    config::MazeConfig,
    types::{CellKind, GridPos, Point, Side},
};

/// Result of one ray. A miss has `kind == None` and `distance` equal to the distance limit.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Hit {
    pub distance: f64,
    pub side: Side,
    pub cell: GridPos,
    /// Horizontal texture coordinate on the struck face, in `[0, 1)`.
    pub wall_u: f64,
    pub kind: Option<CellKind>,
}

impl Hit {
    pub fn is_miss(&self) -> bool {
        self.kind.is_none()
    }

    /// Distance projected onto the view direction, which removes fisheye warping.
    pub fn perpendicular_distance(&self, ray_angle: f64, heading: f64) -> f64 {
        self.distance * (ray_angle - heading).cos()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayLimits {
    pub max_steps: u32,
    pub max_distance: f64,
}

impl RayLimits {
    pub fn from_config(config: &MazeConfig) -> Self {
        Self { max_steps: config.max_ray_steps, max_distance: config.max_ray_distance }
    }
}

impl Default for RayLimits {
    fn default() -> Self {
        Self::from_config(&MazeConfig::default())
    }
}

pub fn cast_ray<Q: CellQuery + ?Sized>(
    cells: &Q,
    origin: Point,
    angle: f64,
    limits: RayLimits,
) -> Hit {
    let (dir_x, dir_y) = (angle.cos(), angle.sin());
    let mut cell = GridPos::containing(origin);
    let (step_x, mut t_max_x, t_delta_x) = axis_setup(origin.x, cell.x, dir_x);
    let (step_y, mut t_max_y, t_delta_y) = axis_setup(origin.y, cell.y, dir_y);

    for _ in 0..limits.max_steps {
        let side = if t_max_x < t_max_y {
            if t_max_x > limits.max_distance {
                break;
            }
            cell = cell.offset(step_x, 0);
            t_max_x += t_delta_x;
            Side::X
        } else {
            if t_max_y > limits.max_distance {
                break;
            }
            cell = cell.offset(0, step_y);
            t_max_y += t_delta_y;
            Side::Y
        };

        let kind = cells.cell_kind(cell);
        if kind.is_walkable() {
            continue;
        }

        let distance = match side {
            Side::X => boundary_distance(cell.x, origin.x, step_x, dir_x),
            Side::Y => boundary_distance(cell.y, origin.y, step_y, dir_y),
        }
        .clamp(0.0, limits.max_distance);
        let wall_u = match side {
            Side::X => face_coordinate(origin.y + distance * dir_y, dir_x > 0.0),
            Side::Y => face_coordinate(origin.x + distance * dir_x, dir_y < 0.0),
        };
        return Hit { distance, side, cell, wall_u, kind: Some(kind) };
    }

    Hit { distance: limits.max_distance, cell, ..Hit::default() }
}

/// Fills `out` with one ray per column, spread evenly across `fov` around `heading`.
pub fn cast_view<Q: CellQuery + ?Sized>(
    cells: &Q,
    origin: Point,
    heading: f64,
    fov: f64,
    limits: RayLimits,
    out: &mut [Hit],
) {
    let columns = out.len();
    for (column, hit) in out.iter_mut().enumerate() {
        *hit = cast_ray(cells, origin, column_angle(heading, fov, column, columns), limits);
    }
}

/// Ray angle through the centre of screen column `column` out of `columns`.
pub fn column_angle(heading: f64, fov: f64, column: usize, columns: usize) -> f64 {
    let offset = (column as f64 + 0.5) / columns as f64 - 0.5;
    heading + offset * fov
}

// Returns (step, t to first boundary, t between boundaries). A flat or NaN axis never advances.
fn axis_setup(origin: f64, cell: i64, dir: f64) -> (i64, f64, f64) {
    if dir > 0.0 {
        (1, (cell as f64 + 1.0 - origin) / dir, 1.0 / dir)
    } else if dir < 0.0 {
        (-1, (origin - cell as f64) / -dir, -1.0 / dir)
    } else {
        (0, f64::INFINITY, f64::INFINITY)
    }
}

fn boundary_distance(cell: i64, origin: f64, step: i64, dir: f64) -> f64 {
    let near_edge = (1 - step) as f64 / 2.0;
    (cell as f64 - origin + near_edge) / dir
}

fn face_coordinate(along: f64, flip: bool) -> f64 {
    let u = along - along.floor();
    let u = if flip { 1.0 - u } else { u };
    if u >= 1.0 { u - 1.0 } else { u }
}
