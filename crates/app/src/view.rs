//! Screen-space projection of ray hits. Pure so it can be tested without a window.

use macroquad::color::Color;
use maze_core::{CellKind, Hit, Side, WallKind};

pub const CEILING: Color = Color::new(0.08, 0.08, 0.10, 1.0);
pub const FLOOR: Color = Color::new(0.16, 0.14, 0.12, 1.0);

const SHADE_FALLOFF: f32 = 0.12;
const Y_SIDE_SHADE: f32 = 0.78;
const EDGE_SHADE: f32 = 0.55;
const EDGE_WIDTH: f64 = 0.04;
const INSCRIPTION_BANDS: f64 = 6.0;
const MIN_DISTANCE: f64 = 1e-3;

/// One vertical wall strip. `top` may be negative when the wall overflows the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSlice {
    pub top: f32,
    pub height: f32,
    pub color: Color,
}

pub fn project_column(
    hit: &Hit,
    ray_angle: f64,
    heading: f64,
    screen_height: f32,
) -> Option<WallSlice> {
    let kind = hit.kind?;
    let distance = hit.perpendicular_distance(ray_angle, heading).max(MIN_DISTANCE);
    let height = screen_height / distance as f32;
    let top = (screen_height - height) / 2.0;
    let factor = shade_factor(distance, hit.side, hit.wall_u, kind);
    Some(WallSlice { top, height, color: scale(base_color(kind), factor) })
}

pub fn base_color(kind: CellKind) -> Color {
    match kind {
        CellKind::Pillar => Color::new(0.55, 0.52, 0.48, 1.0),
        CellKind::Wall(WallKind::Plain) => Color::new(0.70, 0.66, 0.58, 1.0),
        CellKind::Wall(WallKind::Inscription) => Color::new(0.62, 0.70, 0.52, 1.0),
        CellKind::Wall(WallKind::Anomaly) => Color::new(0.72, 0.38, 0.42, 1.0),
        CellKind::Wall(WallKind::Portal) => Color::new(0.42, 0.48, 0.92, 1.0),
        CellKind::Room { .. } | CellKind::OpenDoor => FLOOR,
    }
}

pub fn shade_factor(distance: f64, side: Side, wall_u: f64, kind: CellKind) -> f32 {
    let mut factor = 1.0 / (1.0 + distance as f32 * SHADE_FALLOFF);
    if side == Side::Y {
        factor *= Y_SIDE_SHADE;
    }
    if !(EDGE_WIDTH..1.0 - EDGE_WIDTH).contains(&wall_u) {
        factor *= EDGE_SHADE;
    }
    if kind == CellKind::Wall(WallKind::Inscription) && (wall_u * INSCRIPTION_BANDS) as u32 % 2 == 1 {
        factor *= EDGE_SHADE;
    }
    factor
}

/// Minimap fill for one cell. Forgotten floor is drawn washed out.
pub fn minimap_color(kind: CellKind, ghost: bool) -> Color {
    match kind {
        CellKind::Room { portal: true } => Color::new(0.45, 0.55, 1.0, 1.0),
        CellKind::Room { portal: false } | CellKind::OpenDoor if ghost => {
            Color::new(0.35, 0.30, 0.40, 1.0)
        }
        CellKind::Room { portal: false } | CellKind::OpenDoor => Color::new(0.85, 0.82, 0.75, 1.0),
        wall => scale(base_color(wall), 0.45),
    }
}

fn scale(color: Color, factor: f32) -> Color {
    Color::new(color.r * factor, color.g * factor, color.b * factor, color.a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::GridPos;

    fn wall_hit(distance: f64, side: Side) -> Hit {
        Hit {
            distance,
            side,
            cell: GridPos::new(3, 2),
            wall_u: 0.5,
            kind: Some(CellKind::Wall(WallKind::Plain)),
        }
    }

    #[test]
    fn misses_draw_nothing() {
        let miss = Hit { distance: 64.0, ..Hit::default() };
        assert_eq!(project_column(&miss, 0.0, 0.0, 600.0), None);
    }

    #[test]
    fn closer_walls_are_taller_and_centred() {
        let near = project_column(&wall_hit(1.0, Side::X), 0.0, 0.0, 600.0).expect("hit");
        let far = project_column(&wall_hit(4.0, Side::X), 0.0, 0.0, 600.0).expect("hit");
        assert_eq!(near.height, 600.0);
        assert_eq!(far.height, 150.0);
        assert_eq!(far.top, 225.0);
    }

    #[test]
    fn zero_distance_does_not_divide_by_zero() {
        let slice = project_column(&wall_hit(0.0, Side::X), 0.0, 0.0, 600.0).expect("hit");
        assert!(slice.height.is_finite());
    }

    #[test]
    fn y_faces_are_darker_than_x_faces() {
        let kind = CellKind::Wall(WallKind::Plain);
        assert!(shade_factor(2.0, Side::Y, 0.5, kind) < shade_factor(2.0, Side::X, 0.5, kind));
    }

    #[test]
    fn face_edges_are_outlined() {
        let kind = CellKind::Wall(WallKind::Plain);
        assert!(shade_factor(2.0, Side::X, 0.01, kind) < shade_factor(2.0, Side::X, 0.5, kind));
        assert!(shade_factor(2.0, Side::X, 0.99, kind) < shade_factor(2.0, Side::X, 0.5, kind));
    }

    #[test]
    fn ghost_floor_differs_from_live_floor() {
        assert_ne!(minimap_color(CellKind::OpenDoor, true), minimap_color(CellKind::OpenDoor, false));
        assert_eq!(
            minimap_color(CellKind::Wall(WallKind::Plain), true),
            minimap_color(CellKind::Wall(WallKind::Plain), false)
        );
    }
}
