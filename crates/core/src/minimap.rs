//! Text rendering of the neighbourhood around a point.
//! Rows run with `y` increasing downward, matching screen space in the viewer.

use crate::{
    types::{CellKind, GridPos, Point, WallKind},
    world::MazeWorld,
};

pub const PLAYER_GLYPH: char = '@';
pub const GHOST_FLOOR_GLYPH: char = ':';
/// Larger radii are clamped to this.
pub const MAX_RENDER_RADIUS: i64 = 256;

pub const fn cell_glyph(kind: CellKind) -> char {
    match kind {
        CellKind::Pillar => '+',
        CellKind::Room { portal: true } => 'o',
        CellKind::Room { portal: false } | CellKind::OpenDoor => '.',
        CellKind::Wall(WallKind::Plain) => '#',
        CellKind::Wall(WallKind::Inscription) => '?',
        CellKind::Wall(WallKind::Anomaly) => '%',
        CellKind::Wall(WallKind::Portal) => '*',
    }
}

/// Renders the `(2 * radius + 1)²` cells around `center`, one line per row.
pub fn render_ascii(world: &MazeWorld, center: Point, radius: i64) -> String {
    let radius = radius.clamp(0, MAX_RENDER_RADIUS);
    let classifier = world.classifier();
    let origin = GridPos::containing(center);
    let width = usize::try_from(2 * radius + 1).unwrap_or(1);
    let mut out = String::with_capacity((width + 1) * width);

    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let cell = origin.offset(dx, dy);
            let glyph = if dx == 0 && dy == 0 {
                PLAYER_GLYPH
            } else {
                let kind = classifier.classify(cell);
                if kind.is_walkable() && world.is_ghost_cell(cell.x, cell.y) {
                    GHOST_FLOOR_GLYPH
                } else {
                    cell_glyph(kind)
                }
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}
