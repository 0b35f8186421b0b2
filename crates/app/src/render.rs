//! Per-frame drawing: wall columns, minimap overlay and status text.

use macroquad::prelude::{
    BLACK, RED, WHITE, YELLOW, draw_rectangle, draw_text, screen_height, screen_width,
};
use maze_app::{app_loop::AppState, format_seed, format_snapshot_hash, view};
use maze_core::{GridPos, raycast::column_angle};

use crate::window_config::COLUMN_WIDTH;

const MINIMAP_RADIUS: i64 = 14;
const MINIMAP_CELL: f32 = 6.0;
const MINIMAP_MARGIN: f32 = 12.0;
const TEXT_SIZE: f32 = 20.0;

pub fn draw_frame(app: &AppState) {
    let width = screen_width();
    let height = screen_height();
    draw_rectangle(0.0, 0.0, width, height / 2.0, view::CEILING);
    draw_rectangle(0.0, height / 2.0, width, height / 2.0, view::FLOOR);

    draw_walls(app, height);
    if app.settings.show_minimap {
        draw_minimap(app, width);
    }
    draw_status(app, height);
}

fn draw_walls(app: &AppState, height: f32) {
    let columns = app.columns.len();
    let heading = app.player.heading;
    for (column, hit) in app.columns.iter().enumerate() {
        let angle = column_angle(heading, app.settings.fov, column, columns);
        if let Some(slice) = view::project_column(hit, angle, heading, height) {
            let x = column as f32 * COLUMN_WIDTH;
            draw_rectangle(x, slice.top, COLUMN_WIDTH, slice.height, slice.color);
        }
    }
}

fn draw_minimap(app: &AppState, width: f32) {
    let side = (2 * MINIMAP_RADIUS + 1) as f32 * MINIMAP_CELL;
    let left = width - side - MINIMAP_MARGIN;
    let top = MINIMAP_MARGIN;
    draw_rectangle(left - 2.0, top - 2.0, side + 4.0, side + 4.0, BLACK);

    let classifier = app.world.classifier();
    let origin = GridPos::containing(app.player.position);
    for dy in -MINIMAP_RADIUS..=MINIMAP_RADIUS {
        for dx in -MINIMAP_RADIUS..=MINIMAP_RADIUS {
            let cell = origin.offset(dx, dy);
            let ghost = app.world.is_ghost_cell(cell.x, cell.y);
            let color = view::minimap_color(classifier.classify(cell), ghost);
            let x = left + (dx + MINIMAP_RADIUS) as f32 * MINIMAP_CELL;
            let y = top + (dy + MINIMAP_RADIUS) as f32 * MINIMAP_CELL;
            draw_rectangle(x, y, MINIMAP_CELL, MINIMAP_CELL, color);
        }
    }

    let center = left + MINIMAP_RADIUS as f32 * MINIMAP_CELL;
    let fraction_x = (app.player.position.x - app.player.position.x.floor()) as f32;
    let fraction_y = (app.player.position.y - app.player.position.y.floor()) as f32;
    let player_x = center + fraction_x * MINIMAP_CELL;
    let player_y = top + MINIMAP_RADIUS as f32 * MINIMAP_CELL + fraction_y * MINIMAP_CELL;
    draw_rectangle(player_x - 2.0, player_y - 2.0, 4.0, 4.0, RED);
}

fn draw_status(app: &AppState, height: f32) {
    let region = app.player_region();
    let lines = [
        format!(
            "seed {}  state {}",
            format_seed(app.world.seed()),
            format_snapshot_hash(app.world.snapshot_hash())
        ),
        format!(
            "region ({}, {}) salt {}  forgotten {}",
            region.x,
            region.y,
            app.world.salt(region),
            app.regions_forgotten
        ),
        "WASD move  arrows or Q/E turn  Shift sprint  M map  [ ] fov  R new maze".to_owned(),
    ];
    let mut y = height - MINIMAP_MARGIN - TEXT_SIZE * (lines.len() as f32 - 1.0);
    for line in &lines {
        draw_text(line, MINIMAP_MARGIN, y, TEXT_SIZE, WHITE);
        y += TEXT_SIZE;
    }

    if app.nearby_portal.is_some() {
        let notice = "Something hums behind the walls.";
        draw_text(notice, MINIMAP_MARGIN, MINIMAP_MARGIN + TEXT_SIZE, TEXT_SIZE * 1.2, YELLOW);
    }
}
