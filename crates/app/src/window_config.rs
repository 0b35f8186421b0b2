//! Window configuration for the desktop app.

use macroquad::window::Conf;
use maze_app::APP_NAME;

const DEFAULT_WINDOW_WIDTH: i32 = 960;
const DEFAULT_WINDOW_HEIGHT: i32 = 600;
/// Screen pixels per cast ray.
pub const COLUMN_WIDTH: f32 = 2.0;

pub fn build_window_conf() -> Conf {
    Conf {
        window_title: APP_NAME.to_owned(),
        window_width: DEFAULT_WINDOW_WIDTH,
        window_height: DEFAULT_WINDOW_HEIGHT,
        high_dpi: true,
        ..Default::default()
    }
}

pub fn column_count(screen_width: f32) -> usize {
    (screen_width / COLUMN_WIDTH).ceil().max(1.0) as usize
}
