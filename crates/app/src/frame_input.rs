//! Keyboard input collection for one rendered frame.

use macroquad::prelude::{KeyCode, is_key_down, is_key_pressed};

const MOVEMENT_KEYS: [KeyCode; 12] = [
    KeyCode::W,
    KeyCode::A,
    KeyCode::S,
    KeyCode::D,
    KeyCode::Q,
    KeyCode::E,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::LeftShift,
    KeyCode::RightShift,
];

const ACTION_KEYS: [KeyCode; 4] =
    [KeyCode::R, KeyCode::M, KeyCode::LeftBracket, KeyCode::RightBracket];

#[derive(Default)]
pub struct FrameInput {
    pub keys_held: Vec<KeyCode>,
    pub keys_pressed: Vec<KeyCode>,
    pub quit: bool,
}

pub fn capture_frame_input() -> FrameInput {
    let keys_held = MOVEMENT_KEYS.into_iter().filter(|key| is_key_down(*key)).collect();
    let keys_pressed = ACTION_KEYS.into_iter().filter(|key| is_key_pressed(*key)).collect();
    FrameInput { keys_held, keys_pressed, quit: is_key_pressed(KeyCode::Escape) }
}
