use std::f64::consts::{FRAC_PI_2, TAU};

use macroquad::prelude::KeyCode;
use maze_core::{ConfigError, GridPos, Hit, MazeConfig, MazeWorld, Point, RegionKey};
use tracing::info;

use crate::settings_file::ViewSettingsFile;

/// Centre of the room every session starts in.
pub const SPAWN_ROOM: GridPos = GridPos::new(1, 1);
/// Chebyshev radius (cells) within which a portal room triggers the notice.
pub const PORTAL_NOTICE_RADIUS: i64 = 2;
const SPRINT_FACTOR: f64 = 1.8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pub position: Point,
    /// Radians; increases clockwise on screen because world `y` points down.
    pub heading: f64,
}

impl Player {
    pub fn spawn() -> Self {
        Self { position: SPAWN_ROOM.center(), heading: 0.0 }
    }
}

/// Side effects the frame loop must carry out after `tick`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub new_session_requested: bool,
    pub settings_changed: bool,
}

pub struct AppState {
    pub world: MazeWorld,
    pub player: Player,
    pub settings: ViewSettingsFile,
    /// One hit per screen column, refreshed every tick.
    pub columns: Vec<Hit>,
    pub nearby_portal: Option<GridPos>,
    pub regions_forgotten: usize,
}

impl AppState {
    pub fn new(
        config: MazeConfig,
        seed: i64,
        settings: ViewSettingsFile,
        columns: usize,
    ) -> Result<Self, ConfigError> {
        let mut app = Self {
            world: MazeWorld::new(config, seed)?,
            player: Player::spawn(),
            settings,
            columns: vec![Hit::default(); columns],
            nearby_portal: None,
            regions_forgotten: 0,
        };
        app.refresh();
        Ok(app)
    }

    pub fn start_session(&mut self, seed: i64) {
        self.world.new_session(seed);
        self.player = Player::spawn();
        self.regions_forgotten = 0;
        self.refresh();
        info!(target: "maze::session", seed, "viewer session started");
    }

    pub fn resize_columns(&mut self, columns: usize) {
        if columns != self.columns.len() {
            self.columns.resize(columns, Hit::default());
            self.recast();
        }
    }

    /// Apply one frame of input. `held` keys move and turn; `pressed` keys toggle.
    pub fn tick(&mut self, held: &[KeyCode], pressed: &[KeyCode], dt: f64) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        if pressed.contains(&KeyCode::R) {
            outcome.new_session_requested = true;
        }
        if pressed.contains(&KeyCode::M) {
            self.settings.show_minimap = !self.settings.show_minimap;
            outcome.settings_changed = true;
        }
        if pressed.contains(&KeyCode::LeftBracket) {
            self.settings.adjust_fov(-1);
            outcome.settings_changed = true;
        }
        if pressed.contains(&KeyCode::RightBracket) {
            self.settings.adjust_fov(1);
            outcome.settings_changed = true;
        }

        let axis = |positive: &[KeyCode], negative: &[KeyCode]| -> f64 {
            let down = |keys: &[KeyCode]| keys.iter().any(|key| held.contains(key));
            f64::from(i8::from(down(positive)) - i8::from(down(negative)))
        };
        let forward = axis(&[KeyCode::W, KeyCode::Up], &[KeyCode::S, KeyCode::Down]);
        let strafe = axis(&[KeyCode::D], &[KeyCode::A]);
        let turn = axis(&[KeyCode::Right, KeyCode::E], &[KeyCode::Left, KeyCode::Q]);

        let dt = if dt.is_finite() { dt.clamp(0.0, 0.1) } else { 0.0 };
        self.player.heading =
            (self.player.heading + turn * self.settings.turn_speed * dt).rem_euclid(TAU);

        let sprinting = held.contains(&KeyCode::LeftShift) || held.contains(&KeyCode::RightShift);
        let distance = self.settings.move_speed * dt * if sprinting { SPRINT_FACTOR } else { 1.0 };
        let heading = self.player.heading;
        let delta = Point::new(
            (forward * heading.cos() + strafe * (heading + FRAC_PI_2).cos()) * distance,
            (forward * heading.sin() + strafe * (heading + FRAC_PI_2).sin()) * distance,
        );
        self.player.position = self.world.try_move(self.player.position, delta);

        self.refresh();
        outcome
    }

    pub fn player_region(&self) -> RegionKey {
        self.world.region_of_point(self.player.position)
    }

    /// Region update first, then every read for this frame.
    fn refresh(&mut self) {
        let position = self.player.position;
        let update = self.world.update_regions(position.x, position.y);
        self.regions_forgotten += update.evicted.len();
        self.nearby_portal = self.world.nearest_portal_room(position, PORTAL_NOTICE_RADIUS);
        self.recast();
    }

    fn recast(&mut self) {
        self.world.cast_view(
            self.player.position,
            self.player.heading,
            self.settings.fov,
            &mut self.columns,
        );
    }
}
