//! The maze world: configuration, session seed, salts and region sets in one owner.
//! `update_regions` is the only call that changes what the maze looks like; every
//! query borrows the world immutably.

mod snapshot;

use tracing::info;

use crate::{
    classify::{CellQuery, Classifier},
    config::{ConfigError, MazeConfig},
    movement,
    raycast::{self, Hit, RayLimits},
    regions::{RegionKey, RegionTracker, RegionUpdate, SaltStore},
    types::{CellKind, GridPos, Point},
};

#[derive(Clone, Debug)]
pub struct MazeWorld {
    config: MazeConfig,
    seed: i64,
    salts: SaltStore,
    regions: RegionTracker,
}

impl MazeWorld {
    pub fn new(config: MazeConfig, seed: i64) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(target: "maze::session", seed, region_size = config.region_size, "maze world created");
        Ok(Self { config, seed, salts: SaltStore::new(), regions: RegionTracker::new() })
    }

    /// Forgets everything and starts over with `seed`.
    pub fn new_session(&mut self, seed: i64) {
        let forgotten = self.salts.len();
        self.seed = seed;
        self.salts = SaltStore::new();
        self.regions = RegionTracker::new();
        info!(target: "maze::session", seed, forgotten, "new session");
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn classifier(&self) -> Classifier<'_> {
        Classifier::new(&self.config, &self.salts, self.seed)
    }

    pub fn classify(&self, x: i64, y: i64) -> CellKind {
        self.classifier().classify(GridPos::new(x, y))
    }

    pub fn is_walkable(&self, x: i64, y: i64) -> bool {
        self.classify(x, y).is_walkable()
    }

    pub fn ray_limits(&self) -> RayLimits {
        RayLimits::from_config(&self.config)
    }

    pub fn cast_ray(&self, origin_x: f64, origin_y: f64, angle: f64) -> Hit {
        raycast::cast_ray(&self.classifier(), Point::new(origin_x, origin_y), angle, self.ray_limits())
    }

    pub fn cast_view(&self, origin: Point, heading: f64, fov: f64, out: &mut [Hit]) {
        raycast::cast_view(&self.classifier(), origin, heading, fov, self.ray_limits(), out);
    }

    pub fn try_move(&self, position: Point, delta: Point) -> Point {
        movement::try_move(
            &self.classifier(),
            position,
            delta,
            self.config.player_margin,
            self.config.max_move_substep,
        )
    }

    /// Recenters the active regions on the player's position, forgetting whatever falls out.
    pub fn update_regions(&mut self, player_x: f64, player_y: f64) -> RegionUpdate {
        let center = self.region_of_point(Point::new(player_x, player_y));
        self.regions.update(center, self.config.keep_radius, self.config.ghost_radius, &mut self.salts)
    }

    pub fn region_of(&self, x: i64, y: i64) -> RegionKey {
        RegionKey::containing(GridPos::new(x, y), self.config.region_size)
    }

    pub fn region_of_point(&self, point: Point) -> RegionKey {
        RegionKey::containing(GridPos::containing(point), self.config.region_size)
    }

    pub fn salt(&self, key: RegionKey) -> u32 {
        self.salts.get(key)
    }

    pub fn salts(&self) -> &SaltStore {
        &self.salts
    }

    pub fn regions(&self) -> &RegionTracker {
        &self.regions
    }

    pub fn active_regions(&self) -> impl Iterator<Item = RegionKey> + '_ {
        self.regions.active().iter().copied()
    }

    pub fn ghost_regions(&self) -> impl Iterator<Item = RegionKey> + '_ {
        self.regions.ghosts().iter().copied()
    }

    pub fn is_ghost_cell(&self, x: i64, y: i64) -> bool {
        self.regions.is_ghost(self.region_of(x, y))
    }

    /// Closest portal room whose cell lies within `radius` cells of `position`.
    pub fn nearest_portal_room(&self, position: Point, radius: i64) -> Option<GridPos> {
        let classifier = self.classifier();
        let origin = GridPos::containing(position);
        let mut best: Option<(f64, GridPos)> = None;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let cell = origin.offset(dx, dy);
                if !matches!(classifier.classify(cell), CellKind::Room { portal: true }) {
                    continue;
                }
                let center = cell.center();
                let distance = (center.x - position.x).hypot(center.y - position.y);
                if best.is_none_or(|(best_distance, _)| distance < best_distance) {
                    best = Some((distance, cell));
                }
            }
        }
        best.map(|(_, cell)| cell)
    }
}

impl CellQuery for MazeWorld {
    fn cell_kind(&self, cell: GridPos) -> CellKind {
        self.classifier().classify(cell)
    }
}
