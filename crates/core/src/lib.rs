pub mod classify;
pub mod config;
pub mod hash;
pub mod minimap;
pub mod movement;
pub mod raycast;
pub mod regions;
pub mod types;
pub mod world;

pub use classify::{CellQuery, Classifier};
pub use config::{ConfigError, MAX_REGION_RADIUS, MazeConfig};
pub use raycast::{Hit, RayLimits};
pub use regions::{RegionKey, RegionTracker, RegionUpdate, SaltStore};
pub use types::*;
pub use world::MazeWorld;
