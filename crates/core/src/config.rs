//! Tunable constants for maze generation, forgetting and ray marching.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound for `keep_radius` and `ghost_radius`; the active square holds `(2r + 1)²` regions.
pub const MAX_REGION_RADIUS: u32 = 64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MazeConfig {
    /// Side length of a forgetting region, in cells.
    pub region_size: i64,
    /// Chebyshev radius (in regions) kept stable around the player.
    pub keep_radius: u32,
    /// Chebyshev radius (in regions) within which evicted regions stay marked as ghosts.
    pub ghost_radius: u32,
    /// Doors whose `h1` falls below this open regardless of the guarantee.
    pub door_threshold: f64,
    pub inscription_cutoff: f64,
    pub anomaly_cutoff: f64,
    pub portal_chance: f64,
    pub max_ray_steps: u32,
    pub max_ray_distance: f64,
    /// Collision probe distance beyond the player's position along the movement axis.
    pub player_margin: f64,
    pub max_move_substep: f64,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            region_size: 12,
            keep_radius: 3,
            ghost_radius: 5,
            door_threshold: 0.5,
            inscription_cutoff: 0.03,
            anomaly_cutoff: 0.02,
            portal_chance: 0.004,
            max_ray_steps: 80,
            max_ray_distance: 64.0,
            player_margin: 0.2,
            max_move_substep: 0.25,
        }
    }
}

impl MazeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.region_size < 1 {
            return Err(ConfigError::RegionSizeTooSmall { value: self.region_size });
        }
        let radii = [("keep_radius", self.keep_radius), ("ghost_radius", self.ghost_radius)];
        for (field, value) in radii {
            if value > MAX_REGION_RADIUS {
                return Err(ConfigError::RadiusTooLarge { field, value });
            }
        }
        if self.ghost_radius < self.keep_radius {
            return Err(ConfigError::GhostRadiusBelowKeepRadius {
                ghost_radius: self.ghost_radius,
                keep_radius: self.keep_radius,
            });
        }
        for (field, value) in [
            ("door_threshold", self.door_threshold),
            ("inscription_cutoff", self.inscription_cutoff),
            ("anomaly_cutoff", self.anomaly_cutoff),
            ("portal_chance", self.portal_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { field, value });
            }
        }
        let band_sum = self.inscription_cutoff + self.anomaly_cutoff;
        if band_sum > 1.0 {
            return Err(ConfigError::WallBandsExceedUnit { sum: band_sum });
        }
        if self.max_ray_steps == 0 {
            return Err(ConfigError::ZeroRaySteps);
        }
        if !(self.max_ray_distance.is_finite() && self.max_ray_distance > 0.0) {
            return Err(ConfigError::InvalidRayDistance { value: self.max_ray_distance });
        }
        if !(0.0..0.5).contains(&self.player_margin) {
            return Err(ConfigError::MarginOutOfRange { value: self.player_margin });
        }
        if !(self.max_move_substep > 0.0 && self.max_move_substep <= 0.5) {
            return Err(ConfigError::InvalidMoveSubstep { value: self.max_move_substep });
        }
        Ok(())
    }
}

/// Describes why a `MazeConfig` was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    RegionSizeTooSmall { value: i64 },
    RadiusTooLarge { field: &'static str, value: u32 },
    GhostRadiusBelowKeepRadius { ghost_radius: u32, keep_radius: u32 },
    /// A probability-like field fell outside `[0, 1]` (NaN included).
    ProbabilityOutOfRange { field: &'static str, value: f64 },
    WallBandsExceedUnit { sum: f64 },
    ZeroRaySteps,
    InvalidRayDistance { value: f64 },
    MarginOutOfRange { value: f64 },
    InvalidMoveSubstep { value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegionSizeTooSmall { value } => {
                write!(f, "region_size must be at least 1, got {value}")
            }
            Self::RadiusTooLarge { field, value } => {
                write!(f, "{field} must be at most {MAX_REGION_RADIUS}, got {value}")
            }
            Self::GhostRadiusBelowKeepRadius { ghost_radius, keep_radius } => write!(
                f,
                "ghost_radius ({ghost_radius}) must not be smaller than keep_radius ({keep_radius})"
            ),
            Self::ProbabilityOutOfRange { field, value } => {
                write!(f, "{field} must be within [0, 1], got {value}")
            }
            Self::WallBandsExceedUnit { sum } => {
                write!(f, "inscription_cutoff + anomaly_cutoff must not exceed 1, got {sum}")
            }
            Self::ZeroRaySteps => write!(f, "max_ray_steps must be positive"),
            Self::InvalidRayDistance { value } => {
                write!(f, "max_ray_distance must be positive and finite, got {value}")
            }
            Self::MarginOutOfRange { value } => {
                write!(f, "player_margin must be within [0, 0.5), got {value}")
            }
            Self::InvalidMoveSubstep { value } => {
                write!(f, "max_move_substep must be within (0, 0.5], got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
