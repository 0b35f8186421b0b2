//! Persistent view settings.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::APP_NAME;

pub const SETTINGS_FORMAT_VERSION: u32 = 1;
pub const MIN_FOV: f64 = 0.6;
pub const MAX_FOV: f64 = 2.0;
pub const FOV_STEP: f64 = 0.1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ViewSettingsFile {
    pub format_version: u32,
    /// Horizontal field of view in radians.
    pub fov: f64,
    /// Cells per second.
    pub move_speed: f64,
    /// Radians per second.
    pub turn_speed: f64,
    pub show_minimap: bool,
}

impl Default for ViewSettingsFile {
    fn default() -> Self {
        Self {
            format_version: SETTINGS_FORMAT_VERSION,
            fov: 1.1,
            move_speed: 2.5,
            turn_speed: 2.2,
            show_minimap: true,
        }
    }
}

impl ViewSettingsFile {
    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
            let mut path = proj_dirs.data_dir().to_path_buf();
            path.push("view_settings.json");
            path
        })
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(settings.sanitized())
    }

    /// Clamps hand-edited or corrupt values back into a playable range.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.format_version = SETTINGS_FORMAT_VERSION;
        self.fov = if self.fov.is_finite() { self.fov.clamp(MIN_FOV, MAX_FOV) } else { defaults.fov };
        if !(self.move_speed.is_finite() && self.move_speed > 0.0) {
            self.move_speed = defaults.move_speed;
        }
        if !(self.turn_speed.is_finite() && self.turn_speed > 0.0) {
            self.turn_speed = defaults.turn_speed;
        }
        self
    }

    pub fn adjust_fov(&mut self, steps: i32) {
        self.fov = (self.fov + f64::from(steps) * FOV_STEP).clamp(MIN_FOV, MAX_FOV);
    }
}
