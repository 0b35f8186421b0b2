//! Stable snapshot hashing for deterministic verification.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::MazeWorld;
use crate::regions::RegionKey;

impl MazeWorld {
    /// Digest of everything that determines the current maze: seed, salts and region sets.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_i64(self.seed);
        let salts = self.salts.sorted_entries();
        hasher.write_usize(salts.len());
        for (key, salt) in salts {
            write_key(&mut hasher, key);
            hasher.write_u32(salt);
        }
        hasher.write_usize(self.regions.active().len());
        for key in self.regions.active() {
            write_key(&mut hasher, *key);
        }
        hasher.write_usize(self.regions.ghosts().len());
        for key in self.regions.ghosts() {
            write_key(&mut hasher, *key);
        }
        hasher.finish()
    }
}

fn write_key(hasher: &mut Xxh3, key: RegionKey) {
    hasher.write_i64(key.x);
    hasher.write_i64(key.y);
}
