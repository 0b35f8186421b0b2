//! Region salts and the active/ghost region bookkeeping that drives forgetting.
//! Salts are the only state that makes the maze non-stateless; everything else
//! is recomputed from them on demand.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::types::GridPos;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegionKey {
    pub x: i64,
    pub y: i64,
}

impl RegionKey {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub const fn containing(cell: GridPos, region_size: i64) -> Self {
        Self { x: cell.x.div_euclid(region_size), y: cell.y.div_euclid(region_size) }
    }

    pub const fn offset(self, dx: i64, dy: i64) -> Self {
        Self { x: self.x.wrapping_add(dx), y: self.y.wrapping_add(dy) }
    }

    pub const fn chebyshev(self, other: Self) -> u64 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        if dx > dy { dx } else { dy }
    }

    /// Lowest-coordinate cell of the region.
    pub const fn origin(self, region_size: i64) -> GridPos {
        GridPos::new(self.x.wrapping_mul(region_size), self.y.wrapping_mul(region_size))
    }
}

/// Monotonic per-region salts. Unseen regions read as 0.
#[derive(Clone, Debug, Default)]
pub struct SaltStore {
    salts: HashMap<RegionKey, u32>,
}

impl SaltStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: RegionKey) -> u32 {
        self.salts.get(&key).copied().unwrap_or(0)
    }

    /// Increments the salt for `key` and returns the new value.
    pub fn bump(&mut self, key: RegionKey) -> u32 {
        let salt = self.salts.entry(key).or_insert(0);
        *salt = salt.wrapping_add(1);
        *salt
    }

    /// Regions that have been bumped at least once.
    pub fn len(&self) -> usize {
        self.salts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.salts.is_empty()
    }

    /// Entries ordered by region key, for stable hashing and display.
    pub fn sorted_entries(&self) -> Vec<(RegionKey, u32)> {
        let mut entries: Vec<_> = self.salts.iter().map(|(key, salt)| (*key, *salt)).collect();
        entries.sort_unstable_by_key(|(key, _)| *key);
        entries
    }
}

/// Outcome of one active-set recomputation. Both lists are sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionUpdate {
    pub evicted: Vec<RegionKey>,
    pub admitted: Vec<RegionKey>,
}

impl RegionUpdate {
    pub fn is_empty(&self) -> bool {
        self.evicted.is_empty() && self.admitted.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct RegionTracker {
    center: Option<RegionKey>,
    active: BTreeSet<RegionKey>,
    ghosts: BTreeSet<RegionKey>,
}

impl RegionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recenters the active square on `center`.
    ///
    /// Regions leaving the square get their salt bumped exactly once and become ghosts;
    /// regions entering it lose their ghost mark. Repeating the call with the same
    /// center is a no-op.
    pub fn update(
        &mut self,
        center: RegionKey,
        keep_radius: u32,
        ghost_radius: u32,
        salts: &mut SaltStore,
    ) -> RegionUpdate {
        if self.center == Some(center) {
            return RegionUpdate::default();
        }
        self.center = Some(center);

        let next = square_around(center, keep_radius);
        let evicted: Vec<RegionKey> = self.active.difference(&next).copied().collect();
        let admitted: Vec<RegionKey> = next.difference(&self.active).copied().collect();

        for key in &evicted {
            let salt = salts.bump(*key);
            self.ghosts.insert(*key);
            debug!(target: "maze::regions", region_x = key.x, region_y = key.y, salt, "region forgotten");
        }
        for key in &admitted {
            self.ghosts.remove(key);
        }
        let ghost_limit = u64::from(ghost_radius);
        self.ghosts.retain(|key| key.chebyshev(center) <= ghost_limit);
        self.active = next;

        trace!(
            target: "maze::regions",
            center_x = center.x,
            center_y = center.y,
            evicted = evicted.len(),
            admitted = admitted.len(),
            ghosts = self.ghosts.len(),
            "active regions recentered"
        );
        RegionUpdate { evicted, admitted }
    }

    pub fn center(&self) -> Option<RegionKey> {
        self.center
    }

    pub fn active(&self) -> &BTreeSet<RegionKey> {
        &self.active
    }

    pub fn ghosts(&self) -> &BTreeSet<RegionKey> {
        &self.ghosts
    }

    pub fn is_active(&self, key: RegionKey) -> bool {
        self.active.contains(&key)
    }

    pub fn is_ghost(&self, key: RegionKey) -> bool {
        self.ghosts.contains(&key)
    }
}

fn square_around(center: RegionKey, radius: u32) -> BTreeSet<RegionKey> {
    let radius = i64::from(radius);
    let mut square = BTreeSet::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            square.insert(center.offset(dx, dy));
        }
    }
    square
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_key_uses_floor_division() {
        assert_eq!(RegionKey::containing(GridPos::new(0, 11), 12), RegionKey::new(0, 0));
        assert_eq!(RegionKey::containing(GridPos::new(12, -1), 12), RegionKey::new(1, -1));
        assert_eq!(RegionKey::containing(GridPos::new(-12, -13), 12), RegionKey::new(-1, -2));
    }

    #[test]
    fn region_key_handles_extreme_cells() {
        let key = RegionKey::containing(GridPos::new(i64::MIN, i64::MAX), 12);
        assert!(key.x < 0 && key.y > 0);
    }

    #[test]
    fn salt_store_defaults_to_zero_and_bumps_by_one() {
        let mut salts = SaltStore::new();
        let key = RegionKey::new(-3, 8);
        assert_eq!(salts.get(key), 0);
        assert_eq!(salts.bump(key), 1);
        assert_eq!(salts.bump(key), 2);
        assert_eq!(salts.get(key), 2);
        assert_eq!(salts.get(RegionKey::new(0, 0)), 0);
    }

    #[test]
    fn first_update_admits_the_whole_square() {
        let mut tracker = RegionTracker::new();
        let mut salts = SaltStore::new();
        let update = tracker.update(RegionKey::new(0, 0), 3, 5, &mut salts);

        assert_eq!(update.admitted.len(), 49);
        assert!(update.evicted.is_empty());
        assert!(salts.is_empty());
        assert!(tracker.is_active(RegionKey::new(-3, 3)));
        assert!(!tracker.is_active(RegionKey::new(4, 0)));
    }

    #[test]
    fn repeated_update_without_movement_does_not_bump_again() {
        let mut tracker = RegionTracker::new();
        let mut salts = SaltStore::new();
        tracker.update(RegionKey::new(0, 0), 2, 4, &mut salts);
        tracker.update(RegionKey::new(1, 0), 2, 4, &mut salts);
        let before = salts.sorted_entries();

        let again = tracker.update(RegionKey::new(1, 0), 2, 4, &mut salts);

        assert!(again.is_empty());
        assert_eq!(salts.sorted_entries(), before);
    }

    #[test]
    fn stepping_one_region_evicts_the_trailing_column_once() {
        let mut tracker = RegionTracker::new();
        let mut salts = SaltStore::new();
        tracker.update(RegionKey::new(0, 0), 1, 3, &mut salts);
        let update = tracker.update(RegionKey::new(1, 0), 1, 3, &mut salts);

        assert_eq!(
            update.evicted,
            vec![RegionKey::new(-1, -1), RegionKey::new(-1, 0), RegionKey::new(-1, 1)]
        );
        assert_eq!(
            update.admitted,
            vec![RegionKey::new(2, -1), RegionKey::new(2, 0), RegionKey::new(2, 1)]
        );
        for key in &update.evicted {
            assert_eq!(salts.get(*key), 1);
            assert!(tracker.is_ghost(*key));
        }
        assert_eq!(salts.get(RegionKey::new(0, 0)), 0);
    }

    #[test]
    fn readmitted_region_is_no_longer_a_ghost() {
        let mut tracker = RegionTracker::new();
        let mut salts = SaltStore::new();
        tracker.update(RegionKey::new(0, 0), 1, 3, &mut salts);
        tracker.update(RegionKey::new(2, 0), 1, 3, &mut salts);
        assert!(tracker.is_ghost(RegionKey::new(-1, 0)));

        tracker.update(RegionKey::new(0, 0), 1, 3, &mut salts);

        assert!(!tracker.is_ghost(RegionKey::new(-1, 0)));
        assert_eq!(salts.get(RegionKey::new(-1, 0)), 1);
        assert!(tracker.is_ghost(RegionKey::new(3, 0)));
    }

    #[test]
    fn ghosts_beyond_ghost_radius_are_dropped_but_salts_remain() {
        let mut tracker = RegionTracker::new();
        let mut salts = SaltStore::new();
        tracker.update(RegionKey::new(0, 0), 1, 2, &mut salts);
        tracker.update(RegionKey::new(10, 0), 1, 2, &mut salts);

        assert!(tracker.ghosts().is_empty());
        assert_eq!(salts.get(RegionKey::new(0, 0)), 1);
        assert_eq!(salts.len(), 9);
    }
}
