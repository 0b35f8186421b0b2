//! Cell classification and the per-room open-door guarantee.

use crate::{
    config::MazeConfig,
    hash,
    regions::{RegionKey, SaltStore},
    types::{CellKind, DoorAxis, GridPos, Parity, WallKind},
};

/// Read-only view of the grid used by the raycaster and collision code.
pub trait CellQuery {
    fn cell_kind(&self, cell: GridPos) -> CellKind;

    fn is_walkable(&self, cell: GridPos) -> bool {
        self.cell_kind(cell).is_walkable()
    }
}

/// The two rooms a door position connects, or `None` for pillars and rooms.
pub fn door_rooms(cell: GridPos) -> Option<[GridPos; 2]> {
    match cell.parity() {
        Parity::Door(DoorAxis::X) => Some([cell.offset(-1, 0), cell.offset(1, 0)]),
        Parity::Door(DoorAxis::Y) => Some([cell.offset(0, -1), cell.offset(0, 1)]),
        Parity::Pillar | Parity::Room => None,
    }
}

/// The four door positions around a room: west, east, south, north.
pub const fn room_doors(room: GridPos) -> [GridPos; 4] {
    [room.offset(-1, 0), room.offset(1, 0), room.offset(0, -1), room.offset(0, 1)]
}

/// Borrowed classifier over one salt store and session seed.
#[derive(Clone, Copy)]
pub struct Classifier<'a> {
    config: &'a MazeConfig,
    salts: &'a SaltStore,
    seed: u32,
}

impl<'a> Classifier<'a> {
    pub fn new(config: &'a MazeConfig, salts: &'a SaltStore, seed: i64) -> Self {
        Self { config, salts, seed: hash::fold_seed(seed) }
    }

    pub fn classify(&self, cell: GridPos) -> CellKind {
        let Some(rooms) = door_rooms(cell) else {
            return match cell.parity() {
                Parity::Pillar => CellKind::Pillar,
                _ => CellKind::Room { portal: self.is_portal_room(cell) },
            };
        };

        let bits = self.door_bits(cell);
        if rooms.iter().any(|room| self.is_min_door(*room, cell, bits)) {
            return CellKind::OpenDoor;
        }
        if hash::unit(bits) < self.config.door_threshold {
            return CellKind::OpenDoor;
        }
        if rooms.iter().any(|room| self.is_portal_room(*room)) {
            return CellKind::Wall(WallKind::Portal);
        }

        let decor = hash::h2(cell.x, cell.y, self.salt_at(cell), self.seed);
        let inscription = self.config.inscription_cutoff;
        let kind = if decor < inscription {
            WallKind::Inscription
        } else if decor < inscription + self.config.anomaly_cutoff {
            WallKind::Anomaly
        } else {
            WallKind::Plain
        };
        CellKind::Wall(kind)
    }

    /// The door with the smallest door hash around `room`. The first of tied doors wins.
    pub fn guaranteed_door(&self, room: GridPos) -> GridPos {
        let doors = room_doors(room);
        let mut best = doors[0];
        let mut best_bits = self.door_bits(best);
        for door in &doors[1..] {
            let bits = self.door_bits(*door);
            if bits < best_bits {
                best = *door;
                best_bits = bits;
            }
        }
        best
    }

    pub fn is_portal_room(&self, room: GridPos) -> bool {
        let bits = hash::portal_bits(room.x, room.y, self.salt_at(room), self.seed);
        hash::unit(bits) < self.config.portal_chance
    }

    pub fn salt_at(&self, cell: GridPos) -> u32 {
        self.salts.get(RegionKey::containing(cell, self.config.region_size))
    }

    fn door_bits(&self, door: GridPos) -> u32 {
        hash::h1_bits(door.x, door.y, self.salt_at(door), self.seed)
    }

    // Ties count as the minimum, so tied doors all open.
    fn is_min_door(&self, room: GridPos, door: GridPos, bits: u32) -> bool {
        room_doors(room)
            .iter()
            .filter(|other| **other != door)
            .all(|other| bits <= self.door_bits(*other))
    }
}

impl CellQuery for Classifier<'_> {
    fn cell_kind(&self, cell: GridPos) -> CellKind {
        self.classify(cell)
    }
}
