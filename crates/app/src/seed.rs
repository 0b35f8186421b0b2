//! Viewer command line and session seeds.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "maze-app", version, about = "Walk the infinite maze")]
pub struct ViewerArgs {
    /// Seed for the first session; later sessions always draw a fresh seed
    #[arg(long, allow_negative_numbers = true)]
    pub seed: Option<i64>,
}

impl ViewerArgs {
    /// The first session's seed, drawing one from `fresh` when none was given.
    pub fn first_seed(&self, fresh: impl FnOnce() -> i64) -> SessionSeed {
        self.seed.map_or_else(|| SessionSeed::Fresh(fresh()), SessionSeed::Pinned)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionSeed {
    /// Given with `--seed`, so the maze can be revisited.
    Pinned(i64),
    Fresh(i64),
}

impl SessionSeed {
    pub fn value(self) -> i64 {
        match self {
            Self::Pinned(seed) | Self::Fresh(seed) => seed,
        }
    }
}

static SESSIONS_STARTED: AtomicU64 = AtomicU64::new(0);

/// A seed for a new visit. Uses the whole `i64` range, negatives included.
pub fn fresh_session_seed() -> i64 {
    let clock =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| elapsed.as_nanos());
    let session = SESSIONS_STARTED.fetch_add(1, Ordering::Relaxed);
    let folded_clock = (clock as u64) ^ ((clock >> 64) as u64);
    let mixed = splitmix64(folded_clock.wrapping_add(session.wrapping_mul(0x9E37_79B9_7F4A_7C15)))
        ^ u64::from(process::id()).rotate_left(32);
    i64::from_ne_bytes(splitmix64(mixed).to_ne_bytes())
}

fn splitmix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
