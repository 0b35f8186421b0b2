use std::{
    f64::consts::FRAC_PI_2,
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, value_parser};
use maze_core::{
    CellKind, CellQuery, GridPos, Hit, MazeConfig, MazeWorld, Point, RegionKey, Side, WallKind,
    classify::room_doors,
    minimap::{self, MAX_RENDER_RADIUS},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Inspect and exercise the infinite maze", long_about = None)]
struct Args {
    /// Session seed mixed into every cell hash
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    seed: i64,
    /// TOML file overriding maze tuning constants
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Log region eviction and session events to stderr
    #[arg(short, long)]
    verbose: bool,
    /// Print machine-readable JSON instead of text
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify one cell and show its region
    Probe {
        #[arg(allow_negative_numbers = true)]
        x: i64,
        #[arg(allow_negative_numbers = true)]
        y: i64,
    },
    /// Draw the neighbourhood of a point as text
    Render {
        #[arg(long, default_value_t = 0.5, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, default_value_t = 0.5, allow_negative_numbers = true)]
        y: f64,
        #[arg(
            long,
            default_value_t = 12,
            value_parser = value_parser!(i64).range(0..=MAX_RENDER_RADIUS)
        )]
        radius: i64,
    },
    /// Cast a single ray
    Cast {
        #[arg(long, default_value_t = 1.5, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, default_value_t = 1.5, allow_negative_numbers = true)]
        y: f64,
        /// Ray angle in radians, counter-clockwise from +x
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        angle: f64,
    },
    /// Count cell kinds in a square and check that no room is sealed
    Stats {
        #[arg(
            long,
            default_value_t = 64,
            value_parser = value_parser!(i64).range(0..=MAX_STATS_RADIUS)
        )]
        radius: i64,
    },
    /// Wander through the maze, forgetting regions along the way
    Walk {
        #[arg(long, default_value_t = 2000)]
        steps: u32,
        /// Distance covered per step, in cells
        #[arg(long, default_value_t = 0.2)]
        speed: f64,
    },
}

const MAX_STATS_RADIUS: i64 = 1024;

#[derive(Serialize)]
struct ProbeReport {
    cell: GridPos,
    kind: CellKind,
    walkable: bool,
    region: RegionKey,
    salt: u32,
    ghost: bool,
}

#[derive(Serialize)]
struct CastReport {
    hit: bool,
    distance: f64,
    side: Side,
    cell: GridPos,
    wall_u: f64,
    kind: Option<CellKind>,
}

impl From<Hit> for CastReport {
    fn from(hit: Hit) -> Self {
        Self {
            hit: !hit.is_miss(),
            distance: hit.distance,
            side: hit.side,
            cell: hit.cell,
            wall_u: hit.wall_u,
            kind: hit.kind,
        }
    }
}

#[derive(Serialize, Default)]
struct Stats {
    pillars: u64,
    rooms: u64,
    portal_rooms: u64,
    open_doors: u64,
    plain_walls: u64,
    inscriptions: u64,
    anomalies: u64,
    portal_walls: u64,
    sealed_rooms: u64,
}

impl Stats {
    fn open_door_ratio(&self) -> f64 {
        let doors = self.open_doors
            + self.plain_walls
            + self.inscriptions
            + self.anomalies
            + self.portal_walls;
        if doors == 0 { 0.0 } else { self.open_doors as f64 / doors as f64 }
    }
}

#[derive(Serialize)]
struct WalkReport {
    steps: u32,
    final_position: (f64, f64),
    regions_crossed: u32,
    regions_forgotten: usize,
    blocked_steps: u32,
    snapshot_hash: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = load_config(args.config.as_deref())?;
    let mut world = MazeWorld::new(config, args.seed).context("Invalid maze configuration")?;
    info!(target: "maze::session", seed = args.seed, "tools session started");

    match args.command {
        Command::Probe { x, y } => {
            let cell = GridPos::new(x, y);
            let region = world.region_of(x, y);
            let kind = world.classify(x, y);
            let report = ProbeReport {
                cell,
                kind,
                walkable: kind.is_walkable(),
                region,
                salt: world.salt(region),
                ghost: world.is_ghost_cell(x, y),
            };
            if args.json {
                print_json(&report)?;
            } else {
                println!("Cell ({x}, {y}): {kind:?}");
                println!("Region ({}, {}) salt {}", region.x, region.y, report.salt);
            }
        }
        Command::Render { x, y, radius } => {
            world.update_regions(x, y);
            let map = minimap::render_ascii(&world, Point::new(x, y), radius);
            if args.json {
                print_json(&map.lines().collect::<Vec<_>>())?;
            } else {
                print!("{map}");
            }
        }
        Command::Cast { x, y, angle } => {
            let report = CastReport::from(world.cast_ray(x, y, angle));
            if args.json {
                print_json(&report)?;
            } else if report.hit {
                println!(
                    "Hit {:?} at ({}, {}) distance {:.4} side {:?} u {:.4}",
                    report.kind, report.cell.x, report.cell.y, report.distance, report.side,
                    report.wall_u
                );
            } else {
                println!("Miss after {:.1} cells", report.distance);
            }
        }
        Command::Stats { radius } => {
            let stats = collect_stats(&world, radius);
            if args.json {
                print_json(&stats)?;
            } else {
                println!("Rooms: {} ({} portal)", stats.rooms, stats.portal_rooms);
                println!("Open door ratio: {:.3}", stats.open_door_ratio());
                println!(
                    "Walls: {} plain, {} inscription, {} anomaly, {} portal",
                    stats.plain_walls, stats.inscriptions, stats.anomalies, stats.portal_walls
                );
                println!("Sealed rooms: {}", stats.sealed_rooms);
            }
            anyhow::ensure!(stats.sealed_rooms == 0, "{} rooms have no open door", stats.sealed_rooms);
        }
        Command::Walk { steps, speed } => {
            let report = walk(&mut world, args.seed, steps, speed);
            if args.json {
                print_json(&report)?;
            } else {
                println!("Walked {} steps to {:?}", report.steps, report.final_position);
                println!(
                    "Crossed {} regions, forgot {} regions, {} blocked steps",
                    report.regions_crossed, report.regions_forgotten, report.blocked_steps
                );
                println!("Snapshot Hash: {}", report.snapshot_hash);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn load_config(path: Option<&Path>) -> Result<MazeConfig> {
    let Some(path) = path else {
        return Ok(MazeConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("Failed to serialize output")?);
    Ok(())
}

fn collect_stats(world: &MazeWorld, radius: i64) -> Stats {
    let mut stats = Stats::default();
    for y in -radius..=radius {
        for x in -radius..=radius {
            match world.classify(x, y) {
                CellKind::Pillar => stats.pillars += 1,
                CellKind::Room { portal } => {
                    stats.rooms += 1;
                    stats.portal_rooms += u64::from(portal);
                    let sealed = room_doors(GridPos::new(x, y))
                        .iter()
                        .all(|door| world.cell_kind(*door) != CellKind::OpenDoor);
                    stats.sealed_rooms += u64::from(sealed);
                }
                CellKind::OpenDoor => stats.open_doors += 1,
                CellKind::Wall(WallKind::Plain) => stats.plain_walls += 1,
                CellKind::Wall(WallKind::Inscription) => stats.inscriptions += 1,
                CellKind::Wall(WallKind::Anomaly) => stats.anomalies += 1,
                CellKind::Wall(WallKind::Portal) => stats.portal_walls += 1,
            }
        }
    }
    stats
}

// Walks straight until blocked, then picks a new heading from the seeded generator.
fn walk(world: &mut MazeWorld, seed: i64, steps: u32, speed: f64) -> WalkReport {
    let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
    let mut position = GridPos::new(1, 1).center();
    let mut heading = 0.0_f64;
    let mut regions_crossed = 0;
    let mut regions_forgotten = 0;
    let mut blocked_steps = 0;

    world.update_regions(position.x, position.y);
    for _ in 0..steps {
        let delta = Point::new(heading.cos() * speed, heading.sin() * speed);
        let next = world.try_move(position, delta);
        if next == position {
            blocked_steps += 1;
            let quarter_turns = (rng.next_u64() % 4) as f64;
            heading = quarter_turns * FRAC_PI_2;
        }
        position = next;

        let update = world.update_regions(position.x, position.y);
        if !update.is_empty() {
            regions_crossed += 1;
            regions_forgotten += update.evicted.len();
            for key in &update.evicted {
                info!(target: "maze::regions", region_x = key.x, region_y = key.y, "walk forgot region");
            }
        }
    }

    WalkReport {
        steps,
        final_position: (position.x, position.y),
        regions_crossed,
        regions_forgotten,
        blocked_steps,
        snapshot_hash: world.snapshot_hash(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_config_keeps_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("maze.toml");
        fs::write(&path, "region_size = 8\nkeep_radius = 2\n").expect("write config");

        let config = load_config(Some(&path)).expect("config should parse");

        assert_eq!(config.region_size, 8);
        assert_eq!(config.keep_radius, 2);
        assert_eq!(config.max_ray_steps, MazeConfig::default().max_ray_steps);
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("maze.toml");
        fs::write(&path, "region_sise = 8\n").expect("write config");

        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn missing_config_path_falls_back_to_defaults() {
        assert_eq!(load_config(None).expect("defaults"), MazeConfig::default());
    }

    #[test]
    fn oversized_radii_are_rejected_at_parse_time() {
        let huge = i64::MAX.to_string();
        assert!(Args::try_parse_from(["maze-tools", "render", "--radius", &huge]).is_err());
        assert!(Args::try_parse_from(["maze-tools", "stats", "--radius", &huge]).is_err());
        assert!(Args::try_parse_from(["maze-tools", "stats", "--radius", "-1"]).is_err());
        assert!(Args::try_parse_from(["maze-tools", "stats", "--radius", "1024"]).is_ok());
    }

    #[test]
    fn stats_find_no_sealed_rooms() {
        let world = MazeWorld::new(MazeConfig::default(), 99).expect("valid config");
        let stats = collect_stats(&world, 30);
        assert_eq!(stats.sealed_rooms, 0);
        assert_eq!(stats.rooms, 30 * 30);
        assert!(stats.open_door_ratio() > 0.45);
    }

    #[test]
    fn walk_is_reproducible() {
        let run = || {
            let mut world = MazeWorld::new(MazeConfig::default(), 5).expect("valid config");
            walk(&mut world, 5, 3000, 0.25).snapshot_hash
        };
        assert_eq!(run(), run());
    }
}
