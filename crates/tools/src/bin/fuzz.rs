use std::f64::consts::TAU;

use anyhow::{Result, bail};
use clap::Parser;
use maze_core::{CellKind, CellQuery, GridPos, MazeConfig, MazeWorld, Point, classify::room_doors};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 20_000)]
    steps: u32,
    /// Radius (in cells) around the player checked for sealed rooms
    #[arg(long, default_value_t = 6)]
    check_radius: i64,
}

fn unit(rng: &mut ChaCha8Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting maze fuzz walk on seed {} for {} steps...", args.seed, args.steps);
    let mut world = MazeWorld::new(MazeConfig::default(), args.seed as i64)?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut position = GridPos::new(1, 1).center();
    let mut heading = 0.0_f64;
    let mut forgotten = 0;
    let mut misses = 0_u32;

    world.update_regions(position.x, position.y);
    for step in 0..args.steps {
        // Occasional sprints exercise the sub-stepping path.
        let speed = if rng.next_u64() % 50 == 0 { 3.0 } else { 0.15 };
        if rng.next_u64() % 16 == 0 {
            heading = unit(&mut rng) * TAU;
        }
        let next = world.try_move(position, Point::new(heading.cos() * speed, heading.sin() * speed));
        if next == position {
            heading = unit(&mut rng) * TAU;
        }
        position = next;
        forgotten += world.update_regions(position.x, position.y).evicted.len();

        let cell = GridPos::containing(position);
        if !world.is_walkable(cell.x, cell.y) {
            bail!("Invariant failed: player inside {:?} at step {step}", world.cell_kind(cell));
        }

        let hit = world.cast_ray(position.x, position.y, unit(&mut rng) * TAU);
        if !(hit.distance >= 0.0 && hit.distance <= world.config().max_ray_distance) {
            bail!("Invariant failed: ray distance {} at step {step}", hit.distance);
        }
        misses += u32::from(hit.is_miss());

        if step % 64 == 0 {
            check_rooms_near(&world, cell, args.check_radius, step)?;
        }
    }

    println!(
        "Fuzzing completed successfully: ended at ({:.2}, {:.2}), forgot {forgotten} regions, {misses} ray misses.",
        position.x, position.y
    );
    Ok(())
}

fn check_rooms_near(world: &MazeWorld, center: GridPos, radius: i64, step: u32) -> Result<()> {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let cell = center.offset(dx, dy);
            if !matches!(world.cell_kind(cell), CellKind::Room { .. }) {
                continue;
            }
            let open =
                room_doors(cell).iter().any(|door| world.cell_kind(*door) == CellKind::OpenDoor);
            if !open {
                bail!("Invariant failed: room {cell:?} sealed at step {step}");
            }
        }
    }
    Ok(())
}
