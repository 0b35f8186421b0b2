use maze_core::{
    CellKind, CellQuery, GridPos, MazeConfig, MazeWorld, Parity, Point, RegionKey,
    classify::room_doors,
};
use proptest::{
    arbitrary::any,
    collection::vec,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};

fn world(seed: i64) -> MazeWorld {
    MazeWorld::new(MazeConfig::default(), seed).expect("default config is valid")
}

#[test]
fn classification_is_deterministic() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(256));
    runner
        .run(&(any::<i64>(), any::<i64>(), any::<i64>()), |(seed, x, y)| {
            let first = world(seed);
            let second = world(seed);
            let kind = first.classify(x, y);
            if kind != first.classify(x, y) || kind != second.classify(x, y) {
                return Err(TestCaseError::fail(format!("({x}, {y}) unstable for seed {seed}")));
            }
            Ok(())
        })
        .expect("identical inputs should classify identically");
}

#[test]
fn classification_stays_deterministic_after_forgetting() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(64));
    let strategy = (
        any::<i64>(),
        vec((-300.0_f64..300.0, -300.0_f64..300.0), 1..16),
        vec((-200_i64..200, -200_i64..200), 1..32),
    );
    runner
        .run(&strategy, |(seed, path, cells)| {
            let mut first = world(seed);
            let mut second = world(seed);
            // A round trip past the keep radius guarantees bumped salts around the origin.
            let round_trip = [(0.5, 0.5), (120.5, 0.5), (0.5, 0.5)];
            for &(x, y) in round_trip.iter().chain(&path) {
                first.update_regions(x, y);
                second.update_regions(x, y);
            }
            if first.salts().is_empty() {
                return Err(TestCaseError::fail("walk should have forgotten regions"));
            }
            for (x, y) in cells {
                let kind = first.classify(x, y);
                if kind != first.classify(x, y) || kind != second.classify(x, y) {
                    return Err(TestCaseError::fail(format!(
                        "({x}, {y}) unstable for seed {seed} after {} updates",
                        path.len()
                    )));
                }
            }
            Ok(())
        })
        .expect("bumped salts should classify identically on every query");
}

#[test]
fn classification_respects_parity() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(512));
    runner
        .run(&(any::<i64>(), any::<i64>(), any::<i64>()), |(seed, x, y)| {
            let kind = world(seed).classify(x, y);
            let consistent = match GridPos::new(x, y).parity() {
                Parity::Pillar => kind == CellKind::Pillar,
                Parity::Room => matches!(kind, CellKind::Room { .. }),
                Parity::Door(_) => matches!(kind, CellKind::OpenDoor | CellKind::Wall(_)),
            };
            if !consistent {
                return Err(TestCaseError::fail(format!("({x}, {y}) classified as {kind:?}")));
            }
            Ok(())
        })
        .expect("cell kinds should follow coordinate parity");
}

#[test]
fn every_room_keeps_an_open_door_under_any_salts() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(64));
    let strategy = (
        any::<i64>(),
        vec((-3_i64..3, -3_i64..3), 0..24),
        (-40_i64..40, -40_i64..40),
    );
    runner
        .run(&strategy, |(seed, centers, (ox, oy))| {
            let mut world = world(seed);
            // Walking between far-apart centers bumps salts unevenly across the window.
            for (rx, ry) in centers {
                let size = world.config().region_size as f64;
                world.update_regions(rx as f64 * size * 4.0 + 0.5, ry as f64 * size * 4.0 + 0.5);
            }
            for y in (oy * 2 - 1..oy * 2 + 30).step_by(2) {
                for x in (ox * 2 - 1..ox * 2 + 30).step_by(2) {
                    let room = GridPos::new(x, y);
                    let open = room_doors(room)
                        .iter()
                        .any(|door| world.cell_kind(*door) == CellKind::OpenDoor);
                    if !open {
                        return Err(TestCaseError::fail(format!("room {room:?} is sealed")));
                    }
                }
            }
            Ok(())
        })
        .expect("no room should ever be sealed");
}

#[test]
fn rays_always_terminate_with_sane_hits() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(256));
    let strategy = (any::<i64>(), -10_000.0_f64..10_000.0, -10_000.0_f64..10_000.0, any::<f64>());
    runner
        .run(&strategy, |(seed, x, y, angle)| {
            let world = world(seed);
            let hit = world.cast_ray(x, y, angle);
            if !(hit.distance >= 0.0 && hit.distance <= world.config().max_ray_distance) {
                return Err(TestCaseError::fail(format!("distance {} out of range", hit.distance)));
            }
            match hit.kind {
                None => {
                    if hit.distance != world.config().max_ray_distance {
                        return Err(TestCaseError::fail("miss must report the distance limit"));
                    }
                }
                Some(kind) => {
                    if kind != world.classify(hit.cell.x, hit.cell.y) || kind.is_walkable() {
                        return Err(TestCaseError::fail(format!("bad hit {hit:?}")));
                    }
                    if !(0.0..1.0).contains(&hit.wall_u) {
                        return Err(TestCaseError::fail(format!("wall_u {} out of range", hit.wall_u)));
                    }
                }
            }
            Ok(())
        })
        .expect("rays should terminate with consistent hits");
}

#[test]
fn repeated_updates_never_double_bump() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(64));
    let strategy = (any::<i64>(), vec((-200.0_f64..200.0, -200.0_f64..200.0), 1..20));
    runner
        .run(&strategy, |(seed, path)| {
            let mut world = world(seed);
            for (x, y) in path {
                let before: Vec<(RegionKey, u32)> = world.salts().sorted_entries();
                let update = world.update_regions(x, y);
                for key in &update.evicted {
                    let previous = before
                        .iter()
                        .find(|(k, _)| k == key)
                        .map_or(0, |(_, salt)| *salt);
                    if world.salt(*key) != previous + 1 {
                        return Err(TestCaseError::fail(format!("{key:?} not bumped exactly once")));
                    }
                }
                let settled = world.salts().sorted_entries();
                let again = world.update_regions(x, y);
                if !again.is_empty() || world.salts().sorted_entries() != settled {
                    return Err(TestCaseError::fail("stationary update changed salts"));
                }
            }
            Ok(())
        })
        .expect("salts should rise by exactly one per eviction");
}

#[test]
fn movement_never_enters_solid_cells() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(128));
    let strategy = (
        any::<i64>(),
        (-500_i64..500, -500_i64..500),
        vec((-2.0_f64..2.0, -2.0_f64..2.0), 1..40),
    );
    runner
        .run(&strategy, |(seed, (rx, ry), moves)| {
            let world = world(seed);
            let mut position = GridPos::new(rx * 2 + 1, ry * 2 + 1).center();
            for (dx, dy) in moves {
                position = world.try_move(position, Point::new(dx, dy));
                let cell = GridPos::containing(position);
                if !world.is_walkable(cell.x, cell.y) {
                    return Err(TestCaseError::fail(format!("player inside {cell:?}")));
                }
            }
            Ok(())
        })
        .expect("collision should keep the player out of walls");
}
