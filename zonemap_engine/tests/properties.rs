//! Randomized checks: whatever the input arrangement, the built manager must
//! agree everywhere with a brute-force priority scan over the descriptors.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use zonemap_engine::core::types::Coord;
use zonemap_engine::descriptor::ZoneDescriptor;
use zonemap_engine::manager::{ZoneManager, ZoneManagerOptions};

mod common;
use common::{descriptor, expected_zone, pt};

const TRIALS: usize = 40;

/// Trial shape per dimensionality; 3D uses a smaller world and fewer zones to
/// keep the carving (and the probe grid) at test-friendly sizes
struct TrialParams {
    dims: usize,
    coords: Range<Coord>,
    max_zones: usize,
}

const PARAMS_2D: TrialParams = TrialParams {
    dims: 2,
    coords: -6..7,
    max_zones: 6,
};
const PARAMS_3D: TrialParams = TrialParams {
    dims: 3,
    coords: -4..5,
    max_zones: 4,
};

fn random_descriptors(rng: &mut SmallRng, params: &TrialParams) -> Vec<ZoneDescriptor> {
    let count = rng.gen_range(1..=params.max_zones);
    (0..count)
        .map(|i| {
            let corner = |rng: &mut SmallRng| -> Vec<Coord> {
                (0..params.dims).map(|_| rng.gen_range(params.coords.clone())).collect()
            };
            let (pos1, pos2) = (corner(rng), corner(rng));
            descriptor(&format!("zone-{i}"), "Random", &pos1, &pos2)
        })
        .collect()
}

fn random_axis_order(rng: &mut SmallRng, dims: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..dims).collect();
    order.shuffle(rng);
    order
}

/// Walks every lattice point in (and just outside) the world and compares the
/// tree's answer with the priority scan.
fn assert_matches_brute_force(
    manager: &ZoneManager,
    descriptors: &[ZoneDescriptor],
    params: &TrialParams,
) {
    let probe = params.coords.start - 1..params.coords.end + 1;
    let mut pos = vec![0; params.dims];
    let mut stack = vec![probe.clone()];
    // Odometer over the probe grid, dimension-generic
    while let Some(range) = stack.last_mut() {
        match range.next() {
            None => {
                stack.pop();
            }
            Some(value) => {
                pos[stack.len() - 1] = value;
                if stack.len() < params.dims {
                    stack.push(probe.clone());
                } else {
                    let point = pt(&pos);
                    let got = manager.zone_of(&point).map(|z| z.original_id());
                    assert_eq!(got, expected_zone(descriptors, &point), "at {point}");
                }
            }
        }
    }
}

fn run_trials(params: &TrialParams, seed: u64) {
    let mut rng = SmallRng::seed_from_u64(seed);
    for trial in 0..TRIALS {
        let descriptors = random_descriptors(&mut rng, params);
        let options = ZoneManagerOptions {
            axis_order: Some(random_axis_order(&mut rng, params.dims)),
            // Exercise the greedy fallback on some trials
            defrag_cap: if trial % 4 == 0 { Some(6) } else { None },
        };
        let manager = ZoneManager::with_options(&descriptors, options)
            .unwrap_or_else(|e| panic!("trial {trial}: build failed: {e}"));

        common::assert_invariants(&manager);
        assert_eq!(
            manager.tree().leaf_count(),
            manager.zones().iter().map(|z| z.fragments().len()).sum::<usize>()
        );
        assert_matches_brute_force(&manager, &descriptors, params);
    }
}

#[test]
fn random_zones_2d() {
    run_trials(&PARAMS_2D, 0x5eed_2d);
}

#[test]
fn random_zones_3d() {
    run_trials(&PARAMS_3D, 0x5eed_3d);
}

/// Queries must not depend on query order: run the same points in two
/// different orders and expect identical answers.
#[test]
fn queries_are_pure() {
    let mut rng = SmallRng::seed_from_u64(42);
    let descriptors = random_descriptors(&mut rng, &PARAMS_2D);
    let manager = ZoneManager::new(&descriptors).unwrap();

    let points: Vec<_> = (0..200)
        .map(|_| {
            pt(&[
                rng.gen_range(PARAMS_2D.coords.clone()),
                rng.gen_range(PARAMS_2D.coords.clone()),
            ])
        })
        .collect();

    let forward: Vec<_> = points
        .iter()
        .map(|p| manager.zone_of(p).map(|z| z.original_id()))
        .collect();
    let backward: Vec<_> = points
        .iter()
        .rev()
        .map(|p| manager.zone_of(p).map(|z| z.original_id()))
        .collect();

    assert_eq!(forward, backward.into_iter().rev().collect::<Vec<_>>());
}
