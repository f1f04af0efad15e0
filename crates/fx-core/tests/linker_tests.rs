// Proximity linking: pair rules, weights, and brute force vs grid agreement.

use fnv::FnvHashMap;
use fx_core::*;
use glam::Vec2;

fn at(x: f32, y: f32) -> Particle {
    Particle {
        pos: Vec2::new(x, y),
        vel: Vec2::ZERO,
        base_radius: 1.0,
        radius: 1.0,
        opacity: 0.5,
    }
}

fn sorted_pairs(connections: &[Connection]) -> Vec<(usize, usize)> {
    let mut pairs: Vec<_> = connections.iter().map(|c| (c.a, c.b)).collect();
    pairs.sort_unstable();
    pairs
}

#[test]
fn weight_falls_off_linearly() {
    assert_eq!(link_weight(0.0, 120.0), 1.0);
    assert_eq!(link_weight(60.0, 120.0), 0.5);
    assert_eq!(link_weight(120.0, 120.0), 0.0);
    assert_eq!(link_weight(500.0, 120.0), 0.0);
}

#[test]
fn links_only_pairs_strictly_inside_threshold() {
    let particles = [at(0.0, 0.0), at(50.0, 0.0), at(170.0, 0.0), at(0.0, 120.0)];
    let mut out = Vec::new();
    link_pairs(&particles, 120.0, &mut out);
    // 0-1 at 50, 1-2 at 120 (excluded), 0-3 at 120 (excluded)
    assert_eq!(sorted_pairs(&out), vec![(0, 1)]);
    assert!((out[0].weight - (1.0 - 50.0 / 120.0)).abs() < 1e-6);
}

#[test]
fn each_pair_appears_once_with_lower_index_first() {
    let particles: Vec<_> = (0..10).map(|i| at(i as f32 * 5.0, 0.0)).collect();
    let mut out = Vec::new();
    link_pairs(&particles, 120.0, &mut out);
    assert_eq!(out.len(), 10 * 9 / 2);
    for c in &out {
        assert!(c.a < c.b);
        assert!(c.weight > 0.0 && c.weight <= 1.0);
    }
    let mut pairs = sorted_pairs(&out);
    pairs.dedup();
    assert_eq!(pairs.len(), out.len());
}

#[test]
fn empty_and_single_particle_sets_have_no_links() {
    let mut linker = ProximityLinker::new(120.0);
    assert!(linker.relink(&[]).is_empty());
    assert!(linker.relink(&[at(1.0, 1.0)]).is_empty());
}

#[test]
fn grid_matches_brute_force() {
    let mut rng = RngSource::seeded(99);
    let field = ParticleField::new(400, Vec2::new(900.0, 700.0), FieldParams::default(), &mut rng);
    let mut brute = Vec::new();
    link_pairs(field.particles(), 120.0, &mut brute);
    let mut grid = FnvHashMap::default();
    let mut bucketed = Vec::new();
    link_pairs_grid(field.particles(), 120.0, &mut grid, &mut bucketed);
    assert!(!brute.is_empty());
    assert_eq!(sorted_pairs(&brute), sorted_pairs(&bucketed));
}

#[test]
fn linker_switches_to_grid_at_cutoff_with_same_result() {
    let mut rng = RngSource::seeded(3);
    let field = ParticleField::new(64, Vec2::new(400.0, 400.0), FieldParams::default(), &mut rng);
    let mut brute = ProximityLinker::with_grid_cutoff(80.0, usize::MAX);
    let mut grid = ProximityLinker::with_grid_cutoff(80.0, 1);
    let a = sorted_pairs(brute.relink(field.particles()));
    let b = sorted_pairs(grid.relink(field.particles()));
    assert_eq!(a, b);
    assert_eq!(grid.threshold(), 80.0);
}

#[test]
fn relink_replaces_previous_frame() {
    let mut linker = ProximityLinker::new(120.0);
    linker.relink(&[at(0.0, 0.0), at(10.0, 0.0)]);
    assert_eq!(linker.connections().len(), 1);
    linker.relink(&[at(0.0, 0.0), at(500.0, 0.0)]);
    assert!(linker.connections().is_empty());
}
