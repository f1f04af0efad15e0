// Pulse emission, lifecycle, and spawn cadence.

use std::time::Duration;

use fx_core::*;
use glam::Vec2;

#[test]
fn pulse_lives_for_ceil_one_over_speed_frames() {
    // (speed, ceil(1/speed)) including speeds that are inexact in f32
    let cases = [
        (0.25_f32, 4_u32),
        (0.5, 2),
        (0.125, 8),
        (0.01, 100),
        (0.02, 50),
        (0.03, 34),
        (0.1, 10),
        (0.3, 4),
        (0.015, 67),
        (0.07, 15),
        (1.0, 1),
    ];
    for (speed, frames) in cases {
        assert_eq!(Pulse::lifetime_frames(speed), frames, "speed {speed}");
        let mut emitter = PulseEmitter::default();
        emitter.launch(Vec2::ZERO, Vec2::new(10.0, 0.0), speed);
        for frame in 1..frames {
            emitter.advance();
            assert_eq!(emitter.len(), 1, "speed {speed} frame {frame}");
            assert!(emitter.active()[0].progress < 1.0, "speed {speed} frame {frame}");
        }
        emitter.advance();
        assert_eq!(emitter.len(), 1, "speed {speed}");
        assert_eq!(emitter.active()[0].progress, 1.0, "speed {speed}");
        assert_eq!(emitter.active()[0].position(), Vec2::new(10.0, 0.0));
        emitter.advance();
        assert!(emitter.is_empty(), "speed {speed}");
    }
}

#[test]
fn progress_is_a_multiple_of_speed_before_arrival() {
    let mut emitter = PulseEmitter::default();
    emitter.launch(Vec2::ZERO, Vec2::ONE, 0.01);
    for _ in 0..37 {
        emitter.advance();
    }
    let pulse = emitter.active()[0];
    assert_eq!(pulse.age, 37);
    assert_eq!(pulse.progress, 37.0 * 0.01);
}

#[test]
fn progress_never_decreases_and_never_exceeds_one_while_active() {
    let mut rng = RngSource::seeded(11);
    let topo = Topology::generate(
        &DEFAULT_LAYER_SIZES,
        Vec2::new(300.0, 200.0),
        &TopologyParams::default(),
        &mut rng,
    )
    .expect("default layers");
    let mut emitter = PulseEmitter::default();
    let mut last: std::collections::HashMap<u64, f32> = Default::default();
    for frame in 0..400 {
        if frame % 12 == 0 {
            emitter.spawn(&topo, &mut rng);
        }
        emitter.advance();
        for p in emitter.active() {
            assert!(p.progress <= 1.0);
            let prev = last.insert(p.id, p.progress).unwrap_or(0.0);
            assert!(p.progress >= prev);
        }
    }
}

#[test]
fn position_interpolates_and_opacity_fades() {
    let mut pulse = Pulse {
        id: 0,
        from: Vec2::new(0.0, 0.0),
        to: Vec2::new(100.0, 50.0),
        progress: 0.0,
        speed: 0.1,
        age: 0,
    };
    assert_eq!(pulse.position(), Vec2::ZERO);
    assert_eq!(pulse.opacity(), 1.0);
    pulse.progress = 0.5;
    assert_eq!(pulse.position(), Vec2::new(50.0, 25.0));
    assert_eq!(pulse.opacity(), 0.75);
    pulse.progress = 1.0;
    assert_eq!(pulse.position(), Vec2::new(100.0, 50.0));
    assert_eq!(pulse.opacity(), 0.5);
}

#[test]
fn spawn_picks_an_existing_edge_and_speed_in_range() {
    let mut rng = RngSource::seeded(2);
    let topo = Topology::generate(
        &[3, 6, 6, 3],
        Vec2::new(300.0, 200.0),
        &TopologyParams::default(),
        &mut rng,
    )
    .expect("valid layers");
    let mut emitter = PulseEmitter::new(0.01, 0.03);
    for _ in 0..50 {
        let id = emitter.spawn(&topo, &mut rng).expect("edges exist");
        let pulse = *emitter.active().iter().find(|p| p.id == id).expect("just spawned");
        assert_eq!(pulse.progress, 0.0);
        assert!(pulse.speed >= 0.01 && pulse.speed <= 0.03);
        assert!(topo
            .edges()
            .iter()
            .any(|&e| topo.endpoints(e) == Some((pulse.from, pulse.to))));
    }
    let mut ids: Vec<_> = emitter.active().iter().map(|p| p.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}

#[test]
fn in_flight_pulses_keep_endpoints_across_regeneration() {
    let config = NetworkConfig::default();
    let mut effect = NetworkEffect::new(
        &config,
        Vec2::new(300.0, 200.0),
        Box::new(RngSource::seeded(8)),
    )
    .expect("default config");
    effect.spawn_trigger().fire_n(3);
    effect.update(&FrameInfo::default());
    let before: Vec<_> = effect.pulses().iter().map(|p| (p.id, p.from, p.to)).collect();
    assert_eq!(before.len(), 3);

    effect.set_layers(&[2, 2]).expect("valid layers");
    assert_eq!(effect.topology().nodes().len(), 4);
    let after: Vec<_> = effect.pulses().iter().map(|p| (p.id, p.from, p.to)).collect();
    assert_eq!(before, after);
}

#[test]
fn set_layers_rejects_bad_sequences_and_keeps_topology() {
    let mut effect = NetworkEffect::new(
        &NetworkConfig::default(),
        Vec2::ZERO,
        Box::new(RngSource::seeded(1)),
    )
    .expect("default config");
    assert_eq!(effect.set_layers(&[5]), Err(ConfigError::SingleLayer(1)));
    assert_eq!(effect.topology().layer_sizes(), &DEFAULT_LAYER_SIZES);
}

#[test]
fn trigger_accumulates_until_taken() {
    let trigger = SpawnTrigger::new();
    let timer_side = trigger.clone();
    timer_side.fire();
    timer_side.fire_n(2);
    assert_eq!(trigger.pending(), 3);
    assert_eq!(trigger.take(), 3);
    assert_eq!(trigger.take(), 0);
}

#[test]
fn cadence_counts_completed_intervals() {
    let mut cadence = SpawnCadence::new(Duration::from_millis(200));
    assert_eq!(cadence.due(Duration::from_millis(150)), 0);
    assert_eq!(cadence.due(Duration::from_millis(60)), 1);
    assert_eq!(cadence.due(Duration::from_millis(390)), 2);
    assert_eq!(cadence.due(Duration::from_millis(1000)), 5);
    assert_eq!(cadence.interval(), Duration::from_millis(200));

    let mut never = SpawnCadence::new(Duration::ZERO);
    assert_eq!(never.due(Duration::from_secs(5)), 0);
}

#[test]
fn network_effect_spawns_once_per_fire() {
    let mut effect = NetworkEffect::new(
        &NetworkConfig::default(),
        Vec2::new(300.0, 200.0),
        Box::new(RngSource::seeded(4)),
    )
    .expect("default config");
    assert_eq!(effect.spawn_interval(), Duration::from_millis(200));
    let trigger = effect.spawn_trigger();
    effect.update(&FrameInfo::default());
    assert!(effect.pulses().is_empty());
    trigger.fire();
    effect.update(&FrameInfo::default());
    assert_eq!(effect.pulses().len(), 1);
    assert_eq!(trigger.pending(), 0);
    let stats = effect.stats();
    assert_eq!(stats.entities, 18 + 1);
    assert_eq!(stats.links, effect.topology().edges().len());
}
