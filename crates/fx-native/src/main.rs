use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use clap::Parser;
use fx_core::{
    DashboardConfig, NetworkConfig, NetworkEffect, ParticleFieldConfig, ParticleFieldEffect,
    PointerTracker, RandomSource, RngSource, Scheduler, SpawnCadence,
};
use fx_native::{CountingSurface, PointerPath};
use glam::Vec2;

const FRAME_DT: Duration = Duration::from_micros(16_667); // 60 Hz
const POINTER_LAP: Duration = Duration::from_secs(8);

#[derive(Parser, Debug)]
#[command(
    name = "fx-native",
    about = "Run the dashboard effects headless on a fixed 60 Hz clock"
)]
struct Args {
    /// Frames to simulate.
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Particle surface width.
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Particle surface height.
    #[arg(long, default_value_t = 720.0)]
    height: f32,

    /// JSON dashboard config (`{"particles": {...}, "network": {...}}`).
    /// Without it both effects run with defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sleep between frames to hold 60 Hz instead of running flat out.
    #[arg(long)]
    realtime: bool,

    /// Log a stats line every this many frames.
    #[arg(long, default_value_t = 60)]
    report_every: u64,

    /// Seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<DashboardConfig> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => DashboardConfig {
            particles: Some(ParticleFieldConfig::default()),
            network: Some(NetworkConfig::default()),
        },
    };
    config.validate()?;
    Ok(config)
}

fn rng(seed: Option<u64>, stream: u64) -> impl RandomSource {
    match seed {
        Some(seed) => RngSource::seeded(seed.wrapping_add(stream)),
        None => RngSource::from_entropy(),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;

    let bounds = Vec2::new(args.width, args.height);
    let tracker = PointerTracker::new();
    let mut scheduler: Scheduler<CountingSurface> = Scheduler::new();
    let mut particles_id = None;
    let mut spawn = None;

    if let Some(cfg) = &config.particles {
        let effect =
            ParticleFieldEffect::new(cfg, bounds, tracker.reader(), &mut rng(args.seed, 0))?;
        let size = cfg.size_or(bounds);
        let handle = scheduler.mount(Box::new(effect), CountingSurface::new(size.x, size.y));
        particles_id = Some(handle.id());
    }
    if let Some(cfg) = &config.network {
        let size = cfg.size_or(Vec2::ZERO);
        let effect = NetworkEffect::new(cfg, size, Box::new(rng(args.seed, 1)))?;
        spawn = Some((
            SpawnCadence::new(effect.spawn_interval()),
            effect.spawn_trigger(),
        ));
        scheduler.mount(Box::new(effect), CountingSurface::new(size.x, size.y));
    }
    if scheduler.is_idle() {
        bail!("config enables no effects");
    }

    let path = PointerPath::new(bounds, POINTER_LAP);
    let report_every = args.report_every.max(1);
    let mut worst = Duration::ZERO;
    let mut total = Duration::ZERO;
    let mut skipped = 0;
    log::info!(
        "[native] {} frames at {:.0}x{:.0}{}",
        args.frames,
        bounds.x,
        bounds.y,
        if args.realtime { " (realtime)" } else { "" }
    );

    for i in 0..args.frames {
        let t = FRAME_DT * u32::try_from(i).unwrap_or(u32::MAX);
        path.apply(&tracker, t);
        if let Some((cadence, trigger)) = spawn.as_mut() {
            trigger.fire_n(cadence.due(FRAME_DT));
        }
        // swap orientation halfway through to exercise resize handling
        if i == args.frames / 2 {
            if let Some(surface) = particles_id.and_then(|id| scheduler.surface_mut(id)) {
                surface.resize(bounds.y, bounds.x);
            }
        }

        let started = Instant::now();
        let report = scheduler.frame(FRAME_DT);
        let cost = started.elapsed();
        worst = worst.max(cost);
        total += cost;
        skipped += report.skipped;

        if report.index % report_every == 0 {
            for (id, name, stats) in scheduler.stats() {
                log::info!(
                    "[native] frame {} #{} {}: entities={} links={}",
                    report.index,
                    id,
                    name,
                    stats.entities,
                    stats.links
                );
            }
        }
        if args.realtime {
            if let Some(rest) = FRAME_DT.checked_sub(cost) {
                thread::sleep(rest);
            }
        }
    }

    let frames = scheduler.frames().max(1);
    log::info!(
        "[native] done: {} frames, mean {:?}, worst {:?}, skipped renders {}",
        scheduler.frames(),
        total / u32::try_from(frames).unwrap_or(u32::MAX),
        worst,
        skipped
    );
    scheduler.stop_all();
    Ok(())
}
