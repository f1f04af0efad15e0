// Frame scheduler: update/render ordering, cancellation, resize, failure isolation.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use fx_core::*;
use glam::Vec2;

const DT: Duration = Duration::from_millis(16);

type Log = Rc<RefCell<Vec<String>>>;

/// Effect that records every call into a shared log.
struct Probe {
    tag: &'static str,
    log: Log,
    sizes: Rc<RefCell<Vec<Vec2>>>,
}

impl Probe {
    fn boxed(tag: &'static str, log: &Log) -> Box<Self> {
        Box::new(Self {
            tag,
            log: log.clone(),
            sizes: Rc::default(),
        })
    }
}

impl Effect for Probe {
    fn name(&self) -> &'static str {
        self.tag
    }

    fn update(&mut self, frame: &FrameInfo) {
        self.log
            .borrow_mut()
            .push(format!("update {} #{}", self.tag, frame.index));
    }

    fn render(&self, surface: &mut dyn Surface, frame: &FrameInfo) -> Result<(), RenderError> {
        self.log
            .borrow_mut()
            .push(format!("render {} #{}", self.tag, frame.index));
        surface.clear();
        surface.circle(&Circle::filled(Vec2::ZERO, 1.0, ACCENT.opaque()))
    }

    fn resize(&mut self, size: Vec2) {
        self.sizes.borrow_mut().push(size);
    }
}

fn surface() -> RecordingSurface {
    RecordingSurface::new(200.0, 100.0)
}

#[test]
fn updates_every_effect_before_rendering_any() {
    let log: Log = Rc::default();
    let mut scheduler = Scheduler::new();
    scheduler.mount(Probe::boxed("a", &log), surface());
    scheduler.mount(Probe::boxed("b", &log), surface());
    let report = scheduler.frame(DT);
    assert_eq!(
        *log.borrow(),
        vec!["update a #1", "update b #1", "render a #1", "render b #1"]
    );
    assert_eq!(report.index, 1);
    assert_eq!(report.updated, 2);
    assert_eq!(report.rendered, 2);
    assert_eq!(report.skipped, 0);
}

#[test]
fn stopped_effect_never_runs_again() {
    let log: Log = Rc::default();
    let mut scheduler = Scheduler::new();
    let a = scheduler.mount(Probe::boxed("a", &log), surface());
    scheduler.mount(Probe::boxed("b", &log), surface());
    scheduler.frame(DT);
    log.borrow_mut().clear();

    assert!(a.stop());
    assert!(!a.is_alive());
    let report = scheduler.frame(DT);
    assert_eq!(*log.borrow(), vec!["update b #2", "render b #2"]);
    assert_eq!(report.retired, 1);
    assert_eq!(scheduler.live(), 1);
    assert!(scheduler.surface(a.id()).is_none());
}

#[test]
fn stop_is_idempotent_and_disposers_run_once() {
    let log: Log = Rc::default();
    let mut scheduler: Scheduler<RecordingSurface> = Scheduler::new();
    let handle = scheduler.mount(Probe::boxed("a", &log), surface());
    let disposed = Rc::new(Cell::new(0));
    let order = Rc::new(RefCell::new(Vec::new()));
    for tag in ["listener", "timer"] {
        let disposed = disposed.clone();
        let order = order.clone();
        handle.on_stop(move || {
            disposed.set(disposed.get() + 1);
            order.borrow_mut().push(tag);
        });
    }

    let other = handle.clone();
    assert!(handle.stop());
    assert!(!other.stop());
    assert!(!handle.stop());
    assert_eq!(disposed.get(), 2);
    assert_eq!(*order.borrow(), vec!["timer", "listener"]);

    // registering after stop disposes immediately
    let late = disposed.clone();
    handle.on_stop(move || late.set(late.get() + 1));
    assert_eq!(disposed.get(), 3);
}

#[test]
fn stop_between_update_and_render_blocks_the_draw() {
    // an effect whose update stops a sibling mid-frame
    struct Stopper(EffectHandle);
    impl Effect for Stopper {
        fn name(&self) -> &'static str {
            "stopper"
        }
        fn update(&mut self, _frame: &FrameInfo) {
            self.0.stop();
        }
        fn render(&self, _s: &mut dyn Surface, _f: &FrameInfo) -> Result<(), RenderError> {
            Ok(())
        }
    }

    let log: Log = Rc::default();
    let mut scheduler = Scheduler::new();
    let victim = scheduler.mount(Probe::boxed("victim", &log), surface());
    scheduler.mount(Box::new(Stopper(victim.clone())), surface());
    let report = scheduler.frame(DT);
    assert_eq!(*log.borrow(), vec!["update victim #1"]);
    assert_eq!(report.rendered, 1);
    assert!(scheduler.surface(victim.id()).is_some_and(|s| s.ops().is_empty()));
}

#[test]
fn failed_render_skips_only_that_effect() {
    let log: Log = Rc::default();
    let mut scheduler = Scheduler::new();
    let bad = scheduler.mount(Probe::boxed("bad", &log), surface());
    let good = scheduler.mount(Probe::boxed("good", &log), surface());
    scheduler
        .surface_mut(bad.id())
        .expect("mounted")
        .fail_circles(true);

    let report = scheduler.frame(DT);
    assert_eq!(report.rendered, 1);
    assert_eq!(report.skipped, 1);
    assert!(bad.is_alive());
    let good_counts = scheduler.surface(good.id()).expect("mounted").counts();
    assert_eq!(good_counts.circles, 1);

    // the failing effect keeps simulating and recovers once the surface does
    scheduler
        .surface_mut(bad.id())
        .expect("mounted")
        .fail_circles(false);
    let report = scheduler.frame(DT);
    assert_eq!(report.rendered, 2);
    assert_eq!(report.skipped, 0);
}

#[test]
fn resize_reaches_the_effect_once() {
    let mut scheduler = Scheduler::new();
    let sizes = Rc::new(RefCell::new(Vec::new()));
    let probe = Box::new(Probe {
        tag: "a",
        log: Rc::default(),
        sizes: sizes.clone(),
    });
    let handle = scheduler.mount(probe, surface());
    scheduler.frame(DT);
    scheduler
        .surface_mut(handle.id())
        .expect("mounted")
        .resize(640.0, 480.0);
    scheduler.frame(DT);
    scheduler.frame(DT);
    assert_eq!(*sizes.borrow(), vec![Vec2::new(640.0, 480.0)]);
}

#[test]
fn particle_state_survives_resize() {
    let config = ParticleFieldConfig {
        particle_count: 30,
        ..ParticleFieldConfig::default()
    };
    let mut effect = ParticleFieldEffect::new(
        &config,
        Vec2::new(400.0, 300.0),
        PointerReader::detached(),
        &mut RngSource::seeded(12),
    )
    .expect("valid config");
    let before: Vec<_> = effect.field().particles().to_vec();

    effect.resize(Vec2::new(1200.0, 900.0));
    assert_eq!(effect.field().bounds(), Vec2::new(1200.0, 900.0));
    assert_eq!(effect.field().particles(), before.as_slice());
    assert_eq!(effect.stats().entities, 30);
}

#[test]
fn fixed_size_config_ignores_host_resize() {
    let config = ParticleFieldConfig {
        width: Some(500.0),
        height: Some(250.0),
        ..ParticleFieldConfig::default()
    };
    let mut effect = ParticleFieldEffect::new(
        &config,
        Vec2::new(1920.0, 1080.0),
        PointerReader::detached(),
        &mut RngSource::seeded(0),
    )
    .expect("valid config");
    assert_eq!(effect.field().bounds(), Vec2::new(500.0, 250.0));
    effect.resize(Vec2::new(800.0, 600.0));
    assert_eq!(effect.field().bounds(), Vec2::new(500.0, 250.0));
}

#[test]
fn pointer_is_shifted_into_surface_space() {
    let tracker = PointerTracker::new();
    let config = ParticleFieldConfig {
        particle_count: 1,
        max_speed: 0.0,
        ..ParticleFieldConfig::default()
    };
    // every draw is 0.5: the single particle sits at the surface centre (100, 50)
    let mut effect = ParticleFieldEffect::new(
        &config,
        Vec2::new(200.0, 100.0),
        tracker.reader(),
        &mut SequenceSource::constant(0.5),
    )
    .expect("valid config");
    let base = effect.field().particles()[0].base_radius;

    // far away in page space, right next to the particle once shifted
    tracker.move_to(1100.0, 1040.0);
    effect.update(&FrameInfo::default());
    assert_eq!(effect.field().particles()[0].radius, base);

    let shifted = FrameInfo {
        origin: Vec2::new(1000.0, 1000.0),
        ..FrameInfo::default()
    };
    effect.update(&shifted);
    let p = effect.field().particles()[0];
    assert!(p.radius > base);
    assert!(p.pos.y > 50.0);
}

#[test]
fn idle_scheduler_does_not_count_frames() {
    let log: Log = Rc::default();
    let mut scheduler = Scheduler::new();
    assert!(scheduler.is_idle());
    assert_eq!(scheduler.frame(DT), FrameReport::default());
    scheduler.mount(Probe::boxed("a", &log), surface());
    scheduler.frame(DT);
    scheduler.stop_all();
    assert!(scheduler.is_idle());
    let report = scheduler.frame(DT);
    assert_eq!(report.retired, 1);
    assert_eq!(report.index, 0);
    assert_eq!(scheduler.frames(), 1);
}

#[test]
fn frame_info_carries_elapsed_time() {
    struct Clock(Rc<Cell<Duration>>);
    impl Effect for Clock {
        fn name(&self) -> &'static str {
            "clock"
        }
        fn update(&mut self, frame: &FrameInfo) {
            self.0.set(frame.elapsed);
        }
        fn render(&self, _s: &mut dyn Surface, _f: &FrameInfo) -> Result<(), RenderError> {
            Ok(())
        }
    }

    let seen = Rc::new(Cell::new(Duration::ZERO));
    let mut scheduler = Scheduler::new();
    scheduler.mount(Box::new(Clock(seen.clone())), surface());
    for _ in 0..3 {
        scheduler.frame(DT);
    }
    assert_eq!(seen.get(), DT * 3);
}
