use super::*;
use crate::engine::scheduler::FrameClock;
use crate::particle::model::{Motion, Petal};
use crate::render::recording::RecordingSurface;
use rand::SeedableRng;

/// Particles fall one pixel per tick and die at `limit`.
struct Falling {
    count: usize,
    limit: f64,
    stops: bool,
}

impl ParticleSystem for Falling {
    type Particle = Petal;

    fn name(&self) -> &'static str {
        "falling"
    }

    fn spawn<R: Rng + ?Sized>(&self, _rng: &mut R, _viewport: Viewport) -> Vec<Petal> {
        (0..self.count)
            .map(|i| Petal {
                motion: Motion {
                    x: 0.0,
                    y: i as f64,
                    speed_x: 0.0,
                    speed_y: 1.0,
                    size: 4.0,
                    rotation: 0.0,
                    rotation_speed: 0.0,
                },
                opacity: 1.0,
            })
            .collect()
    }

    fn step<R: Rng + ?Sized>(&self, p: &mut Petal, _viewport: Viewport, _rng: &mut R) {
        p.motion.y += p.motion.speed_y;
    }

    fn is_live(&self, p: &Petal, _viewport: Viewport) -> bool {
        p.motion.y < self.limit
    }

    fn stops_when_empty(&self) -> bool {
        self.stops
    }
}

fn engine(count: usize, limit: f64, stops: bool) -> Engine<Falling, RecordingSurface> {
    Engine::new(
        Falling {
            count,
            limit,
            stops,
        },
        Some(RecordingSurface::new(Viewport::new(100, 100))),
        StdRng::seed_from_u64(0),
    )
}

fn pump(e: &mut Engine<Falling, RecordingSurface>, clock: &mut FrameClock) -> Vec<TickOutcome> {
    clock
        .advance()
        .into_iter()
        .map(|h| e.on_tick(h, clock).unwrap())
        .collect()
}

#[test]
fn start_spawns_and_schedules_without_stepping() {
    let mut clock = FrameClock::new();
    let mut e = engine(3, 10.0, true);
    assert_eq!(e.state(), EngineState::Idle);

    assert!(e.start(&mut clock));
    assert_eq!(e.state(), EngineState::Running);
    assert_eq!(e.population().len(), 3);
    assert_eq!(e.population()[0].motion.y, 0.0);
    assert_eq!(clock.pending_len(), 1);
    assert_eq!(e.surface().unwrap().clear_count(), 0);
}

#[test]
fn tick_paints_pre_step_state_then_steps() {
    let mut clock = FrameClock::new();
    let mut e = engine(1, 10.0, true);
    e.start(&mut clock);

    assert_eq!(pump(&mut e, &mut clock), vec![TickOutcome::Rescheduled]);
    let frame = e.surface().unwrap().last_frame();
    assert_eq!(frame.len(), 1);
    assert_eq!(frame[0].transform.translation().y, 0.0);
    assert_eq!(e.population()[0].motion.y, 1.0);
}

#[test]
fn loop_stops_when_population_empties() {
    let mut clock = FrameClock::new();
    let mut e = engine(2, 3.0, true);
    e.start(&mut clock);

    let mut outcomes = Vec::new();
    for _ in 0..10 {
        outcomes.extend(pump(&mut e, &mut clock));
    }
    assert_eq!(outcomes.last(), Some(&TickOutcome::Finished));
    assert!(e.population().is_empty());
    assert_eq!(e.state(), EngineState::Idle);
    assert_eq!(clock.pending_len(), 0);
    // particle at y=1 dies after 2 ticks, y=0 after 3
    assert_eq!(e.ticks(), 3);
}

#[test]
fn perpetual_system_keeps_running_when_empty() {
    let mut clock = FrameClock::new();
    let mut e = engine(0, 3.0, false);
    e.start(&mut clock);
    for _ in 0..5 {
        assert_eq!(pump(&mut e, &mut clock), vec![TickOutcome::Rescheduled]);
    }
    assert!(e.is_running());
}

#[test]
fn stop_cancels_and_is_idempotent() {
    let mut clock = FrameClock::new();
    let mut e = engine(2, 50.0, true);
    e.start(&mut clock);
    pump(&mut e, &mut clock);
    let stale = e.pending_tick().unwrap();

    e.stop(&mut clock);
    e.stop(&mut clock);
    assert_eq!(e.state(), EngineState::Idle);
    assert!(clock.advance().is_empty());

    let presents = e.surface().unwrap().present_count();
    assert_eq!(e.on_tick(stale, &mut clock).unwrap(), TickOutcome::Ignored);
    assert_eq!(e.surface().unwrap().present_count(), presents);
    assert_eq!(e.population().len(), 2);
}

#[test]
fn restart_while_running_resets() {
    let mut clock = FrameClock::new();
    let mut e = engine(2, 50.0, true);
    e.start(&mut clock);
    pump(&mut e, &mut clock);
    pump(&mut e, &mut clock);
    let old = e.pending_tick().unwrap();

    assert!(e.start(&mut clock));
    assert_eq!(clock.pending_len(), 1);
    assert!(!clock.is_pending(old));
    assert_eq!(e.population()[0].motion.y, 0.0);
}

#[test]
fn missing_or_empty_surface_refuses_to_start() {
    let mut clock = FrameClock::new();
    let mut e: Engine<Falling, RecordingSurface> = Engine::new(
        Falling {
            count: 3,
            limit: 10.0,
            stops: true,
        },
        None,
        StdRng::seed_from_u64(0),
    );
    assert!(!e.start(&mut clock));
    assert!(e.population().is_empty());
    assert_eq!(clock.pending_len(), 0);

    e.attach_surface(RecordingSurface::new(Viewport::new(0, 0)));
    assert!(!e.start(&mut clock));
    assert_eq!(clock.pending_len(), 0);

    e.resize(Viewport::new(10, 10)).unwrap();
    assert!(e.start(&mut clock));
}

#[test]
fn foreign_handles_are_ignored() {
    let mut clock = FrameClock::new();
    let mut e = engine(1, 10.0, true);
    let foreign = clock.schedule_tick();
    e.start(&mut clock);
    assert_eq!(e.on_tick(foreign, &mut clock).unwrap(), TickOutcome::Ignored);
    assert!(e.is_running());
}

#[test]
fn detached_surface_ends_loop_without_drawing() {
    let mut clock = FrameClock::new();
    let mut e = engine(1, 10.0, true);
    e.start(&mut clock);
    let surface = e.detach_surface().unwrap();
    assert_eq!(pump(&mut e, &mut clock), vec![TickOutcome::Finished]);
    assert_eq!(surface.clear_count(), 0);
    assert!(!e.is_running());
}

#[test]
fn empty_surface_skips_frames_until_drawable() {
    let mut clock = FrameClock::new();
    let mut e = engine(2, 50.0, true);
    e.start(&mut clock);
    pump(&mut e, &mut clock);
    let before = e.population().to_vec();
    let presents = e.surface().unwrap().present_count();

    e.resize(Viewport::new(0, 100)).unwrap();
    for _ in 0..3 {
        assert_eq!(pump(&mut e, &mut clock), vec![TickOutcome::Rescheduled]);
    }
    assert_eq!(e.population(), before.as_slice());
    assert_eq!(e.surface().unwrap().present_count(), presents);
    assert_eq!(e.ticks(), 1);

    e.resize(Viewport::new(100, 100)).unwrap();
    pump(&mut e, &mut clock);
    assert_eq!(e.surface().unwrap().present_count(), presents + 1);
    assert_eq!(e.ticks(), 2);
}
