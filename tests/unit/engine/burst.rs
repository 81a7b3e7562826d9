use super::*;
use crate::engine::lifecycle::EngineState;
use crate::engine::scheduler::FrameClock;
use crate::render::recording::RecordingSurface;

fn burst(width: u32, height: u32) -> CelebrationBurst<RecordingSurface> {
    CelebrationBurst::new(
        ConfettiBurst::default(),
        Some(RecordingSurface::new(Viewport::new(width, height))),
        7,
    )
}

fn run(burst: &mut CelebrationBurst<RecordingSurface>, clock: &mut FrameClock, frames: usize) {
    for _ in 0..frames {
        for handle in clock.advance() {
            burst.on_tick(handle, clock).unwrap();
        }
    }
}

#[test]
fn activation_spawns_full_population_above_view() {
    let mut clock = FrameClock::new();
    let mut b = burst(400, 800);
    assert!(b.set_active(true, &mut clock));
    assert!(b.is_active());
    let pieces = b.engine().population();
    assert_eq!(pieces.len(), 150);
    for p in pieces {
        assert!((-320.0..-20.0).contains(&p.motion.y));
        assert!((0.0..400.0).contains(&p.motion.x));
    }
}

#[test]
fn burst_drains_and_stops_rescheduling() {
    let mut clock = FrameClock::new();
    let mut b = burst(400, 800);
    b.set_active(true, &mut clock);

    let mut last = b.engine().population().len();
    for _ in 0..500 {
        run(&mut b, &mut clock, 1);
        let now = b.engine().population().len();
        assert!(now <= last);
        last = now;
    }
    assert_eq!(last, 0);
    assert!(!b.is_running());
    assert_eq!(b.engine().state(), EngineState::Idle);
    assert_eq!(b.engine().pending_tick(), None);
    assert_eq!(clock.pending_len(), 0);
}

#[test]
fn deactivation_discards_population_and_cancels() {
    let mut clock = FrameClock::new();
    let mut b = burst(400, 800);
    b.set_active(true, &mut clock);
    run(&mut b, &mut clock, 10);
    assert!(b.is_running());

    assert!(!b.set_active(false, &mut clock));
    assert!(!b.is_active());
    assert!(b.engine().population().is_empty());
    assert_eq!(clock.pending_len(), 0);

    let presents = b.engine().surface().unwrap().present_count();
    run(&mut b, &mut clock, 5);
    assert_eq!(b.engine().surface().unwrap().present_count(), presents);
}

#[test]
fn reactivation_while_running_resets() {
    let mut clock = FrameClock::new();
    let mut b = burst(400, 800);
    b.set_active(true, &mut clock);
    run(&mut b, &mut clock, 40);
    let old_handle = b.engine().pending_tick();

    assert!(b.set_active(true, &mut clock));
    assert_eq!(b.engine().population().len(), 150);
    assert_ne!(b.engine().pending_tick(), old_handle);
    assert_eq!(clock.pending_len(), 1);
    for p in b.engine().population() {
        assert!(p.motion.y < -20.0);
    }
}

#[test]
fn activation_on_empty_viewport_is_refused() {
    let mut clock = FrameClock::new();
    let mut b = burst(400, 0);
    assert!(!b.set_active(true, &mut clock));
    assert!(b.is_active());
    assert!(b.engine().population().is_empty());
    assert_eq!(clock.pending_len(), 0);
}

#[test]
fn each_frame_paints_every_live_piece() {
    let mut clock = FrameClock::new();
    let mut b = burst(400, 800);
    b.set_active(true, &mut clock);
    run(&mut b, &mut clock, 1);
    let surface = b.engine().surface().unwrap();
    assert_eq!(surface.clear_count(), 1);
    assert_eq!(surface.present_count(), 1);
    assert_eq!(surface.last_frame().len(), 150);
}

#[test]
fn custom_palette_is_used() {
    let mut clock = FrameClock::new();
    let red = Rgba8::rgb(255, 0, 0);
    let mut b = CelebrationBurst::new(
        ConfettiBurst {
            count: 20,
            palette: vec![red],
        },
        Some(RecordingSurface::new(Viewport::new(100, 100))),
        3,
    );
    b.set_active(true, &mut clock);
    assert_eq!(b.engine().population().len(), 20);
    assert!(b.engine().population().iter().all(|p| p.color == red));
}
