use super::*;
use crate::foundation::core::Rgba8;
use crate::particle::factory::{spawn_confetti, spawn_petals};
use crate::particle::model::{CONFETTI_PALETTE, ConfettiShape};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn motion(x: f64, y: f64, speed_x: f64, speed_y: f64, size: f64) -> Motion {
    Motion {
        x,
        y,
        speed_x,
        speed_y,
        size,
        rotation: 0.0,
        rotation_speed: 0.0,
    }
}

#[test]
fn sway_uses_updated_absolute_y() {
    // Flagged choice: the sway phase is the post-move y, not a time or frame counter.
    let mut piece = ConfettiPiece {
        motion: motion(100.0, 10.0, 1.0, 3.0, 10.0),
        color: Rgba8::rgb(0, 0, 0),
        shape: ConfettiShape::Square,
    };
    step_confetti(&mut piece);
    let expected_x = 100.0 + 1.0 + (13.0f64 * CONFETTI_SWAY_FREQ).sin() * SWAY_AMPLITUDE;
    assert!((piece.motion.y - 13.0).abs() < 1e-12);
    assert!((piece.motion.x - expected_x).abs() < 1e-12);
}

#[test]
fn confetti_gravity_and_drag_apply_after_move() {
    let mut piece = ConfettiPiece {
        motion: motion(0.0, 0.0, 2.0, 2.0, 10.0),
        color: Rgba8::rgb(0, 0, 0),
        shape: ConfettiShape::Star,
    };
    piece.motion.rotation_speed = 4.0;
    step_confetti(&mut piece);
    assert!((piece.motion.y - 2.0).abs() < 1e-12);
    assert!((piece.motion.speed_y - 2.05).abs() < 1e-12);
    assert!((piece.motion.speed_x - 1.98).abs() < 1e-12);
    assert!((piece.motion.rotation - 4.0).abs() < 1e-12);
}

#[test]
fn confetti_speed_y_non_decreasing_and_speed_x_shrinks() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut pieces = spawn_confetti(&mut rng, 150, Viewport::new(400, 800), &CONFETTI_PALETTE);
    for _ in 0..300 {
        for p in &mut pieces {
            let before = p.motion;
            step_confetti(p);
            assert!(p.motion.speed_y >= before.speed_y);
            if before.speed_x != 0.0 {
                assert!(p.motion.speed_x.abs() < before.speed_x.abs());
            }
        }
    }
}

#[test]
fn confetti_leaves_at_exit_margin() {
    let vp = Viewport::new(400, 800);
    let mut piece = ConfettiPiece {
        motion: motion(10.0, 849.9, 0.0, 0.0, 10.0),
        color: Rgba8::rgb(0, 0, 0),
        shape: ConfettiShape::Circle,
    };
    assert!(confetti_is_live(&piece, vp));
    piece.motion.y = 850.0;
    assert!(!confetti_is_live(&piece, vp));
}

#[test]
fn petal_past_bottom_recycles_to_top() {
    let vp = Viewport::new(1000, 600);
    let mut rng = StdRng::seed_from_u64(2);
    let mut petal = Petal {
        motion: motion(500.0, 619.5, 0.0, 1.0, 20.0),
        opacity: 0.5,
    };
    assert!(step_petal(&mut petal, vp, &mut rng));
    assert_eq!(petal.motion.y, -20.0);
    assert!((0.0..1000.0).contains(&petal.motion.x));
}

#[test]
fn petal_inside_bottom_band_keeps_falling() {
    let vp = Viewport::new(1000, 600);
    let mut rng = StdRng::seed_from_u64(2);
    let mut petal = Petal {
        motion: motion(500.0, 605.0, 0.0, 1.0, 20.0),
        opacity: 0.5,
    };
    assert!(!step_petal(&mut petal, vp, &mut rng));
    assert!((petal.motion.y - 606.0).abs() < 1e-12);
}

#[test]
fn petal_wraps_horizontally() {
    let vp = Viewport::new(1000, 600);
    let mut rng = StdRng::seed_from_u64(2);

    // Start on a sway node so the lateral term is exactly zero after the move.
    let mut right = Petal {
        motion: motion(1010.5, -1.0, 1.0, 1.0, 10.0),
        opacity: 0.5,
    };
    step_petal(&mut right, vp, &mut rng);
    assert_eq!(right.motion.x, -10.0);

    let mut left = Petal {
        motion: motion(-10.5, -1.0, -1.0, 1.0, 10.0),
        opacity: 0.5,
    };
    step_petal(&mut left, vp, &mut rng);
    assert_eq!(left.motion.x, 1010.0);
}

#[test]
fn petals_stay_within_vertical_band() {
    let vp = Viewport::new(640, 360);
    let mut rng = StdRng::seed_from_u64(42);
    let mut petals = spawn_petals(&mut rng, 30, vp);
    let mut recycled = vec![false; petals.len()];

    for _ in 0..2000 {
        for (p, seen) in petals.iter_mut().zip(recycled.iter_mut()) {
            *seen |= step_petal(p, vp, &mut rng);
            assert!(p.motion.y <= vp.h() + p.motion.size);
            if *seen {
                assert!(p.motion.y >= -p.motion.size);
            }
        }
    }
    assert!(recycled.iter().all(|&r| r));
}
