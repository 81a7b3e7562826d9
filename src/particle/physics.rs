use rand::Rng;

use crate::foundation::core::Viewport;
use crate::particle::model::{ConfettiPiece, Motion, Petal};

/// Sway phase per pixel of vertical travel for petals.
pub const PETAL_SWAY_FREQ: f64 = 0.01;
/// Sway phase per pixel of vertical travel for confetti.
pub const CONFETTI_SWAY_FREQ: f64 = 0.02;
/// Peak lateral sway added per tick.
pub const SWAY_AMPLITUDE: f64 = 0.5;
/// Vertical speed gained by confetti every tick.
pub const GRAVITY: f64 = 0.05;
/// Horizontal speed retained by confetti every tick.
pub const DRAG: f64 = 0.99;
/// Distance below the bottom edge at which confetti is removed.
pub const CONFETTI_EXIT_MARGIN: f64 = 50.0;

// The sway phase is the absolute y after the vertical move, so sway follows distance
// travelled rather than elapsed time.
fn drift(m: &mut Motion, sway_freq: f64) {
    m.y += m.speed_y;
    m.x += m.speed_x + (m.y * sway_freq).sin() * SWAY_AMPLITUDE;
    m.rotation += m.rotation_speed;
}

/// Advance a petal by one tick and apply the recycle/wrap policy.
///
/// Returns `true` when the petal fell past the bottom edge and was recycled to the top.
pub fn step_petal<R: Rng + ?Sized>(petal: &mut Petal, viewport: Viewport, rng: &mut R) -> bool {
    let m = &mut petal.motion;
    drift(m, PETAL_SWAY_FREQ);

    let (w, h) = (viewport.w(), viewport.h());
    let mut recycled = false;
    if m.y > h + m.size {
        m.y = -m.size;
        m.x = if w > 0.0 { rng.gen_range(0.0..w) } else { 0.0 };
        recycled = true;
    }
    if m.x > w + m.size {
        m.x = -m.size;
    }
    if m.x < -m.size {
        m.x = w + m.size;
    }
    recycled
}

/// Advance a confetti piece by one tick: drift, then gravity and horizontal drag.
pub fn step_confetti(piece: &mut ConfettiPiece) {
    let m = &mut piece.motion;
    drift(m, CONFETTI_SWAY_FREQ);
    m.speed_y += GRAVITY;
    m.speed_x *= DRAG;
}

/// `false` once the piece has fallen [`CONFETTI_EXIT_MARGIN`] past the bottom edge.
pub fn confetti_is_live(piece: &ConfettiPiece, viewport: Viewport) -> bool {
    piece.motion.y < viewport.h() + CONFETTI_EXIT_MARGIN
}

#[cfg(test)]
#[path = "../../tests/unit/particle/physics.rs"]
mod tests;
