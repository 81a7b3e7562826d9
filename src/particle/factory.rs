use rand::Rng;
use rand::seq::SliceRandom;

use crate::foundation::core::{Rgba8, Viewport};
use crate::particle::model::{CONFETTI_PALETTE, ConfettiPiece, ConfettiShape, Motion, Petal};

/// Default size of a celebration burst.
pub const CONFETTI_COUNT: usize = 150;
/// Default size of the ambient petal field.
pub const PETAL_COUNT: usize = 30;

/// Spawn `n` confetti pieces staggered above the top edge of `viewport`.
///
/// Colors are drawn uniformly from `palette`; an empty palette falls back to
/// [`CONFETTI_PALETTE`]. Returns an empty population when the viewport is not drawable.
pub fn spawn_confetti<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    viewport: Viewport,
    palette: &[Rgba8],
) -> Vec<ConfettiPiece> {
    if !viewport.is_drawable() {
        return Vec::new();
    }
    let palette = if palette.is_empty() {
        &CONFETTI_PALETTE[..]
    } else {
        palette
    };

    (0..n)
        .map(|_| ConfettiPiece {
            motion: Motion {
                x: rng.gen_range(0.0..viewport.w()),
                y: rng.gen_range(-320.0..-20.0),
                size: rng.gen_range(5.0..15.0),
                speed_y: rng.gen_range(2.0..5.0),
                speed_x: rng.gen_range(-2.0..2.0),
                rotation: rng.gen_range(0.0..360.0),
                rotation_speed: rng.gen_range(-5.0..5.0),
            },
            color: palette.choose(rng).copied().unwrap_or(CONFETTI_PALETTE[0]),
            shape: ConfettiShape::ALL[rng.gen_range(0..ConfettiShape::ALL.len())],
        })
        .collect()
}

/// Spawn `n` petals spread over the band one viewport-height above the fold.
///
/// Returns an empty population when the viewport is not drawable.
pub fn spawn_petals<R: Rng + ?Sized>(rng: &mut R, n: usize, viewport: Viewport) -> Vec<Petal> {
    if !viewport.is_drawable() {
        return Vec::new();
    }

    (0..n)
        .map(|_| Petal {
            motion: Motion {
                x: rng.gen_range(0.0..viewport.w()),
                y: rng.gen_range(-viewport.h()..0.0),
                size: rng.gen_range(8.0..23.0),
                speed_y: rng.gen_range(0.5..1.5),
                speed_x: rng.gen_range(-1.0..1.0),
                rotation: rng.gen_range(0.0..360.0),
                rotation_speed: rng.gen_range(-1.0..1.0),
            },
            opacity: rng.gen_range(0.3..0.8),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/particle/factory.rs"]
mod tests;
