use crate::foundation::core::{Affine, BezPath, Vec2};
use crate::foundation::error::BlossomResult;
use crate::foundation::math::deg_to_rad;
use crate::particle::model::{ConfettiPiece, Motion, PETAL_GRADIENT, Petal};
use crate::render::backend::{DrawCmd, DrawSurface, Fill, RadialFill};
use crate::render::shapes::{confetti_path, petal_path};

/// Something the painter knows how to draw: a local outline, a paint and a placement.
pub trait Sprite {
    /// Kinematic state supplying position and rotation.
    fn motion(&self) -> &Motion;

    /// Outline in local space, centred on the origin.
    fn outline(&self) -> BezPath;

    /// Paint for the outline.
    fn fill(&self) -> Fill;

    /// Group opacity.
    fn opacity(&self) -> f32 {
        1.0
    }
}

impl Sprite for Petal {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn outline(&self) -> BezPath {
        petal_path(self.motion.size)
    }

    fn fill(&self) -> Fill {
        Fill::Radial(RadialFill {
            radius: self.motion.size,
            stops: PETAL_GRADIENT,
        })
    }

    fn opacity(&self) -> f32 {
        self.opacity.clamp(0.0, 1.0) as f32
    }
}

impl Sprite for ConfettiPiece {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn outline(&self) -> BezPath {
        confetti_path(self.shape, self.motion.size)
    }

    fn fill(&self) -> Fill {
        Fill::Solid(self.color)
    }
}

/// Local-to-surface transform: translate to the particle, then rotate about it.
pub fn sprite_transform(m: &Motion) -> Affine {
    Affine::translate(Vec2::new(m.x, m.y)) * Affine::rotate(deg_to_rad(m.rotation))
}

/// Build the fill command for one sprite.
pub fn draw_cmd<S: Sprite + ?Sized>(sprite: &S) -> DrawCmd {
    DrawCmd {
        path: sprite.outline(),
        transform: sprite_transform(sprite.motion()),
        fill: sprite.fill(),
        opacity: sprite.opacity(),
    }
}

/// Paint one frame: clear, fill every sprite in population order, present.
///
/// Later sprites paint over earlier ones. Sprite state is never touched.
pub fn paint_frame<D, S>(surface: &mut D, sprites: &[S]) -> BlossomResult<()>
where
    D: DrawSurface + ?Sized,
    S: Sprite,
{
    surface.clear()?;
    for sprite in sprites {
        surface.fill(&draw_cmd(sprite))?;
    }
    surface.present()
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
