use crate::foundation::core::{Affine, BezPath, Rgba8, Viewport};
use crate::foundation::error::BlossomResult;

/// A rendered frame as RGBA8 pixels.
///
/// Surfaces read back **premultiplied alpha**; the `premultiplied` flag makes this explicit at
/// API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Convert premultiplied pixels to straight alpha in place (for PNG output).
    pub fn unpremultiply(&mut self) {
        if !self.premultiplied {
            return;
        }
        for px in self.data.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        self.premultiplied = false;
    }
}

/// Radial gradient centred at the local origin with three evenly spaced stops.
///
/// Beyond `radius` the rim color is padded outward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialFill {
    /// Radius of the outermost stop.
    pub radius: f64,
    /// Center, middle and rim colors (offsets 0, 0.5, 1).
    pub stops: [Rgba8; 3],
}

/// Paint used to fill a path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fill {
    /// Solid straight-alpha color.
    Solid(Rgba8),
    /// Radial gradient in the path's local space.
    Radial(RadialFill),
}

/// One fill operation: a local-space path placed by `transform`.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCmd {
    /// Outline in local space, centred on the particle origin.
    pub path: BezPath,
    /// Local-to-surface transform.
    pub transform: Affine,
    /// Paint.
    pub fill: Fill,
    /// Group opacity in `[0, 1]`.
    pub opacity: f32,
}

/// A 2D drawing target an engine paints onto every tick.
///
/// A frame is `clear`, any number of `fill`s, then `present`. Implementations must keep the
/// last presented pixels until the next `clear`.
pub trait DrawSurface {
    /// Current surface size.
    fn viewport(&self) -> Viewport;

    /// Change the surface size. Pixel content after a resize is unspecified until the next frame.
    fn resize(&mut self, viewport: Viewport) -> BlossomResult<()>;

    /// Erase the whole surface to transparent and open a new frame.
    fn clear(&mut self) -> BlossomResult<()>;

    /// Fill one path into the open frame.
    fn fill(&mut self, cmd: &DrawCmd) -> BlossomResult<()>;

    /// Finish the open frame and make it visible.
    fn present(&mut self) -> BlossomResult<()>;
}
