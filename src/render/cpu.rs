use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::core::{Affine, BezPath, Point, Rgba8, Vec2, Viewport};
use crate::foundation::error::{BlossomError, BlossomResult};
use crate::render::backend::{DrawCmd, DrawSurface, Fill, FrameRGBA, RadialFill};

/// CPU raster surface powered by `vello_cpu`.
///
/// Pixels are premultiplied RGBA8. The last presented frame stays in the pixmap until the next
/// [`DrawSurface::clear`]. A surface resized to an empty viewport holds no pixels and refuses to
/// open frames until it is resized back to a drawable size.
pub struct CpuSurface {
    viewport: Viewport,
    width: u16,
    height: u16,
    pixmap: Option<vello_cpu::Pixmap>,
    ctx: Option<vello_cpu::RenderContext>,
    gradient_cache: HashMap<GradientKey, vello_cpu::Image>,
}

// Gradient images are keyed by quantized radius so petals of near-equal size share one raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct GradientKey {
    radius_q: u32,
    stops: [[u8; 4]; 3],
}

const RADIUS_QUANTUM: f64 = 8.0;

impl CpuSurface {
    /// Create a transparent surface. Fails for empty or oversized (> `u16::MAX`) viewports;
    /// an existing surface may later be resized to an empty one.
    pub fn new(viewport: Viewport) -> BlossomResult<Self> {
        if !viewport.is_drawable() {
            return Err(BlossomError::render("surface width/height must be > 0"));
        }
        let (width, height) = surface_dims(viewport)?;
        Ok(Self {
            viewport,
            width,
            height,
            pixmap: Some(vello_cpu::Pixmap::new(width, height)),
            ctx: None,
            gradient_cache: HashMap::new(),
        })
    }

    /// Copy out the current pixels.
    pub fn readback(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.viewport.width,
            height: self.viewport.height,
            data: self
                .pixmap
                .as_ref()
                .map_or_else(Vec::new, |p| p.data_as_u8_slice().to_vec()),
            premultiplied: true,
        }
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.viewport.width || y >= self.viewport.height {
            return None;
        }
        let idx = ((y as usize) * (self.viewport.width as usize) + (x as usize)) * 4;
        let data = self.pixmap.as_ref()?.data_as_u8_slice();
        Some([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]])
    }

    fn gradient_image(&mut self, fill: &RadialFill) -> BlossomResult<(vello_cpu::Image, f64)> {
        let radius_q = (fill.radius.max(0.0) * RADIUS_QUANTUM).round() as u32;
        let radius = f64::from(radius_q) / RADIUS_QUANTUM;
        let key = GradientKey {
            radius_q,
            stops: fill.stops.map(|c| [c.r, c.g, c.b, c.a]),
        };
        if let Some(img) = self.gradient_cache.get(&key).cloned() {
            return Ok((img, radius));
        }

        let side = ((2.0 * radius).ceil() as u32).max(1);
        let bytes = rasterize_radial(fill.stops, radius, side);
        let img = rgba_premul_to_image(&bytes, side, side)?;
        self.gradient_cache.insert(key, img.clone());
        Ok((img, radius))
    }
}

impl DrawSurface for CpuSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) -> BlossomResult<()> {
        let (width, height) = surface_dims(viewport)?;
        if !viewport.is_drawable() {
            self.pixmap = None;
        } else if self.pixmap.is_none() || width != self.width || height != self.height {
            self.pixmap = Some(vello_cpu::Pixmap::new(width, height));
        }
        self.width = width;
        self.height = height;
        self.viewport = viewport;
        self.ctx = None;
        Ok(())
    }

    fn clear(&mut self) -> BlossomResult<()> {
        let pixmap = self
            .pixmap
            .as_mut()
            .ok_or_else(|| BlossomError::render("surface is not drawable"))?;
        clear_pixmap(pixmap, [0, 0, 0, 0]);
        self.ctx = Some(vello_cpu::RenderContext::new(self.width, self.height));
        Ok(())
    }

    fn fill(&mut self, cmd: &DrawCmd) -> BlossomResult<()> {
        // The paint for a radial fill is resolved first: it needs `&mut self` for the cache.
        let radial = match &cmd.fill {
            Fill::Radial(r) => Some(self.gradient_image(r)?),
            Fill::Solid(_) => None,
        };
        let ctx = self
            .ctx
            .as_mut()
            .ok_or_else(|| BlossomError::render("fill outside of an open frame"))?;

        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        let opacity = cmd.opacity.clamp(0.0, 1.0);
        if opacity < 1.0 {
            ctx.push_opacity_layer(opacity);
        }

        match (&cmd.fill, radial) {
            (Fill::Solid(c), _) => {
                ctx.set_transform(affine_to_cpu(cmd.transform));
                ctx.set_paint(color_to_cpu(*c));
                ctx.fill_path(&bezpath_to_cpu(&cmd.path));
            }
            (Fill::Radial(_), Some((img, r))) => {
                // The gradient raster has its center at (r, r); shift the path into raster space
                // and undo the shift in the transform.
                let shift = Vec2::new(r, r);
                ctx.set_transform(affine_to_cpu(cmd.transform * Affine::translate(-shift)));
                ctx.set_paint(img);
                let shifted = Affine::translate(shift) * cmd.path.clone();
                ctx.fill_path(&bezpath_to_cpu(&shifted));
            }
            (Fill::Radial(_), None) => {
                return Err(BlossomError::render("radial paint was not prepared"));
            }
        }

        if opacity < 1.0 {
            ctx.pop_layer();
        }
        Ok(())
    }

    fn present(&mut self) -> BlossomResult<()> {
        let Some(mut ctx) = self.ctx.take() else {
            return Ok(());
        };
        ctx.flush();
        if let Some(pixmap) = self.pixmap.as_mut() {
            ctx.render_to_pixmap(pixmap);
        }
        Ok(())
    }
}

fn surface_dims(viewport: Viewport) -> BlossomResult<(u16, u16)> {
    let width: u16 = viewport
        .width
        .try_into()
        .map_err(|_| BlossomError::render("surface width exceeds u16"))?;
    let height: u16 = viewport
        .height
        .try_into()
        .map_err(|_| BlossomError::render("surface height exceeds u16"))?;
    Ok((width, height))
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

/// Rasterize three evenly spaced stops into a `side x side` premultiplied image centred at
/// `(radius, radius)`, sampling at pixel centers and padding past the rim.
fn rasterize_radial(stops: [Rgba8; 3], radius: f64, side: u32) -> Vec<u8> {
    let mut bytes = vec![0u8; (side as usize) * (side as usize) * 4];
    for y in 0..side {
        for x in 0..side {
            let dx = f64::from(x) + 0.5 - radius;
            let dy = f64::from(y) + 0.5 - radius;
            let t = if radius > 0.0 {
                ((dx * dx + dy * dy).sqrt() / radius).clamp(0.0, 1.0)
            } else {
                1.0
            };
            let c = sample_stops(stops, t).to_premul().to_array();
            let idx = ((y as usize) * (side as usize) + (x as usize)) * 4;
            bytes[idx..idx + 4].copy_from_slice(&c);
        }
    }
    bytes
}

fn sample_stops(stops: [Rgba8; 3], t: f64) -> Rgba8 {
    let (a, b, local) = if t <= 0.5 {
        (stops[0], stops[1], t / 0.5)
    } else {
        (stops[1], stops[2], (t - 0.5) / 0.5)
    };
    let lerp = |x: u8, y: u8| -> u8 {
        let xf = f64::from(x);
        let yf = f64::from(y);
        (xf + (yf - xf) * local).round().clamp(0.0, 255.0) as u8
    };
    Rgba8 {
        r: lerp(a.r, b.r),
        g: lerp(a.g, b.g),
        b: lerp(a.b, b.b),
        a: lerp(a.a, b.a),
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> BlossomResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| BlossomError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| BlossomError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(BlossomError::render("pixmap byte len mismatch"));
    }
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> BlossomResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
