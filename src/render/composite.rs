use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{BlossomError, BlossomResult};
use crate::foundation::math::mul_div255_u8 as mul_div255;

pub type PremulRgba8 = [u8; 4];

/// Blend mode used when a layer is composited onto the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerBlend {
    /// Source-over.
    Normal,
    /// Screen: `s + d - s*d`, never darkens.
    Screen,
}

pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

pub fn screen(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    let mut out = [0u8; 4];
    for i in 0..4 {
        // s + d - s*d, computed as s + d*(1 - s) to stay in range.
        let inv = 255 - u16::from(src[i]);
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

fn check_buffers(dst: &[u8], src: &[u8], what: &str) -> BlossomResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(BlossomError::render(format!(
            "{what} expects equal-length rgba8 buffers"
        )));
    }
    Ok(())
}

pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> BlossomResult<()> {
    check_buffers(dst, src, "over_in_place")?;
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

pub fn screen_in_place(dst: &mut [u8], src: &[u8]) -> BlossomResult<()> {
    check_buffers(dst, src, "screen_in_place")?;
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = screen([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Composite `src` onto `dst` with the given blend.
pub fn blend_in_place(dst: &mut [u8], src: &[u8], blend: LayerBlend) -> BlossomResult<()> {
    match blend {
        LayerBlend::Normal => over_in_place(dst, src, 1.0),
        LayerBlend::Screen => screen_in_place(dst, src),
    }
}

/// Fill a premultiplied buffer with one color.
pub fn fill_in_place(dst: &mut [u8], color: Rgba8Premul) {
    let px = color.to_array();
    for d in dst.chunks_exact_mut(4) {
        d.copy_from_slice(&px);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
