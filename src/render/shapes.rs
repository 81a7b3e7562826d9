use kurbo::Shape as _;

use crate::foundation::core::{BezPath, Point, Rect};
use crate::particle::model::ConfettiShape;

const FLATTEN_TOLERANCE: f64 = 0.1;

/// Petal outline: two mirrored cubic lobes from `(0, -s/2)` down to the tip at `(0, s)`.
pub fn petal_path(size: f64) -> BezPath {
    let h = size / 2.0;
    let mut p = BezPath::new();
    p.move_to((0.0, -h));
    p.curve_to((h, -h), (h, h), (0.0, size));
    p.curve_to((-h, h), (-h, -h), (0.0, -h));
    p.close_path();
    p
}

/// Square of side `size` centred on the origin.
pub fn square_path(size: f64) -> BezPath {
    let h = size / 2.0;
    Rect::new(-h, -h, h, h).to_path(FLATTEN_TOLERANCE)
}

/// Circle of radius `size / 2` centred on the origin.
pub fn circle_path(size: f64) -> BezPath {
    kurbo::Circle::new(Point::ORIGIN, size / 2.0).to_path(FLATTEN_TOLERANCE)
}

/// Heart: two cubic lobes meeting at the bottom point `(0, s/2)`.
pub fn heart_path(size: f64) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((0.0, -size / 4.0));
    p.curve_to((size / 2.0, -size), (size, -size / 4.0), (0.0, size / 2.0));
    p.curve_to((-size, -size / 4.0), (-size / 2.0, -size), (0.0, -size / 4.0));
    p.close_path();
    p
}

/// Five-point star: 10 vertices alternating outer radius `s/2` and inner radius `s/4`,
/// first vertex pointing up.
pub fn star_path(size: f64) -> BezPath {
    const SPIKES: usize = 5;
    let outer = size / 2.0;
    let inner = size / 4.0;

    let mut p = BezPath::new();
    for i in 0..SPIKES * 2 {
        let radius = if i % 2 == 0 { outer } else { inner };
        let angle = (i as f64) * std::f64::consts::PI / (SPIKES as f64) - std::f64::consts::FRAC_PI_2;
        let pt = Point::new(angle.cos() * radius, angle.sin() * radius);
        if i == 0 {
            p.move_to(pt);
        } else {
            p.line_to(pt);
        }
    }
    p.close_path();
    p
}

/// Outline for a confetti shape of the given size.
pub fn confetti_path(shape: ConfettiShape, size: f64) -> BezPath {
    match shape {
        ConfettiShape::Square => square_path(size),
        ConfettiShape::Circle => circle_path(size),
        ConfettiShape::Heart => heart_path(size),
        ConfettiShape::Star => star_path(size),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/shapes.rs"]
mod tests;
