use super::*;
use kurbo::{PathEl, Shape as _};

fn vertices(path: &BezPath) -> Vec<Point> {
    path.elements()
        .iter()
        .filter_map(|el| match *el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(p),
            _ => None,
        })
        .collect()
}

#[test]
fn star_alternates_outer_and_inner_radius() {
    let star = star_path(20.0);
    let pts = vertices(&star);
    assert_eq!(pts.len(), 10);
    for (i, p) in pts.iter().enumerate() {
        let r = p.to_vec2().hypot();
        let expected = if i % 2 == 0 { 10.0 } else { 5.0 };
        assert!((r - expected).abs() < 1e-9, "vertex {i} radius {r}");
    }
    // First spike points straight up.
    assert!(pts[0].x.abs() < 1e-9);
    assert!((pts[0].y + 10.0).abs() < 1e-9);
}

#[test]
fn square_is_centred_with_side_size() {
    let bb = square_path(12.0).bounding_box();
    assert!((bb.x0 + 6.0).abs() < 1e-9);
    assert!((bb.x1 - 6.0).abs() < 1e-9);
    assert!((bb.y0 + 6.0).abs() < 1e-9);
    assert!((bb.y1 - 6.0).abs() < 1e-9);
}

#[test]
fn circle_radius_is_half_size() {
    let bb = circle_path(10.0).bounding_box();
    assert!((bb.width() - 10.0).abs() < 0.25);
    assert!((bb.height() - 10.0).abs() < 0.25);
}

#[test]
fn heart_tip_points_down() {
    let bb = heart_path(16.0).bounding_box();
    assert!((bb.y1 - 8.0).abs() < 1e-9);
    assert!(bb.y0 < -4.0);
    assert!((bb.x0 + bb.x1).abs() < 1e-9);
}

#[test]
fn petal_spans_from_top_to_tip() {
    let bb = petal_path(20.0).bounding_box();
    assert!((bb.y0 + 10.0).abs() < 1e-9);
    assert!((bb.y1 - 20.0).abs() < 1e-9);
    assert!(bb.width() < 20.0);
}

#[test]
fn confetti_path_dispatches_on_shape() {
    assert_eq!(confetti_path(ConfettiShape::Star, 8.0), star_path(8.0));
    assert_eq!(confetti_path(ConfettiShape::Heart, 8.0), heart_path(8.0));
}
