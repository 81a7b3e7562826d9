use crate::foundation::core::Rgba8;

/// Kinematic state shared by every particle variant.
///
/// Units are surface pixels and pixels-per-tick; `rotation` is in degrees and is never wrapped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position (grows downward).
    pub y: f64,
    /// Horizontal speed per tick.
    pub speed_x: f64,
    /// Vertical speed per tick.
    pub speed_y: f64,
    /// Nominal extent; each shape derives its outline from it.
    pub size: f64,
    /// Current rotation in degrees.
    pub rotation: f64,
    /// Rotation added every tick, in degrees.
    pub rotation_speed: f64,
}

/// A sakura petal of the ambient field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Petal {
    /// Kinematic state.
    pub motion: Motion,
    /// Constant paint opacity in `[0.3, 0.8)`.
    pub opacity: f64,
}

/// Outline drawn for a confetti piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfettiShape {
    /// Axis-aligned square of side `size`.
    Square,
    /// Circle of radius `size / 2`.
    Circle,
    /// Two bezier lobes meeting at a point.
    Heart,
    /// Five-point star.
    Star,
}

impl ConfettiShape {
    /// Every shape, in spawn-table order.
    pub const ALL: [ConfettiShape; 4] = [
        ConfettiShape::Square,
        ConfettiShape::Circle,
        ConfettiShape::Heart,
        ConfettiShape::Star,
    ];
}

/// A single piece of a celebration burst.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfettiPiece {
    /// Kinematic state.
    pub motion: Motion,
    /// Solid fill color.
    pub color: Rgba8,
    /// Outline.
    pub shape: ConfettiShape,
}

/// Default confetti palette: gold, sakura pinks, lavender.
pub const CONFETTI_PALETTE: [Rgba8; 7] = [
    Rgba8::rgb(0xD4, 0xAF, 0x37),
    Rgba8::rgb(0xFF, 0xB7, 0xC5),
    Rgba8::rgb(0xFF, 0x69, 0xB4),
    Rgba8::rgb(0xFF, 0xD7, 0x00),
    Rgba8::rgb(0xFF, 0x91, 0xA4),
    Rgba8::rgb(0xFF, 0xC0, 0xCB),
    Rgba8::rgb(0xE6, 0xE6, 0xFA),
];

/// Radial gradient stops (center, middle, rim) used to fill every petal.
pub const PETAL_GRADIENT: [Rgba8; 3] = [
    Rgba8::rgb(0xFF, 0xB7, 0xC5),
    Rgba8::rgb(0xFF, 0x91, 0xA4),
    Rgba8::rgb(0xFF, 0x69, 0xB4),
];
