//! blossom is a small particle engine for decorative overlays: an ambient field of drifting
//! sakura petals and a one-shot confetti celebration burst.
//!
//! Both systems run on the same lifecycle machinery ([`Engine`]):
//!
//! - a [`Scheduler`] capability hands out one tick per display refresh ([`FrameClock`] is the
//!   virtual clock used offline and in tests)
//! - a [`DrawSurface`] capability receives every frame ([`CpuSurface`] rasterizes with
//!   `vello_cpu`, [`RecordingSurface`] records calls headlessly)
//! - a seeded random source drives the particle factories, so runs are reproducible
//!
//! A [`Stage`] puts both engines on one clock, applies the activation timeline from a
//! [`StageConfig`] and flattens the layers into premultiplied RGBA8 frames ([`FrameRGBA`]).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub(crate) mod engine;
mod foundation;
pub(crate) mod particle;
pub(crate) mod render;
pub(crate) mod scene;

pub use crate::foundation::core::{
    Affine, BezPath, Fps, FrameIndex, Point, Rect, Rgba8, Rgba8Premul, Vec2, Viewport,
};
pub use crate::foundation::error::{BlossomError, BlossomResult};

pub use crate::engine::ambient::{AmbientField, PetalField};
pub use crate::engine::burst::{CelebrationBurst, ConfettiBurst};
pub use crate::engine::lifecycle::{Engine, EngineState, ParticleSystem, TickOutcome};
pub use crate::engine::scheduler::{FrameClock, Scheduler, TickHandle};
pub use crate::engine::trigger::{ActivationSchedule, BurstPulse, Edge, FrameWindow};
pub use crate::particle::factory::{CONFETTI_COUNT, PETAL_COUNT, spawn_confetti, spawn_petals};
pub use crate::particle::model::{
    CONFETTI_PALETTE, ConfettiPiece, ConfettiShape, Motion, PETAL_GRADIENT, Petal,
};
pub use crate::particle::physics::{
    CONFETTI_EXIT_MARGIN, CONFETTI_SWAY_FREQ, DRAG, GRAVITY, PETAL_SWAY_FREQ, SWAY_AMPLITUDE,
    confetti_is_live, step_confetti, step_petal,
};
pub use crate::render::backend::{DrawCmd, DrawSurface, Fill, FrameRGBA, RadialFill};
pub use crate::render::composite::{LayerBlend, blend_in_place, fill_in_place};
pub use crate::render::cpu::CpuSurface;
pub use crate::render::painter::{Sprite, draw_cmd, paint_frame, sprite_transform};
pub use crate::render::recording::{RecordingSurface, SurfaceOp};
pub use crate::render::shapes::{
    circle_path, confetti_path, heart_path, petal_path, square_path, star_path,
};
pub use crate::scene::config::{AmbientSettings, ConfettiSettings, StageConfig};
pub use crate::scene::stage::Stage;
