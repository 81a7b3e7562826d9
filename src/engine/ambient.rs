use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::engine::lifecycle::{Engine, ParticleSystem, TickOutcome};
use crate::engine::scheduler::{Scheduler, TickHandle};
use crate::foundation::core::Viewport;
use crate::foundation::error::BlossomResult;
use crate::particle::factory::{PETAL_COUNT, spawn_petals};
use crate::particle::model::Petal;
use crate::particle::physics::step_petal;
use crate::render::backend::DrawSurface;

/// Rules for the ambient petal field: fixed population, recycled forever.
#[derive(Clone, Copy, Debug)]
pub struct PetalField {
    /// Population size.
    pub count: usize,
}

impl Default for PetalField {
    fn default() -> Self {
        Self { count: PETAL_COUNT }
    }
}

impl ParticleSystem for PetalField {
    type Particle = Petal;

    fn name(&self) -> &'static str {
        "petals"
    }

    fn spawn<R: Rng + ?Sized>(&self, rng: &mut R, viewport: Viewport) -> Vec<Petal> {
        spawn_petals(rng, self.count, viewport)
    }

    fn step<R: Rng + ?Sized>(&self, particle: &mut Petal, viewport: Viewport, rng: &mut R) {
        step_petal(particle, viewport, rng);
    }

    fn stops_when_empty(&self) -> bool {
        false
    }
}

/// Background petal field bound to the lifetime of its owning view.
///
/// `mount` creates the population once and starts the loop; `unmount` cancels the loop. The
/// surface keeps its last painted frame after unmount.
pub struct AmbientField<D: DrawSurface> {
    engine: Engine<PetalField, D>,
}

impl<D: DrawSurface> AmbientField<D> {
    /// Create an unmounted field.
    pub fn new(field: PetalField, surface: Option<D>, seed: u64) -> Self {
        Self {
            engine: Engine::new(field, surface, StdRng::seed_from_u64(seed)),
        }
    }

    /// Start the field. Mounting an already mounted field is a no-op.
    ///
    /// Returns whether the field is running afterwards (`false` without a drawable surface).
    pub fn mount<T: Scheduler + ?Sized>(&mut self, sched: &mut T) -> bool {
        if self.engine.is_running() {
            return true;
        }
        self.engine.start(sched)
    }

    /// Tear the field down: cancel the pending tick. Idempotent.
    pub fn unmount<T: Scheduler + ?Sized>(&mut self, sched: &mut T) {
        self.engine.stop(sched);
    }

    /// `true` while the loop is live.
    pub fn is_mounted(&self) -> bool {
        self.engine.is_running()
    }

    /// Forward a fired tick.
    pub fn on_tick<T: Scheduler + ?Sized>(
        &mut self,
        handle: TickHandle,
        sched: &mut T,
    ) -> BlossomResult<TickOutcome> {
        self.engine.on_tick(handle, sched)
    }

    /// Resize the surface without touching petal positions.
    pub fn resize(&mut self, viewport: Viewport) -> BlossomResult<()> {
        self.engine.resize(viewport)
    }

    /// Underlying engine.
    pub fn engine(&self) -> &Engine<PetalField, D> {
        &self.engine
    }

    /// Underlying engine, mutably.
    pub fn engine_mut(&mut self) -> &mut Engine<PetalField, D> {
        &mut self.engine
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/ambient.rs"]
mod tests;
