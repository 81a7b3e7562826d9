use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::engine::lifecycle::{Engine, ParticleSystem, TickOutcome};
use crate::engine::scheduler::{Scheduler, TickHandle};
use crate::foundation::core::{Rgba8, Viewport};
use crate::foundation::error::BlossomResult;
use crate::particle::factory::{CONFETTI_COUNT, spawn_confetti};
use crate::particle::model::{CONFETTI_PALETTE, ConfettiPiece};
use crate::particle::physics::{confetti_is_live, step_confetti};
use crate::render::backend::DrawSurface;

/// Rules for a celebration burst: fresh population per activation, pieces removed once they
/// fall past the bottom margin, loop ends when none are left.
#[derive(Clone, Debug)]
pub struct ConfettiBurst {
    /// Population size per activation.
    pub count: usize,
    /// Colors pieces are drawn from.
    pub palette: Vec<Rgba8>,
}

impl Default for ConfettiBurst {
    fn default() -> Self {
        Self {
            count: CONFETTI_COUNT,
            palette: CONFETTI_PALETTE.to_vec(),
        }
    }
}

impl ParticleSystem for ConfettiBurst {
    type Particle = ConfettiPiece;

    fn name(&self) -> &'static str {
        "confetti"
    }

    fn spawn<R: Rng + ?Sized>(&self, rng: &mut R, viewport: Viewport) -> Vec<ConfettiPiece> {
        spawn_confetti(rng, self.count, viewport, &self.palette)
    }

    fn step<R: Rng + ?Sized>(&self, particle: &mut ConfettiPiece, _viewport: Viewport, _rng: &mut R) {
        step_confetti(particle);
    }

    fn is_live(&self, particle: &ConfettiPiece, viewport: Viewport) -> bool {
        confetti_is_live(particle, viewport)
    }

    fn stops_when_empty(&self) -> bool {
        true
    }
}

/// Confetti overlay driven by a boolean activation input.
pub struct CelebrationBurst<D: DrawSurface> {
    engine: Engine<ConfettiBurst, D>,
    active: bool,
}

impl<D: DrawSurface> CelebrationBurst<D> {
    /// Create an inactive burst.
    pub fn new(burst: ConfettiBurst, surface: Option<D>, seed: u64) -> Self {
        Self {
            engine: Engine::new(burst, surface, StdRng::seed_from_u64(seed)),
            active: false,
        }
    }

    /// Feed the activation input.
    ///
    /// `true` spawns a fresh population and starts the loop; if a burst is already running it is
    /// discarded and replaced. `false` cancels the loop and discards the population; the surface
    /// keeps whatever it last showed. Returns whether the loop is running afterwards.
    pub fn set_active<T: Scheduler + ?Sized>(&mut self, active: bool, sched: &mut T) -> bool {
        self.active = active;
        if active {
            self.engine.start(sched)
        } else {
            self.engine.stop(sched);
            self.engine.discard_population();
            false
        }
    }

    /// Last activation input.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// `true` while pieces are still falling.
    pub fn is_running(&self) -> bool {
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

    /// Resize the surface without touching piece positions.
    pub fn resize(&mut self, viewport: Viewport) -> BlossomResult<()> {
        self.engine.resize(viewport)
    }

    /// Underlying engine.
    pub fn engine(&self) -> &Engine<ConfettiBurst, D> {
        &self.engine
    }

    /// Underlying engine, mutably.
    pub fn engine_mut(&mut self) -> &mut Engine<ConfettiBurst, D> {
        &mut self.engine
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/burst.rs"]
mod tests;
