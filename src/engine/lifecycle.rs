use rand::Rng;
use rand::rngs::StdRng;

use crate::engine::scheduler::{Scheduler, TickHandle};
use crate::foundation::core::Viewport;
use crate::foundation::error::BlossomResult;
use crate::render::backend::DrawSurface;
use crate::render::painter::{Sprite, paint_frame};

/// Spawn, motion and retention rules for one kind of particle population.
pub trait ParticleSystem {
    /// Particle type owned by the population.
    type Particle: Sprite;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Create a fresh population for `viewport` (only called with a drawable viewport).
    fn spawn<R: Rng + ?Sized>(&self, rng: &mut R, viewport: Viewport) -> Vec<Self::Particle>;

    /// Advance one particle by one tick.
    fn step<R: Rng + ?Sized>(&self, particle: &mut Self::Particle, viewport: Viewport, rng: &mut R);

    /// `false` removes the particle from the population after the tick.
    fn is_live(&self, _particle: &Self::Particle, _viewport: Viewport) -> bool {
        true
    }

    /// `true` if the loop stops by itself once the population is empty.
    fn stops_when_empty(&self) -> bool;
}

/// Whether an engine has a tick in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// No tick scheduled.
    Idle,
    /// A tick is scheduled; the loop is live.
    Running,
}

/// What [`Engine::on_tick`] did with a fired handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The handle was not this engine's pending tick (stale, cancelled or foreign).
    Ignored,
    /// The frame ran and the next tick was scheduled.
    Rescheduled,
    /// The frame ran (or could not) and the loop ended.
    Finished,
}

/// Owns one population, its drawing surface, its random source and at most one pending tick.
///
/// All mutation goes through the engine's methods; there is no shared state between engines.
pub struct Engine<S: ParticleSystem, D: DrawSurface> {
    system: S,
    surface: Option<D>,
    rng: StdRng,
    population: Vec<S::Particle>,
    pending: Option<TickHandle>,
    ticks: u64,
}

impl<S: ParticleSystem, D: DrawSurface> Engine<S, D> {
    /// Create an idle engine. `surface` may be absent; the engine then refuses to start.
    pub fn new(system: S, surface: Option<D>, rng: StdRng) -> Self {
        Self {
            system,
            surface,
            rng,
            population: Vec::new(),
            pending: None,
            ticks: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> EngineState {
        if self.pending.is_some() {
            EngineState::Running
        } else {
            EngineState::Idle
        }
    }

    /// Shorthand for `state() == Running`.
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Live particles, in paint order.
    pub fn population(&self) -> &[S::Particle] {
        &self.population
    }

    /// Mutable access to the live particles (hosts and tests may place particles directly).
    pub fn population_mut(&mut self) -> &mut Vec<S::Particle> {
        &mut self.population
    }

    /// The particle rules.
    pub fn system(&self) -> &S {
        &self.system
    }

    /// The drawing surface, if attached.
    pub fn surface(&self) -> Option<&D> {
        self.surface.as_ref()
    }

    /// Mutable drawing surface, if attached.
    pub fn surface_mut(&mut self) -> Option<&mut D> {
        self.surface.as_mut()
    }

    /// Attach (or replace) the drawing surface.
    pub fn attach_surface(&mut self, surface: D) {
        self.surface = Some(surface);
    }

    /// Remove the drawing surface. A running loop ends at its next tick without drawing.
    pub fn detach_surface(&mut self) -> Option<D> {
        self.surface.take()
    }

    /// Handle of the tick in flight.
    pub fn pending_tick(&self) -> Option<TickHandle> {
        self.pending
    }

    /// Frames run since creation.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Spawn a fresh population and schedule the first tick.
    ///
    /// Returns `false` and does nothing when no surface is attached or its viewport is empty.
    /// Starting a running engine resets it: the pending tick is cancelled and the population
    /// is replaced.
    pub fn start<T: Scheduler + ?Sized>(&mut self, sched: &mut T) -> bool {
        let viewport = match self.surface.as_ref().map(|s| s.viewport()) {
            Some(vp) if vp.is_drawable() => vp,
            other => {
                tracing::debug!(
                    system = self.system.name(),
                    viewport = ?other,
                    "start refused: no drawable surface"
                );
                return false;
            }
        };

        if let Some(handle) = self.pending.take() {
            sched.cancel(handle);
            tracing::debug!(system = self.system.name(), "reset while running");
        }

        self.population = self.system.spawn(&mut self.rng, viewport);
        self.pending = Some(sched.schedule_tick());
        tracing::debug!(
            system = self.system.name(),
            population = self.population.len(),
            width = viewport.width,
            height = viewport.height,
            "started"
        );
        true
    }

    /// Cancel the pending tick and go idle. Idempotent.
    ///
    /// The population and the last painted frame are left as they are.
    pub fn stop<T: Scheduler + ?Sized>(&mut self, sched: &mut T) {
        if let Some(handle) = self.pending.take() {
            sched.cancel(handle);
            tracing::debug!(system = self.system.name(), "stopped");
        }
    }

    /// Drop every particle.
    pub fn discard_population(&mut self) {
        self.population.clear();
    }

    /// Run one frame if `handle` is this engine's pending tick.
    ///
    /// A frame paints the population as it stands, advances every particle, drops the ones the
    /// system no longer considers live and reschedules unless the loop ended.
    pub fn on_tick<T: Scheduler + ?Sized>(
        &mut self,
        handle: TickHandle,
        sched: &mut T,
    ) -> BlossomResult<TickOutcome> {
        if self.pending != Some(handle) {
            return Ok(TickOutcome::Ignored);
        }
        self.pending = None;

        let Some(surface) = self.surface.as_mut() else {
            tracing::debug!(system = self.system.name(), "surface detached; loop ends");
            return Ok(TickOutcome::Finished);
        };
        let viewport = surface.viewport();
        if !viewport.is_drawable() {
            tracing::trace!(system = self.system.name(), "surface not drawable; frame skipped");
            self.pending = Some(sched.schedule_tick());
            return Ok(TickOutcome::Rescheduled);
        }

        paint_frame(surface, &self.population)?;
        for particle in &mut self.population {
            self.system.step(particle, viewport, &mut self.rng);
        }
        self.population
            .retain(|particle| self.system.is_live(particle, viewport));
        self.ticks += 1;

        tracing::trace!(
            system = self.system.name(),
            tick = self.ticks,
            population = self.population.len(),
            "tick"
        );

        if self.system.stops_when_empty() && self.population.is_empty() {
            tracing::debug!(system = self.system.name(), ticks = self.ticks, "exhausted");
            return Ok(TickOutcome::Finished);
        }
        self.pending = Some(sched.schedule_tick());
        Ok(TickOutcome::Rescheduled)
    }

    /// Resize the surface. Particle positions are untouched; only future boundary math and the
    /// clear rectangle change. While the surface is empty a running loop keeps its tick alive
    /// but neither paints nor steps.
    pub fn resize(&mut self, viewport: Viewport) -> BlossomResult<()> {
        match self.surface.as_mut() {
            Some(surface) => surface.resize(viewport),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/lifecycle.rs"]
mod tests;
