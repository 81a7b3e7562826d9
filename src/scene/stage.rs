use crate::engine::ambient::AmbientField;
use crate::engine::burst::CelebrationBurst;
use crate::engine::lifecycle::TickOutcome;
use crate::engine::scheduler::{FrameClock, TickHandle};
use crate::engine::trigger::{ActivationSchedule, Edge};
use crate::foundation::core::{FrameIndex, Viewport};
use crate::foundation::error::{BlossomError, BlossomResult};
use crate::render::backend::FrameRGBA;
use crate::render::composite::{LayerBlend, blend_in_place, fill_in_place};
use crate::render::cpu::CpuSurface;
use crate::scene::config::StageConfig;

// Keeps the burst's random stream independent of the petal stream for the same seed.
const BURST_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Both engines on one frame clock, each drawing to its own CPU surface.
///
/// Frame `n` of the stage is produced by the `n + 1`-th call to [`Stage::advance`]: trigger edges
/// for `n` are applied, then every tick due on that refresh runs.
pub struct Stage {
    config: StageConfig,
    viewport: Viewport,
    clock: FrameClock,
    ambient: AmbientField<CpuSurface>,
    burst: CelebrationBurst<CpuSurface>,
    ambient_schedule: ActivationSchedule,
    burst_schedule: ActivationSchedule,
}

impl Stage {
    /// Validate `config` and build an idle stage at frame 0.
    pub fn new(config: StageConfig) -> BlossomResult<Self> {
        config.validate()?;
        let viewport = config.viewport;
        let ambient = AmbientField::new(
            config.petal_field(),
            Some(CpuSurface::new(viewport)?),
            config.seed,
        );
        let burst = CelebrationBurst::new(
            config.confetti_burst(),
            Some(CpuSurface::new(viewport)?),
            config.seed ^ BURST_SEED_SALT,
        );
        Ok(Self {
            ambient_schedule: config.ambient_schedule()?,
            burst_schedule: config.burst_schedule()?,
            viewport,
            clock: FrameClock::new(),
            ambient,
            burst,
            config,
        })
    }

    /// The config this stage was built from.
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Current surface size.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Number of frames run so far; also the index of the next frame.
    pub fn frame(&self) -> FrameIndex {
        self.clock.frame()
    }

    /// The petal field.
    pub fn ambient(&self) -> &AmbientField<CpuSurface> {
        &self.ambient
    }

    /// The confetti burst.
    pub fn burst(&self) -> &CelebrationBurst<CpuSurface> {
        &self.burst
    }

    /// Live petals.
    pub fn petal_count(&self) -> usize {
        self.ambient.engine().population().len()
    }

    /// Live confetti pieces.
    pub fn confetti_count(&self) -> usize {
        self.burst.engine().population().len()
    }

    /// Run the next frame and return its index.
    #[tracing::instrument(skip(self), fields(frame = self.clock.frame().0))]
    pub fn advance(&mut self) -> BlossomResult<FrameIndex> {
        let frame = self.clock.frame();
        if frame.0 >= self.config.duration {
            return Err(BlossomError::validation(format!(
                "frame {} is past the stage duration ({})",
                frame.0, self.config.duration
            )));
        }

        match self.ambient_schedule.edge_at(frame) {
            Some(Edge::Rise) => {
                self.ambient.mount(&mut self.clock);
            }
            Some(Edge::Fall) => self.ambient.unmount(&mut self.clock),
            None => {}
        }
        if let Some(edge) = self.burst_schedule.edge_at(frame) {
            self.burst.set_active(matches!(edge, Edge::Rise), &mut self.clock);
        }

        let ambient = &mut self.ambient;
        let burst = &mut self.burst;
        dispatch_ticks(
            &mut self.clock,
            |handle, clock| ambient.on_tick(handle, clock),
            |handle, clock| burst.on_tick(handle, clock),
        )?;
        tracing::trace!(
            petals = self.petal_count(),
            confetti = self.confetti_count(),
            "frame done"
        );
        Ok(frame)
    }

    /// Run frames until `frame` has been produced.
    pub fn advance_to(&mut self, frame: FrameIndex) -> BlossomResult<()> {
        if frame.0 < self.clock.frame().0 {
            return Err(BlossomError::validation(format!(
                "frame {} was already rendered (stage is at {})",
                frame.0,
                self.clock.frame().0
            )));
        }
        while self.clock.frame().0 <= frame.0 {
            self.advance()?;
        }
        Ok(())
    }

    /// Flatten the background, the petal layer and the confetti layer into one premultiplied
    /// frame.
    pub fn compose(&self) -> BlossomResult<FrameRGBA> {
        let w = self.viewport.width;
        let h = self.viewport.height;
        let mut data = vec![0u8; (w as usize) * (h as usize) * 4];
        fill_in_place(&mut data, self.config.background.to_premul());

        let layers = [
            (self.ambient.engine().surface(), self.config.ambient.blend),
            (self.burst.engine().surface(), LayerBlend::Normal),
        ];
        for (surface, blend) in layers
            .into_iter()
            .filter_map(|(surface, blend)| surface.map(|s| (s, blend)))
        {
            blend_in_place(&mut data, &surface.readback().data, blend)?;
        }

        Ok(FrameRGBA {
            width: w,
            height: h,
            data,
            premultiplied: true,
        })
    }

    /// Resize both surfaces. Particle positions are untouched.
    ///
    /// An empty viewport (a minimized host, say) is accepted: running engines skip frames and
    /// [`Stage::compose`] returns an empty frame until a drawable size comes back.
    pub fn resize(&mut self, viewport: Viewport) -> BlossomResult<()> {
        self.ambient.resize(viewport)?;
        self.burst.resize(viewport)?;
        self.viewport = viewport;
        Ok(())
    }
}

/// Hand every handle due on the next refresh to both engines.
///
/// Each engine sees every handle even if the other one failed, so no engine is left holding a
/// pending tick the clock has already dropped. The first error is returned.
fn dispatch_ticks<A, B>(clock: &mut FrameClock, mut first: A, mut second: B) -> BlossomResult<()>
where
    A: FnMut(TickHandle, &mut FrameClock) -> BlossomResult<TickOutcome>,
    B: FnMut(TickHandle, &mut FrameClock) -> BlossomResult<TickOutcome>,
{
    let mut failure = None;
    for handle in clock.advance() {
        for outcome in [first(handle, clock), second(handle, clock)] {
            if let Err(e) = outcome {
                tracing::debug!(error = %e, "tick failed");
                failure.get_or_insert(e);
            }
        }
    }
    failure.map_or(Ok(()), Err)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/stage.rs"]
mod tests;
