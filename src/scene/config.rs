use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::engine::ambient::PetalField;
use crate::engine::burst::ConfettiBurst;
use crate::engine::trigger::{ActivationSchedule, BurstPulse, FrameWindow};
use crate::foundation::core::{FrameIndex, Fps, Rgba8, Viewport};
use crate::foundation::error::{BlossomError, BlossomResult};
use crate::particle::factory::{CONFETTI_COUNT, PETAL_COUNT};
use crate::particle::model::CONFETTI_PALETTE;
use crate::render::composite::LayerBlend;

/// JSON-facing description of a stage: surface size, clock, seed and activation timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StageConfig {
    /// Surface size shared by both layers.
    pub viewport: Viewport,
    /// Simulated display refresh rate.
    #[serde(default = "default_fps")]
    pub fps: Fps,
    /// Total frames.
    pub duration: u64,
    /// Determinism seed; each engine derives its own stream from it.
    #[serde(default)]
    pub seed: u64,
    /// Opaque page color behind both layers.
    #[serde(default = "default_background")]
    pub background: Rgba8,
    /// Petal field settings.
    #[serde(default)]
    pub ambient: AmbientSettings,
    /// Confetti settings.
    #[serde(default)]
    pub confetti: ConfettiSettings,
    /// When the burst input is held true.
    #[serde(default)]
    pub bursts: Vec<BurstPulse>,
}

/// Petal field settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AmbientSettings {
    /// Petals per mount.
    pub count: usize,
    /// Seconds from stage start at which the field mounts.
    pub mount_at_secs: f64,
    /// Seconds at which the field unmounts; `None` keeps it mounted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unmount_at_secs: Option<f64>,
    /// How the petal layer lands on the background.
    pub blend: LayerBlend,
}

impl Default for AmbientSettings {
    fn default() -> Self {
        Self {
            count: PETAL_COUNT,
            mount_at_secs: 0.0,
            unmount_at_secs: None,
            blend: LayerBlend::Screen,
        }
    }
}

/// Confetti settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ConfettiSettings {
    /// Pieces per activation.
    pub count: usize,
    /// Piece colors.
    pub palette: Vec<Rgba8>,
}

impl Default for ConfettiSettings {
    fn default() -> Self {
        Self {
            count: CONFETTI_COUNT,
            palette: CONFETTI_PALETTE.to_vec(),
        }
    }
}

fn default_fps() -> Fps {
    Fps { num: 60, den: 1 }
}

fn default_background() -> Rgba8 {
    Rgba8::rgb(0x0A, 0x0A, 0x0A)
}

fn check_secs(what: &str, secs: f64) -> BlossomResult<()> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(BlossomError::validation(format!(
            "{what} must be finite and >= 0 (got {secs})"
        )));
    }
    Ok(())
}

impl StageConfig {
    /// Parse a stage config from a JSON string.
    pub fn from_json(s: &str) -> BlossomResult<Self> {
        serde_json::from_str(s).map_err(|e| BlossomError::serde(format!("parse stage JSON: {e}")))
    }

    /// Parse a stage config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> BlossomResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| BlossomError::serde(format!("parse stage JSON: {e}")))
    }

    /// Parse and validate a stage config from a JSON file on disk.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> BlossomResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BlossomError::validation(format!("open stage JSON '{}': {e}", path.display()))
        })?;
        let cfg = Self::from_reader(BufReader::new(f))?;
        cfg.validate()?;
        tracing::debug!(
            width = cfg.viewport.width,
            height = cfg.viewport.height,
            duration = cfg.duration,
            bursts = cfg.bursts.len(),
            "loaded stage config"
        );
        Ok(cfg)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> BlossomResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BlossomError::serde(format!("serialize stage JSON: {e}")))
    }

    /// Check every field; the stage constructor relies on this.
    pub fn validate(&self) -> BlossomResult<()> {
        if !self.viewport.is_drawable() {
            return Err(BlossomError::validation("viewport width/height must be > 0"));
        }
        if self.viewport.width > u32::from(u16::MAX) || self.viewport.height > u32::from(u16::MAX)
        {
            return Err(BlossomError::validation(format!(
                "viewport width/height must be <= {}",
                u16::MAX
            )));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        if self.duration == 0 {
            return Err(BlossomError::validation("duration must be > 0 frames"));
        }
        if self.confetti.palette.is_empty() {
            return Err(BlossomError::validation("confetti palette must be non-empty"));
        }

        check_secs("ambient.mount_at_secs", self.ambient.mount_at_secs)?;
        if let Some(unmount) = self.ambient.unmount_at_secs {
            check_secs("ambient.unmount_at_secs", unmount)?;
            if unmount <= self.ambient.mount_at_secs {
                return Err(BlossomError::validation(
                    "ambient.unmount_at_secs must be after mount_at_secs",
                ));
            }
        }
        self.ambient_schedule()?;
        self.burst_schedule()?;
        Ok(())
    }

    /// Frame window during which the petal field is mounted.
    pub fn ambient_schedule(&self) -> BlossomResult<ActivationSchedule> {
        let start = self.fps.secs_to_frames_floor(self.ambient.mount_at_secs);
        let end = self.ambient.unmount_at_secs.map(|secs| {
            FrameIndex(
                self.fps
                    .secs_to_frames_floor(secs)
                    .max(start.saturating_add(1)),
            )
        });
        ActivationSchedule::new(vec![FrameWindow {
            start: FrameIndex(start),
            end,
        }])
    }

    /// Frame windows during which the burst input is true.
    pub fn burst_schedule(&self) -> BlossomResult<ActivationSchedule> {
        ActivationSchedule::from_pulses(&self.bursts, self.fps)
    }

    /// Petal rules for this stage.
    pub fn petal_field(&self) -> PetalField {
        PetalField {
            count: self.ambient.count,
        }
    }

    /// Confetti rules for this stage.
    pub fn confetti_burst(&self) -> ConfettiBurst {
        ConfettiBurst {
            count: self.confetti.count,
            palette: self.confetti.palette.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
