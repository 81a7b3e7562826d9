use crate::foundation::core::{FrameIndex, Fps};
use crate::foundation::error::{BlossomError, BlossomResult};

fn default_hold_secs() -> f64 {
    5.0
}

/// A window of time during which the burst activation input is held true.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BurstPulse {
    /// Seconds from stage start at which the input rises.
    pub at_secs: f64,
    /// Seconds the input stays true.
    #[serde(default = "default_hold_secs")]
    pub hold_secs: f64,
}

impl BurstPulse {
    /// A pulse at `at_secs` with the default 5 second hold.
    pub fn at(at_secs: f64) -> Self {
        Self {
            at_secs,
            hold_secs: default_hold_secs(),
        }
    }
}

/// Half-open frame window `[start, end)`; `end = None` never closes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameWindow {
    /// First frame with the input high.
    pub start: FrameIndex,
    /// First frame with the input low again.
    pub end: Option<FrameIndex>,
}

/// Transition of an activation input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    /// Input goes (or is re-driven) true.
    Rise,
    /// Input goes false.
    Fall,
}

/// Sorted, non-overlapping activation windows on the stage frame clock.
#[derive(Clone, Debug, Default)]
pub struct ActivationSchedule {
    windows: Vec<FrameWindow>,
}

impl ActivationSchedule {
    /// Build a schedule, rejecting empty or overlapping windows.
    pub fn new(mut windows: Vec<FrameWindow>) -> BlossomResult<Self> {
        windows.sort_by_key(|w| w.start);
        for w in &windows {
            if let Some(end) = w.end
                && end <= w.start
            {
                return Err(BlossomError::validation(format!(
                    "activation window starting at frame {} is empty",
                    w.start.0
                )));
            }
        }
        for pair in windows.windows(2) {
            let overlaps = match pair[0].end {
                Some(end) => end > pair[1].start,
                None => true,
            };
            if overlaps {
                return Err(BlossomError::validation(format!(
                    "activation windows starting at frames {} and {} overlap",
                    pair[0].start.0, pair[1].start.0
                )));
            }
        }
        Ok(Self { windows })
    }

    /// Convert burst pulses to frame windows at `fps`. Each pulse holds for at least one frame.
    pub fn from_pulses(pulses: &[BurstPulse], fps: Fps) -> BlossomResult<Self> {
        let windows = pulses
            .iter()
            .map(|p| {
                if !p.at_secs.is_finite() || p.at_secs < 0.0 {
                    return Err(BlossomError::validation("pulse at_secs must be finite and >= 0"));
                }
                if !p.hold_secs.is_finite() || p.hold_secs <= 0.0 {
                    return Err(BlossomError::validation("pulse hold_secs must be finite and > 0"));
                }
                let start = fps.secs_to_frames_floor(p.at_secs);
                let hold = fps.secs_to_frames_floor(p.hold_secs).max(1);
                Ok(FrameWindow {
                    start: FrameIndex(start),
                    end: Some(FrameIndex(start.saturating_add(hold))),
                })
            })
            .collect::<BlossomResult<Vec<_>>>()?;
        Self::new(windows)
    }

    /// The windows, sorted by start.
    pub fn windows(&self) -> &[FrameWindow] {
        &self.windows
    }

    /// `true` if the input is high at `frame`.
    pub fn is_high(&self, frame: FrameIndex) -> bool {
        self.windows
            .iter()
            .any(|w| w.start <= frame && w.end.is_none_or(|end| frame < end))
    }

    /// Edge to apply on `frame`, if any. A window starting exactly where the previous one ends
    /// yields `Rise`, re-driving the input.
    pub fn edge_at(&self, frame: FrameIndex) -> Option<Edge> {
        if self.windows.iter().any(|w| w.start == frame) {
            return Some(Edge::Rise);
        }
        if self.windows.iter().any(|w| w.end == Some(frame)) {
            return Some(Edge::Fall);
        }
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/trigger.rs"]
mod tests;
