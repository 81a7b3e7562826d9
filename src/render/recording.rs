use crate::foundation::core::Viewport;
use crate::foundation::error::{BlossomError, BlossomResult};
use crate::render::backend::{DrawCmd, DrawSurface};

/// One call observed by a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    /// `resize` to the given size.
    Resize(Viewport),
    /// `clear`.
    Clear,
    /// `fill` with the given command.
    Fill(DrawCmd),
    /// `present`.
    Present,
}

/// Headless surface that records every call instead of rasterizing.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    viewport: Viewport,
    ops: Vec<SurfaceOp>,
    frame_open: bool,
}

impl RecordingSurface {
    /// Create a recording surface of the given size.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ops: Vec::new(),
            frame_open: false,
        }
    }

    /// Every recorded call, oldest first.
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Number of `clear` calls so far.
    pub fn clear_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, SurfaceOp::Clear)).count()
    }

    /// Number of `present` calls so far.
    pub fn present_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Present))
            .count()
    }

    /// Fill commands issued since the most recent `clear`.
    pub fn last_frame(&self) -> Vec<&DrawCmd> {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, SurfaceOp::Clear))
            .map_or(0, |i| i + 1);
        self.ops[start..]
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Fill(cmd) => Some(cmd),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) -> BlossomResult<()> {
        self.viewport = viewport;
        self.ops.push(SurfaceOp::Resize(viewport));
        Ok(())
    }

    fn clear(&mut self) -> BlossomResult<()> {
        self.frame_open = true;
        self.ops.push(SurfaceOp::Clear);
        Ok(())
    }

    fn fill(&mut self, cmd: &DrawCmd) -> BlossomResult<()> {
        if !self.frame_open {
            return Err(BlossomError::render("fill outside of an open frame"));
        }
        self.ops.push(SurfaceOp::Fill(cmd.clone()));
        Ok(())
    }

    fn present(&mut self) -> BlossomResult<()> {
        self.frame_open = false;
        self.ops.push(SurfaceOp::Present);
        Ok(())
    }
}
