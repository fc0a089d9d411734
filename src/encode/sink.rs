use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{TitleError, TitleResult};
use crate::render::backend::FrameRGBA;

/// Output format announced to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Output frame rate.
    pub fps: Fps,
}

impl SinkConfig {
    /// Byte length of one RGBA8 frame.
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }

    /// Reject empty outputs.
    pub fn check_non_empty(&self) -> TitleResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TitleError::validation(format!(
                "sink output must be non-empty (got {}x{})",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Reject a frame whose size or buffer length does not match this config.
    pub fn check_frame(&self, frame: &FrameRGBA) -> TitleResult<()> {
        if frame.width != self.width || frame.height != self.height {
            return Err(TitleError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.width, self.height
            )));
        }
        if frame.data.len() != self.frame_len() {
            return Err(TitleError::validation(format!(
                "frame buffer holds {} bytes, expected {}",
                frame.data.len(),
                self.frame_len()
            )));
        }
        Ok(())
    }
}

/// Consumer of rendered frames.
///
/// [`crate::AnimationDriver::render_range`] calls `begin` once, `push_frame` with strictly
/// increasing indices, then `end`.
pub trait FrameSink {
    /// Prepare for frames of the given format.
    fn begin(&mut self, cfg: SinkConfig) -> TitleResult<()>;
    /// Accept the frame at `idx`.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> TitleResult<()>;
    /// Flush and release the output.
    fn end(&mut self) -> TitleResult<()>;
}

/// Keeps every frame in memory; used by tests and for inspection.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    finished: bool,
}

impl InMemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Format received in `begin`.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Frames received so far, in push order.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// `true` once `end` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> TitleResult<()> {
        cfg.check_non_empty()?;
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> TitleResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| TitleError::encode("in-memory sink not started"))?;
        cfg.check_frame(frame)?;
        check_order(self.frames.last().map(|(last, _)| *last), idx)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> TitleResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Fail unless `idx` comes strictly after `last`.
pub(crate) fn check_order(last: Option<FrameIndex>, idx: FrameIndex) -> TitleResult<()> {
    match last {
        Some(last) if idx <= last => Err(TitleError::encode(format!(
            "frame {} pushed after frame {}",
            idx.0, last.0
        ))),
        _ => Ok(()),
    }
}

/// Create the parent directory of an output file.
pub(crate) fn ensure_parent_dir(path: &Path) -> TitleResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
