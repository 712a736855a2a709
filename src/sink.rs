use std::io::Write;

use crate::{
    error::{TetrascopeError, TetrascopeResult},
    frame::FrameBgr,
};

/// Configuration handed to a [`FrameSink`] before the first frame.
#[derive(Clone, Copy, Debug)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

/// What the sequence loop should do after a frame was consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkFlow {
    Continue,
    /// End the run cleanly (quit key, closed window).
    Stop,
}

/// Sink contract for consuming rendered frames in sequence order.
///
/// Ordering contract: `begin` is called exactly once, with the first frame's
/// dimensions, before any `push_frame`; frames arrive in strictly increasing
/// index order; `end` is called once after the last frame.
pub trait FrameSink {
    fn begin(&mut self, cfg: SinkConfig) -> TetrascopeResult<()>;
    fn push_frame(&mut self, index: u64, frame: &FrameBgr) -> TetrascopeResult<SinkFlow>;
    fn end(&mut self) -> TetrascopeResult<()>;
}

/// Writes each frame's bytes verbatim, with no framing, suitable for piping
/// into an external encoder.
///
/// On `begin` a one-line usage hint describing the byte layout goes to the
/// diagnostic stream, once per run, so the downstream encoder invocation can
/// be constructed without guessing.
pub struct RawStreamSink<W: Write> {
    out: W,
    cfg: Option<SinkConfig>,
    hint_shown: bool,
}

impl RawStreamSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> RawStreamSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            cfg: None,
            hint_shown: false,
        }
    }
}

impl<W: Write> FrameSink for RawStreamSink<W> {
    fn begin(&mut self, cfg: SinkConfig) -> TetrascopeResult<()> {
        if !self.hint_shown {
            self.hint_shown = true;
            eprintln!("## Output option:");
            eprintln!(
                "## ffmpeg -video_size {}x{} -pix_fmt bgr24 -f rawvideo -i - out.mp4",
                cfg.width, cfg.height
            );
        }
        self.cfg = Some(cfg);
        Ok(())
    }

    fn push_frame(&mut self, _index: u64, frame: &FrameBgr) -> TetrascopeResult<SinkFlow> {
        let Some(cfg) = self.cfg else {
            return Err(TetrascopeError::sink("push_frame before begin"));
        };
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(TetrascopeError::sink(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        self.out
            .write_all(&frame.data)
            .map_err(|e| TetrascopeError::sink(format!("write raw frame: {e}")))?;
        // Best-effort per-frame flush; backpressure is the pipe's problem.
        self.out
            .flush()
            .map_err(|e| TetrascopeError::sink(format!("flush raw stream: {e}")))?;
        Ok(SinkFlow::Continue)
    }

    fn end(&mut self) -> TetrascopeResult<()> {
        self.out
            .flush()
            .map_err(|e| TetrascopeError::sink(format!("flush raw stream: {e}")))
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, FrameBgr)>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured frames in sequence order.
    pub fn frames(&self) -> &[(u64, FrameBgr)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> TetrascopeResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, index: u64, frame: &FrameBgr) -> TetrascopeResult<SinkFlow> {
        self.frames.push((index, frame.clone()));
        Ok(SinkFlow::Continue)
    }

    fn end(&mut self) -> TetrascopeResult<()> {
        Ok(())
    }
}
