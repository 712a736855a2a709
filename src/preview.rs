use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::{
    error::{TetrascopeError, TetrascopeResult},
    frame::FrameBgr,
    sink::{FrameSink, SinkConfig, SinkFlow},
};

// Preview windows are shrunk to fit within this many pixels.
const MAX_WINDOW: (usize, usize) = (1600, 900);
const PLAYBACK_FPS: usize = 30;

/// Interactive preview window.
///
/// Keys: `q` quits, `e` enters single-step mode, space toggles it. In
/// single-step mode each frame blocks until the next key press; continuous
/// playback paces itself at a fixed rate. Closing the window stops the run.
pub struct PreviewSink {
    window: Option<Window>,
    cfg: Option<SinkConfig>,
    /// Downscale factor, fixed from the first frame's dimensions.
    shrink: usize,
    single_step: bool,
    buffer: Vec<u32>,
}

impl PreviewSink {
    pub fn new() -> Self {
        Self {
            window: None,
            cfg: None,
            shrink: 1,
            single_step: false,
            buffer: Vec::new(),
        }
    }
}

impl Default for PreviewSink {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSink for PreviewSink {
    fn begin(&mut self, cfg: SinkConfig) -> TetrascopeResult<()> {
        self.shrink = preview_shrink(cfg.width as usize, cfg.height as usize);
        let (pw, ph) = shrunk_dims(cfg, self.shrink);
        let mut window = Window::new("tetrascope", pw, ph, WindowOptions::default())
            .map_err(|e| TetrascopeError::sink(format!("open preview window: {e}")))?;
        window.set_target_fps(PLAYBACK_FPS);
        self.buffer = vec![0; pw * ph];
        self.window = Some(window);
        self.cfg = Some(cfg);
        Ok(())
    }

    fn push_frame(&mut self, _index: u64, frame: &FrameBgr) -> TetrascopeResult<SinkFlow> {
        let (Some(window), Some(cfg)) = (self.window.as_mut(), self.cfg) else {
            return Err(TetrascopeError::sink("push_frame before begin"));
        };
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(TetrascopeError::sink(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        let (pw, ph) = shrunk_dims(cfg, self.shrink);
        downsample_into(&mut self.buffer, frame, self.shrink, pw, ph);

        loop {
            window
                .update_with_buffer(&self.buffer, pw, ph)
                .map_err(|e| TetrascopeError::sink(format!("update preview window: {e}")))?;
            if !window.is_open() || window.is_key_pressed(Key::Q, KeyRepeat::No) {
                return Ok(SinkFlow::Stop);
            }
            if window.is_key_pressed(Key::E, KeyRepeat::No) {
                self.single_step = true;
                return Ok(SinkFlow::Continue);
            }
            if window.is_key_pressed(Key::Space, KeyRepeat::No) {
                self.single_step = !self.single_step;
                return Ok(SinkFlow::Continue);
            }
            if !self.single_step {
                // One paced update per frame in continuous playback.
                return Ok(SinkFlow::Continue);
            }
            if !window.get_keys_pressed(KeyRepeat::No).is_empty() {
                return Ok(SinkFlow::Continue);
            }
        }
    }

    fn end(&mut self) -> TetrascopeResult<()> {
        self.window = None;
        Ok(())
    }
}

fn preview_shrink(width: usize, height: usize) -> usize {
    width
        .div_ceil(MAX_WINDOW.0)
        .max(height.div_ceil(MAX_WINDOW.1))
        .max(1)
}

fn shrunk_dims(cfg: SinkConfig, shrink: usize) -> (usize, usize) {
    (
        (cfg.width as usize).div_ceil(shrink),
        (cfg.height as usize).div_ceil(shrink),
    )
}

// Nearest-neighbor sample into a 0RGB u32 buffer.
fn downsample_into(buffer: &mut [u32], frame: &FrameBgr, shrink: usize, pw: usize, ph: usize) {
    for py in 0..ph {
        let sy = (py * shrink) as u32;
        for px in 0..pw {
            let sx = (px * shrink) as u32;
            let [b, g, r] = frame.pixel(sx, sy);
            buffer[py * pw + px] =
                (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shrink_is_identity_for_small_frames() {
        assert_eq!(preview_shrink(48, 48), 1);
        assert_eq!(preview_shrink(1600, 900), 1);
    }

    #[test]
    fn shrink_fits_large_frames_into_the_window_bounds() {
        let shrink = preview_shrink(4000, 2000);
        assert!(4000usize.div_ceil(shrink) <= MAX_WINDOW.0);
        assert!(2000usize.div_ceil(shrink) <= MAX_WINDOW.1);
    }

    #[test]
    fn downsample_packs_bgr_into_0rgb() {
        let mut frame = FrameBgr::new(2, 2);
        frame.fill_rect(0, 0, 1, 1, [0x30, 0x20, 0x10]);
        let mut buffer = vec![0u32; 4];
        downsample_into(&mut buffer, &frame, 1, 2, 2);
        assert_eq!(buffer[0], 0x0010_2030);
        assert_eq!(buffer[3], 0);
    }

    #[test]
    fn downsample_samples_the_top_left_of_each_block() {
        let mut frame = FrameBgr::new(4, 2);
        frame.fill_rect(2, 0, 3, 1, [0, 0, 0xFF]);
        let mut buffer = vec![0u32; 2];
        downsample_into(&mut buffer, &frame, 2, 2, 1);
        assert_eq!(buffer[0], 0);
        assert_eq!(buffer[1], 0x00FF_0000);
    }
}
