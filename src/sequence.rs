use std::path::{Path, PathBuf};

use crate::{
    compose::Compositor,
    error::{TetrascopeError, TetrascopeResult},
    grid::{self, OccupancyGrid, PieceGrid},
    sink::{FrameSink, SinkConfig, SinkFlow},
};

/// Options for one playback run.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequenceOptions {
    /// First frame index to look for.
    pub start: u64,
    /// Overlay the frame index on every frame and log a frame counter.
    pub show_info: bool,
}

/// Drives the compositor across a contiguous run of frame indices and hands
/// each frame to one sink.
///
/// The run ends cleanly at the first index whose piece grid file does not
/// exist; a missing occupancy grid only skips its own index.
pub struct Sequencer {
    dir: PathBuf,
    opts: SequenceOptions,
    compositor: Compositor,
}

impl Sequencer {
    pub fn new(dir: impl Into<PathBuf>, opts: SequenceOptions, compositor: Compositor) -> Self {
        Self {
            dir: dir.into(),
            opts,
            compositor,
        }
    }

    #[tracing::instrument(skip(self, sink))]
    pub fn run(&self, sink: &mut dyn FrameSink) -> TetrascopeResult<()> {
        let mut begun = false;
        for index in self.opts.start.. {
            let piece_file = grid::piece_path(&self.dir, index);
            if !piece_file.exists() {
                tracing::info!(index, "piece grid not found, end of sequence");
                break;
            }

            let occupancy = match self.load_occupancy(index)? {
                Load::Ready(map) => map,
                Load::SkipFrame => continue,
            };
            let pieces = PieceGrid::load(&piece_file)?;
            if let Some(map) = &occupancy
                && map.dims() != pieces.dims()
            {
                return Err(TetrascopeError::grid(format!(
                    "frame {index}: occupancy dimensions {:?} do not match piece dimensions {:?}",
                    map.dims(),
                    pieces.dims()
                )));
            }

            if self.opts.show_info {
                tracing::info!("frame #{index}");
            }
            let label = self.opts.show_info.then(|| index.to_string());
            let frame = self
                .compositor
                .composite(&pieces, occupancy.as_ref(), label.as_deref());

            if !begun {
                begun = true;
                sink.begin(SinkConfig {
                    width: frame.width,
                    height: frame.height,
                })?;
            }
            if sink.push_frame(index, &frame)? == SinkFlow::Stop {
                tracing::info!(index, "stop requested by sink");
                break;
            }
        }
        if begun {
            sink.end()?;
        }
        Ok(())
    }

    // The occupancy grid is only consulted for the unfilled underlay. A
    // missing file skips the frame instead of ending the run; only the piece
    // grid decides termination.
    fn load_occupancy(&self, index: u64) -> TetrascopeResult<Load> {
        if !self.compositor.options().paint_unfilled {
            return Ok(Load::Ready(None));
        }
        let map_file = grid::occupancy_path(&self.dir, index);
        if !map_file.exists() {
            tracing::warn!(index, file = %map_file.display(), "occupancy grid missing, skipping frame");
            return Ok(Load::SkipFrame);
        }
        Ok(Load::Ready(Some(OccupancyGrid::load(&map_file)?)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

enum Load {
    Ready(Option<OccupancyGrid>),
    SkipFrame,
}
