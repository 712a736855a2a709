#![forbid(unsafe_code)]

pub mod catalog;
pub mod color;
pub mod compose;
pub mod error;
pub mod frame;
pub mod grid;
pub mod overlay;
#[cfg(feature = "preview")]
pub mod preview;
pub mod sequence;
pub mod sink;
pub mod solver;

pub use compose::{ComposeOptions, Compositor};
pub use error::{TetrascopeError, TetrascopeResult};
pub use frame::FrameBgr;
pub use grid::{OccupancyGrid, PieceGrid};
pub use sequence::{SequenceOptions, Sequencer};
pub use sink::{FrameSink, InMemorySink, RawStreamSink, SinkConfig, SinkFlow};
