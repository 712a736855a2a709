use std::{
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::Context as _;

use crate::{
    error::{TetrascopeError, TetrascopeResult},
    grid,
};

/// Options for driving an external solver across a frame sequence.
#[derive(Clone, Debug)]
pub struct DriveOptions {
    /// Solver executable, invoked as `solver <in> [<prev_out>] -o <out>`.
    pub solver: PathBuf,
    /// First frame index to look for.
    pub start: u64,
}

/// Invoke the solver once per frame until an occupancy grid is missing.
///
/// Frames that already have output are left alone, so an interrupted run can
/// resume where it stopped. Every frame after the first is handed the
/// previous frame's solution as a continuity hint.
pub fn drive(dir: &Path, opts: &DriveOptions) -> TetrascopeResult<()> {
    for index in opts.start.. {
        let input = grid::occupancy_path(dir, index);
        if !input.exists() {
            tracing::info!(index, "no occupancy grid, stopping");
            break;
        }
        let output = grid::piece_path(dir, index);
        if output.exists() {
            tracing::debug!(index, "already solved, skipping");
            continue;
        }
        let hint = index
            .checked_sub(1)
            .map(|prev| grid::piece_path(dir, prev))
            .filter(|p| p.exists());
        solve_frame(&opts.solver, index, &input, &output, hint.as_deref())?;
    }
    Ok(())
}

fn solve_frame(
    solver: &Path,
    index: u64,
    input: &Path,
    output: &Path,
    hint: Option<&Path>,
) -> TetrascopeResult<()> {
    let mut cmd = Command::new(solver);
    cmd.arg(input);
    if let Some(hint) = hint {
        cmd.arg(hint);
    }
    cmd.arg("-o").arg(output);

    tracing::info!(index, solver = %solver.display(), "solving frame");
    let status = cmd
        .status()
        .with_context(|| format!("spawn solver '{}'", solver.display()))?;
    if !status.success() {
        // Remove any partially written output so a retry of this index
        // starts from a clean slate.
        remove_partial(output)?;
        return Err(TetrascopeError::solver(format!(
            "solver exited with {status} on frame {index}"
        )));
    }
    Ok(())
}

fn remove_partial(output: &Path) -> TetrascopeResult<()> {
    match std::fs::remove_file(output) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(TetrascopeError::solver(format!(
            "failed to remove partial output '{}': {e}",
            output.display()
        ))),
    }
}
