use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use ndarray::Array2;
use ndarray_npy::NpzReader;

use crate::{
    catalog::SHAPE_COUNT,
    error::{TetrascopeError, TetrascopeResult},
};

/// Occupancy grid file for one frame index, written by the preprocessing
/// stage: `{index:04}.npz`, field `map`.
pub fn occupancy_path(dir: &Path, index: u64) -> PathBuf {
    dir.join(format!("{index:04}.npz"))
}

/// Piece-id grid file for one frame index, written by the solver:
/// `{index:04}_out.npz`, field `piece`.
pub fn piece_path(dir: &Path, index: u64) -> PathBuf {
    dir.join(format!("{index:04}_out.npz"))
}

/// Per-frame silhouette: true where the target image wants a filled cell.
#[derive(Clone, Debug)]
pub struct OccupancyGrid(Array2<bool>);

impl OccupancyGrid {
    pub fn from_array(cells: Array2<bool>) -> Self {
        Self(cells)
    }

    /// (rows, cols)
    pub fn dims(&self) -> (usize, usize) {
        self.0.dim()
    }

    pub fn is_set(&self, y: usize, x: usize) -> bool {
        self.0[(y, x)]
    }

    /// Load the `map` field from an `.npz` file of 0/1 byte values.
    pub fn load(path: &Path) -> TetrascopeResult<Self> {
        let file = File::open(path)
            .with_context(|| format!("open occupancy grid '{}'", path.display()))?;
        let mut npz = NpzReader::new(file)
            .with_context(|| format!("read npz '{}'", path.display()))?;
        // numpy-written archives carry the `.npy` entry suffix, solver-written
        // ones may not; accept both.
        let raw: Array2<u8> = npz
            .by_name("map")
            .or_else(|_| npz.by_name("map.npy"))
            .with_context(|| format!("field 'map' missing in '{}'", path.display()))?;
        Ok(Self(raw.mapv(|v| v != 0)))
    }
}

/// Per-frame solver output: one shape id per cell, 0 meaning no piece is
/// anchored at the cell.
///
/// Construction enforces the grid invariants (non-empty dimensions, every
/// id below [`SHAPE_COUNT`]), so consumers never re-validate.
#[derive(Clone, Debug)]
pub struct PieceGrid(Array2<u8>);

impl PieceGrid {
    pub fn from_array(cells: Array2<u8>) -> TetrascopeResult<Self> {
        let (h, w) = cells.dim();
        if h == 0 || w == 0 {
            return Err(TetrascopeError::grid("piece grid must be non-empty"));
        }
        if let Some(&bad) = cells.iter().find(|&&v| v as usize >= SHAPE_COUNT) {
            return Err(TetrascopeError::grid(format!(
                "shape id {bad} out of range (max {})",
                SHAPE_COUNT - 1
            )));
        }
        Ok(Self(cells))
    }

    /// (rows, cols)
    pub fn dims(&self) -> (usize, usize) {
        self.0.dim()
    }

    pub fn get(&self, y: usize, x: usize) -> u8 {
        self.0[(y, x)]
    }

    /// Load the `piece` field from an `.npz` file.
    pub fn load(path: &Path) -> TetrascopeResult<Self> {
        let file =
            File::open(path).with_context(|| format!("open piece grid '{}'", path.display()))?;
        let mut npz = NpzReader::new(file)
            .with_context(|| format!("read npz '{}'", path.display()))?;
        let raw: Array2<u8> = npz
            .by_name("piece")
            .or_else(|_| npz.by_name("piece.npy"))
            .with_context(|| format!("field 'piece' missing in '{}'", path.display()))?;
        Self::from_array(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn file_layout_is_zero_padded() {
        let dir = Path::new("work");
        assert_eq!(occupancy_path(dir, 7), Path::new("work/0007.npz"));
        assert_eq!(piece_path(dir, 7), Path::new("work/0007_out.npz"));
        assert_eq!(piece_path(dir, 12345), Path::new("work/12345_out.npz"));
    }

    #[test]
    fn piece_grid_rejects_out_of_range_ids() {
        let err = PieceGrid::from_array(array![[0u8, 20]]).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn piece_grid_rejects_empty_dimensions() {
        let empty = Array2::<u8>::zeros((0, 4));
        assert!(PieceGrid::from_array(empty).is_err());
    }

    #[test]
    fn piece_grid_accepts_the_full_id_range() {
        let grid = PieceGrid::from_array(array![[0u8, 1, 19]]).unwrap();
        assert_eq!(grid.dims(), (1, 3));
        assert_eq!(grid.get(0, 2), 19);
    }
}
