//! Error types for grid construction, lookup and placement.

use glam::{IVec3, UVec3};
use thiserror::Error;

/// Expected outcomes of a rejected orientation or placement.
///
/// Both variants are ordinary results of exploring placements. The grid is
/// left untouched whenever one of them is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// An offset rotated and translated to a coordinate outside the grid.
    #[error("local offset {local} lands at {world}, outside the grid")]
    OutOfBounds { local: IVec3, world: IVec3 },

    /// A destination cell is already held by another tile.
    #[error("cell {world} is already occupied by tile {occupant}")]
    Overlap { world: IVec3, occupant: u32 },
}

/// Errors from building a grid or addressing a cell directly.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GridError {
    /// Direct lookup of a coordinate outside `[0, dim)` on some axis.
    #[error("index {index} is outside grid dimensions {dimensions}")]
    OutOfRange { index: IVec3, dimensions: UVec3 },

    #[error("cell size must be finite and positive, got {0}")]
    InvalidCellSize(f32),

    #[error("grid dimensions {dimensions} are too large to allocate")]
    TooLarge { dimensions: UVec3 },
}
