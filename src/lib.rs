//! Oriented Pattern Grid Library
//!
//! Maintains a fixed-size voxel grid and places multi-cell patterns onto it
//! under arbitrary rotation. A placement is rejected when any cell would fall
//! outside the grid or onto an occupied cell, and is otherwise written in
//! full.
//!
//! ```
//! use std::num::NonZeroU32;
//! use orientgrid::{geometry::quarter_turns, Grid, Pattern};
//! use glam::{IVec3, UVec3};
//!
//! let mut grid = Grid::new(UVec3::splat(10), 1.0).unwrap();
//! let tile = NonZeroU32::new(1).unwrap();
//! let placed = grid
//!     .try_place_pattern(tile, Pattern::l_hexacube(), IVec3::new(2, 8, 0), &quarter_turns(0, 0, -1))
//!     .unwrap();
//! assert_eq!(placed.cells.len(), 6);
//! assert!(grid
//!     .try_place_pattern(tile, Pattern::l_hexacube(), IVec3::new(2, 8, 0), &quarter_turns(0, 0, -1))
//!     .is_err());
//! ```

pub mod error;
pub mod explorer;
pub mod geometry;
pub mod grid;
pub mod pattern;
pub mod shared;

pub use glam;

pub use error::{GridError, PlacementError};
pub use explorer::{ExploreReport, Explorer};
pub use geometry::{CubeRotation, Rotate};
pub use grid::{Cell, Grid, Placement};
pub use pattern::Pattern;
pub use shared::SharedGrid;
