//! A grid shared between threads.
//!
//! One lock guards the whole grid and is held from the first bounds check
//! to the last cell written, so two placements can never both pass the
//! overlap check for the same cell.

use std::num::NonZeroU32;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use glam::IVec3;

use crate::error::PlacementError;
use crate::geometry::Rotate;
use crate::grid::{Grid, Placement};

/// Reference-counted handle to a grid behind a single lock.
///
/// Clones share the same grid.
#[derive(Debug, Clone)]
pub struct SharedGrid {
    grid: Arc<Mutex<Grid>>,
}

impl SharedGrid {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid: Arc::new(Mutex::new(grid)),
        }
    }

    /// Places a pattern while holding the lock for the whole transaction.
    pub fn try_place_pattern<R: Rotate + ?Sized>(
        &self,
        tile: NonZeroU32,
        pattern: impl AsRef<[IVec3]>,
        anchor: IVec3,
        rotation: &R,
    ) -> Result<Placement, PlacementError> {
        self.lock().try_place_pattern(tile, pattern, anchor, rotation)
    }

    /// Runs `read` against the grid under the lock.
    pub fn read<T>(&self, read: impl FnOnce(&Grid) -> T) -> T {
        read(&*self.lock())
    }

    /// Returns the grid if this is the last handle, otherwise the handle back.
    pub fn into_inner(self) -> Result<Grid, Self> {
        match Arc::try_unwrap(self.grid) {
            Ok(mutex) => Ok(mutex.into_inner().unwrap_or_else(PoisonError::into_inner)),
            Err(grid) => Err(Self { grid }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Grid> {
        // placement writes only after both checks pass, so a poisoned grid is
        // still consistent
        self.grid.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<Grid> for SharedGrid {
    fn from(grid: Grid) -> Self {
        Self::new(grid)
    }
}
