//! Grid storage, lookup and transactional pattern placement.
//!
//! Cells are stored as a flat array in enumeration order: X varies fastest,
//! then Y, with Z outermost (`idx = x + dx * (y + dy * z)`). Each cell holds a
//! tile number, or 0 for empty.

use std::fmt;
use std::num::NonZeroU32;

use glam::{IVec3, UVec3, Vec3};
use log::{debug, trace};
use rustc_hash::FxHashSet;

use crate::error::{GridError, PlacementError};
use crate::geometry::{round_to_index, Rotate};

/// Tile number of an empty cell.
pub const EMPTY_TILE: u32 = 0;

/// One addressable unit of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    index: IVec3,
    tile: u32,
}

impl Cell {
    /// Position of this cell within the grid.
    #[inline]
    pub fn index(&self) -> IVec3 {
        self.index
    }

    /// Tile number occupying this cell, [`EMPTY_TILE`] if none.
    #[inline]
    pub fn tile(&self) -> u32 {
        self.tile
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tile == EMPTY_TILE
    }

    /// Spatial center of the cell for a given cell size.
    pub fn center(&self, cell_size: f32) -> Vec3 {
        self.index.as_vec3() * cell_size
    }
}

/// A committed placement: the tile and every distinct cell it now holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub tile: NonZeroU32,
    /// Destination cells in the order the pattern first reached them.
    pub cells: Vec<IVec3>,
}

/// Fixed-size three-dimensional grid of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    dimensions: UVec3,
    cell_size: f32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every cell empty.
    ///
    /// Zero-sized dimensions are allowed and give a grid with no cells.
    pub fn new(dimensions: UVec3, cell_size: f32) -> Result<Self, GridError> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(GridError::InvalidCellSize(cell_size));
        }
        if dimensions.max_element() > i32::MAX as u32 {
            return Err(GridError::TooLarge { dimensions });
        }
        let volume = (dimensions.x as usize)
            .checked_mul(dimensions.y as usize)
            .and_then(|area| area.checked_mul(dimensions.z as usize))
            .ok_or(GridError::TooLarge { dimensions })?;

        let mut cells = Vec::with_capacity(volume);
        for z in 0..dimensions.z as i32 {
            for y in 0..dimensions.y as i32 {
                for x in 0..dimensions.x as i32 {
                    cells.push(Cell {
                        index: IVec3::new(x, y, z),
                        tile: EMPTY_TILE,
                    });
                }
            }
        }

        debug!("created {dimensions} grid of {volume} cells, cell size {cell_size}");
        Ok(Self {
            dimensions,
            cell_size,
            cells,
        })
    }

    #[inline]
    pub fn dimensions(&self) -> UVec3 {
        self.dimensions
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Checks `0 <= c < dim` on every axis.
    #[inline]
    pub fn contains(&self, index: IVec3) -> bool {
        (0..self.dimensions.x as i32).contains(&index.x)
            && (0..self.dimensions.y as i32).contains(&index.y)
            && (0..self.dimensions.z as i32).contains(&index.z)
    }

    /// Converts an in-bounds coordinate to its position in the flat array.
    #[inline(always)]
    fn linear_index(&self, index: IVec3) -> usize {
        let dx = self.dimensions.x as usize;
        let dy = self.dimensions.y as usize;
        index.x as usize + dx * (index.y as usize + dy * index.z as usize)
    }

    /// Looks up the cell at `index`.
    pub fn cell_at(&self, index: IVec3) -> Result<&Cell, GridError> {
        if !self.contains(index) {
            return Err(GridError::OutOfRange {
                index,
                dimensions: self.dimensions,
            });
        }
        Ok(&self.cells[self.linear_index(index)])
    }

    /// Spatial center of `cell` using this grid's cell size.
    pub fn cell_center(&self, cell: &Cell) -> Vec3 {
        cell.center(self.cell_size)
    }

    /// Every cell, Z outermost and X innermost.
    ///
    /// Each call starts a fresh pass, so independent readers see the same
    /// order while the grid is unchanged.
    pub fn cells(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Cells holding a tile, in enumeration order.
    pub fn occupied(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter().filter(|cell| !cell.is_empty())
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }

    /// Maps a pattern-local offset to a grid coordinate.
    ///
    /// Rotates `local`, rounds each component to the nearest integer with
    /// ties to even, then translates by `anchor`. Fails if the result lies
    /// outside the grid, or if the rotation produced a non-finite component.
    pub fn try_orient_index<R: Rotate + ?Sized>(
        &self,
        local: IVec3,
        anchor: IVec3,
        rotation: &R,
    ) -> Result<IVec3, PlacementError> {
        let rotated = rotation.rotate(local);
        let world = anchor.saturating_add(round_to_index(rotated));
        if rotated.is_finite() && self.contains(world) {
            Ok(world)
        } else {
            Err(PlacementError::OutOfBounds { local, world })
        }
    }

    /// Stamps `pattern` onto the grid as a single transaction.
    ///
    /// Every offset is oriented first; any offset outside the grid aborts the
    /// attempt. The distinct destinations are then checked against the
    /// current grid state, and any occupied one aborts the attempt. Only when
    /// both checks pass is `tile` written, so a failed call changes nothing.
    ///
    /// Offsets that round onto the same destination are fine; the cell is
    /// claimed once.
    pub fn try_place_pattern<R: Rotate + ?Sized>(
        &mut self,
        tile: NonZeroU32,
        pattern: impl AsRef<[IVec3]>,
        anchor: IVec3,
        rotation: &R,
    ) -> Result<Placement, PlacementError> {
        let offsets = pattern.as_ref();
        let mut destinations = Vec::with_capacity(offsets.len());
        let mut seen: FxHashSet<IVec3> = FxHashSet::default();

        for &local in offsets {
            let world = match self.try_orient_index(local, anchor, rotation) {
                Ok(world) => world,
                Err(error) => {
                    trace!("tile {tile} at {anchor} rejected: {error}");
                    return Err(error);
                }
            };
            if seen.insert(world) {
                destinations.push(world);
            }
        }

        // check against the grid as it was before this call, nothing is written yet
        if let Some(occupied) = destinations
            .iter()
            .map(|&world| &self.cells[self.linear_index(world)])
            .find(|cell| !cell.is_empty())
        {
            let error = PlacementError::Overlap {
                world: occupied.index,
                occupant: occupied.tile,
            };
            trace!("tile {tile} at {anchor} rejected: {error}");
            return Err(error);
        }

        for &world in &destinations {
            let cell_index = self.linear_index(world);
            self.cells[cell_index].tile = tile.get();
        }

        debug!(
            "placed tile {tile} at {anchor} over {} cells",
            destinations.len()
        );
        Ok(Placement {
            tile,
            cells: destinations,
        })
    }

    /// Formats the grid as a human-readable string.
    ///
    /// Displays the z-slices side by side, rows from top (highest y) to
    /// bottom, x running left to right. Empty cells show as '.'.
    pub fn format_slices(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let dx = self.dimensions.x as usize;
        let dy = self.dimensions.y as i32;
        let dz = self.dimensions.z as i32;

        let mut lines = Vec::with_capacity(dy as usize + 1);

        let mut header = String::new();
        for z in 0..dz {
            if z > 0 {
                header.push_str("  ");
            }
            // label padded to the slice width so columns line up
            header.push_str(&format!("z={:<width$}", z, width = dx.saturating_sub(2)));
        }
        lines.push(header);

        for y in (0..dy).rev() {
            let mut row = String::new();
            for z in 0..dz {
                if z > 0 {
                    row.push_str("  ");
                }
                for x in 0..dx as i32 {
                    let cell = &self.cells[self.linear_index(IVec3::new(x, y, z))];
                    row.push(tile_char(cell.tile));
                }
            }
            lines.push(row);
        }

        let mut output = String::new();
        for line in &lines {
            output.push_str(line.trim_end());
            output.push('\n');
        }
        output
    }
}

/// Display character for a tile: digits, then letters, then '#'.
fn tile_char(tile: u32) -> char {
    match tile {
        EMPTY_TILE => '.',
        1..=9 => char::from(b'0' + tile as u8),
        10..=35 => char::from(b'A' + (tile - 10) as u8),
        _ => '#',
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_slices())
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
