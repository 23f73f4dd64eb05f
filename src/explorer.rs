//! Random placement exploration.
//!
//! Repeatedly drops a pattern at a random anchor under a random quarter-turn
//! rotation and keeps whatever fits. This is a caller of the grid, not part
//! of it: the grid only answers single placement attempts.

use std::num::NonZeroU32;

use glam::{IVec3, Quat};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::PlacementError;
use crate::geometry::quarter_turns;
use crate::grid::Grid;
use crate::pattern::Pattern;

/// Tally of one exploration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExploreReport {
    pub attempts: usize,
    pub placed: usize,
    pub out_of_bounds: usize,
    pub overlaps: usize,
    /// Tile number the next successful placement would receive.
    pub next_tile: NonZeroU32,
}

impl ExploreReport {
    fn new(first_tile: NonZeroU32) -> Self {
        Self {
            attempts: 0,
            placed: 0,
            out_of_bounds: 0,
            overlaps: 0,
            next_tile: first_tile,
        }
    }
}

/// Seeded source of random anchors and rotations.
pub struct Explorer {
    rng: StdRng,
}

impl Explorer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform anchor inside the grid, `None` when the grid has no cells.
    pub fn random_anchor(&mut self, grid: &Grid) -> Option<IVec3> {
        if grid.is_empty() {
            return None;
        }
        let dimensions = grid.dimensions().as_ivec3();
        Some(IVec3::new(
            self.rng.random_range(0..dimensions.x),
            self.rng.random_range(0..dimensions.y),
            self.rng.random_range(0..dimensions.z),
        ))
    }

    /// Euler rotation of 0, 90, 180 or 270 degrees on each axis.
    pub fn random_rotation(&mut self) -> Quat {
        quarter_turns(
            self.rng.random_range(0..4),
            self.rng.random_range(0..4),
            self.rng.random_range(0..4),
        )
    }

    /// Makes `attempts` random placements of `pattern`.
    ///
    /// Successful placements take consecutive tile numbers starting at
    /// `first_tile`. The run stops early if tile numbers run out.
    pub fn explore(
        &mut self,
        grid: &mut Grid,
        pattern: &Pattern,
        attempts: usize,
        first_tile: NonZeroU32,
    ) -> ExploreReport {
        let mut report = ExploreReport::new(first_tile);

        while report.attempts < attempts {
            report.attempts += 1;
            let Some(anchor) = self.random_anchor(grid) else {
                report.out_of_bounds += 1;
                continue;
            };
            let rotation = self.random_rotation();

            match grid.try_place_pattern(report.next_tile, pattern, anchor, &rotation) {
                Ok(placement) => {
                    debug!("attempt {}: tile {} placed", report.attempts, placement.tile);
                    report.placed += 1;
                    match report.next_tile.checked_add(1) {
                        Some(next) => report.next_tile = next,
                        None => break,
                    }
                }
                Err(PlacementError::OutOfBounds { .. }) => report.out_of_bounds += 1,
                Err(PlacementError::Overlap { .. }) => report.overlaps += 1,
            }
        }

        info!(
            "{} patterns added in {} attempts ({} out of bounds, {} overlapping)",
            report.placed, report.attempts, report.out_of_bounds, report.overlaps
        );
        report
    }
}
