//! Boolean cell grids and per-cell neighbor counts.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{AutomatonError, Result};

/// A `width × height` grid of Boolean cells stored row-major.
///
/// Cells are addressed as `(row, col)`. A grid handed to the engine is never
/// mutated again; every generation produces a fresh value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// An all-dead grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Builds a grid from row-major cell data.
    pub fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Result<Self> {
        if cells.len() != width * height {
            return Err(AutomatonError::dimensions(
                format!("{} cells", cells.len()),
                width,
                height,
            ));
        }
        Ok(Self { width, height, cells })
    }

    pub(crate) fn from_raw(width: usize, height: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self { width, height, cells }
    }

    /// Parses rows of `#`/`O` (alive) and `.` (dead), e.g. `[".#.", "..#", "###"]`.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            if row.chars().count() != width {
                return Err(AutomatonError::dimensions(
                    format!("every row {width} cells wide"),
                    row.chars().count(),
                    height,
                ));
            }
            cells.extend(row.chars().map(|c| matches!(c, '#' | 'O' | 'o' | '1')));
        }
        Ok(Self { width, height, cells })
    }

    /// An all-dead grid with the given cells switched on. Out-of-range
    /// coordinates are ignored.
    pub fn with_cells(width: usize, height: usize, alive: &[(usize, usize)]) -> Self {
        let mut grid = Self::new(width, height);
        for &(row, col) in alive {
            if row < height && col < width {
                grid.cells[row * width + col] = true;
            }
        }
        grid
    }

    /// Random fill where each cell is alive with probability `density`.
    /// The same seed always yields the same grid.
    pub fn random(width: usize, height: usize, density: f64, seed: u64) -> Result<Self> {
        if !(0.0..=1.0).contains(&density) {
            return Err(AutomatonError::InvalidDensity(density));
        }
        let len = width
            .checked_mul(height)
            .ok_or_else(|| AutomatonError::dimensions("a representable cell count", width, height))?;
        let mut rng = StdRng::seed_from_u64(seed);
        let cells = (0..len).map(|_| rng.gen_bool(density)).collect();
        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// State of a cell; out-of-range coordinates read as dead.
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col]
        } else {
            false
        }
    }

    /// Returns a copy with one cell toggled. Used by setup code (editors,
    /// pattern placement); the engine itself never edits grids.
    pub fn toggled(&self, row: usize, col: usize) -> Self {
        let mut next = self.clone();
        if row < self.height && col < self.width {
            let idx = row * self.width + col;
            next.cells[idx] = !next.cells[idx];
        }
        next
    }

    /// Row-major cell slice.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Iterates over the rows of the grid.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        // chunks_exact panics on 0
        self.cells.chunks_exact(self.width.max(1))
    }

    /// Number of alive cells.
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Coordinates of every alive cell, in row-major order.
    pub fn live_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(idx, _)| (idx / self.width, idx % self.width))
            .collect()
    }

    pub(crate) fn same_shape(&self, width: usize, height: usize) -> bool {
        self.width == width && self.height == height
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|&c| if c { '#' } else { '.' }).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Kernel-weighted live-neighbor counts, one per cell, same shape as the
/// grid they were computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborCounts {
    width: usize,
    height: usize,
    counts: Vec<u16>,
}

impl NeighborCounts {
    pub(crate) fn from_counts(width: usize, height: usize, counts: Vec<u16>) -> Self {
        debug_assert_eq!(counts.len(), width * height);
        Self { width, height, counts }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> u16 {
        self.counts[row * self.width + col]
    }

    /// Row-major count slice.
    pub fn counts(&self) -> &[u16] {
        &self.counts
    }

    pub fn max(&self) -> u16 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_and_display() {
        let grid = Grid::from_rows(&[".#.", "..#", "###"]).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.live_count(), 5);
        assert!(grid.get(0, 1));
        assert!(!grid.get(0, 0));
        assert_eq!(grid.to_string(), ".#.\n..#\n###\n");
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = Grid::from_rows(&["..", "..."]).unwrap_err();
        assert!(matches!(err, AutomatonError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_from_cells_length_checked() {
        assert!(Grid::from_cells(2, 2, vec![true; 4]).is_ok());
        assert!(Grid::from_cells(2, 2, vec![true; 3]).is_err());
    }

    #[test]
    fn test_with_cells_ignores_out_of_range() {
        let grid = Grid::with_cells(4, 3, &[(0, 0), (2, 3), (3, 0), (0, 4)]);
        assert_eq!(grid.live_cells(), vec![(0, 0), (2, 3)]);
        assert!(!grid.get(10, 10));
    }

    #[test]
    fn test_toggled_leaves_original() {
        let grid = Grid::new(3, 3);
        let next = grid.toggled(1, 1);
        assert!(!grid.get(1, 1));
        assert!(next.get(1, 1));
    }

    #[test]
    fn test_random_is_seeded() {
        let a = Grid::random(40, 40, 0.15, 7).unwrap();
        let b = Grid::random(40, 40, 0.15, 7).unwrap();
        assert_eq!(a, b);

        let pop = a.live_count();
        // ~15% of 1600, with slack
        assert!(pop > 120 && pop < 380, "population {pop}");
    }

    #[test]
    fn test_random_density_bounds() {
        assert_eq!(Grid::random(5, 5, 0.0, 1).unwrap().live_count(), 0);
        assert_eq!(Grid::random(5, 5, 1.0, 1).unwrap().live_count(), 25);
        assert_eq!(
            Grid::random(5, 5, 1.5, 1).unwrap_err(),
            AutomatonError::InvalidDensity(1.5)
        );
    }

    #[test]
    fn test_random_rejects_overflowing_size() {
        let err = Grid::random(usize::MAX, 3, 0.5, 1).unwrap_err();
        assert!(matches!(err, AutomatonError::DimensionMismatch { height: 3, .. }));
    }
}
