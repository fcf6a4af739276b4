//! Neighbor counting by 2D convolution.

use serde::{Deserialize, Serialize};

use crate::grid::{Grid, NeighborCounts};
use crate::kernel::Kernel;

/// How the kernel treats offsets that fall outside the grid.
///
/// The policy is fixed for a run; it changes edge behavior, e.g. a glider
/// on a toroidal grid re-enters from the opposite edge while on a
/// zero-padded grid it collapses into a block at the border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Edges wrap around (torus).
    #[default]
    Toroidal,
    /// Cells outside the grid count as dead.
    ZeroPadded,
}

impl Boundary {
    pub fn name(self) -> &'static str {
        match self {
            Boundary::Toroidal => "toroidal",
            Boundary::ZeroPadded => "zero-padded",
        }
    }
}

/// Counts, for every cell, the kernel-weighted number of live neighbors.
///
/// Every result lies in `[0, kernel.max_neighbor_count()]` as long as, under
/// [`Boundary::Toroidal`], the grid is at least `kernel.size()` cells in
/// each dimension (checked when a simulation is set up).
pub fn count_neighbors(grid: &Grid, kernel: &Kernel, boundary: Boundary) -> NeighborCounts {
    let (width, height) = (grid.width(), grid.height());
    let cells = grid.cells();
    let mut counts = vec![0u16; width * height];

    // Accumulate one shifted copy of the grid per kernel offset.
    for &(d_row, d_col) in kernel.offsets() {
        for row in 0..height {
            let Some(src_row) = shift(row, d_row, height, boundary) else {
                continue;
            };
            let src = &cells[src_row * width..(src_row + 1) * width];
            let dst = &mut counts[row * width..(row + 1) * width];
            for (col, count) in dst.iter_mut().enumerate() {
                if let Some(src_col) = shift(col, d_col, width, boundary) {
                    *count += u16::from(src[src_col]);
                }
            }
        }
    }

    log::trace!(
        "counted neighbors on {width}x{height} grid ({} boundary)",
        boundary.name()
    );
    NeighborCounts::from_counts(width, height, counts)
}

/// Index `pos + delta`, wrapped or dropped according to `boundary`.
fn shift(pos: usize, delta: isize, len: usize, boundary: Boundary) -> Option<usize> {
    let target = pos as isize + delta;
    match boundary {
        Boundary::Toroidal => Some(target.rem_euclid(len as isize) as usize),
        Boundary::ZeroPadded => (0..len as isize).contains(&target).then_some(target as usize),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_cross_pattern() {
        let grid = Grid::with_cells(5, 5, &[(1, 2), (3, 2), (2, 1), (2, 3)]);
        let counts = count_neighbors(&grid, &Kernel::default(), Boundary::Toroidal);
        assert_eq!(counts.get(2, 2), 4);
        assert_eq!(counts.get(1, 1), 2);
        assert_eq!(counts.get(0, 0), 0);

        let von_neumann = Kernel::von_neumann(3).unwrap();
        let counts = count_neighbors(&grid, &von_neumann, Boundary::Toroidal);
        assert_eq!(counts.get(2, 2), 4);
        assert_eq!(counts.get(1, 1), 2);
    }

    #[test]
    fn test_wrap_versus_zero_padding() {
        let grid = Grid::with_cells(5, 5, &[(0, 4), (4, 0), (4, 4)]);
        let kernel = Kernel::default();

        let wrapped = count_neighbors(&grid, &kernel, Boundary::Toroidal);
        assert_eq!(wrapped.get(0, 0), 3);
        assert_eq!(wrapped.get(4, 3), 2);

        let padded = count_neighbors(&grid, &kernel, Boundary::ZeroPadded);
        assert_eq!(padded.get(0, 0), 0);
        assert_eq!(padded.get(3, 3), 1);
        assert_eq!(padded.get(4, 3), 1);
    }

    #[test]
    fn test_full_grid_hits_maximum() {
        let grid = Grid::random(7, 7, 1.0, 0).unwrap();
        for size in [3, 5, 7] {
            let kernel = Kernel::moore(size).unwrap();
            let counts = count_neighbors(&grid, &kernel, Boundary::Toroidal);
            assert!(counts.counts().iter().all(|&c| c == kernel.max_neighbor_count()));
        }
    }

    #[test]
    fn test_counts_bounded() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let width = rng.gen_range(7..20);
            let height = rng.gen_range(7..20);
            let density = rng.gen_range(0.0..=1.0);
            let grid = Grid::random(width, height, density, rng.gen_range(0..u64::MAX)).unwrap();
            for neighborhood in crate::kernel::Neighborhood::ALL {
                for size in [3, 5, 7] {
                    let kernel = Kernel::new(neighborhood, size).unwrap();
                    for boundary in [Boundary::Toroidal, Boundary::ZeroPadded] {
                        let counts = count_neighbors(&grid, &kernel, boundary);
                        assert!(counts.max() <= kernel.max_neighbor_count());
                    }
                }
            }
        }
    }

    #[test]
    fn test_boundary_serde_names() {
        let parsed: Boundary = serde_json::from_str("\"zero_padded\"").unwrap();
        assert_eq!(parsed, Boundary::ZeroPadded);
    }
}
