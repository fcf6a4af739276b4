//! Named seed patterns for initial configurations.

use crate::grid::Grid;

/// A named set of live cells, as `(row, col)` offsets from the pattern's
/// top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub const GLIDER: Pattern = Pattern {
    name: "Glider",
    cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
};

pub const PATTERNS: &[Pattern] = &[
    GLIDER,
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "Toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top half
            (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
            (2, 0), (2, 5), (2, 7), (2, 12),
            (3, 0), (3, 5), (3, 7), (3, 12),
            (4, 0), (4, 5), (4, 7), (4, 12),
            (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
            // Bottom half (mirrored)
            (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
            (8, 0), (8, 5), (8, 7), (8, 12),
            (9, 0), (9, 5), (9, 7), (9, 12),
            (10, 0), (10, 5), (10, 7), (10, 12),
            (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(0, 2), (1, 1), (1, 2), (2, 0), (2, 1)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (4, 0), (4, 1), (5, 0), (5, 1),
            (4, 10), (5, 10), (6, 10), (3, 11), (7, 11), (2, 12), (8, 12),
            (2, 13), (8, 13), (5, 14), (3, 15), (7, 15), (4, 16), (5, 16),
            (6, 16), (5, 17), (2, 20), (3, 20), (4, 20), (2, 21), (3, 21),
            (4, 21), (1, 22), (5, 22), (0, 24), (1, 24), (5, 24), (6, 24),
            (2, 34), (3, 34), (2, 35), (3, 35),
        ],
    },
];

impl Pattern {
    /// Looks a pattern up by name, ignoring case.
    pub fn find(name: &str) -> Option<&'static Pattern> {
        PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Rows spanned by the pattern.
    pub fn height(&self) -> usize {
        self.cells.iter().map(|&(row, _)| row + 1).max().unwrap_or(0)
    }

    /// Columns spanned by the pattern.
    pub fn width(&self) -> usize {
        self.cells.iter().map(|&(_, col)| col + 1).max().unwrap_or(0)
    }

    /// A copy of `grid` with the pattern's cells switched on, top-left corner
    /// at `(row, col)`. Cells falling outside the grid are dropped.
    pub fn place(&self, grid: &Grid, row: usize, col: usize) -> Grid {
        let mut alive = grid.live_cells();
        alive.extend(self.cells.iter().map(|&(r, c)| (row + r, col + c)));
        Grid::with_cells(grid.width(), grid.height(), &alive)
    }

    /// An otherwise empty `width × height` grid with the pattern centered.
    pub fn centered(&self, width: usize, height: usize) -> Grid {
        let row = height.saturating_sub(self.height()) / 2;
        let col = width.saturating_sub(self.width()) / 2;
        self.place(&Grid::new(width, height), row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_name() {
        assert_eq!(Pattern::find("glider"), Some(&GLIDER));
        assert_eq!(Pattern::find(" Gosper Glider Gun ").map(|p| p.cells.len()), Some(36));
        assert!(Pattern::find("spaceship").is_none());
    }

    #[test]
    fn test_bounds() {
        let pulsar = Pattern::find("Pulsar").unwrap();
        assert_eq!((pulsar.height(), pulsar.width()), (13, 13));
        assert_eq!((GLIDER.height(), GLIDER.width()), (3, 3));
    }

    #[test]
    fn test_place_and_clip() {
        let grid = GLIDER.place(&Grid::new(4, 4), 2, 2);
        // Everything but the top cell falls off the right or bottom edge.
        assert_eq!(grid.live_cells(), vec![(2, 3)]);

        let grid = GLIDER.place(&grid, 0, 0);
        assert_eq!(grid.live_count(), 6);
    }

    #[test]
    fn test_centered() {
        let grid = GLIDER.centered(5, 5);
        assert_eq!(grid.live_cells(), vec![(1, 2), (2, 3), (3, 1), (3, 2), (3, 3)]);
        assert_eq!(grid.live_count(), 5);
    }

    #[test]
    fn test_names_unique() {
        for (i, a) in PATTERNS.iter().enumerate() {
            for b in &PATTERNS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }
}
