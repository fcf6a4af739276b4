//! Applies a B/S rule to produce the next generation.

use crate::convolution::{Boundary, count_neighbors};
use crate::error::{AutomatonError, Result};
use crate::grid::{Grid, NeighborCounts};
use crate::kernel::Kernel;
use crate::rule::RuleSpec;

/// Computes the next grid from the current grid and its neighbor counts.
///
/// Every cell is updated from the same snapshot: a dead cell whose count is
/// in the birth set comes alive, a live cell whose count is in the survival
/// set stays alive, everything else is dead.
///
/// Fails with [`AutomatonError::DimensionMismatch`] when `counts` was not
/// computed for a grid of this shape.
pub fn step(grid: &Grid, counts: &NeighborCounts, rule: &RuleSpec) -> Result<Grid> {
    if !grid.same_shape(counts.width(), counts.height()) {
        return Err(AutomatonError::dimensions(
            format!("neighbor counts for {}x{}", grid.width(), grid.height()),
            counts.width(),
            counts.height(),
        ));
    }
    Ok(transition(grid, counts, rule))
}

fn transition(grid: &Grid, counts: &NeighborCounts, rule: &RuleSpec) -> Grid {
    let max = counts.max();
    let (birth, survival) = rule.lookup(max);
    let cells = grid
        .cells()
        .iter()
        .zip(counts.counts())
        .map(|(&alive, &n)| if alive { survival[n as usize] } else { birth[n as usize] })
        .collect();

    Grid::from_raw(grid.width(), grid.height(), cells)
}

/// Rule, kernel and boundary of one run, passed around explicitly.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rule: RuleSpec,
    kernel: Kernel,
    boundary: Boundary,
}

impl RuleEngine {
    pub fn new(rule: RuleSpec, kernel: Kernel, boundary: Boundary) -> Self {
        Self { rule, kernel, boundary }
    }

    pub fn rule(&self) -> &RuleSpec {
        &self.rule
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Neighbor counts for `grid` under this engine's kernel and boundary.
    pub fn neighbors(&self, grid: &Grid) -> NeighborCounts {
        count_neighbors(grid, &self.kernel, self.boundary)
    }

    /// Convolution followed by [`step`]. `grid` is left untouched.
    pub fn advance(&self, grid: &Grid) -> Grid {
        // Counts come from `grid` itself, so the shapes agree.
        let counts = self.neighbors(grid);
        transition(grid, &counts, &self.rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::presets;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn life() -> RuleEngine {
        RuleEngine::new(
            presets::LIFE.parse().unwrap(),
            Kernel::default(),
            Boundary::Toroidal,
        )
    }

    #[test]
    fn test_blinker_oscillates() {
        let engine = life();
        let horizontal = Grid::with_cells(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let vertical = Grid::with_cells(5, 5, &[(1, 2), (2, 2), (3, 2)]);

        assert_eq!(engine.advance(&horizontal), vertical);
        assert_eq!(engine.advance(&vertical), horizontal);
    }

    #[test]
    fn test_block_is_still() {
        let engine = life();
        let block = Grid::with_cells(6, 6, &[(1, 1), (1, 2), (2, 1), (2, 2)]);
        assert_eq!(engine.advance(&block), block);
    }

    #[test]
    fn test_step_uses_given_counts() {
        let grid = Grid::from_rows(&["#..", "...", "..."]).unwrap();
        let counts = NeighborCounts::from_counts(3, 3, vec![3, 3, 0, 2, 0, 0, 0, 0, 0]);
        let rule: RuleSpec = "B3/S2".parse().unwrap();

        let next = step(&grid, &counts, &rule).unwrap();
        // (0,0) alive with 3: dies; (0,1) dead with 3: born; (1,0) dead with 2: stays dead
        assert_eq!(next.live_cells(), vec![(0, 1)]);
    }

    #[test]
    fn test_step_rejects_foreign_counts() {
        let grid = Grid::new(3, 3);
        let counts = count_neighbors(&Grid::new(4, 4), &Kernel::default(), Boundary::Toroidal);
        let err = step(&grid, &counts, &presets::LIFE.parse().unwrap()).unwrap_err();
        assert_eq!(
            err,
            AutomatonError::DimensionMismatch {
                expected: "neighbor counts for 3x3".into(),
                width: 4,
                height: 4,
            }
        );
    }

    #[test]
    fn test_seeds_kills_every_live_cell() {
        let engine = RuleEngine::new(
            presets::SEEDS.parse().unwrap(),
            Kernel::default(),
            Boundary::Toroidal,
        );
        let grid = Grid::random(16, 16, 0.4, 3).unwrap();
        let next = engine.advance(&grid);
        for (row, col) in grid.live_cells() {
            assert!(!next.get(row, col), "({row}, {col}) survived");
        }
    }

    #[test]
    fn test_advance_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(11);
        for (_, rule) in presets::ALL {
            let engine =
                RuleEngine::new(rule.parse().unwrap(), Kernel::default(), Boundary::ZeroPadded);
            let grid = Grid::random(12, 9, 0.35, rng.gen_range(0..1000)).unwrap();
            let before = grid.clone();
            assert_eq!(engine.advance(&grid), engine.advance(&grid));
            assert_eq!(grid, before);
        }
    }

    #[test]
    fn test_von_neumann_rule() {
        // B1/S on a plus-shaped neighborhood grows a diamond from one seed.
        let engine = RuleEngine::new(
            "B1/S".parse().unwrap(),
            Kernel::von_neumann(3).unwrap(),
            Boundary::ZeroPadded,
        );
        let seed = Grid::with_cells(5, 5, &[(2, 2)]);
        let next = engine.advance(&seed);
        assert_eq!(next.live_cells(), vec![(1, 2), (2, 1), (2, 3), (3, 2)]);
    }
}
