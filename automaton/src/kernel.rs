//! Neighborhood kernels.
//!
//! A kernel is a square, odd-sided weight matrix. The center weight is
//! always 0 so a cell never counts itself; every other entry is 1 when the
//! offset belongs to the neighborhood and 0 otherwise.

use serde::{Deserialize, Serialize};

use crate::error::{AutomatonError, Result};

/// Which offsets around a cell count as neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Neighborhood {
    /// Every cell in the surrounding square.
    #[default]
    Moore,
    /// Cells within Manhattan distance `radius`.
    VonNeumann,
}

impl Neighborhood {
    pub const ALL: [Neighborhood; 2] = [Neighborhood::Moore, Neighborhood::VonNeumann];

    pub fn name(self) -> &'static str {
        match self {
            Neighborhood::Moore => "Moore",
            Neighborhood::VonNeumann => "Von Neumann",
        }
    }

    fn includes(self, d_row: isize, d_col: isize, radius: isize) -> bool {
        if d_row == 0 && d_col == 0 {
            return false;
        }
        match self {
            Neighborhood::Moore => true,
            Neighborhood::VonNeumann => d_row.abs() + d_col.abs() <= radius,
        }
    }
}

/// Immutable neighbor weight matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kernel {
    neighborhood: Neighborhood,
    size: usize,
    weights: Vec<u8>,
    offsets: Vec<(isize, isize)>,
}

impl Kernel {
    /// Default side length, the classic 3×3 neighborhood.
    pub const DEFAULT_SIZE: usize = 3;

    /// Builds the kernel for `neighborhood` with side length `size`.
    ///
    /// `size` must be odd and at least 3.
    pub fn new(neighborhood: Neighborhood, size: usize) -> Result<Self> {
        if size < 3 || size % 2 == 0 {
            return Err(AutomatonError::InvalidKernelSize { size });
        }

        let radius = (size / 2) as isize;
        let mut weights = Vec::with_capacity(size * size);
        let mut offsets = Vec::new();
        for d_row in -radius..=radius {
            for d_col in -radius..=radius {
                let member = neighborhood.includes(d_row, d_col, radius);
                weights.push(member as u8);
                if member {
                    offsets.push((d_row, d_col));
                }
            }
        }

        log::debug!(
            "built {} kernel {size}x{size} with {} neighbors",
            neighborhood.name(),
            offsets.len()
        );

        Ok(Self {
            neighborhood,
            size,
            weights,
            offsets,
        })
    }

    pub fn moore(size: usize) -> Result<Self> {
        Self::new(Neighborhood::Moore, size)
    }

    pub fn von_neumann(size: usize) -> Result<Self> {
        Self::new(Neighborhood::VonNeumann, size)
    }

    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    /// Side length of the square matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from the center to an edge of the matrix.
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// Weight at matrix position `(row, col)`, 0 outside the matrix.
    pub fn weight(&self, row: usize, col: usize) -> u8 {
        if row < self.size && col < self.size {
            self.weights[row * self.size + col]
        } else {
            0
        }
    }

    /// Row-major weight matrix.
    pub fn weights(&self) -> &[u8] {
        &self.weights
    }

    /// Offsets `(d_row, d_col)` relative to the center that carry weight 1.
    pub fn offsets(&self) -> &[(isize, isize)] {
        &self.offsets
    }

    /// Largest count the kernel can produce: the sum of its weights.
    pub fn max_neighbor_count(&self) -> u16 {
        self.weights.iter().map(|&w| u16::from(w)).sum()
    }
}

impl Default for Kernel {
    #[rustfmt::skip]
    fn default() -> Self {
        Self {
            neighborhood: Neighborhood::Moore,
            size: 3,
            weights: vec![1, 1, 1, 1, 0, 1, 1, 1, 1],
            offsets: vec![
                (-1, -1), (-1, 0), (-1, 1),
                (0, -1),           (0, 1),
                (1, -1),  (1, 0),  (1, 1),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_moore_3() {
        assert_eq!(Kernel::default(), Kernel::moore(3).unwrap());
        assert_eq!(Kernel::default().max_neighbor_count(), 8);
    }

    #[test]
    fn test_invalid_sizes() {
        for size in [0, 1, 2, 4, 6] {
            assert_eq!(
                Kernel::moore(size).unwrap_err(),
                AutomatonError::InvalidKernelSize { size }
            );
        }
    }

    #[test]
    fn test_center_excluded() {
        for neighborhood in Neighborhood::ALL {
            for size in [3, 5, 7] {
                let kernel = Kernel::new(neighborhood, size).unwrap();
                let c = kernel.radius();
                assert_eq!(kernel.weight(c, c), 0);
                assert!(!kernel.offsets().contains(&(0, 0)));
            }
        }
    }

    #[test]
    fn test_neighbor_totals() {
        assert_eq!(Kernel::moore(5).unwrap().max_neighbor_count(), 24);
        assert_eq!(Kernel::von_neumann(3).unwrap().max_neighbor_count(), 4);
        assert_eq!(Kernel::von_neumann(5).unwrap().max_neighbor_count(), 12);
        assert_eq!(Kernel::von_neumann(7).unwrap().max_neighbor_count(), 24);
    }

    #[test]
    fn test_von_neumann_shape() {
        let kernel = Kernel::von_neumann(5).unwrap();
        #[rustfmt::skip]
        let expected: [u8; 25] = [
            0, 0, 1, 0, 0,
            0, 1, 1, 1, 0,
            1, 1, 0, 1, 1,
            0, 1, 1, 1, 0,
            0, 0, 1, 0, 0,
        ];
        assert_eq!(kernel.weights(), &expected);
        assert_eq!(kernel.weight(9, 9), 0);
    }

    #[test]
    fn test_neighborhood_serde_names() {
        let json = serde_json::to_string(&Neighborhood::VonNeumann).unwrap();
        assert_eq!(json, "\"von_neumann\"");
        let parsed: Neighborhood = serde_json::from_str("\"moore\"").unwrap();
        assert_eq!(parsed, Neighborhood::Moore);
    }
}
