//! Population, entropy and per-cell change statistics over a run.
//!
//! The tracker keeps only the previous grid and one "has changed" flag per
//! cell, never the full history. Comparing each generation with the one
//! before it gives the same static/dynamic classification as comparing
//! every recorded grid.

use crate::error::{AutomatonError, Result};
use crate::grid::Grid;

/// Binary Shannon entropy (bits) of a grid with `live` of `total` cells alive.
///
/// Uses `0·log2(0) = 0`, so an all-dead or all-live grid gives exactly 0.0
/// and a half-live grid exactly 1.0. Never NaN.
pub fn shannon_entropy(live: usize, total: usize) -> f64 {
    if total == 0 || live == 0 || live >= total {
        return 0.0;
    }
    let p = live as f64 / total as f64;
    let q = (total - live) as f64 / total as f64;
    -(p * p.log2()) - (q * q.log2())
}

/// One generation's statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatisticsRecord {
    pub generation: usize,
    pub live_count: usize,
    /// In `[0, 1]`.
    pub entropy: f64,
}

/// Whether a cell ever changed state during the recorded run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellClass {
    Static,
    Dynamic,
}

/// Per-cell [`CellClass`], row-major, same shape as the recorded grids.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Classification {
    width: usize,
    height: usize,
    classes: Vec<CellClass>,
}

impl Classification {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Class of a cell, `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<CellClass> {
        (row < self.height && col < self.width).then(|| self.classes[row * self.width + col])
    }

    pub fn classes(&self) -> &[CellClass] {
        &self.classes
    }

    pub fn static_count(&self) -> usize {
        self.classes.iter().filter(|&&c| c == CellClass::Static).count()
    }

    pub fn dynamic_count(&self) -> usize {
        self.classes.len() - self.static_count()
    }

    /// Coordinates of every dynamic cell, in row-major order.
    pub fn dynamic_cells(&self) -> Vec<(usize, usize)> {
        self.classes
            .iter()
            .enumerate()
            .filter(|(_, class)| **class == CellClass::Dynamic)
            .map(|(idx, _)| (idx / self.width, idx % self.width))
            .collect()
    }
}

/// Totals over the recorded generations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunSummary {
    /// Number of generations recorded, including generation 0.
    pub generations: usize,
    /// Cells that switched dead → alive between consecutive generations.
    pub total_births: usize,
    /// Cells that switched alive → dead between consecutive generations.
    pub total_deaths: usize,
    pub peak_population: usize,
    pub min_population: usize,
    pub mean_entropy: f64,
}

/// Everything a finished (or abandoned) run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub records: Vec<StatisticsRecord>,
    pub classification: Classification,
    pub summary: RunSummary,
}

/// Accumulates one [`StatisticsRecord`] per generation.
#[derive(Debug, Clone, Default)]
pub struct StatisticsTracker {
    records: Vec<StatisticsRecord>,
    previous: Option<Grid>,
    changed: Vec<bool>,
    births: usize,
    deaths: usize,
}

impl StatisticsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the statistics for `grid` and returns them.
    ///
    /// Every grid must have the shape of the first one recorded.
    pub fn record(&mut self, generation: usize, grid: &Grid) -> Result<StatisticsRecord> {
        match &self.previous {
            Some(prev) => {
                if !grid.same_shape(prev.width(), prev.height()) {
                    return Err(AutomatonError::dimensions(
                        format!("{}x{} like earlier generations", prev.width(), prev.height()),
                        grid.width(),
                        grid.height(),
                    ));
                }
                let pairs = prev.cells().iter().zip(grid.cells());
                for (flag, (&was, &is)) in self.changed.iter_mut().zip(pairs) {
                    if was != is {
                        *flag = true;
                        if is {
                            self.births += 1;
                        } else {
                            self.deaths += 1;
                        }
                    }
                }
            }
            None => self.changed = vec![false; grid.len()],
        }

        let live_count = grid.live_count();
        let record = StatisticsRecord {
            generation,
            live_count,
            entropy: shannon_entropy(live_count, grid.len()),
        };
        log::trace!(
            "generation {generation}: {live_count} live, entropy {:.4}",
            record.entropy
        );

        self.records.push(record);
        self.previous = Some(grid.clone());
        Ok(record)
    }

    /// Records in the order they were appended.
    pub fn records(&self) -> &[StatisticsRecord] {
        &self.records
    }

    pub fn population_history(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.live_count).collect()
    }

    pub fn entropy_history(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.entropy).collect()
    }

    /// Static/dynamic class of every cell over the generations recorded so
    /// far. Empty (0×0) before the first record.
    pub fn classify(&self) -> Classification {
        let Some(prev) = &self.previous else {
            return Classification::default();
        };
        let classes = self
            .changed
            .iter()
            .map(|&changed| if changed { CellClass::Dynamic } else { CellClass::Static })
            .collect();
        Classification {
            width: prev.width(),
            height: prev.height(),
            classes,
        }
    }

    pub fn summary(&self) -> RunSummary {
        let generations = self.records.len();
        let mean_entropy = if generations == 0 {
            0.0
        } else {
            self.records.iter().map(|r| r.entropy).sum::<f64>() / generations as f64
        };
        RunSummary {
            generations,
            total_births: self.births,
            total_deaths: self.deaths,
            peak_population: self.records.iter().map(|r| r.live_count).max().unwrap_or(0),
            min_population: self.records.iter().map(|r| r.live_count).min().unwrap_or(0),
            mean_entropy,
        }
    }

    /// Snapshot of everything recorded so far.
    pub fn report(&self) -> RunReport {
        RunReport {
            records: self.records.clone(),
            classification: self.classify(),
            summary: self.summary(),
        }
    }

    pub fn finish(self) -> RunReport {
        let classification = self.classify();
        let summary = self.summary();
        RunReport {
            records: self.records,
            classification,
            summary,
        }
    }
}
