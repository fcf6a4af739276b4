//! The generation loop.
//!
//! A [`Simulation`] is validated once at setup. [`Simulation::run`] turns it
//! into [`Generations`], a lazy iterator that computes generation `n + 1`
//! only when the consumer asks for it. Dropping the iterator early is a
//! clean cancellation: every yielded frame is already final.

use crate::convolution::Boundary;
use crate::engine::RuleEngine;
use crate::error::{AutomatonError, Result};
use crate::grid::Grid;
use crate::kernel::Kernel;
use crate::rule::RuleSpec;
use crate::stats::{RunReport, StatisticsRecord, StatisticsTracker};

/// One generation as handed to a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub generation: usize,
    pub grid: Grid,
    pub record: StatisticsRecord,
}

/// A validated initial grid plus the rule engine that will evolve it.
#[derive(Debug, Clone)]
pub struct Simulation {
    initial: Grid,
    engine: RuleEngine,
}

impl Simulation {
    /// Validates the configuration; nothing is checked after this point.
    ///
    /// Fails with [`AutomatonError::RuleOutOfRange`] when a threshold cannot
    /// be reached with `kernel`, and with [`AutomatonError::DimensionMismatch`]
    /// when the grid is empty or, on a torus, smaller than the kernel.
    pub fn new(initial: Grid, rule: RuleSpec, kernel: Kernel, boundary: Boundary) -> Result<Self> {
        rule.check_range(&rule.to_string(), kernel.max_neighbor_count())?;

        if initial.is_empty() {
            return Err(AutomatonError::dimensions(
                "a non-empty grid",
                initial.width(),
                initial.height(),
            ));
        }
        let size = kernel.size();
        if boundary == Boundary::Toroidal && (initial.width() < size || initial.height() < size) {
            return Err(AutomatonError::dimensions(
                format!("at least {size}x{size} for a toroidal {size}x{size} kernel"),
                initial.width(),
                initial.height(),
            ));
        }

        log::info!(
            "simulation ready: {}x{} grid, rule {}, {} kernel {size}x{size}, {} boundary",
            initial.width(),
            initial.height(),
            rule,
            kernel.neighborhood().name(),
            boundary.name()
        );

        Ok(Self {
            initial,
            engine: RuleEngine::new(rule, kernel, boundary),
        })
    }

    pub fn initial(&self) -> &Grid {
        &self.initial
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// Consumes the simulation and returns the lazy sequence of
    /// `generations + 1` frames, generation 0 being the initial grid.
    pub fn run(self, generations: usize) -> Generations {
        Generations {
            engine: self.engine,
            initial: Some(self.initial),
            previous: None,
            next_generation: 0,
            last_generation: generations,
            finished: false,
            tracker: StatisticsTracker::new(),
        }
    }
}

/// Lazy, finite, single-pass sequence of [`Frame`]s.
#[derive(Debug)]
pub struct Generations {
    engine: RuleEngine,
    /// Generation 0, until it is yielded.
    initial: Option<Grid>,
    /// Last yielded grid; its successor is computed on the next pull.
    previous: Option<Grid>,
    next_generation: usize,
    last_generation: usize,
    finished: bool,
    tracker: StatisticsTracker,
}

impl Generations {
    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// Statistics recorded so far.
    pub fn tracker(&self) -> &StatisticsTracker {
        &self.tracker
    }

    /// Frames not yet yielded, or `None` when the count does not fit in a
    /// `usize` (a run of `usize::MAX` generations before its first pull).
    pub fn remaining(&self) -> Option<usize> {
        if self.finished {
            Some(0)
        } else {
            (self.last_generation - self.next_generation).checked_add(1)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Report over the frames yielded so far.
    pub fn report(&self) -> RunReport {
        self.tracker.report()
    }

    /// Ends the run, possibly early, and returns its report.
    pub fn finish(self) -> RunReport {
        if !self.is_finished() {
            log::debug!(
                "run stopped before generation {}, last requested {}",
                self.next_generation,
                self.last_generation
            );
        }
        self.tracker.finish()
    }
}

impl Iterator for Generations {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.finished {
            return None;
        }
        let generation = self.next_generation;
        let grid = match self.initial.take() {
            Some(initial) => initial,
            None => self.engine.advance(self.previous.as_ref()?),
        };

        let record = match self.tracker.record(generation, &grid) {
            Ok(record) => record,
            Err(err) => {
                // The engine preserves shape, so this means a broken invariant.
                log::error!("generation {generation} rejected by statistics: {err}");
                self.finished = true;
                return None;
            }
        };

        if generation == self.last_generation {
            self.finished = true;
            self.previous = None;
            log::debug!("run complete at generation {generation}");
        } else {
            self.next_generation += 1;
            self.previous = Some(grid.clone());
        }

        Some(Frame {
            generation,
            grid,
            record,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining() {
            Some(remaining) => (remaining, Some(remaining)),
            None => (usize::MAX, None),
        }
    }
}

impl std::iter::FusedIterator for Generations {}

/// Sets up a simulation, runs it to completion, and returns the report.
pub fn run(
    initial: Grid,
    rule: RuleSpec,
    kernel: Kernel,
    boundary: Boundary,
    generations: usize,
) -> Result<RunReport> {
    let mut frames = Simulation::new(initial, rule, kernel, boundary)?.run(generations);
    frames.by_ref().for_each(drop);
    Ok(frames.finish())
}
