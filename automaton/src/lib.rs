//! Two-dimensional Boolean cellular automata with order/disorder statistics.
//!
//! A run evolves a [`Grid`] under a Birth/Survival [`RuleSpec`], counting
//! neighbors with a [`Kernel`] under a fixed [`Boundary`] policy. Each
//! generation is recorded by a [`StatisticsTracker`] (population and binary
//! Shannon entropy); at the end every cell is classified static or dynamic.
//!
//! ```
//! use automaton::{Boundary, Kernel, RuleSpec, Simulation, patterns::GLIDER};
//!
//! let rule: RuleSpec = "B3/S23".parse()?;
//! let sim = Simulation::new(GLIDER.centered(8, 8), rule, Kernel::default(), Boundary::Toroidal)?;
//!
//! let mut frames = sim.run(4);
//! for frame in frames.by_ref() {
//!     assert_eq!(frame.record.live_count, 5);
//! }
//! let report = frames.finish();
//! assert_eq!(report.records.len(), 5);
//! # Ok::<(), automaton::AutomatonError>(())
//! ```

pub mod config;
pub mod convolution;
pub mod engine;
pub mod error;
pub mod grid;
pub mod kernel;
pub mod patterns;
pub mod rule;
pub mod simulation;
pub mod stats;

pub use config::{ConfigError, SimulationConfig};
pub use convolution::{Boundary, count_neighbors};
pub use engine::{RuleEngine, step};
pub use error::{AutomatonError, Result};
pub use grid::{Grid, NeighborCounts};
pub use kernel::{Kernel, Neighborhood};
pub use patterns::Pattern;
pub use rule::{RuleLimits, RuleSpec};
pub use simulation::{Frame, Generations, Simulation, run};
pub use stats::{
    CellClass, Classification, RunReport, RunSummary, StatisticsRecord, StatisticsTracker,
    shannon_entropy,
};
