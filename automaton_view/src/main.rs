// main.rs - Desktop viewer for the automaton engine
// Pulls one frame at a time from the engine's lazy generation sequence

use eframe::egui;
use egui::Color32;
use std::time::{Duration, Instant};

use automaton::patterns;
use automaton::{Generations, Grid, RunReport, SimulationConfig, StatisticsRecord};

mod chart; // Population / entropy plot
mod ui; // eframe::App implementation

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::load(&path).unwrap_or_else(|err| {
            log::error!("{err}; falling back to defaults");
            SimulationConfig::default()
        }),
        None => SimulationConfig::default(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1300.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "2D Cellular Automaton",
        options,
        Box::new(move |_cc| Box::new(AutomatonApp::new(config))),
    )
}

/// Viewer state. The simulation itself lives inside `frames`; the viewer
/// only keeps the latest frame for drawing.
pub struct AutomatonApp {
    config: SimulationConfig,
    frames: Option<Generations>,

    pub grid: Grid, // Latest frame, for rendering
    pub generation: usize,
    pub record: Option<StatisticsRecord>,
    pub report: Option<RunReport>,
    pub error: Option<String>,

    pub rule_text: String,
    pub is_running: bool,
    pub last_update: Instant,
    pub update_interval: Duration,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub dynamic_color: Color32,
    pub show_classification: bool,
    /// Index into `patterns::PATTERNS`; `None` means random fill.
    pub selected_pattern: Option<usize>,
}

impl AutomatonApp {
    fn new(config: SimulationConfig) -> Self {
        let selected_pattern = config
            .pattern
            .as_deref()
            .and_then(|name| {
                let name = name.trim();
                patterns::PATTERNS.iter().position(|p| p.name.eq_ignore_ascii_case(name))
            });

        let mut app = Self {
            rule_text: config.rule.clone(),
            grid: Grid::new(config.width, config.height),
            config,
            frames: None,
            generation: 0,
            record: None,
            report: None,
            error: None,
            is_running: false,
            last_update: Instant::now(),
            update_interval: Duration::from_millis(50),
            live_color: Color32::from_rgb(230, 230, 230),
            dead_color: Color32::from_rgb(20, 20, 20),
            dynamic_color: Color32::from_rgb(220, 60, 60),
            show_classification: false,
            selected_pattern,
        };

        match app.config.initial_grid() {
            Ok(grid) => app.restart(grid),
            Err(err) => app.fail(err),
        }
        app
    }

    fn fail(&mut self, err: impl std::fmt::Display) {
        log::warn!("{err}");
        self.error = Some(err.to_string());
        self.is_running = false;
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Statistics recorded so far in the current run.
    pub fn records(&self) -> &[StatisticsRecord] {
        match &self.frames {
            Some(frames) => frames.tracker().records(),
            None => &[],
        }
    }
}

/// Controls the UI module drives.
pub trait SimulationControls {
    fn step_generation(&mut self);
    fn restart(&mut self, initial: Grid);
    fn apply_rule(&mut self);
    fn apply_selected_pattern(&mut self);
    fn randomize(&mut self);
    fn clear_grid(&mut self);
    fn toggle_cell(&mut self, row: usize, col: usize);
}

impl SimulationControls for AutomatonApp {
    fn step_generation(&mut self) {
        let Some(frames) = self.frames.as_mut() else {
            return;
        };

        if let Some(frame) = frames.next() {
            self.generation = frame.generation;
            self.record = Some(frame.record);
            self.grid = frame.grid;
        }

        if frames.is_finished() && self.report.is_none() {
            let report = frames.report();
            log::info!(
                "run finished: {} generations, {} births, {} deaths, \
                 mean entropy {:.3}, {} dynamic cells",
                report.summary.generations,
                report.summary.total_births,
                report.summary.total_deaths,
                report.summary.mean_entropy,
                report.classification.dynamic_count()
            );
            self.report = Some(report);
            self.is_running = false;
        }
    }

    /// Sets up a fresh run from `initial` with the current configuration and
    /// shows its generation 0.
    fn restart(&mut self, initial: Grid) {
        self.frames = None;
        self.report = None;
        self.record = None;
        self.generation = 0;
        self.grid = initial.clone();

        let simulation = self.config.kernel().and_then(|kernel| {
            let rule = self.config.rule_spec(&kernel)?;
            Ok(automaton::Simulation::new(initial, rule, kernel, self.config.boundary)?)
        });

        match simulation {
            Ok(simulation) => {
                self.error = None;
                self.frames = Some(simulation.run(self.config.generations));
                self.step_generation();
            }
            Err(err) => self.fail(err),
        }
    }

    fn apply_rule(&mut self) {
        let previous = std::mem::replace(&mut self.config.rule, self.rule_text.trim().to_string());
        let checked = self
            .config
            .kernel()
            .and_then(|kernel| self.config.rule_spec(&kernel));
        if let Err(err) = checked {
            self.config.rule = previous;
            return self.fail(err);
        }
        log::info!("rule changed to {}", self.config.rule);
        self.restart(self.grid.clone());
    }

    fn apply_selected_pattern(&mut self) {
        match self.selected_pattern.and_then(|i| patterns::PATTERNS.get(i)) {
            Some(pattern) => {
                let grid = pattern.centered(self.config.width, self.config.height);
                self.restart(grid);
            }
            None => self.randomize(),
        }
    }

    fn randomize(&mut self) {
        // The configured seed only applies to the first fill.
        let seed = rand::random();
        match Grid::random(self.config.width, self.config.height, self.config.density, seed) {
            Ok(grid) => self.restart(grid),
            Err(err) => self.fail(err),
        }
    }

    fn clear_grid(&mut self) {
        self.restart(Grid::new(self.config.width, self.config.height));
    }

    fn toggle_cell(&mut self, row: usize, col: usize) {
        let edited = self.grid.toggled(row, col);
        self.restart(edited);
    }
}
