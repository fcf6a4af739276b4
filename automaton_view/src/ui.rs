// ui.rs - Grid animation, controls and statistics panel

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use std::time::{Duration, Instant};

use crate::{AutomatonApp, SimulationControls, chart};
use automaton::patterns;
use automaton::rule::presets;
use automaton::{CellClass, shannon_entropy};

impl eframe::App for AutomatonApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pull the next frame when running
        if self.is_running && self.last_update.elapsed() >= self.update_interval {
            self.step_generation();
            self.last_update = Instant::now();
            ctx.request_repaint();
        }

        egui::SidePanel::right("statistics").min_width(420.0).show(ctx, |ui| {
            self.statistics_panel(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(format!("2D Cellular Automaton (Rule {})", self.config().rule));

            self.controls(ui);

            ui.separator();

            if let Some(error) = &self.error {
                ui.colored_label(Color32::from_rgb(240, 90, 90), error.as_str());
                ui.separator();
            }

            ui.label(
                "Click cells while paused to toggle them; the run restarts from the edited grid.",
            );

            ui.separator();

            self.draw_grid(ui);
        });

        if self.is_running {
            ctx.request_repaint();
        }
    }
}

impl AutomatonApp {
    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let finished = self.report.is_some();
            let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
            if ui.add_enabled(!finished, egui::Button::new(button_text)).clicked() {
                self.is_running = !self.is_running;
                if self.is_running {
                    self.last_update = Instant::now();
                }
            }

            let can_step = !self.is_running && !finished;
            if ui.add_enabled(can_step, egui::Button::new("⏭ Step")).clicked() {
                self.step_generation();
            }

            if ui.button("⏹ Clear").clicked() {
                self.is_running = false;
                self.clear_grid();
            }

            if ui.button("🎲 Random").clicked() {
                self.is_running = false;
                self.randomize();
            }

            ui.separator();

            // Pattern dropdown
            ui.label("Pattern:");
            let selected_name = self
                .selected_pattern
                .and_then(|i| patterns::PATTERNS.get(i))
                .map_or("Random fill", |p| p.name);
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(selected_name)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.selected_pattern, None, "Random fill");
                    for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, Some(i), pattern.name);
                    }
                });

            if ui.button("Apply Pattern").clicked() {
                self.is_running = false;
                self.apply_selected_pattern();
            }
        });

        ui.horizontal(|ui| {
            ui.label("Rule:");
            let edit = ui.add(egui::TextEdit::singleline(&mut self.rule_text).desired_width(120.0));
            let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            egui::ComboBox::from_id_source("rule_presets")
                .selected_text("Presets")
                .show_ui(ui, |ui| {
                    for (name, rule) in presets::ALL {
                        if ui.selectable_label(false, format!("{name} ({rule})")).clicked() {
                            self.rule_text = rule.to_string();
                        }
                    }
                });

            if ui.button("Apply Rule").clicked() || submitted {
                self.is_running = false;
                self.apply_rule();
            }

            ui.separator();

            // Speed control
            ui.label("Speed:");
            let mut speed = 1000.0 / self.update_interval.as_millis().max(1) as f32;
            if ui.add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec")).changed() {
                self.update_interval = Duration::from_millis((1000.0 / speed) as u64);
            }
        });

        ui.horizontal(|ui| {
            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);
            ui.label("Dynamic:");
            ui.color_edit_button_srgba(&mut self.dynamic_color);

            ui.separator();

            let can_classify = self.report.is_some();
            ui.add_enabled(
                can_classify,
                egui::Checkbox::new(&mut self.show_classification, "Show static/dynamic cells"),
            );

            ui.separator();

            let config = self.config();
            ui.label(format!(
                "{}x{} · {} {}x{} · {}",
                config.width,
                config.height,
                config.neighborhood.name(),
                config.kernel_size,
                config.kernel_size,
                config.boundary.name()
            ));
        });
    }

    fn draw_grid(&mut self, ui: &mut egui::Ui) {
        let (width, height) = (self.grid.width(), self.grid.height());
        if width == 0 || height == 0 {
            return;
        }

        let available = ui.available_size();
        let box_size = (available.x / width as f32)
            .min(available.y / height as f32)
            .clamp(1.0, 15.0);
        let spacing = if box_size >= 6.0 { 0.5 } else { 0.0 };

        let start_pos = ui.cursor().min;
        let total_size = Vec2::new(width as f32 * box_size, height as f32 * box_size);
        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

        // Fill background with the dead color, then paint only what differs
        painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, self.dead_color);

        let classification = match (&self.report, self.show_classification) {
            (Some(report), true) => Some(&report.classification),
            _ => None,
        };

        for row in 0..height {
            for col in 0..width {
                let alive = self.grid.get(row, col);
                let dynamic =
                    classification.and_then(|c| c.get(row, col)) == Some(CellClass::Dynamic);

                let cell_color = match (alive, dynamic) {
                    (_, true) => self.dynamic_color,
                    (true, false) => self.live_color,
                    (false, false) => continue,
                };

                let rect = Rect::from_min_size(
                    egui::pos2(
                        start_pos.x + col as f32 * box_size,
                        start_pos.y + row as f32 * box_size,
                    ),
                    Vec2::splat(box_size - spacing),
                );
                painter.rect_filled(rect, 0.0, cell_color);
            }
        }

        if box_size >= 6.0 {
            painter.rect_stroke(
                Rect::from_min_size(start_pos, total_size),
                0.0,
                Stroke::new(0.5, Color32::from_gray(60)),
            );
        }

        // Handle clicking (only when not running)
        if !self.is_running && response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let col = ((pos.x - start_pos.x) / box_size) as usize;
                let row = ((pos.y - start_pos.y) / box_size) as usize;
                if row < height && col < width {
                    self.toggle_cell(row, col);
                }
            }
        }
    }

    fn statistics_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Population Decay & Entropy Over Time");

        let size = Vec2::new(ui.available_width(), 320.0);
        chart::population_entropy(ui, self.records(), size);

        ui.separator();

        let total = self.grid.len();
        let live_cells = self.record.map_or_else(|| self.grid.live_count(), |r| r.live_count);
        let entropy = self
            .record
            .map_or_else(|| shannon_entropy(live_cells, total), |r| r.entropy);

        ui.label(format!("Generation: {} / {}", self.generation, self.config().generations));
        ui.horizontal(|ui| {
            ui.label(format!("Live cells: {live_cells}"));
            ui.label(format!("Dead cells: {}", total - live_cells));
            ui.label(format!(
                "Population: {:.1}%",
                live_cells as f32 / total.max(1) as f32 * 100.0
            ));
        });
        ui.colored_label(chart::ENTROPY_COLOR, format!("Shannon entropy: {entropy:.4}"));

        if let Some(report) = &self.report {
            ui.separator();
            ui.heading("Run summary");
            let summary = &report.summary;
            egui::Grid::new("run_summary").striped(true).show(ui, |ui| {
                ui.label("Generations recorded");
                ui.label(summary.generations.to_string());
                ui.end_row();
                ui.label("Births / deaths");
                ui.label(format!("{} / {}", summary.total_births, summary.total_deaths));
                ui.end_row();
                ui.label("Population min / peak");
                ui.label(format!("{} / {}", summary.min_population, summary.peak_population));
                ui.end_row();
                ui.label("Mean entropy");
                ui.label(format!("{:.4}", summary.mean_entropy));
                ui.end_row();
                ui.label("Static / dynamic cells");
                ui.label(format!(
                    "{} / {}",
                    report.classification.static_count(),
                    report.classification.dynamic_count()
                ));
                ui.end_row();
            });
        }
    }
}
