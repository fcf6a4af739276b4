// chart.rs - Population decay & entropy over time

use automaton::StatisticsRecord;
use egui::{Align2, Color32, FontId, Pos2, Shape, Stroke, Vec2, pos2};

pub const POPULATION_COLOR: Color32 = Color32::from_rgb(70, 130, 230);
pub const ENTROPY_COLOR: Color32 = Color32::from_rgb(220, 60, 60);

/// Draws live cells (solid, left scale) and entropy (dashed, right scale
/// fixed to [0, 1]) against generation.
pub fn population_entropy(ui: &mut egui::Ui, records: &[StatisticsRecord], size: Vec2) {
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let rect = response.rect;
    let font = FontId::proportional(12.0);

    painter.rect_filled(rect, 0.0, Color32::from_gray(25));
    painter.rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::from_gray(80)));

    if records.len() < 2 {
        painter.text(rect.center(), Align2::CENTER_CENTER, "waiting for data", font, Color32::GRAY);
        return;
    }

    let plot = rect.shrink2(Vec2::new(40.0, 22.0));
    let last = records.len() - 1;
    let peak = records.iter().map(|r| r.live_count).max().unwrap_or(0).max(1);
    let x_at = |i: usize| plot.left() + plot.width() * i as f32 / last as f32;
    let y_at = |fraction: f32| plot.bottom() - plot.height() * fraction.clamp(0.0, 1.0);

    let population: Vec<Pos2> = records
        .iter()
        .enumerate()
        .map(|(i, r)| pos2(x_at(i), y_at(r.live_count as f32 / peak as f32)))
        .collect();
    let entropy: Vec<Pos2> = records
        .iter()
        .enumerate()
        .map(|(i, r)| pos2(x_at(i), y_at(r.entropy as f32)))
        .collect();

    painter.add(Shape::line(population, Stroke::new(1.5, POPULATION_COLOR)));
    painter.extend(Shape::dashed_line(&entropy, Stroke::new(1.5, ENTROPY_COLOR), 6.0, 4.0));

    // Axes labels
    painter.text(
        rect.left_top() + Vec2::new(4.0, 4.0),
        Align2::LEFT_TOP,
        format!("Live Cells (max {peak})"),
        font.clone(),
        POPULATION_COLOR,
    );
    painter.text(
        rect.right_top() + Vec2::new(-4.0, 4.0),
        Align2::RIGHT_TOP,
        "Entropy",
        font.clone(),
        ENTROPY_COLOR,
    );
    painter.text(
        rect.center_bottom() + Vec2::new(0.0, -4.0),
        Align2::CENTER_BOTTOM,
        format!("Time Step (0..{last})"),
        font.clone(),
        Color32::GRAY,
    );

    // Latest entropy value next to the last point
    if let (Some(point), Some(record)) = (entropy.last(), records.last()) {
        painter.text(
            *point + Vec2::new(-4.0, -4.0),
            Align2::RIGHT_BOTTOM,
            format!("{:.2}", record.entropy),
            font,
            ENTROPY_COLOR,
        );
    }
}
