use std::ops::RangeInclusive;

use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, GridMark, Plot};

use crate::color::pastel_palette;
use crate::data::filter::sort_for_display;
use crate::data::model::{ColumnRoleMap, ScoreTable};

// ---------------------------------------------------------------------------
// Bar chart of team totals (central panel)
// ---------------------------------------------------------------------------

/// Render every individual's total as a bar, highest first.  Display
/// ordering only; the table passed in keeps its worksheet order.
pub fn total_bar_chart(ui: &mut Ui, table: &ScoreTable, roles: &ColumnRoleMap) {
    let sorted = sort_for_display(table, &roles.total);
    if sorted.is_empty() {
        ui.label("Nothing to chart.");
        return;
    }

    let palette = pastel_palette(sorted.len());
    let bars: Vec<Bar> = sorted
        .records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let total = record.numeric(&roles.total).unwrap_or(0.0);
            Bar::new(i as f64, total)
                .name(&record.name)
                .width(0.75)
                .fill(palette[i])
        })
        .collect();

    let names: Vec<String> = sorted.records.iter().map(|r| r.name.clone()).collect();

    Plot::new("team_totals")
        .x_axis_label("Individual")
        .y_axis_label("Total Marks")
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            // Only whole bar positions get a name label.
            let index = mark.value.round();
            if (mark.value - index).abs() > 1e-6 || index < 0.0 {
                return String::new();
            }
            names.get(index as usize).cloned().unwrap_or_default()
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .height(280.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}
