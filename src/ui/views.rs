use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter;
use crate::data::model::{ColumnRoleMap, ScoreTable, GRADING_COLUMN, NAME_COLUMN};
use crate::state::{AppState, Page};
use crate::ui::plot;

/// How many individuals the Top Performers table shows.
const TOP_PERFORMERS: usize = 4;

// ---------------------------------------------------------------------------
// Central panel – the selected page
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading(state.page.title());
    ui.separator();

    let Some((table, roles)) = state.table.clone().zip(state.roles.clone()) else {
        error_screen(ui, state);
        return;
    };

    match state.page {
        Page::IndividualScores => individual_view(ui, state, &table, &roles),
        Page::TeamResults => team_view(ui, state, &table, &roles),
    }
}

/// Shown when no table is loaded: an explicit error state instead of an
/// empty dashboard.
fn error_screen(ui: &mut Ui, state: &mut AppState) {
    let message = state.status_message.clone();
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(80.0);
        ui.heading("Could not load score data");
        if let Some(msg) = message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
        ui.add_space(8.0);
        if ui.button("Retry").clicked() {
            state.reload();
        }
    });
}

// ---------------------------------------------------------------------------
// Individual Scores page
// ---------------------------------------------------------------------------

fn individual_view(ui: &mut Ui, state: &AppState, table: &ScoreTable, roles: &ColumnRoleMap) {
    let Some(name) = state.selected_name.clone() else {
        ui.label("No individual available for this grading.");
        return;
    };

    let view = filter::apply_criteria(table, &roles.total, &state.individual_criteria());
    if view.is_empty() {
        ui.label("No individual available for this grading.");
        return;
    }

    ui.label(format!("Scores for {name}:"));
    ui.add_space(4.0);

    let columns = [
        NAME_COLUMN,
        roles.total.as_str(),
        roles.interview.as_str(),
        roles.exam.as_str(),
        GRADING_COLUMN,
    ];
    score_table(ui, "individual", &view, &columns);
}

// ---------------------------------------------------------------------------
// Overall Team Results page
// ---------------------------------------------------------------------------

fn team_view(ui: &mut Ui, state: &AppState, table: &ScoreTable, roles: &ColumnRoleMap) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Key Performance Indicators (KPIs)");
            ui.add_space(4.0);
            match filter::aggregate(table, &roles.total) {
                Ok(agg) => {
                    ui.columns(3, |cols: &mut [Ui]| {
                        metric(&mut cols[0], "Team Average", format!("{:.2}", agg.mean));
                        metric(&mut cols[1], "Max Score", fmt_score(agg.max));
                        metric(&mut cols[2], "Min Score", fmt_score(agg.min));
                    });
                }
                Err(e) => {
                    ui.label(RichText::new(e.to_string()).color(Color32::RED));
                }
            }

            ui.add_space(8.0);
            ui.separator();
            ui.strong("Total Marks of Each Individual");
            plot::total_bar_chart(ui, table, roles);

            ui.separator();
            ui.strong("Filtered Team Members Table");
            let view = filter::apply_criteria(table, &roles.total, &state.team_criteria());
            let columns = [NAME_COLUMN, roles.total.as_str(), GRADING_COLUMN];
            score_table(ui, "filtered_team", &view, &columns);

            ui.separator();
            ui.strong(format!("Top Performers (Top {TOP_PERFORMERS})"));
            match filter::top_n(table, &roles.total, TOP_PERFORMERS) {
                Ok(top) => score_table(ui, "top_performers", &top, &columns),
                Err(e) => {
                    ui.label(RichText::new(e.to_string()).color(Color32::RED));
                }
            }
        });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.label(label);
        ui.strong(RichText::new(value).size(20.0));
    });
}

fn fmt_score(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

// ---------------------------------------------------------------------------
// Shared table rendering
// ---------------------------------------------------------------------------

fn score_table(ui: &mut Ui, id: &str, table: &ScoreTable, columns: &[&str]) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .columns(Column::auto().resizable(true), columns.len())
            .header(20.0, |mut header| {
                for column in columns {
                    header.col(|ui| {
                        ui.strong(*column);
                    });
                }
            })
            .body(|mut body| {
                for record in &table.records {
                    body.row(18.0, |mut row| {
                        for column in columns {
                            row.col(|ui| {
                                ui.label(record.display(column));
                            });
                        }
                    });
                }
            });
    });
}
