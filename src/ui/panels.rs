use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter;
use crate::data::model::{GradeFilter, GRADES};
use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – page navigation and filter widgets
// ---------------------------------------------------------------------------

/// Render the left navigation/filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Choose Page");
    ui.separator();

    for page in Page::ALL {
        if ui
            .selectable_label(state.page == page, page.title())
            .clicked()
        {
            state.page = page;
        }
    }

    ui.separator();

    if state.table.is_none() {
        ui.label("No score data loaded.");
        return;
    }

    match state.page {
        Page::IndividualScores => individual_controls(ui, state),
        Page::TeamResults => team_controls(ui, state),
    }
}

fn individual_controls(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Filter by Performance Grading");
    if grade_combo(ui, "individual_grade", &mut state.individual_grade) {
        state.fix_selection();
    }

    ui.add_space(8.0);
    ui.strong("Select Individual");

    let names = match &state.table {
        Some(table) => filter::filter_by_grade(table, &state.individual_grade).names(),
        None => Vec::new(),
    };
    let current = state.selected_name.clone().unwrap_or_default();
    egui::ComboBox::from_id_salt("individual_name")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for name in &names {
                if ui.selectable_label(current == *name, name).clicked() {
                    state.selected_name = Some(name.clone());
                }
            }
        });
}

fn team_controls(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Select score range");
    let (lo, hi) = state.score_bounds;
    ui.add(egui::Slider::new(&mut state.score_range.0, lo..=hi).text("Min"));
    ui.add(egui::Slider::new(&mut state.score_range.1, lo..=hi).text("Max"));
    // Keep the range well-formed when the handles cross.
    if state.score_range.0 > state.score_range.1 {
        state.score_range.1 = state.score_range.0;
    }

    ui.add_space(8.0);
    ui.strong("Select Performance Grading");
    grade_combo(ui, "team_grade", &mut state.team_grade);
}

/// Dropdown over `All` plus the three grading categories.  Returns whether
/// the selection changed.
fn grade_combo(ui: &mut Ui, id: &str, value: &mut GradeFilter) -> bool {
    let mut changed = false;
    egui::ComboBox::from_id_salt(id)
        .selected_text(value.label().to_string())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(*value == GradeFilter::All, "All")
                .clicked()
            {
                *value = GradeFilter::All;
                changed = true;
            }
            for grade in GRADES {
                let selected = matches!(value, GradeFilter::Only(g) if g == grade);
                if ui.selectable_label(selected, grade).clicked() {
                    *value = GradeFilter::Only(grade.to_string());
                    changed = true;
                }
            }
        });
    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Data", |ui: &mut Ui| {
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if state.loading {
            ui.spinner();
        }

        if let Some(table) = &state.table {
            ui.label(format!("{} individuals loaded", table.len()));
            ui.separator();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
