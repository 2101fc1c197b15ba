use crate::data::filter;
use crate::data::loader;
use crate::data::model::{ColumnRoleMap, FilterCriteria, GradeFilter, ScoreTable};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The two dashboard pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    IndividualScores,
    TeamResults,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::IndividualScores, Page::TeamResults];

    pub fn title(self) -> &'static str {
        match self {
            Page::IndividualScores => "Individual Scores",
            Page::TeamResults => "Overall Team Results",
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub source_url: String,
    pub sheet_name: String,

    /// Loaded table (None until the first successful load).
    pub table: Option<ScoreTable>,
    /// Resolved score columns, built together with the table.
    pub roles: Option<ColumnRoleMap>,

    pub page: Page,

    // -- Individual Scores controls --
    pub individual_grade: GradeFilter,
    pub selected_name: Option<String>,

    // -- Overall Team Results controls --
    pub team_grade: GradeFilter,
    /// Current slider positions, inclusive.
    pub score_range: (f64, f64),
    /// Data-derived limits for the range sliders.
    pub score_bounds: (f64, f64),

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a load is in progress.
    pub loading: bool,
}

impl AppState {
    pub fn new(source_url: &str, sheet_name: &str) -> Self {
        Self {
            source_url: source_url.to_string(),
            sheet_name: sheet_name.to_string(),
            table: None,
            roles: None,
            page: Page::IndividualScores,
            individual_grade: GradeFilter::All,
            selected_name: None,
            team_grade: GradeFilter::All,
            score_range: (0.0, 100.0),
            score_bounds: (0.0, 100.0),
            status_message: None,
            loading: false,
        }
    }

    /// Fetch and parse the workbook, replacing the current table on success.
    ///
    /// On failure the previous table (if any) stays usable, but the error is
    /// always surfaced; a failed startup load leaves the dashboard in an
    /// explicit error state instead of running on an undefined table.
    pub fn reload(&mut self) {
        self.loading = true;
        match loader::load_remote(&self.source_url, &self.sheet_name) {
            Ok((table, roles)) => self.set_table(table, roles),
            Err(e) => {
                let e = anyhow::Error::new(e);
                log::error!("failed to load scores: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
        self.loading = false;
    }

    /// Ingest a freshly loaded table and reset the filter controls.
    pub fn set_table(&mut self, table: ScoreTable, roles: ColumnRoleMap) {
        let bounds = filter::aggregate(&table, &roles.total)
            .map(|agg| (agg.min, agg.max))
            .unwrap_or((0.0, 100.0));
        self.score_bounds = bounds;
        self.score_range = bounds;
        self.individual_grade = GradeFilter::All;
        self.team_grade = GradeFilter::All;
        self.table = Some(table);
        self.roles = Some(roles);
        self.status_message = None;
        self.fix_selection();
    }

    /// Keep the selected individual valid for the current grade filter;
    /// falls back to the first available name.
    pub fn fix_selection(&mut self) {
        let Some(table) = &self.table else {
            self.selected_name = None;
            return;
        };
        let names = filter::filter_by_grade(table, &self.individual_grade).names();
        let still_valid = self
            .selected_name
            .as_ref()
            .is_some_and(|name| names.iter().any(|n| n == name));
        if !still_valid {
            self.selected_name = names.first().cloned();
        }
    }

    /// Criteria for the Individual Scores page.
    pub fn individual_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            grade: self.individual_grade.clone(),
            name: self.selected_name.clone(),
            score_range: None,
        }
    }

    /// Criteria for the Overall Team Results table.
    pub fn team_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            grade: self.team_grade.clone(),
            name: None,
            score_range: Some(self.score_range),
        }
    }
}
