use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::error::DataError;

/// Exact header of the individual-identifier column.
pub const NAME_COLUMN: &str = "Name";
/// Exact header of the categorical grading column (`Poor`/`Average`/`Good`).
pub const GRADING_COLUMN: &str = "Performance Grading";

/// The grading categories offered by the filter controls.
pub const GRADES: [&str; 3] = ["Poor", "Average", "Good"];

// ---------------------------------------------------------------------------
// CellValue – a single spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring what the workbook can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl CellValue {
    /// Try to interpret the value as an `f64` for range filters and stats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            // Scores are whole numbers more often than not; don't print "85.0".
            CellValue::Float(v) if v.fract() == 0.0 => write!(f, "{v:.0}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// ScoreRecord – one row of the worksheet
// ---------------------------------------------------------------------------

/// One individual's row.  `Name` and `Performance Grading` are pulled out as
/// typed fields; every other column is kept opaquely under its trimmed
/// header, score columns included.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    pub name: String,
    pub grading: String,
    pub values: BTreeMap<String, CellValue>,
}

impl ScoreRecord {
    /// Numeric view of a column cell, `None` when missing or non-numeric.
    pub fn numeric(&self, column: &str) -> Option<f64> {
        self.values.get(column).and_then(CellValue::as_f64)
    }

    /// Cell text for table rendering, empty when the column is absent.
    pub fn display(&self, column: &str) -> String {
        if column == NAME_COLUMN {
            return self.name.clone();
        }
        if column == GRADING_COLUMN {
            return self.grading.clone();
        }
        self.values
            .get(column)
            .map(CellValue::to_string)
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// ScoreTable – the loaded worksheet
// ---------------------------------------------------------------------------

/// The parsed worksheet: trimmed column headers in their original order plus
/// one record per individual.  Immutable after load; every filter returns a
/// new derived table and never touches the source.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable {
    pub columns: Vec<String>,
    pub records: Vec<ScoreRecord>,
}

impl ScoreTable {
    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Unique individual names in first-occurrence order.
    pub fn names(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut names = Vec::new();
        for record in &self.records {
            if seen.insert(record.name.clone()) {
                names.push(record.name.clone());
            }
        }
        names
    }

    /// Derived view sharing this table's column set.
    pub fn with_records(&self, records: Vec<ScoreRecord>) -> ScoreTable {
        ScoreTable {
            columns: self.columns.clone(),
            records,
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnRoleMap – marker-based column resolution
// ---------------------------------------------------------------------------

/// Marker substrings locating the score columns.  The workbook's exact
/// header text drifts between releases ("Total Marks (out of 100)", ...), so
/// binding is by substring rather than exact name.
pub const TOTAL_MARKER: &str = "Total";
pub const INTERVIEW_MARKER: &str = "Interview";
pub const EXAM_MARKER: &str = "EXAMS";

/// First column (in worksheet order) whose name contains `marker`.
///
/// Resolution is positional: with several matching columns the first one
/// wins, whether or not it is the semantically right one.
pub fn resolve_role(table: &ScoreTable, marker: &str) -> Result<String, DataError> {
    table
        .columns
        .iter()
        .find(|column| column.contains(marker))
        .cloned()
        .ok_or_else(|| DataError::ColumnNotFound {
            marker: marker.to_string(),
        })
}

/// Resolved column name per semantic role, built once right after load so a
/// missing column fails the load instead of the first query.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRoleMap {
    pub total: String,
    pub interview: String,
    pub exam: String,
}

impl ColumnRoleMap {
    pub fn resolve(table: &ScoreTable) -> Result<Self, DataError> {
        Ok(ColumnRoleMap {
            total: resolve_role(table, TOTAL_MARKER)?,
            interview: resolve_role(table, INTERVIEW_MARKER)?,
            exam: resolve_role(table, EXAM_MARKER)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// Grade selection offered by the UI dropdowns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GradeFilter {
    #[default]
    All,
    Only(String),
}

impl GradeFilter {
    pub fn label(&self) -> &str {
        match self {
            GradeFilter::All => "All",
            GradeFilter::Only(grade) => grade,
        }
    }
}

/// One interaction's worth of filter state, consumed by
/// [`apply_criteria`](super::filter::apply_criteria) and discarded.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub grade: GradeFilter,
    pub name: Option<String>,
    /// Inclusive `[min, max]` bounds on the total score.
    pub score_range: Option<(f64, f64)>,
}

/// Team-level statistics over a numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_columns(columns: &[&str]) -> ScoreTable {
        ScoreTable {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            records: Vec::new(),
        }
    }

    #[test]
    fn resolve_finds_column_by_substring() {
        let table = table_with_columns(&[
            "Name",
            "Total Marks (out of 100)",
            "Interview Score",
            "EXAMS Score",
            "Performance Grading",
        ]);
        let roles = ColumnRoleMap::resolve(&table).unwrap();
        assert_eq!(roles.total, "Total Marks (out of 100)");
        assert_eq!(roles.interview, "Interview Score");
        assert_eq!(roles.exam, "EXAMS Score");
    }

    #[test]
    fn resolve_is_deterministic() {
        let table = table_with_columns(&["Name", "Total Marks", "Interview", "EXAMS"]);
        let first = ColumnRoleMap::resolve(&table).unwrap();
        let second = ColumnRoleMap::resolve(&table).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn resolve_prefers_first_match() {
        // Two columns contain "Total"; the earlier one wins even though the
        // later one may be the semantically correct choice.
        let table = table_with_columns(&["Running Total", "Total Marks", "Interview", "EXAMS"]);
        assert_eq!(resolve_role(&table, TOTAL_MARKER).unwrap(), "Running Total");
    }

    #[test]
    fn resolve_fails_without_matching_column() {
        let table = table_with_columns(&["Name", "Interview", "EXAMS"]);
        let err = resolve_role(&table, TOTAL_MARKER).unwrap_err();
        assert!(matches!(
            err,
            DataError::ColumnNotFound { ref marker } if marker == "Total"
        ));
    }

    #[test]
    fn names_are_unique_in_first_occurrence_order() {
        let record = |name: &str| ScoreRecord {
            name: name.to_string(),
            grading: "Good".to_string(),
            values: BTreeMap::new(),
        };
        let table = ScoreTable {
            columns: vec!["Name".to_string()],
            records: vec![record("B"), record("A"), record("B"), record("C")],
        };
        assert_eq!(table.names(), vec!["B", "A", "C"]);
    }

    #[test]
    fn cell_value_numeric_coercion() {
        assert_eq!(CellValue::Float(70.5).as_f64(), Some(70.5));
        assert_eq!(CellValue::Integer(70).as_f64(), Some(70.0));
        assert_eq!(CellValue::String("70".into()).as_f64(), None);
        assert_eq!(CellValue::Null.as_f64(), None);
    }

    #[test]
    fn whole_floats_render_without_fraction() {
        assert_eq!(CellValue::Float(85.0).to_string(), "85");
        assert_eq!(CellValue::Float(85.5).to_string(), "85.5");
    }
}
