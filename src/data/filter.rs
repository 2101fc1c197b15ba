use super::error::DataError;
use super::model::{Aggregate, FilterCriteria, GradeFilter, ScoreRecord, ScoreTable};

// ---------------------------------------------------------------------------
// Pure query functions over a ScoreTable
// ---------------------------------------------------------------------------
//
// Every function takes the table by reference and returns a fresh derived
// view (or plain numbers); the canonical table is never mutated.

/// Rows whose grading matches the selected category; `All` keeps everything.
pub fn filter_by_grade(table: &ScoreTable, filter: &GradeFilter) -> ScoreTable {
    match filter {
        GradeFilter::All => table.clone(),
        GradeFilter::Only(grade) => table.with_records(
            table
                .records
                .iter()
                .filter(|record| record.grading == *grade)
                .cloned()
                .collect(),
        ),
    }
}

/// Rows whose name matches exactly.  Usually a single row, but nothing
/// enforces unique names in the source sheet: duplicates all come back in
/// original order, and an unknown name yields an empty view.
pub fn filter_by_individual(table: &ScoreTable, name: &str) -> ScoreTable {
    table.with_records(
        table
            .records
            .iter()
            .filter(|record| record.name == name)
            .cloned()
            .collect(),
    )
}

/// Rows whose `total_column` value lies in `[min, max]`, inclusive on both
/// bounds.  Rows with a missing or non-numeric cell fall out.
pub fn filter_by_score_range(
    table: &ScoreTable,
    total_column: &str,
    min: f64,
    max: f64,
) -> ScoreTable {
    table.with_records(
        table
            .records
            .iter()
            .filter(|record| {
                record
                    .numeric(total_column)
                    .is_some_and(|value| value >= min && value <= max)
            })
            .cloned()
            .collect(),
    )
}

/// Mean, max and min over the numeric cells of `total_column`.
pub fn aggregate(table: &ScoreTable, total_column: &str) -> Result<Aggregate, DataError> {
    let values: Vec<f64> = table
        .records
        .iter()
        .filter_map(|record| record.numeric(total_column))
        .collect();
    if values.is_empty() {
        return Err(DataError::EmptyTable);
    }

    let sum: f64 = values.iter().sum();
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    Ok(Aggregate {
        mean: sum / values.len() as f64,
        max,
        min,
    })
}

/// The `n` rows with the largest `total_column` value, descending.  The sort
/// is stable, so ties keep their original row order.  Rows without a numeric
/// value are not ranked.
pub fn top_n(table: &ScoreTable, total_column: &str, n: usize) -> Result<ScoreTable, DataError> {
    if table.is_empty() {
        return Err(DataError::EmptyTable);
    }
    let mut ranked = sorted_desc(&table.records, total_column);
    ranked.truncate(n);
    Ok(table.with_records(ranked))
}

/// Full table sorted by `total_column` descending, for the bar chart.
/// Presentation ordering only; the canonical table keeps worksheet order.
pub fn sort_for_display(table: &ScoreTable, total_column: &str) -> ScoreTable {
    table.with_records(sorted_desc(&table.records, total_column))
}

fn sorted_desc(records: &[ScoreRecord], total_column: &str) -> Vec<ScoreRecord> {
    let mut records: Vec<ScoreRecord> = records
        .iter()
        .filter(|record| record.numeric(total_column).is_some())
        .cloned()
        .collect();
    records.sort_by(|a, b| {
        let a = a.numeric(total_column).unwrap_or(f64::NEG_INFINITY);
        let b = b.numeric(total_column).unwrap_or(f64::NEG_INFINITY);
        b.total_cmp(&a)
    });
    records
}

/// Apply one interaction's criteria as a logical AND, by sequential
/// narrowing: score range first, then grade, then individual name.
pub fn apply_criteria(
    table: &ScoreTable,
    total_column: &str,
    criteria: &FilterCriteria,
) -> ScoreTable {
    let mut view = match criteria.score_range {
        Some((min, max)) => filter_by_score_range(table, total_column, min, max),
        None => table.clone(),
    };
    view = filter_by_grade(&view, &criteria.grade);
    if let Some(name) = &criteria.name {
        view = filter_by_individual(&view, name);
    }
    view
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::data::model::CellValue;

    const TOTAL: &str = "Total Marks (out of 100)";

    fn record(name: &str, total: f64, grade: &str) -> ScoreRecord {
        let mut values = BTreeMap::new();
        values.insert(TOTAL.to_string(), CellValue::Float(total));
        ScoreRecord {
            name: name.to_string(),
            grading: grade.to_string(),
            values,
        }
    }

    fn team() -> ScoreTable {
        ScoreTable {
            columns: vec![
                "Name".to_string(),
                TOTAL.to_string(),
                "Performance Grading".to_string(),
            ],
            records: vec![
                record("A", 50.0, "Poor"),
                record("B", 90.0, "Good"),
                record("C", 70.0, "Average"),
            ],
        }
    }

    fn names(table: &ScoreTable) -> Vec<&str> {
        table.records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn grade_all_is_the_identity() {
        let table = team();
        let view = filter_by_grade(&table, &GradeFilter::All);
        assert_eq!(view, table);
    }

    #[test]
    fn grade_only_keeps_matching_rows() {
        let view = filter_by_grade(&team(), &GradeFilter::Only("Good".to_string()));
        assert_eq!(names(&view), vec!["B"]);
    }

    #[test]
    fn score_range_is_inclusive_at_both_bounds() {
        let table = team();
        let view = filter_by_score_range(&table, TOTAL, 50.0, 70.0);
        assert_eq!(names(&view), vec!["A", "C"]);

        // A row exactly at max stays in; one unit above falls out.
        let view = filter_by_score_range(&table, TOTAL, 0.0, 89.0);
        assert_eq!(names(&view), vec!["A", "C"]);
        let view = filter_by_score_range(&table, TOTAL, 0.0, 90.0);
        assert_eq!(names(&view), vec!["A", "B", "C"]);
    }

    #[test]
    fn non_numeric_totals_fall_out_of_the_range() {
        let mut table = team();
        let mut values = BTreeMap::new();
        values.insert(TOTAL.to_string(), CellValue::String("absent".to_string()));
        table.records.push(ScoreRecord {
            name: "D".to_string(),
            grading: "Poor".to_string(),
            values,
        });
        let view = filter_by_score_range(&table, TOTAL, 0.0, 100.0);
        assert_eq!(names(&view), vec!["A", "B", "C"]);
    }

    #[test]
    fn individual_lookup_zero_and_multiple_matches() {
        let mut table = team();
        table.records.push(record("B", 60.0, "Average"));

        assert!(filter_by_individual(&table, "Zed").is_empty());

        let dupes = filter_by_individual(&table, "B");
        assert_eq!(names(&dupes), vec!["B", "B"]);
        assert_eq!(dupes.records[0].numeric(TOTAL), Some(90.0));
        assert_eq!(dupes.records[1].numeric(TOTAL), Some(60.0));
    }

    #[test]
    fn aggregate_matches_hand_computed_stats() {
        let agg = aggregate(&team(), TOTAL).unwrap();
        assert_eq!(agg.mean, 70.0);
        assert_eq!(agg.max, 90.0);
        assert_eq!(agg.min, 50.0);
    }

    #[test]
    fn aggregate_of_a_single_row_collapses() {
        let table = team().with_records(vec![record("A", 50.0, "Poor")]);
        let agg = aggregate(&table, TOTAL).unwrap();
        assert_eq!(agg.mean, 50.0);
        assert_eq!(agg.max, 50.0);
        assert_eq!(agg.min, 50.0);
    }

    #[test]
    fn aggregate_of_an_empty_table_fails() {
        let table = team().with_records(Vec::new());
        assert!(matches!(
            aggregate(&table, TOTAL),
            Err(DataError::EmptyTable)
        ));
    }

    #[test]
    fn top_n_ranks_descending_and_caps_at_row_count() {
        let table = team();
        let top = top_n(&table, TOTAL, 2).unwrap();
        assert_eq!(names(&top), vec!["B", "C"]);

        let top = top_n(&table, TOTAL, 4).unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!(names(&top), vec!["B", "C", "A"]);
    }

    #[test]
    fn top_n_breaks_ties_by_original_row_order() {
        let table = team().with_records(vec![
            record("first", 70.0, "Average"),
            record("second", 70.0, "Average"),
            record("third", 90.0, "Good"),
        ]);
        let top = top_n(&table, TOTAL, 3).unwrap();
        assert_eq!(names(&top), vec!["third", "first", "second"]);
    }

    #[test]
    fn top_n_of_an_empty_table_fails() {
        let table = team().with_records(Vec::new());
        assert!(matches!(
            top_n(&table, TOTAL, 4),
            Err(DataError::EmptyTable)
        ));
    }

    #[test]
    fn display_sort_leaves_the_source_table_alone() {
        let table = team();
        let sorted = sort_for_display(&table, TOTAL);
        assert_eq!(names(&sorted), vec!["B", "C", "A"]);
        assert_eq!(names(&table), vec!["A", "B", "C"]);
    }

    #[test]
    fn criteria_narrow_range_then_grade() {
        let table = team();
        let criteria = FilterCriteria {
            grade: GradeFilter::Only("Average".to_string()),
            name: None,
            score_range: Some((60.0, 95.0)),
        };
        let combined = apply_criteria(&table, TOTAL, &criteria);

        let manual = filter_by_grade(
            &filter_by_score_range(&table, TOTAL, 60.0, 95.0),
            &GradeFilter::Only("Average".to_string()),
        );
        assert_eq!(combined, manual);
        assert_eq!(names(&combined), vec!["C"]);
    }
}
