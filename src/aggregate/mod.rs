// src/aggregate/mod.rs
use crate::extractors::rows::ResultRow;
use serde::Serialize;
use std::fmt;

/// Overall outcome for one student: FAIL if any subject is failed,
/// independent of the GPA value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OverallStatus {
    Pass,
    Fail,
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverallStatus::Pass => write!(f, "PASS"),
            OverallStatus::Fail => write!(f, "FAIL"),
        }
    }
}

/// Aggregated results for one student: the matched rows in source order
/// plus the classification counts and the credit-weighted GPA.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentReport {
    pub student_id: String,
    pub rows: Vec<ResultRow>,
    pub cleared: usize,
    pub failed: usize,
    /// Sum of contributing credits, rounded to 1 decimal for display.
    pub total_credits: f64,
    /// Credit-weighted grade point average, rounded to 2 decimals for display.
    pub gpa: f64,
    pub status: OverallStatus,
}

/// Trim + uppercase, applied to query identifiers before filtering.
pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Fixed grade-point table. Grades outside the table score 0 points;
/// that is data, not an error.
pub fn grade_points(grade: &str) -> u32 {
    match grade.trim().to_uppercase().as_str() {
        "S" => 10,
        "A" => 9,
        "B" => 8,
        "C" => 7,
        "D" => 6,
        "E" => 5,
        "F" | "ABSENT" | "COMPLE" => 0,
        _ => 0,
    }
}

/// A row is failed iff its grade is exactly "F" or "ABSENT" after
/// trim + uppercase. Everything else, unrecognized grades included,
/// counts as cleared.
pub fn is_failing(grade: &str) -> bool {
    let grade = grade.trim().to_uppercase();
    grade == "F" || grade == "ABSENT"
}

/// Filters `rows` by the normalized identifier and computes the report.
/// Returns `None` when no row matches (NotFound upstream).
pub fn aggregate(rows: &[ResultRow], identifier: &str) -> Option<StudentReport> {
    let student_id = normalize_identifier(identifier);

    let selected: Vec<ResultRow> = rows
        .iter()
        .filter(|row| row.student_id == student_id)
        .cloned()
        .collect();

    if selected.is_empty() {
        return None;
    }

    let mut cleared = 0usize;
    let mut failed = 0usize;
    let mut total_credits = 0.0f64;
    let mut total_points = 0.0f64;

    for row in &selected {
        if is_failing(&row.grade) {
            failed += 1;
        } else {
            cleared += 1;
        }

        // Rows with zero, negative or unparseable credits stay out of the
        // weighted sum but still count toward cleared/failed above.
        if let Ok(credits) = row.credits.trim().parse::<f64>() {
            if credits > 0.0 {
                total_credits += credits;
                total_points += credits * f64::from(grade_points(&row.grade));
            }
        }
    }

    let gpa = if total_credits > 0.0 {
        total_points / total_credits
    } else {
        0.0
    };

    let status = if failed > 0 {
        OverallStatus::Fail
    } else {
        OverallStatus::Pass
    };

    tracing::debug!(
        "Aggregated {} rows for {}: cleared {}, failed {}, credits {:.1}, gpa {:.2}",
        selected.len(),
        student_id,
        cleared,
        failed,
        total_credits,
        gpa
    );

    Some(StudentReport {
        student_id,
        rows: selected,
        cleared,
        failed,
        total_credits: (total_credits * 10.0).round() / 10.0,
        gpa: (gpa * 100.0).round() / 100.0,
        status,
    })
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, grade: &str, credits: &str) -> ResultRow {
        ResultRow {
            student_id: id.to_string(),
            subject_code: "R2321012".to_string(),
            subject_name: "SUBJECT".to_string(),
            internal_marks: "20".to_string(),
            grade: grade.to_string(),
            credits: credits.to_string(),
        }
    }

    #[test]
    fn weighted_gpa_scenario() {
        let rows = vec![
            row("X", "F", "3"),
            row("X", "A", "4"),
            row("X", "B", "3"),
        ];

        let report = aggregate(&rows, "X").unwrap();

        assert_eq!(report.cleared, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.total_credits, 10.0);
        // points: 0 + 36 + 24 = 60 over 10 credits
        assert_eq!(report.gpa, 6.00);
        assert_eq!(report.status, OverallStatus::Fail);
    }

    #[test]
    fn no_matching_rows_is_none() {
        let rows = vec![row("X", "A", "3")];
        assert!(aggregate(&rows, "Y").is_none());
    }

    #[test]
    fn identifier_is_trimmed_and_uppercased() {
        let rows = vec![row("AB12", "A", "3")];
        let report = aggregate(&rows, "  ab12  ").unwrap();
        assert_eq!(report.student_id, "AB12");
        assert_eq!(report.rows.len(), 1);
    }

    #[test]
    fn absent_fails_but_comple_and_unknown_clear() {
        let rows = vec![
            row("X", "ABSENT", "3"),
            row("X", "COMPLE", "0"),
            row("X", "XYZ", "2"),
        ];

        let report = aggregate(&rows, "X").unwrap();

        assert_eq!(report.failed, 1);
        assert_eq!(report.cleared, 2);
        assert_eq!(report.status, OverallStatus::Fail);
        // COMPLE row has zero credits, unknown grade scores 0 points:
        // only the ABSENT(3cr, 0pt) and XYZ(2cr, 0pt) rows contribute credits.
        assert_eq!(report.total_credits, 5.0);
        assert_eq!(report.gpa, 0.0);
    }

    #[test]
    fn unparseable_and_nonpositive_credits_are_excluded_from_totals() {
        let rows = vec![
            row("X", "A", "n/a"),
            row("X", "B", "0"),
            row("X", "C", "-2"),
            row("X", "S", "1.5"),
        ];

        let report = aggregate(&rows, "X").unwrap();

        // All four rows classify and render; only the last contributes.
        assert_eq!(report.cleared + report.failed, 4);
        assert_eq!(report.rows.len(), 4);
        assert_eq!(report.total_credits, 1.5);
        assert_eq!(report.gpa, 10.0);
        assert_eq!(report.status, OverallStatus::Pass);
    }

    #[test]
    fn zero_total_credits_means_zero_gpa() {
        let rows = vec![row("X", "A", "0"), row("X", "B", "junk")];

        let report = aggregate(&rows, "X").unwrap();

        assert_eq!(report.total_credits, 0.0);
        assert_eq!(report.gpa, 0.0);
        assert_eq!(report.status, OverallStatus::Pass);
    }

    #[test]
    fn aggregation_is_idempotent_and_preserves_source_order() {
        let rows = vec![
            row("X", "B", "3"),
            row("Y", "A", "4"),
            row("X", "A", "4"),
        ];

        let first = aggregate(&rows, "X").unwrap();
        let second = aggregate(&rows, "X").unwrap();

        assert_eq!(first.rows, second.rows);
        assert_eq!(first.gpa, second.gpa);
        assert_eq!(first.rows[0].grade, "B");
        assert_eq!(first.rows[1].grade, "A");
        assert_eq!(first.cleared + first.failed, first.rows.len());
    }

    #[test]
    fn grade_point_table() {
        for (grade, points) in [
            ("S", 10),
            ("A", 9),
            ("B", 8),
            ("C", 7),
            ("D", 6),
            ("E", 5),
            ("F", 0),
            ("ABSENT", 0),
            ("COMPLE", 0),
            ("??", 0),
        ] {
            assert_eq!(grade_points(grade), points, "grade {grade}");
        }
    }
}
