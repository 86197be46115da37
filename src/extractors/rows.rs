// src/extractors/rows.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Default identifier shape: two digits, literal "JD", then at least four
/// alphanumerics (e.g. 24JD1A0201). Institutions with a different hall
/// ticket format can override this via [`RowExtractor::with_id_pattern`].
pub const DEFAULT_ID_PATTERN: &str = r"\d{2}JD[0-9A-Z]{4,}";

static DEFAULT_ROW_REGEX: Lazy<Regex> = Lazy::new(|| {
    build_row_regex(DEFAULT_ID_PATTERN).expect("default row pattern must compile")
});

/// Builds the full row regex around an identifier sub-pattern:
///
///   <id> WS <code> WS <name> WS <internals> WS <grade> WS <credits>
///
/// The name group is non-greedy on purpose. Text-layer extraction
/// concatenates table cells without reliable column boundaries, so the
/// trailing marks/grade/credits fields anchor the match and the name
/// absorbs whatever falls between the subject code and the marks figure.
/// A name that itself contains a digit run, letters, then a number will
/// therefore terminate early at the first position satisfying the trailing
/// pattern. That ambiguity is inherent to the input; keep the shortest
/// match rather than attempting a smarter parse.
fn build_row_regex(id_pattern: &str) -> Result<Regex, ExtractError> {
    // Named groups keep field lookup stable even when a custom identifier
    // sub-pattern carries capture groups of its own.
    let pattern = format!(
        r"(?P<id>{id_pattern})\s+(?P<code>[A-Z0-9]+)\s+(?P<name>.+?)\s+(?P<marks>\d+)\s+(?P<grade>[A-Z]+)\s+(?P<credits>\d+(?:\.\d+)?)"
    );
    Regex::new(&pattern).map_err(|e| ExtractError::InvalidPattern(e.to_string()))
}

/// One subject's outcome for one student, as matched from the text stream.
/// All fields stay as matched text; only the aggregator coerces credits to
/// a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub student_id: String,
    pub subject_code: String,
    pub subject_name: String,
    pub internal_marks: String,
    pub grade: String,
    pub credits: String,
}

/// Scans assembled document text for result rows with a single
/// non-overlapping left-to-right pass of the row regex.
#[derive(Debug)]
pub struct RowExtractor {
    row_regex: Regex,
}

impl RowExtractor {
    /// Extractor with the default identifier shape.
    pub fn new() -> Self {
        Self {
            row_regex: DEFAULT_ROW_REGEX.clone(),
        }
    }

    /// Extractor with a custom identifier sub-pattern.
    pub fn with_id_pattern(id_pattern: &str) -> Result<Self, ExtractError> {
        Ok(Self {
            row_regex: build_row_regex(id_pattern)?,
        })
    }

    /// Extracts every row matching the pattern, in source order.
    /// Zero matches is an empty vec, not an error.
    pub fn extract(&self, raw_text: &str) -> Vec<ResultRow> {
        let mut rows = Vec::new();

        for caps in self.row_regex.captures_iter(raw_text) {
            rows.push(ResultRow {
                student_id: caps["id"].to_uppercase(),
                subject_code: caps["code"].to_string(),
                subject_name: caps["name"].trim().to_string(),
                internal_marks: caps["marks"].to_string(),
                grade: caps["grade"].to_string(),
                credits: caps["credits"].to_string(),
            });
        }

        tracing::debug!("Row pattern matched {} rows", rows.len());
        rows
    }
}

impl Default for RowExtractor {
    fn default() -> Self {
        Self::new()
    }
}
