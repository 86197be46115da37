// src/session.rs
use crate::aggregate::{self, StudentReport};
use crate::extractors::rows::{ResultRow, RowExtractor};
use crate::pdf::client::{self, DocumentSource};
use crate::pdf::reader::ResultDocument;
use crate::utils::error::{PdfError, QueryError};
use std::sync::Mutex;

/// Load lifecycle of the row set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// What happened to a load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Rows were installed; carries the row count.
    Loaded { rows: usize },
    /// Dropped: another load was already in flight, or this one was
    /// superseded by a newer load before it could finish.
    Skipped,
}

struct SessionState {
    rows: Vec<ResultRow>,
    status: LoadStatus,
    generation: u64,
}

/// Owns the extracted row set and its load status.
///
/// One load at a time: a request arriving while a load is in flight is
/// silently dropped, not queued. The row set is cleared the moment a load
/// begins, so a query racing a failed or ongoing reload sees an empty set
/// rather than stale rows from the previous document. The generation
/// counter keeps a superseded load from mutating state after a newer load
/// has started, whatever the task latency.
pub struct ResultSession {
    extractor: RowExtractor,
    state: Mutex<SessionState>,
}

impl ResultSession {
    pub fn new(extractor: RowExtractor) -> Self {
        Self {
            extractor,
            state: Mutex::new(SessionState {
                rows: Vec::new(),
                status: LoadStatus::Idle,
                generation: 0,
            }),
        }
    }

    pub fn status(&self) -> LoadStatus {
        self.state.lock().unwrap().status
    }

    pub fn row_count(&self) -> usize {
        self.state.lock().unwrap().rows.len()
    }

    /// Fetches, decodes and extracts a results document, replacing the
    /// row set on success. On failure the row set stays empty and the
    /// status is Failed; a later load may retry.
    pub async fn load(&self, source: &DocumentSource) -> Result<LoadOutcome, PdfError> {
        let generation = match self.begin_load() {
            Some(generation) => generation,
            None => {
                tracing::debug!("Load already in progress, dropping request");
                return Ok(LoadOutcome::Skipped);
            }
        };

        match self.run_load(source).await {
            Ok(rows) => Ok(self.finish_load(generation, rows)),
            Err(e) => {
                let mut state = self.state.lock().unwrap();
                if state.generation == generation {
                    state.status = LoadStatus::Failed;
                    state.rows.clear();
                }
                Err(e)
            }
        }
    }

    /// Extracts rows from already-assembled document text, with the same
    /// busy-flag and row-set-replacement semantics as [`load`].
    ///
    /// [`load`]: ResultSession::load
    pub fn load_from_text(&self, raw_text: &str) -> LoadOutcome {
        let generation = match self.begin_load() {
            Some(generation) => generation,
            None => return LoadOutcome::Skipped,
        };
        let rows = self.extractor.extract(raw_text);
        self.finish_load(generation, rows)
    }

    /// Looks up one student's results against the current row set.
    pub fn query(&self, identifier: &str) -> Result<StudentReport, QueryError> {
        let student_id = aggregate::normalize_identifier(identifier);
        if student_id.is_empty() {
            return Err(QueryError::EmptyQuery);
        }

        // Point-in-time snapshot; aggregation never holds the lock.
        let rows = self.state.lock().unwrap().rows.clone();
        if rows.is_empty() {
            return Err(QueryError::NotReady);
        }

        aggregate::aggregate(&rows, &student_id).ok_or(QueryError::NotFound(student_id))
    }

    /// Claims the busy flag and clears the previous document's rows.
    /// Returns the new generation, or None if a load is already in flight.
    fn begin_load(&self) -> Option<u64> {
        let mut state = self.state.lock().unwrap();
        if state.status == LoadStatus::Loading {
            return None;
        }
        // Fail empty, not stale: old rows go away when the new load
        // begins, not when it succeeds.
        state.rows.clear();
        state.status = LoadStatus::Loading;
        state.generation += 1;
        Some(state.generation)
    }

    fn finish_load(&self, generation: u64, rows: Vec<ResultRow>) -> LoadOutcome {
        let mut state = self.state.lock().unwrap();
        if state.generation != generation {
            tracing::warn!(
                "Load superseded by a newer load, discarding {} rows",
                rows.len()
            );
            return LoadOutcome::Skipped;
        }
        let count = rows.len();
        state.rows = rows;
        state.status = LoadStatus::Loaded;
        tracing::info!("Loaded {} result rows", count);
        LoadOutcome::Loaded { rows: count }
    }

    async fn run_load(&self, source: &DocumentSource) -> Result<Vec<ResultRow>, PdfError> {
        let bytes = client::fetch_document(source).await?;
        tracing::info!(
            "Fetched document ({} bytes) from {}",
            bytes.len(),
            source.describe()
        );

        let document = ResultDocument::open(&bytes)?;
        tracing::info!("Decoded PDF: {} pages", document.page_count());

        let text = document.assemble_text()?;
        Ok(self.extractor.extract(&text))
    }
}
