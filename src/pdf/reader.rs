// src/pdf/reader.rs
use crate::utils::error::PdfError;
use lopdf::Document;

/// A decoded results PDF with its pages in document order.
///
/// Only the text layer matters here: each page yields an ordered list of
/// text fragments, and the assembled document text is what the row
/// extractor scans. Layout and column boundaries are not reconstructed.
#[derive(Debug)]
pub struct ResultDocument {
    doc: Document,
    page_numbers: Vec<u32>,
}

impl ResultDocument {
    /// Decodes a PDF from raw bytes.
    pub fn open(bytes: &[u8]) -> Result<Self, PdfError> {
        let doc = Document::load_mem(bytes)
            .map_err(|e| PdfError::Decode(e.to_string()))?;

        // get_pages() is keyed by 1-based page number; BTreeMap keeps order.
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        tracing::debug!("Decoded PDF with {} pages", page_numbers.len());

        Ok(Self { doc, page_numbers })
    }

    pub fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    /// Returns the ordered text fragments of one page (1-based page number).
    /// Fragments are the non-empty lines of the page's text layer.
    pub fn page_fragments(&self, page: u32) -> Result<Vec<String>, PdfError> {
        let text = self.doc.extract_text(&[page]).map_err(|e| PdfError::PageText {
            page,
            message: e.to_string(),
        })?;

        Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Assembles the full document text: fragments joined with single
    /// spaces within a page, pages joined in order with a line break.
    pub fn assemble_text(&self) -> Result<String, PdfError> {
        let mut pages = Vec::with_capacity(self.page_numbers.len());
        for &page in &self.page_numbers {
            pages.push(self.page_fragments(page)?);
        }
        Ok(join_fragments(&pages))
    }
}

/// Joins per-page fragment lists into the single text stream the row
/// extractor scans: single spaces within a page, one line break per page.
pub fn join_fragments(pages: &[Vec<String>]) -> String {
    pages
        .iter()
        .map(|fragments| fragments.join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_join_with_spaces_within_a_page() {
        let pages = vec![vec![
            "24JD1A0201".to_string(),
            "R2321012".to_string(),
            "MATHS".to_string(),
        ]];
        assert_eq!(join_fragments(&pages), "24JD1A0201 R2321012 MATHS");
    }

    #[test]
    fn pages_join_with_line_breaks() {
        let pages = vec![
            vec!["page one".to_string()],
            vec!["page two".to_string()],
        ];
        assert_eq!(join_fragments(&pages), "page one\npage two");
    }

    #[test]
    fn empty_document_yields_empty_text() {
        assert_eq!(join_fragments(&[]), "");
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = ResultDocument::open(b"not a pdf at all").unwrap_err();
        assert!(matches!(err, PdfError::Decode(_)));
    }
}
