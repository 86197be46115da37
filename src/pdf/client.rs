// src/pdf/client.rs
use crate::utils::error::PdfError;
use reqwest::header;
use std::path::PathBuf;

const APP_USER_AGENT: &str = concat!("results_extractor/", env!("CARGO_PKG_VERSION"));

/// Where a results document comes from. Result PDFs are published at
/// university portal URLs but are just as often passed around as files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Url(String),
    File(PathBuf),
}

impl DocumentSource {
    /// Classifies a raw reference string: http(s) references are URLs,
    /// everything else is treated as a filesystem path.
    pub fn parse(reference: &str) -> Self {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            DocumentSource::Url(reference.to_string())
        } else {
            DocumentSource::File(PathBuf::from(reference))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DocumentSource::Url(url) => url.clone(),
            DocumentSource::File(path) => path.display().to_string(),
        }
    }
}

/// Creates a reqwest client for fetching result documents.
fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(APP_USER_AGENT)
        .build()
}

/// Fetches the raw bytes of a results document from its source.
pub async fn fetch_document(source: &DocumentSource) -> Result<Vec<u8>, PdfError> {
    match source {
        DocumentSource::Url(url) => fetch_url(url).await,
        DocumentSource::File(path) => {
            tracing::debug!("Reading document from file: {}", path.display());
            if !path.exists() {
                return Err(PdfError::DocumentNotFound(path.display().to_string()));
            }
            let bytes = tokio::fs::read(path).await?;
            tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
            Ok(bytes)
        }
    }
}

/// Downloads a results document from its URL.
async fn fetch_url(url: &str) -> Result<Vec<u8>, PdfError> {
    let client = build_client()?; // Propagate client build error if any

    tracing::info!("Downloading document from: {}", url);

    let response = client.get(url)
        .header(header::ACCEPT, "application/pdf,application/octet-stream,*/*")
        .send()
        .await?; // Propagates reqwest::Error as PdfError::Network

    // Check if the request was successful (status code 2xx)
    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::warn!("Received 404 Not Found for URL: {}", url);
            return Err(PdfError::DocumentNotFound(url.to_string()));
        }
        return Err(PdfError::Http(status));
    }

    let body = response.bytes().await?;
    tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);

    Ok(body.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_classifies_urls() {
        let source = DocumentSource::parse("https://results.example.edu/sem1.pdf");
        assert_eq!(
            source,
            DocumentSource::Url("https://results.example.edu/sem1.pdf".to_string())
        );
    }

    #[test]
    fn parse_treats_everything_else_as_path() {
        let source = DocumentSource::parse("./pdfs/sem1.pdf");
        assert_eq!(source, DocumentSource::File(PathBuf::from("./pdfs/sem1.pdf")));
    }

    #[tokio::test]
    async fn missing_file_is_document_not_found() {
        let source = DocumentSource::parse("/definitely/not/here.pdf");
        let err = fetch_document(&source).await.unwrap_err();
        assert!(matches!(err, PdfError::DocumentNotFound(_)));
    }
}
