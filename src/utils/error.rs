// src/utils/error.rs
#![allow(dead_code)]
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum PdfError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 404 Not Found, 403 Forbidden

    #[error("Could not find document: {0}")]
    DocumentNotFound(String),

    #[error("I/O error reading document: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode PDF: {0}")]
    Decode(String),

    #[error("Failed to extract text from page {page}: {message}")]
    PageText { page: u32, message: String },
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Invalid identifier pattern: {0}")]
    InvalidPattern(String),
}

/// Query-side failures. Each maps to a distinct user-visible message;
/// none of them is fatal to the session.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    #[error("Please enter a hall ticket number")]
    EmptyQuery,

    #[error("No results loaded yet; the document may still be loading or failed to load")]
    NotReady,

    #[error("Result not found for hall ticket number {0}")]
    NotFound(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Document load failed: {0}")]
    Pdf(#[from] PdfError),

    #[error("Extraction setup failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Query failed: {0}")]
    Query(#[from] QueryError),

    #[error("Report serialization failed: {0}")]
    Serialization(String),
}
