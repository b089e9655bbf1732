//! Error handling for resume ingestion.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for every stage of the ingestion pipeline.
#[derive(Error, Debug)]
pub enum ResumeError {
    #[error("File {} not found.", .0.display())]
    FileNotFound(PathBuf),

    #[error("Unsupported file format: {}. Use .docx or .pdf.", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("DOCX error: {0}")]
    Docx(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<zip::result::ZipError> for ResumeError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Docx(err.to_string())
    }
}

impl From<quick_xml::Error> for ResumeError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Docx(err.to_string())
    }
}

impl From<pdf_extract::OutputError> for ResumeError {
    fn from(err: pdf_extract::OutputError) -> Self {
        Self::Pdf(err.to_string())
    }
}

/// Result type alias for resume operations.
pub type Result<T> = std::result::Result<T, ResumeError>;
