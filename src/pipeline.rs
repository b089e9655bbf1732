//! End-to-end ingestion: document -> lines -> record -> database rows.

use std::path::Path;

use tracing::info;

use crate::error::{ResumeError, Result};
use crate::loader::{self, DocumentKind};
use crate::model::{ResumeRecord, Section};
use crate::parser::parse_resume;
use crate::store::{PersistSummary, ResumeStore};

/// Store path used when none is given.
pub const DEFAULT_DATABASE: &str = "resume.db";

/// Number of project titles read back after persisting.
pub const SAMPLE_PROJECTS: usize = 5;

/// Outcome of one ingestion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub record: ResumeRecord,
    pub persisted: PersistSummary,
    pub sample_projects: Vec<String>,
    pub education: Vec<(String, String)>,
}

/// Parse `document` and append its sections to the database at `database`.
///
/// The input is validated before the database is opened, so a missing or
/// unsupported document leaves the store untouched.
pub fn ingest(document: &Path, database: &Path) -> Result<IngestReport> {
    if !document.exists() {
        return Err(ResumeError::FileNotFound(document.to_path_buf()));
    }
    DocumentKind::from_path(document)?;

    let lines = loader::load(document)?;
    let record = parse_resume(&lines);
    info!(
        education = record.len_of(Section::Education),
        skills = record.len_of(Section::TechnicalSkills),
        projects = record.len_of(Section::Projects),
        experience = record.len_of(Section::Experience),
        certifications = record.len_of(Section::Certifications),
        "Parsed resume"
    );

    let mut store = ResumeStore::open(database)?;
    store.ensure_schema()?;
    let persisted = store.persist(&record)?;

    let sample_projects = store.sample_project_titles(SAMPLE_PROJECTS)?;
    let education = store.education_overview()?;
    store.close()?;

    Ok(IngestReport {
        record,
        persisted,
        sample_projects,
        education,
    })
}
