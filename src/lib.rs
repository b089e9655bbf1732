//! Heuristic resume section extraction.
//!
//! Reads a .docx or .pdf resume as lines ([`loader`]), classifies them into
//! education, skills, projects, experience and certifications ([`parser`]),
//! and appends the result to SQLite ([`store`]). [`pipeline::ingest`] runs
//! the whole chain for one document.

pub mod cli;
pub mod error;
pub mod loader;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod store;

pub use error::{ResumeError, Result};
pub use model::{
    Certification, EducationEntry, ExperienceEntry, ProjectEntry, ResumeRecord, Section,
    SkillEntry,
};
pub use parser::{parse_resume, ResumeParser};
pub use pipeline::{ingest, IngestReport};
pub use store::ResumeStore;
