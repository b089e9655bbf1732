//! SQLite persistence for parsed resume records.

use std::path::Path;

use rusqlite::{params, Connection};
use tracing::{debug, info};

use crate::error::Result;
use crate::model::{ResumeRecord, Section};

/// Five flat tables, one per section. Safe to run any number of times.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS Education (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    institution TEXT,
    location TEXT,
    degree TEXT,
    dates TEXT,
    coursework TEXT
);

CREATE TABLE IF NOT EXISTS TechnicalSkills (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT,
    skills TEXT
);

CREATE TABLE IF NOT EXISTS Projects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT,
    description TEXT
);

CREATE TABLE IF NOT EXISTS Experience (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    company TEXT,
    location TEXT,
    role TEXT,
    dates TEXT,
    responsibilities TEXT
);

CREATE TABLE IF NOT EXISTS Certifications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT
);
";

pub const SKILLS_SEPARATOR: &str = ", ";
pub const RESPONSIBILITIES_SEPARATOR: &str = "; ";

/// Rows inserted per table by one [`ResumeStore::persist`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersistSummary {
    pub education: usize,
    pub technical_skills: usize,
    pub projects: usize,
    pub experience: usize,
    pub certifications: usize,
}

impl PersistSummary {
    pub fn total(&self) -> usize {
        self.education
            + self.technical_skills
            + self.projects
            + self.experience
            + self.certifications
    }
}

/// Single connection to the resume database.
pub struct ResumeStore {
    conn: Connection,
}

impl std::fmt::Debug for ResumeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResumeStore")
            .field("path", &self.conn.path())
            .finish()
    }
}

impl ResumeStore {
    /// Open (or create) the database file. Tables are not created here.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "Opened resume database");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Create the five section tables if they are absent.
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Append every entry of `record` as one row, committed once at the end.
    ///
    /// Rows are appended, never upserted: persisting the same record twice
    /// stores it twice.
    pub fn persist(&mut self, record: &ResumeRecord) -> Result<PersistSummary> {
        let tx = self.conn.transaction()?;
        let mut summary = PersistSummary::default();

        {
            let mut stmt = tx.prepare(
                "INSERT INTO Education (institution, location, degree, dates, coursework) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for edu in &record.education {
                summary.education += stmt.execute(params![
                    edu.institution,
                    edu.location,
                    edu.degree,
                    edu.dates,
                    edu.coursework
                ])?;
            }

            let mut stmt =
                tx.prepare("INSERT INTO TechnicalSkills (category, skills) VALUES (?1, ?2)")?;
            for skill in &record.technical_skills {
                summary.technical_skills +=
                    stmt.execute(params![skill.category, skill.skills.join(SKILLS_SEPARATOR)])?;
            }

            let mut stmt =
                tx.prepare("INSERT INTO Projects (title, description) VALUES (?1, ?2)")?;
            for project in &record.projects {
                summary.projects += stmt.execute(params![project.title, project.description])?;
            }

            let mut stmt = tx.prepare(
                "INSERT INTO Experience (company, location, role, dates, responsibilities) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for exp in &record.experience {
                summary.experience += stmt.execute(params![
                    exp.company,
                    exp.location,
                    exp.role,
                    exp.dates,
                    exp.responsibilities.join(RESPONSIBILITIES_SEPARATOR)
                ])?;
            }

            let mut stmt = tx.prepare("INSERT INTO Certifications (name) VALUES (?1)")?;
            for cert in &record.certifications {
                summary.certifications += stmt.execute(params![cert])?;
            }
        }

        tx.commit()?;
        info!(rows = summary.total(), ?summary, "Persisted resume record");
        Ok(summary)
    }

    /// Up to `limit` project titles, in insertion order.
    pub fn sample_project_titles(&self, limit: usize) -> Result<Vec<String>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = self.conn.prepare("SELECT title FROM Projects LIMIT ?1")?;
        let titles = stmt
            .query_map([limit], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(titles)
    }

    /// `(institution, degree)` for every stored education row.
    pub fn education_overview(&self) -> Result<Vec<(String, String)>> {
        let mut stmt = self.conn.prepare("SELECT institution, degree FROM Education")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<(String, String)>>>()?;
        Ok(rows)
    }

    /// Number of rows stored for `section`.
    pub fn row_count(&self, section: Section) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", section.name());
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Close the connection, reporting any error SQLite raises on close.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| err)?;
        Ok(())
    }
}
