//! Line-by-line section classifier.
//!
//! [`ResumeParser`] is a single-pass state machine: heading lines switch the
//! current section, every other line is routed to that section's heuristics.
//! Lines that refine an entry (degree, dates, role, ...) always target the
//! most recently opened entry of their section, tracked by an explicit
//! cursor. When the cursor is empty the line is dropped.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::model::{EducationEntry, ExperienceEntry, ProjectEntry, ResumeRecord, Section, SkillEntry};

/// Recognized heading labels (compared against the upper-cased line) and the
/// section each one selects.
pub const HEADINGS: [(&str, Section); 7] = [
    ("EDUCATION", Section::Education),
    ("TECHNICAL SKILLS", Section::TechnicalSkills),
    ("PROJECTS", Section::Projects),
    ("EXPERIENCE", Section::Experience),
    ("FORAGE PROJECTS", Section::Projects),
    ("MARKETING PROJECTS", Section::Projects),
    ("CERTIFICATIONS", Section::Certifications),
];

/// U+2013, separates institution/company from location.
pub const EN_DASH: char = '\u{2013}';
pub const BULLET: char = '•';
pub const HYPHEN_BULLET: char = '-';
pub const DATE_SEPARATOR: char = '|';
pub const BOLD_MARKER: &str = "**";

pub const INSTITUTION_KEYWORDS: [&str; 3] = ["University", "Institute", "College"];
pub const DEGREE_KEYWORDS: [&str; 3] = ["Master", "Bachelor", "Diploma"];
pub const COURSEWORK_MARKER: &str = "Relevant Coursework";
pub const LOCATION_KEYWORDS: [&str; 5] = ["India", "USA", "MA", "WB", "OD"];
pub const ROLE_KEYWORDS: [&str; 5] = ["Manager", "Executive", "Intern", "Expert", "Founder"];

static NUMBERED_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+").expect("valid regex"));
static TITLE_DECORATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+|^\*\*|\*\*$").expect("valid regex"));

/// Project title seen but not yet written to the record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingProject {
    pub title: String,
    pub description: Vec<String>,
}

impl PendingProject {
    fn into_entry(self) -> Option<ProjectEntry> {
        if self.description.is_empty() {
            return None;
        }
        Some(ProjectEntry {
            title: self.title,
            description: self.description.join(" "),
        })
    }
}

/// Parser state threaded through one pass over a document's lines.
#[derive(Debug, Default)]
pub struct ResumeParser {
    section: Option<Section>,
    pending_project: Option<PendingProject>,
    record: ResumeRecord,
    education_cursor: Option<usize>,
    experience_cursor: Option<usize>,
}

impl ResumeParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Section subsequent lines are routed to; `None` until a heading is seen.
    pub fn section(&self) -> Option<Section> {
        self.section
    }

    pub fn pending_project(&self) -> Option<&PendingProject> {
        self.pending_project.as_ref()
    }

    /// Entries completed so far. A pending project is not included.
    pub fn record(&self) -> &ResumeRecord {
        &self.record
    }

    /// Feed one line.
    pub fn feed(&mut self, line: &str) {
        let line = line.trim();

        if let Some(section) = heading_section(line) {
            debug!(%section, heading = line, "Entering section");
            self.section = Some(section);
            return;
        }

        if line.is_empty() {
            return;
        }

        match self.section {
            Some(Section::Education) => self.education_line(line),
            Some(Section::TechnicalSkills) => self.skills_line(line),
            Some(Section::Projects) => self.project_line(line),
            Some(Section::Experience) => self.experience_line(line),
            Some(Section::Certifications) => self.certification_line(line),
            None => {}
        }
    }

    /// Flush the pending project and hand back the finished record.
    pub fn finish(mut self) -> ResumeRecord {
        self.flush_project();
        self.record
    }

    fn education_line(&mut self, line: &str) {
        if line.contains(EN_DASH)
            && (contains_any(line, &INSTITUTION_KEYWORDS) || self.education_cursor.is_none())
        {
            let (institution, location) = split_on_dash(line);
            debug!(institution = %institution, location = %location, "New education entry");
            self.record.education.push(EducationEntry {
                institution,
                location,
                ..EducationEntry::default()
            });
            self.education_cursor = Some(self.record.education.len() - 1);
        } else if contains_any(line, &DEGREE_KEYWORDS) {
            if let Some(entry) = self.last_education() {
                entry.degree = line.to_string();
            }
        } else if line.contains(DATE_SEPARATOR) {
            if let Some(entry) = self.last_education() {
                entry.dates = line.to_string();
            }
        } else if line.contains(COURSEWORK_MARKER) {
            if let Some(entry) = self.last_education() {
                entry.coursework = strip_coursework(line);
            }
        }
    }

    fn skills_line(&mut self, line: &str) {
        if !line.starts_with(BULLET) {
            return;
        }
        let Some((category, skills)) = line.split_once(':') else {
            debug!(line, "Skill line without a category separator");
            return;
        };
        self.record.technical_skills.push(SkillEntry {
            category: category.replace(BULLET, "").trim().to_string(),
            skills: skills.split(',').map(|s| s.trim().to_string()).collect(),
        });
    }

    fn project_line(&mut self, line: &str) {
        if is_project_title(line) {
            // A title with no description yet is replaced, not flushed.
            self.flush_project();
            let title = clean_title(line);
            debug!(title = %title, "New project title");
            self.pending_project = Some(PendingProject {
                title,
                description: Vec::new(),
            });
            return;
        }

        let Some(pending) = self.pending_project.as_mut() else {
            debug!(line, "Project line before any title");
            return;
        };
        let fragment = strip_bullet(line).unwrap_or(line);
        pending.description.push(fragment.to_string());
    }

    fn experience_line(&mut self, line: &str) {
        if line.contains(EN_DASH) && contains_any(line, &LOCATION_KEYWORDS) {
            let (company, location) = split_on_dash(line);
            debug!(company = %company, location = %location, "New experience entry");
            self.record.experience.push(ExperienceEntry {
                company,
                location,
                ..ExperienceEntry::default()
            });
            self.experience_cursor = Some(self.record.experience.len() - 1);
        } else if contains_any(line, &ROLE_KEYWORDS) {
            if let Some(entry) = self.last_experience() {
                entry.role = line.to_string();
            }
        } else if line.contains(DATE_SEPARATOR) {
            if let Some(entry) = self.last_experience() {
                entry.dates = line.to_string();
            }
        } else if let Some(responsibility) = strip_bullet(line) {
            if let Some(entry) = self.last_experience() {
                entry.responsibilities.push(responsibility.to_string());
            }
        }
    }

    fn certification_line(&mut self, line: &str) {
        if let Some(name) = strip_bullet(line) {
            self.record.certifications.push(name.to_string());
        }
    }

    fn flush_project(&mut self) {
        if let Some(entry) = self.pending_project.take().and_then(PendingProject::into_entry) {
            debug!(title = %entry.title, "Project complete");
            self.record.projects.push(entry);
        }
    }

    fn last_education(&mut self) -> Option<&mut EducationEntry> {
        let entry = self
            .education_cursor
            .and_then(|idx| self.record.education.get_mut(idx));
        if entry.is_none() {
            debug!("Education detail before any institution, dropped");
        }
        entry
    }

    fn last_experience(&mut self) -> Option<&mut ExperienceEntry> {
        let entry = self
            .experience_cursor
            .and_then(|idx| self.record.experience.get_mut(idx));
        if entry.is_none() {
            debug!("Experience detail before any company, dropped");
        }
        entry
    }
}

/// Classify a whole document in one pass.
pub fn parse_resume<I, S>(lines: I) -> ResumeRecord
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = ResumeParser::new();
    for line in lines {
        parser.feed(line.as_ref());
    }
    parser.finish()
}

/// Section selected by a heading line, matched exactly after upper-casing.
pub fn heading_section(line: &str) -> Option<Section> {
    let upper = line.trim().to_uppercase();
    HEADINGS
        .iter()
        .find(|(label, _)| *label == upper)
        .map(|(_, section)| *section)
}

fn contains_any(line: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| line.contains(keyword))
}

/// `"MIT – Cambridge, MA"` -> `("MIT", "Cambridge, MA")`. Only the second
/// dash-separated segment becomes the location.
fn split_on_dash(line: &str) -> (String, String) {
    let mut parts = line.split(EN_DASH);
    let head = parts.next().unwrap_or_default().trim().to_string();
    let location = parts.next().unwrap_or_default().trim().to_string();
    (head, location)
}

fn strip_coursework(line: &str) -> String {
    let stripped = line.replace(&format!("{COURSEWORK_MARKER}: "), "");
    stripped
        .strip_prefix(COURSEWORK_MARKER)
        .unwrap_or(stripped.as_str())
        .trim()
        .to_string()
}

/// Text after a leading `-` or `•`, trimmed; `None` if the line is not a bullet.
fn strip_bullet(line: &str) -> Option<&str> {
    line.strip_prefix(HYPHEN_BULLET)
        .or_else(|| line.strip_prefix(BULLET))
        .map(str::trim)
}

fn is_project_title(line: &str) -> bool {
    NUMBERED_TITLE.is_match(line) || is_all_caps(line) || line.starts_with(BOLD_MARKER)
}

/// At least one cased character and no lower-case ones.
fn is_all_caps(line: &str) -> bool {
    line.chars().any(char::is_uppercase) && !line.chars().any(char::is_lowercase)
}

fn clean_title(line: &str) -> String {
    TITLE_DECORATION.replace_all(line, "").trim().to_string()
}
