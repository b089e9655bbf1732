//! Structured resume record produced by the section classifier.

use std::fmt;

/// Canonical resume sections, in the order they are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Education,
    TechnicalSkills,
    Projects,
    Experience,
    Certifications,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Education,
        Section::TechnicalSkills,
        Section::Projects,
        Section::Experience,
        Section::Certifications,
    ];

    /// Record key and table name for this section.
    pub fn name(self) -> &'static str {
        match self {
            Section::Education => "Education",
            Section::TechnicalSkills => "TechnicalSkills",
            Section::Projects => "Projects",
            Section::Experience => "Experience",
            Section::Certifications => "Certifications",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EducationEntry {
    pub institution: String,
    pub location: String,
    pub degree: String,
    pub dates: String,
    pub coursework: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillEntry {
    pub category: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperienceEntry {
    pub company: String,
    pub location: String,
    pub role: String,
    pub dates: String,
    pub responsibilities: Vec<String>,
}

/// A certification is kept as the bullet text itself.
pub type Certification = String;

/// Entries grouped by section, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeRecord {
    pub education: Vec<EducationEntry>,
    pub technical_skills: Vec<SkillEntry>,
    pub projects: Vec<ProjectEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub certifications: Vec<Certification>,
}

impl ResumeRecord {
    /// Number of entries held for `section`.
    pub fn len_of(&self, section: Section) -> usize {
        match section {
            Section::Education => self.education.len(),
            Section::TechnicalSkills => self.technical_skills.len(),
            Section::Projects => self.projects.len(),
            Section::Experience => self.experience.len(),
            Section::Certifications => self.certifications.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        Section::ALL.iter().all(|section| self.len_of(*section) == 0)
    }
}
