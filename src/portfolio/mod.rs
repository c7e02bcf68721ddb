//! Portfolio document model
//!
//! The document is produced and schema-validated by an external admin tool;
//! this service only reads it. A missing file or empty collection means "no
//! data available for that section", never an error.

pub mod context;
pub mod tokens;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::Path;

/// Read-only snapshot of the portfolio data
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PortfolioDocument {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<SkillCategory>,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
    #[serde(default)]
    pub contact: Vec<ContactEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SkillCategory {
    pub category: String,
    #[serde(default)]
    pub items: Vec<Skill>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Skill {
    pub name: String,
    /// Proficiency on a 1-5 scale
    pub level: u8,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimelineEvent {
    pub year: Year,
    pub title: String,
    pub description: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContactEntry {
    pub label: String,
    pub value: String,
}

/// Timeline year as stored: either a number or free text like "2023 - now"
///
/// Ordering follows each value's own type: numbers compare numerically,
/// text compares lexicographically, and a mixed pair compares by its
/// rendered string form. The source data never normalized this field, so
/// mixed collections keep that behavior rather than inventing a different
/// ordering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Year {
    Num(i64),
    Text(String),
}

impl Year {
    pub fn cmp_natural(&self, other: &Year) -> Ordering {
        match (self, other) {
            (Year::Num(a), Year::Num(b)) => a.cmp(b),
            (Year::Text(a), Year::Text(b)) => a.cmp(b),
            _ => self.to_string().cmp(&other.to_string()),
        }
    }
}

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Year::Num(n) => write!(f, "{}", n),
            Year::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Load the portfolio document from the path named in the configuration
///
/// An absent file yields the empty document; a file that exists but cannot
/// be parsed is a deployment error and fails startup.
pub fn load(path: &Path) -> crate::error::AppResult<PortfolioDocument> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(
                path = %path.display(),
                "No portfolio document found, serving without portfolio data"
            );
            return Ok(PortfolioDocument::default());
        }
        Err(e) => {
            return Err(crate::error::AppError::Config(format!(
                "Failed to read portfolio document {}: {}",
                path.display(),
                e
            )));
        }
    };

    let document: PortfolioDocument = serde_json::from_str(&content).map_err(|e| {
        crate::error::AppError::Config(format!(
            "Failed to parse portfolio document {}: {}",
            path.display(),
            e
        ))
    })?;

    tracing::info!(
        path = %path.display(),
        projects = document.projects.len(),
        skill_categories = document.skills.len(),
        timeline_events = document.timeline.len(),
        contact_entries = document.contact.len(),
        "Portfolio document loaded"
    );

    Ok(document)
}
