//! Content store: the portfolio document.
//!
//! All biographical data lives in a single `data.json` at the root of the
//! content directory. It is read once, normalized, and never mutated again.
//!
//! ## File Shape
//!
//! ```json
//! {
//!   "personalInfo": {
//!     "name": "Infant Stanko",
//!     "location": "Lisbon",
//!     "phone": "555-0100",
//!     "email": "x@y.com",
//!     "summary": "Backend engineer ...",
//!     "github": "https://github.com/...",
//!     "linkedin": "https://linkedin.com/in/..."
//!   },
//!   "experience": [
//!     { "title": "Engineer", "company": "Acme", "period": "2020 - 2023",
//!       "responsibilities": ["Built things", "Fixed things"] }
//!   ],
//!   "education": [
//!     { "degree": "BSc", "institution": "Uni", "year": "2019", "score": "GPA 3.8" }
//!   ],
//!   "projects": [
//!     { "title": "Tic Tac Toe Game", "description": "...", "code": "fn main() {}",
//!       "gameLink": "https://..." },
//!     { "title": "Crawler", "description": "...", "repo": "https://github.com/..." }
//!   ],
//!   "skills": ["Rust"],
//!   "courses": [], "achievements": [], "interests": [], "languages": []
//! }
//! ```
//!
//! ## Normalization
//!
//! Optional fields that are mutually exclusive in practice are resolved here,
//! once, into tagged variants so the renderer never re-checks them:
//!
//! - `description` / `responsibilities` → [`ExperienceDetail`]
//! - `code` / `repo` → [`ProjectLink`] (inline code wins when both exist)
//!
//! Empty strings and empty lists count as absent.

use log::info;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the content document inside the content directory.
pub const CONTENT_FILE: &str = "data.json";

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("personalInfo.name must not be empty")]
    MissingName,
    #[error("duplicate project title: {0:?}")]
    DuplicateProject(String),
}

// ============================================================================
// Raw document (as written on disk)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    personal_info: RawProfile,
    #[serde(default)]
    experience: Vec<RawExperience>,
    #[serde(default)]
    education: Vec<Education>,
    #[serde(default)]
    projects: Vec<RawProject>,
    #[serde(default)]
    skills: Vec<String>,
    #[serde(default)]
    courses: Vec<String>,
    #[serde(default)]
    achievements: Vec<String>,
    #[serde(default)]
    interests: Vec<String>,
    #[serde(default)]
    languages: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawProfile {
    name: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    github: Option<String>,
    #[serde(default)]
    linkedin: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawExperience {
    title: String,
    company: String,
    #[serde(default)]
    period: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    responsibilities: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProject {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    repo: Option<String>,
    #[serde(default)]
    game_link: Option<String>,
}

// ============================================================================
// Normalized model
// ============================================================================

/// The loaded portfolio. Immutable after [`load_content`] returns.
#[derive(Debug, Clone)]
pub struct Portfolio {
    pub profile: Profile,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    pub skills: Vec<String>,
    pub courses: Vec<String>,
    pub achievements: Vec<String>,
    pub interests: Vec<String>,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Profile {
    pub name: String,
    pub location: String,
    pub phone: String,
    pub email: String,
    pub summary: String,
    /// Code-hosting profile URL.
    pub github: Option<String>,
    /// Professional-network profile URL.
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Experience {
    pub title: String,
    pub organization: String,
    /// Free-text range, e.g. "Jan 2021 - Present".
    pub period: String,
    pub detail: ExperienceDetail,
}

/// Body of an experience card. Exactly one branch renders per entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ExperienceDetail {
    Narrative(String),
    Bulleted(Vec<String>),
    Unspecified,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub score: String,
}

#[derive(Debug, Clone)]
pub struct Project {
    pub title: String,
    pub description: String,
    /// Target of the "Code" action; `None` renders no action at all.
    pub link: Option<ProjectLink>,
    /// Playable demo, rendered as a "Play" action.
    pub demo: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectLink {
    /// Source shown in a dialog, byte-for-byte.
    InlineCode(String),
    /// Repository opened in a new browsing context.
    ExternalRepo(String),
}

impl Project {
    /// The inline snippet, if this project carries one.
    pub fn snippet(&self) -> Option<&str> {
        match &self.link {
            Some(ProjectLink::InlineCode(code)) => Some(code),
            _ => None,
        }
    }
}

impl Portfolio {
    /// Look up a project by exact title.
    pub fn project(&self, title: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.title == title)
    }
}

/// Filler sentence rendered under each skill label.
pub fn skill_blurb(skill: &str) -> String {
    format!("Proficient in {skill} with practical experience in various projects and applications.")
}

// ============================================================================
// Loading
// ============================================================================

/// Load and normalize `data.json` from the content directory.
pub fn load_content(content_dir: &Path) -> Result<Portfolio, ContentError> {
    let path = content_dir.join(CONTENT_FILE);
    let raw = fs::read_to_string(&path).map_err(|source| ContentError::Io {
        path: path.clone(),
        source,
    })?;
    let portfolio = parse_at(&raw, &path)?;
    info!(
        "event=content_load status=ok experience={} projects={} skills={}",
        portfolio.experience.len(),
        portfolio.projects.len(),
        portfolio.skills.len()
    );
    Ok(portfolio)
}

/// Parse a content document from a string.
pub fn parse_str(raw: &str) -> Result<Portfolio, ContentError> {
    parse_at(raw, Path::new(CONTENT_FILE))
}

fn parse_at(raw: &str, path: &Path) -> Result<Portfolio, ContentError> {
    let doc: RawDocument = serde_json::from_str(raw).map_err(|source| ContentError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    normalize(doc)
}

fn normalize(doc: RawDocument) -> Result<Portfolio, ContentError> {
    if doc.personal_info.name.trim().is_empty() {
        return Err(ContentError::MissingName);
    }

    let mut seen = HashSet::new();
    for project in &doc.projects {
        if !seen.insert(project.title.as_str()) {
            return Err(ContentError::DuplicateProject(project.title.clone()));
        }
    }

    let p = doc.personal_info;
    Ok(Portfolio {
        profile: Profile {
            name: p.name,
            location: p.location,
            phone: p.phone,
            email: p.email,
            summary: p.summary,
            github: non_empty(p.github),
            linkedin: non_empty(p.linkedin),
        },
        experience: doc.experience.into_iter().map(normalize_experience).collect(),
        education: doc.education,
        projects: doc.projects.into_iter().map(normalize_project).collect(),
        skills: doc.skills,
        courses: doc.courses,
        achievements: doc.achievements,
        interests: doc.interests,
        languages: doc.languages,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn normalize_experience(raw: RawExperience) -> Experience {
    let detail = match (non_empty(raw.description), raw.responsibilities) {
        (Some(text), _) => ExperienceDetail::Narrative(text),
        (None, Some(items)) if !items.is_empty() => ExperienceDetail::Bulleted(items),
        _ => ExperienceDetail::Unspecified,
    };
    Experience {
        title: raw.title,
        organization: raw.company,
        period: raw.period,
        detail,
    }
}

fn normalize_project(raw: RawProject) -> Project {
    // Only a non-empty snippet takes precedence; the snippet itself is kept verbatim.
    let code = raw.code.filter(|c| !c.is_empty());
    let link = match (code, non_empty(raw.repo)) {
        (Some(code), _) => Some(ProjectLink::InlineCode(code)),
        (None, Some(repo)) => Some(ProjectLink::ExternalRepo(repo)),
        (None, None) => None,
    };
    Project {
        title: raw.title,
        description: raw.description,
        link,
        demo: non_empty(raw.game_link),
    }
}
