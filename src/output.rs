//! CLI output formatting.
//!
//! Output is a content inventory: each section of the page is listed with
//! its entries by positional index and title, so `folio check` reads like a
//! table of contents of what the build will render.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Profile
//!     Infant Stanko
//!     Lisbon, Portugal
//!
//! Experience
//! 001 Software Engineer, Acme (2 bullets)
//! 002 Intern, Initech (narrative)
//!
//! Projects
//! 001 Tic Tac Toe Game
//!     Code: inline (4 lines)
//!     Demo: https://example.com/tictactoe
//! 002 Web Crawler
//!     Code: https://github.com/example/crawler
//!
//! Lists
//!     skills: 2, courses: 1, achievements: 1, interests: 1, languages: 2
//!
//! Config
//!     config.toml
//!     assets/
//!     Mail relay: configured
//! ```
//!
//! ## Build
//!
//! ```text
//! Page → dist/index.html
//! Assets
//!     profile.jpg
//!     resume.pdf
//! Resume: present
//! Mail relay: configured
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::config::SiteConfig;
use crate::content::{ExperienceDetail, Portfolio, ProjectLink};
use crate::gateway::MailCredentials;
use crate::generate::GenerateReport;
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    }
}

fn detail_label(detail: &ExperienceDetail) -> String {
    match detail {
        ExperienceDetail::Narrative(_) => "narrative".to_string(),
        ExperienceDetail::Bulleted(items) if items.len() == 1 => "1 bullet".to_string(),
        ExperienceDetail::Bulleted(items) => format!("{} bullets", items.len()),
        ExperienceDetail::Unspecified => "no details".to_string(),
    }
}

fn yes_no<'a>(present: bool, yes: &'a str, no: &'a str) -> &'a str {
    if present { yes } else { no }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(
    portfolio: &Portfolio,
    config: &SiteConfig,
    source_root: &Path,
) -> Vec<String> {
    let mut lines = Vec::new();
    let profile = &portfolio.profile;

    lines.push("Profile".to_string());
    lines.push(format!("{}{}", indent(1), profile.name));
    if !profile.location.is_empty() {
        lines.push(format!("{}{}", indent(1), profile.location));
    }
    if !profile.summary.is_empty() {
        lines.push(format!("{}{}", indent(1), truncate(profile.summary.trim(), 60)));
    }

    if !portfolio.experience.is_empty() {
        lines.push(String::new());
        lines.push("Experience".to_string());
        for (i, exp) in portfolio.experience.iter().enumerate() {
            lines.push(format!(
                "{} {}, {} ({})",
                format_index(i + 1),
                exp.title,
                exp.organization,
                detail_label(&exp.detail)
            ));
        }
    }

    if !portfolio.education.is_empty() {
        lines.push(String::new());
        lines.push("Education".to_string());
        for (i, edu) in portfolio.education.iter().enumerate() {
            lines.push(format!(
                "{} {}, {}",
                format_index(i + 1),
                edu.degree,
                edu.institution
            ));
        }
    }

    if !portfolio.projects.is_empty() {
        lines.push(String::new());
        lines.push("Projects".to_string());
        for (i, project) in portfolio.projects.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), project.title));
            match &project.link {
                Some(ProjectLink::InlineCode(code)) => lines.push(format!(
                    "{}Code: inline ({} lines)",
                    indent(1),
                    code.lines().count()
                )),
                Some(ProjectLink::ExternalRepo(url)) => {
                    lines.push(format!("{}Code: {}", indent(1), url))
                }
                None => {}
            }
            if let Some(demo) = &project.demo {
                lines.push(format!("{}Demo: {}", indent(1), demo));
            }
        }
    }

    lines.push(String::new());
    lines.push("Lists".to_string());
    lines.push(format!(
        "{}skills: {}, courses: {}, achievements: {}, interests: {}, languages: {}",
        indent(1),
        portfolio.skills.len(),
        portfolio.courses.len(),
        portfolio.achievements.len(),
        portfolio.interests.len(),
        portfolio.languages.len()
    ));

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push(format!("{}config.toml", indent(1)));
    }
    if source_root.join(&config.site.assets_dir).is_dir() {
        lines.push(format!("{}{}/", indent(1), config.site.assets_dir));
    }
    let relay = MailCredentials::resolve(&config.mail);
    lines.push(format!(
        "{}Mail relay: {}",
        indent(1),
        match relay {
            Ok(_) => "configured".to_string(),
            Err(err) => format!("not configured ({err})"),
        }
    ));

    lines
}

pub fn print_check_output(portfolio: &Portfolio, config: &SiteConfig, source_root: &Path) {
    for line in format_check_output(portfolio, config, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = vec![format!("Page → {}", report.page.display())];

    if !report.assets.is_empty() {
        lines.push("Assets".to_string());
        for asset in &report.assets {
            lines.push(format!("{}{}", indent(1), asset.display()));
        }
    }

    lines.push(format!(
        "Resume: {}",
        yes_no(report.resume_present, "present", "missing")
    ));
    lines.push(format!(
        "Mail relay: {}",
        yes_no(report.mail_configured, "configured", "not configured")
    ));
    lines
}

pub fn print_build_output(report: &GenerateReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
