//! HTML site generation.
//!
//! Renders the whole portfolio into one `index.html`. The page is a pure
//! function of the loaded [`Portfolio`] and the [`SiteConfig`]; the only
//! state it carries is what the browser script toggles (mobile menu, open
//! dialog, copy indicator, form fields).
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html          # The page, CSS and script inlined
//! ├── resume.pdf          # Copied from content/assets/
//! └── profile.jpg
//! ```
//!
//! ## Page Layout
//!
//! | Section | Anchor |
//! |---------|--------|
//! | Header (desktop nav, mobile menu, theme toggle) | |
//! | Hero: name, contact facts, summary, resume download | `#about` |
//! | Experience | `#experience` |
//! | Education | `#education` |
//! | Projects, with code dialogs | `#projects` |
//! | Skills / Courses tabs | `#skills` |
//! | Achievements | `#achievements` |
//! | Interests and Languages | |
//! | Contact form | `#contact` |
//! | Footer, phone popup | |
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Layout and components (colors injected from config)
//! - `static/site.js`: Reveal, smooth scroll, dialogs, copy, contact form
//!
//! The script reads its tunables from `data-*` attributes on `<body>` and the
//! contact form, all emitted from the Rust constants that define them.

use crate::clipboard::COPY_FEEDBACK;
use crate::config::{self, SiteConfig};
use crate::contact::{self, BUSY_LABEL, FAILURE_NOTICE, SUBMIT_LABEL};
use crate::content::{Education, Experience, ExperienceDetail, Portfolio, Project, ProjectLink};
use crate::gateway::MailCredentials;
use crate::nav::{NAV_SECTIONS, NavOrigin, Section};
use crate::reveal::{REVEAL_CLASS, REVEAL_THRESHOLD};
use log::{info, warn};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot walk assets: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");

/// What a build wrote, for CLI reporting.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Path of the generated page.
    pub page: PathBuf,
    /// Asset files copied, relative to the output directory.
    pub assets: Vec<PathBuf>,
    /// Whether the configured resume exists in the output.
    pub resume_present: bool,
    /// Whether the contact form was wired to a relay.
    pub mail_configured: bool,
}

/// Render the page and copy static assets into `output_dir`.
pub fn generate(
    portfolio: &Portfolio,
    config: &SiteConfig,
    content_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let assets = copy_assets(&content_dir.join(&config.site.assets_dir), output_dir)?;

    let credentials = match MailCredentials::resolve(&config.mail) {
        Ok(creds) => Some(creds),
        Err(err) => {
            warn!("event=generate status=degraded reason=mail_unconfigured error={err}");
            None
        }
    };

    let page = render_page(portfolio, config, credentials.as_ref());
    let page_path = output_dir.join("index.html");
    fs::write(&page_path, page.into_string())?;
    info!(
        "event=generate status=ok page={} assets={}",
        page_path.display(),
        assets.len()
    );

    Ok(GenerateReport {
        page: page_path,
        resume_present: output_dir.join(&config.site.resume).is_file(),
        mail_configured: credentials.is_some(),
        assets,
    })
}

/// Copy every file under `src` into `dst`, preserving layout.
///
/// A missing assets directory is not an error; the page just links to files
/// that are not there.
fn copy_assets(src: &Path, dst: &Path) -> Result<Vec<PathBuf>, GenerateError> {
    let mut copied = Vec::new();
    if !src.is_dir() {
        return Ok(copied);
    }
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied.push(rel.to_path_buf());
        }
    }
    Ok(copied)
}

// ============================================================================
// Page
// ============================================================================

/// Render the complete page.
///
/// `credentials` wires the contact form to the relay; without them the form
/// still renders and every send reports the generic failure notice.
pub fn render_page(
    portfolio: &Portfolio,
    config: &SiteConfig,
    credentials: Option<&MailCredentials>,
) -> Markup {
    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    );
    let title = config
        .site
        .title
        .as_deref()
        .unwrap_or(&portfolio.profile.name);

    let content = html! {
        (site_header(portfolio, config))
        main.container {
            (hero_section(portfolio, config))
            (experience_section(&portfolio.experience))
            (education_section(&portfolio.education))
            (projects_section(&portfolio.projects))
            (skills_section(&portfolio.skills, &portfolio.courses))
            (achievements_section(&portfolio.achievements))
            (interests_section(&portfolio.interests, &portfolio.languages))
        }
        (contact_section(&portfolio.profile.name, config, credentials))
        (site_footer(portfolio))
        (phone_popup(&portfolio.profile.phone))
        div.toast-region role="status" aria-live="polite" {}
        script { (PreEscaped(JS)) }
    };

    base_document(title, &css, content)
}

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="generator" content=(concat!("folio ", env!("CARGO_PKG_VERSION")));
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body
                data-reveal-threshold=(REVEAL_THRESHOLD)
                data-reveal-class=(REVEAL_CLASS)
                data-copy-feedback-ms=(COPY_FEEDBACK.as_millis() as u64)
            {
                (content)
            }
        }
    }
}

// ============================================================================
// Header and navigation
// ============================================================================

fn site_header(portfolio: &Portfolio, config: &SiteConfig) -> Markup {
    html! {
        header.site-header {
            div.container.header-bar {
                div.brand {
                    img.avatar src=(config.site.avatar) alt="Profile" width="40" height="40";
                    span.brand-name { (portfolio.profile.name) }
                }
                div.header-actions {
                    nav.desktop-nav aria-label="Sections" {
                        (render_nav(NavOrigin::Desktop))
                    }
                    button.icon-button.menu-toggle type="button" data-menu-toggle
                        aria-label="Open menu" aria-expanded="false" aria-controls="mobile-menu" {
                        (icon(Icon::Menu))
                    }
                    button.icon-button.theme-toggle type="button" data-theme-toggle aria-label="Toggle theme" {
                        (icon(Icon::Sun))
                    }
                }
            }
            div.mobile-menu id="mobile-menu" hidden {
                nav aria-label="Sections" {
                    (render_nav(NavOrigin::Mobile))
                }
            }
        }
    }
}

/// Renders one navigation list. Both surfaces share the same entries.
pub fn render_nav(origin: NavOrigin) -> Markup {
    html! {
        @for section in NAV_SECTIONS {
            a.nav-link href={ "#" (section.anchor()) } data-nav=(origin.marker()) data-target=(section.anchor()) {
                (section.label())
            }
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

fn hero_section(portfolio: &Portfolio, config: &SiteConfig) -> Markup {
    let profile = &portfolio.profile;
    html! {
        section.hero id=(Section::About.anchor()) {
            div.hero-main {
                h1 { (profile.name) }
                div.facts {
                    span.fact { (icon(Icon::MapPin)) span { (profile.location) } }
                    span.fact { (icon(Icon::Phone)) span { (profile.phone) } }
                    span.fact { (icon(Icon::Mail)) span { (profile.email) } }
                }
                div.card {
                    h3.card-title { "Executive Summary" }
                    div.summary { (markdown(&profile.summary)) }
                }
            }
            aside.hero-side {
                a.button.secondary.wide href=(config.site.resume) download target="_blank" rel="noopener noreferrer" {
                    (icon(Icon::Download)) "Download Resume"
                }
                div.card {
                    h3.card-title { "Contact Information" }
                    ul.contact-facts {
                        li { (icon(Icon::Phone)) span { (profile.phone) } }
                        li { (icon(Icon::Mail)) span { (profile.email) } }
                        li { (icon(Icon::MapPin)) span { (profile.location) } }
                    }
                }
            }
        }
    }
}

fn experience_section(entries: &[Experience]) -> Markup {
    html! {
        section id=(Section::Experience.anchor()) {
            h2 { "Experience" }
            div.stack {
                @for exp in entries {
                    article.card {
                        (card_heading(&exp.title, &exp.organization, &exp.period))
                        (experience_detail(&exp.detail))
                    }
                }
            }
        }
    }
}

/// Exactly one of prose, bullet list, or the fallback line.
fn experience_detail(detail: &ExperienceDetail) -> Markup {
    html! {
        @match detail {
            ExperienceDetail::Narrative(text) => p.detail { (text) },
            ExperienceDetail::Bulleted(items) => ul.detail.bullets {
                @for item in items { li { (item) } }
            },
            ExperienceDetail::Unspecified => p.detail.muted { "No details available" },
        }
    }
}

fn education_section(entries: &[Education]) -> Markup {
    html! {
        section id=(Section::Education.anchor()) {
            h2 { "Education" }
            div.stack {
                @for edu in entries {
                    article.card {
                        (card_heading(&edu.degree, &edu.institution, &edu.year))
                        p.detail { (edu.score) }
                    }
                }
            }
        }
    }
}

fn card_heading(title: &str, subtitle: &str, period: &str) -> Markup {
    html! {
        div.card-heading {
            div {
                h3.card-title { (title) }
                p.card-subtitle { (subtitle) }
            }
            span.badge { (icon(Icon::Calendar)) span { (period) } }
        }
    }
}

fn projects_section(projects: &[Project]) -> Markup {
    html! {
        section id=(Section::Projects.anchor()) {
            h2 { "Projects" }
            div.grid.two {
                @for (idx, project) in projects.iter().enumerate() {
                    (project_card(idx, project))
                }
            }
        }
    }
}

fn code_dialog_id(idx: usize) -> String {
    format!("code-{}", idx + 1)
}

fn project_card(idx: usize, project: &Project) -> Markup {
    html! {
        article.card.project {
            h3.card-title { (project.title) }
            p { (project.description) }
            div.actions {
                @match &project.link {
                    Some(ProjectLink::InlineCode(code)) => {
                        button.button.outline type="button" data-code-open=(code_dialog_id(idx)) {
                            (icon(Icon::Code)) "Code"
                        }
                        (code_dialog(idx, &project.title, code))
                    },
                    Some(ProjectLink::ExternalRepo(url)) => {
                        a.button.outline href=(url) target="_blank" rel="noopener noreferrer" {
                            (icon(Icon::Github)) "Code"
                        }
                    },
                    None => {},
                }
                @if let Some(demo) = &project.demo {
                    a.button.outline href=(demo) target="_blank" rel="noopener noreferrer" {
                        (icon(Icon::Gamepad)) "Play"
                    }
                }
            }
        }
    }
}

/// Modal showing a snippet verbatim, with the shared copy button.
fn code_dialog(idx: usize, title: &str, code: &str) -> Markup {
    html! {
        dialog.code-dialog id=(code_dialog_id(idx)) aria-label={ (title) " Code" } {
            div.dialog-header {
                h3 { (title) " Code" }
                button.icon-button.copy-button type="button" data-copy=(title) {
                    span.when-idle { (icon(Icon::Copy)) }
                    span.when-copied { (icon(Icon::Check)) }
                    span.sr-only { "Copy code" }
                }
                button.icon-button type="button" data-dialog-close aria-label="Close" { "×" }
            }
            pre.code data-snippet-for=(title) { code { (code) } }
        }
    }
}

fn skills_section(skills: &[String], courses: &[String]) -> Markup {
    html! {
        section id=(Section::Skills.anchor()) {
            div.tabs role="tablist" {
                button.tab type="button" role="tab" data-tab="skills" aria-selected="true" { "Skills" }
                button.tab type="button" role="tab" data-tab="courses" aria-selected="false" { "Courses" }
            }
            div.tab-panel data-panel="skills" role="tabpanel" {
                h2 { "Skills" }
                div.grid.three {
                    @for skill in skills {
                        article.card {
                            h3.card-title { (skill) }
                            p { (crate::content::skill_blurb(skill)) }
                        }
                    }
                }
            }
            div.tab-panel data-panel="courses" role="tabpanel" hidden {
                h2 { "Courses" }
                div.grid.two {
                    @for course in courses {
                        article.card { p { (course) } }
                    }
                }
            }
        }
    }
}

fn achievements_section(achievements: &[String]) -> Markup {
    html! {
        section id=(Section::Achievements.anchor()) {
            h2 { "Achievements & Awards" }
            div.card {
                (icon_list(achievements, Icon::Award))
            }
        }
    }
}

fn interests_section(interests: &[String], languages: &[String]) -> Markup {
    html! {
        section.grid.two {
            div {
                h2 { "Interests" }
                div.card { (icon_list(interests, Icon::Heart)) }
            }
            div {
                h2 { "Languages" }
                div.card { (icon_list(languages, Icon::Languages)) }
            }
        }
    }
}

fn icon_list(items: &[String], glyph: Icon) -> Markup {
    html! {
        ul.icon-list {
            @for item in items {
                li { (icon(glyph)) p { (item) } }
            }
        }
    }
}

fn contact_section(owner: &str, config: &SiteConfig, credentials: Option<&MailCredentials>) -> Markup {
    let timeout_ms = Duration::from_secs(config.mail.timeout_secs).as_millis();
    html! {
        section.container id=(Section::Contact.anchor()) {
            div.card.contact-card {
                h2.with-icon { (icon(Icon::Mail)) "Say Hi" }
                form id="contact-form"
                    data-endpoint=(config.mail.endpoint)
                    data-service-id=[credentials.map(|c| &c.service_id)]
                    data-template-id=[credentials.map(|c| &c.template_id)]
                    data-token=[credentials.map(|c| &c.token)]
                    data-timeout-ms=(timeout_ms)
                    data-failure=(FAILURE_NOTICE)
                    data-busy-label=(BUSY_LABEL)
                    data-idle-label=(SUBMIT_LABEL)
                {
                    label for="name" { "Name" }
                    input id="name" name="name" type="text" placeholder="Your name" required;
                    label for="email" { "Email" }
                    input id="email" name="email" type="email" placeholder="your.email@example.com" required;
                    label for="message" { "Message" }
                    textarea id="message" name="message" placeholder="What would you like to tell me?" required {}
                    button.button.outline.wide type="submit" data-submit {
                        (icon(Icon::Send)) span.submit-label { (SUBMIT_LABEL) }
                    }
                }
            }
            dialog.success-dialog id="success-dialog" {
                p.celebrate { "🎉" }
                h3 { (contact::success_title(owner)) }
                p { "Thank you for contacting!" }
                button.button type="button" data-dialog-close { "Close" }
            }
        }
    }
}

fn site_footer(portfolio: &Portfolio) -> Markup {
    let profile = &portfolio.profile;
    html! {
        footer.site-footer {
            div.container.footer-bar {
                p.footer-name { (profile.name.to_uppercase()) }
                div.footer-links {
                    @if let Some(url) = &profile.github {
                        a.icon-button href=(url) target="_blank" rel="noopener noreferrer" aria-label="GitHub" {
                            (icon(Icon::Github))
                        }
                    }
                    @if let Some(url) = &profile.linkedin {
                        a.icon-button href=(url) target="_blank" rel="noopener noreferrer" aria-label="LinkedIn" {
                            (icon(Icon::Linkedin))
                        }
                    }
                    a.icon-button href={ "mailto:" (profile.email) } aria-label="Email" data-mailto {
                        (icon(Icon::Mail))
                    }
                    button.icon-button type="button" data-phone-open aria-label="Phone" {
                        (icon(Icon::Phone))
                    }
                }
            }
        }
    }
}

/// Shows the number instead of invoking a dialer.
fn phone_popup(phone: &str) -> Markup {
    html! {
        dialog.phone-popup id="phone-popup" {
            h3 { "Phone" }
            p.phone-number { (phone) }
            div.actions {
                a.button.outline href={ "tel:" (phone) } { (icon(Icon::Phone)) "Call" }
                button.button type="button" data-dialog-close { "Close" }
            }
        }
    }
}

fn markdown(text: &str) -> Markup {
    let parser = Parser::new(text);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);
    PreEscaped(body_html)
}

// ============================================================================
// Icons
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Icon {
    Award,
    Calendar,
    Check,
    Code,
    Copy,
    Download,
    Gamepad,
    Github,
    Heart,
    Languages,
    Linkedin,
    Mail,
    MapPin,
    Menu,
    Phone,
    Send,
    Sun,
}

/// Inline stroke icon (24×24 viewbox).
fn icon(glyph: Icon) -> Markup {
    let path = match glyph {
        Icon::Award => "M12 15a6 6 0 1 0 0-12 6 6 0 0 0 0 12zM8.2 13.9 7 22l5-3 5 3-1.2-8.1",
        Icon::Calendar => "M3 5h18v16H3zM16 3v4M8 3v4M3 11h18",
        Icon::Check => "M20 6 9 17l-5-5",
        Icon::Code => "m16 18 6-6-6-6M8 6l-6 6 6 6",
        Icon::Copy => "M8 8h12v12H8zM4 16V4h12",
        Icon::Download => "M21 15v4a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2v-4M7 10l5 5 5-5M12 15V3",
        Icon::Gamepad => "M6 12h4M8 10v4M15 13h.01M18 11h.01M17 6H7a5 5 0 0 0 0 10h10a5 5 0 0 0 0-10z",
        Icon::Github => {
            "M15 22v-4a4.8 4.8 0 0 0-1-3.5c3 0 6-2 6-5.5.1-1.3-.3-2.5-1-3.5.3-1.2.3-2.4 0-3.5 0 0-1 0-3 1.5a10.4 10.4 0 0 0-6 0C8 2 7 2 7 2c-.3 1.1-.3 2.3 0 3.5-.7 1-1.1 2.2-1 3.5 0 3.5 3 5.5 6 5.5-.4.5-.7 1.1-.8 1.7-.2.6-.2 1.2-.2 1.8v4M9 18c-4.5 2-5-2-7-2"
        }
        Icon::Heart => "M19 14c1.5-1.5 3-3.2 3-5.5A5.5 5.5 0 0 0 16.5 3c-1.8 0-3 .5-4.5 2-1.5-1.5-2.7-2-4.5-2A5.5 5.5 0 0 0 2 8.5c0 2.3 1.5 4 3 5.5l7 7z",
        Icon::Languages => "m5 8 6 6M4 14l6-6 2-3M2 5h12M7 2h1M22 22l-5-10-5 10M14 18h6",
        Icon::Linkedin => "M16 8a6 6 0 0 1 6 6v7h-4v-7a2 2 0 0 0-4 0v7h-4v-7a6 6 0 0 1 6-6zM2 9h4v12H2zM4 2a2 2 0 1 0 0 4 2 2 0 0 0 0-4z",
        Icon::Mail => "M2 4h20v16H2zM22 7l-10 6L2 7",
        Icon::MapPin => "M20 10c0 6-8 12-8 12s-8-6-8-12a8 8 0 0 1 16 0zM12 13a3 3 0 1 0 0-6 3 3 0 0 0 0 6z",
        Icon::Menu => "M4 6h16M4 12h16M4 18h16",
        Icon::Phone => {
            "M22 16.9v3a2 2 0 0 1-2.2 2 19.8 19.8 0 0 1-8.6-3.1 19.5 19.5 0 0 1-6-6A19.8 19.8 0 0 1 2.1 4.2 2 2 0 0 1 4.1 2h3a2 2 0 0 1 2 1.7c.1 1 .4 1.9.7 2.8a2 2 0 0 1-.5 2.1L8 9.9a16 16 0 0 0 6 6l1.3-1.3a2 2 0 0 1 2.1-.4c.9.3 1.8.6 2.8.7a2 2 0 0 1 1.7 2z"
        }
        Icon::Send => "m22 2-7 20-4-9-9-4zM22 2 11 13",
        Icon::Sun => "M12 17a5 5 0 1 0 0-10 5 5 0 0 0 0 10zM12 1v2M12 21v2M4.2 4.2l1.4 1.4M18.4 18.4l1.4 1.4M1 12h2M21 12h2M4.2 19.8l1.4-1.4M18.4 5.6l1.4-1.4",
    };
    html! {
        svg.icon xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" width="20" height="20"
            fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"
            aria-hidden="true" {
            path d=(path) {}
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
