//! # Folio
//!
//! A single-page personal portfolio, generated from one content document.
//! Biographical data lives in `content/data.json`; the build renders it into a
//! self-contained `index.html` with a small vanilla script for the interactive
//! parts (smooth navigation, section reveal, code dialogs, contact form).
//!
//! # Architecture
//!
//! ```text
//! content/data.json ──▶ content::load_content ──▶ Portfolio
//! content/config.toml ─▶ config::load_config ───▶ SiteConfig
//!                                                    │
//!                         generate::generate ◀───────┘
//!                                 │
//!                                 ▼
//!                        dist/index.html + assets
//! ```
//!
//! The interactive behaviour is modelled twice: once as plain Rust state
//! machines ([`nav`], [`reveal`], [`clipboard`], [`contact`]) that define the
//! rules and are unit tested, and once in `static/site.js`, which follows the
//! same rules in the browser. The constants the script needs (reveal
//! threshold, copy feedback window, relay timeout, labels) are emitted from
//! Rust into `data-*` attributes so the two never drift.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Loads and normalizes the portfolio document |
//! | [`config`] | `config.toml` loading, validation, merging, and color CSS |
//! | [`generate`] | Renders the page with Maud and copies static assets |
//! | [`nav`] | Section anchors, nav targets, mobile menu state |
//! | [`reveal`] | One-shot fade-in of sections entering the viewport |
//! | [`clipboard`] | Copy-to-clipboard of project snippets with timed feedback |
//! | [`contact`] | Contact form draft and submission state machine |
//! | [`gateway`] | Mail relay seam and the EmailJS-compatible HTTP client |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Interpolation is
//! escaped by default, which matters here: code snippets are shown verbatim
//! and must never be interpreted as markup.
//!
//! ## Normalize Once
//!
//! Optional content fields that select between renderings (an experience's
//! narrative vs. bullet list, a project's inline code vs. repository link)
//! are resolved into enums at load time. The renderer matches on them and
//! never re-inspects raw optionals.
//!
//! ## The Relay Is A Trait
//!
//! Sending mail is an opaque outside call. [`gateway::MailGateway`] is the only
//! seam, so the form logic is tested against an in-memory double and the real
//! client against a throwaway local HTTP listener.

pub mod clipboard;
pub mod config;
pub mod contact;
pub mod content;
pub mod gateway;
pub mod generate;
pub mod nav;
pub mod output;
pub mod reveal;

#[cfg(test)]
pub(crate) mod test_helpers;
