//! Shared test utilities for the folio test suite.
//!
//! Provides a canned portfolio, fixed relay credentials, and in-memory
//! stand-ins for the two outside effects the page has: the mail relay and
//! the clipboard.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let gateway = RecordingGateway::succeeding();
//! let mut form = ContactForm::new(test_credentials());
//! form.submit(&gateway).unwrap();
//! assert_eq!(gateway.calls().len(), 1);
//! ```

use std::cell::RefCell;
use std::path::Path;
use tempfile::TempDir;

use crate::clipboard::{Clipboard, ClipboardError};
use crate::content::{self, Portfolio};
use crate::gateway::{GatewayError, MailCredentials, MailGateway, MailPayload, MailRequest};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Canned content
// =========================================================================

const SAMPLE_DOCUMENT: &str = r#"{
  "personalInfo": {
    "name": "Infant Stanko",
    "location": "Lisbon, Portugal",
    "phone": "555-0100",
    "email": "x@y.com",
    "summary": "Backend engineer who likes small, fast tools.",
    "github": "https://github.com/example",
    "linkedin": "https://linkedin.com/in/example"
  },
  "experience": [
    {
      "title": "Software Engineer",
      "company": "Acme",
      "period": "2021 - Present",
      "responsibilities": ["Built the billing pipeline", "Ran the on-call rotation"]
    },
    {
      "title": "Intern",
      "company": "Initech",
      "period": "2020",
      "description": "Wrote internal tooling."
    }
  ],
  "education": [
    { "degree": "BSc Computer Science", "institution": "University of Lisbon", "year": "2020", "score": "GPA 3.8" }
  ],
  "projects": [
    {
      "title": "Tic Tac Toe Game",
      "description": "Terminal tic tac toe.",
      "code": "fn main() {\n    let board = [[' '; 3]; 3];\n    println!(\"{:?}\", board);\n}\n",
      "gameLink": "https://example.com/tictactoe"
    },
    {
      "title": "Web Crawler",
      "description": "Polite concurrent crawler.",
      "repo": "https://github.com/example/crawler"
    }
  ],
  "skills": ["Rust", "PostgreSQL"],
  "courses": ["Distributed Systems"],
  "achievements": ["Won the 2019 hackathon"],
  "interests": ["Climbing"],
  "languages": ["English", "Portuguese"]
}"#;

/// A small but complete portfolio covering every content variant.
pub fn sample_portfolio() -> Portfolio {
    content::parse_str(SAMPLE_DOCUMENT).unwrap()
}

/// Relay identifiers used wherever a test needs a configured form.
pub fn test_credentials() -> MailCredentials {
    MailCredentials {
        service_id: "service_test".into(),
        template_id: "template_test".into(),
        token: "token_test".into(),
    }
}

// =========================================================================
// Mail relay double
// =========================================================================

/// Gateway that records every request and answers with a fixed result.
pub struct RecordingGateway {
    succeed: bool,
    calls: RefCell<Vec<(MailCredentials, MailPayload)>>,
}

impl RecordingGateway {
    pub fn succeeding() -> Self {
        Self {
            succeed: true,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            succeed: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Every request seen so far, in order.
    pub fn calls(&self) -> Vec<(MailCredentials, MailPayload)> {
        self.calls.borrow().clone()
    }
}

impl MailGateway for RecordingGateway {
    fn send(&self, request: MailRequest<'_>) -> Result<(), GatewayError> {
        self.calls
            .borrow_mut()
            .push((request.credentials.clone(), request.payload.clone()));
        if self.succeed {
            Ok(())
        } else {
            Err(GatewayError::Rejected {
                status: 500,
                body: "relay unavailable".into(),
            })
        }
    }
}

// =========================================================================
// Clipboard double
// =========================================================================

#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    deny: bool,
}

impl MemoryClipboard {
    /// A clipboard whose every write is refused, like a denied permission.
    pub fn denying() -> Self {
        Self {
            contents: None,
            deny: true,
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.deny {
            return Err(ClipboardError::Rejected("permission denied".into()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}
