//! Copy-to-clipboard for project code dialogs.
//!
//! Copying is best effort. A missing project, a project without a snippet, or
//! a rejected clipboard write is logged and otherwise ignored; the visitor
//! sees no error and the indicator does not change.

use crate::content::Portfolio;
use log::warn;
use std::time::{Duration, Instant};
use thiserror::Error;

/// How long the "copied" indicator stays up after a successful copy.
pub const COPY_FEEDBACK: Duration = Duration::from_millis(2000);

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}

/// Destination for copied text.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyIndicator {
    /// Default copy icon.
    Idle,
    /// Check mark shown inside the feedback window.
    Copied,
}

/// Shared "copied" indicator for every code dialog on the page.
#[derive(Debug, Default)]
pub struct CopyAction {
    copied_until: Option<Instant>,
}

impl CopyAction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the snippet of the project titled exactly `title`.
    ///
    /// Returns whether text reached the clipboard. A copy made while the
    /// indicator is already up leaves its deadline unchanged; the window
    /// always ends [`COPY_FEEDBACK`] after the copy that opened it.
    pub fn copy(
        &mut self,
        portfolio: &Portfolio,
        title: &str,
        clipboard: &mut dyn Clipboard,
        now: Instant,
    ) -> bool {
        let Some(snippet) = portfolio.project(title).and_then(|p| p.snippet()) else {
            warn!("event=copy_code status=skipped reason=no_snippet title={title:?}");
            return false;
        };
        if let Err(err) = clipboard.write_text(snippet) {
            warn!("event=copy_code status=error title={title:?} error={err}");
            return false;
        }
        match self.copied_until {
            Some(until) if now < until => {}
            _ => self.copied_until = Some(now + COPY_FEEDBACK),
        }
        true
    }

    /// Indicator state at `now`. Reverts on its own once the window passes.
    pub fn indicator(&self, now: Instant) -> CopyIndicator {
        match self.copied_until {
            Some(until) if now < until => CopyIndicator::Copied,
            _ => CopyIndicator::Idle,
        }
    }
}
