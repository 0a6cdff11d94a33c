//! One-shot section reveal.
//!
//! Each section is observed for visibility. The first time at least
//! [`REVEAL_THRESHOLD`] of its area is inside the viewport it is revealed and
//! unobserved; scrolling it out and back in does nothing.
//!
//! The browser side is the `IntersectionObserver` in `static/site.js`, created
//! with the same threshold. It only hides sections after it has confirmed the
//! observer API exists, so environments without it show everything.

use log::debug;
use std::collections::HashSet;
use std::hash::Hash;

/// Fraction of a section's area that must be visible to reveal it.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// CSS class applied to a section once revealed.
pub const REVEAL_CLASS: &str = "animate-fade-in";

/// One visibility sample for an observed element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEntry<K> {
    pub target: K,
    /// Visible fraction of the element's area, `0.0..=1.0`.
    pub ratio: f64,
}

/// Tracks which sections are still waiting to be revealed.
#[derive(Debug)]
pub struct RevealController<K> {
    threshold: f64,
    observing: HashSet<K>,
    revealed: HashSet<K>,
}

impl<K: Eq + Hash + Clone> Default for RevealController<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> RevealController<K> {
    pub fn new() -> Self {
        Self {
            threshold: REVEAL_THRESHOLD,
            observing: HashSet::new(),
            revealed: HashSet::new(),
        }
    }

    /// Start watching `target`. Already-revealed targets stay revealed and are
    /// not observed again.
    pub fn observe(&mut self, target: K) {
        if !self.revealed.contains(&target) {
            self.observing.insert(target);
        }
    }

    /// Feed a batch of visibility samples; returns the targets revealed by it,
    /// in batch order.
    pub fn on_visibility(&mut self, entries: &[VisibilityEntry<K>]) -> Vec<K> {
        let mut newly = Vec::new();
        for entry in entries {
            if entry.ratio < self.threshold {
                continue;
            }
            if self.observing.remove(&entry.target) {
                self.revealed.insert(entry.target.clone());
                newly.push(entry.target.clone());
            }
        }
        if !newly.is_empty() {
            debug!("event=reveal count={} pending={}", newly.len(), self.observing.len());
        }
        newly
    }

    pub fn is_revealed(&self, target: &K) -> bool {
        self.revealed.contains(target)
    }

    pub fn is_observing(&self, target: &K) -> bool {
        self.observing.contains(target)
    }

    pub fn pending(&self) -> usize {
        self.observing.len()
    }

    /// Cancel every outstanding observation. Later samples are ignored.
    pub fn teardown(&mut self) {
        self.observing.clear();
    }
}
