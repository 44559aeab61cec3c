//! Request phase timing.
//!
//! Handlers mark phases by name (`received`, `handled`, ...) and the
//! completion log reports the gaps between them.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Named instants within one request.
#[derive(Debug, Clone)]
pub struct TimingContext {
    start: Instant,
    marks: HashMap<String, Instant>,
}

impl TimingContext {
    /// Start timing now.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            marks: HashMap::new(),
        }
    }

    /// Record `name` at the current instant. A repeated name is overwritten.
    pub fn mark(&mut self, name: &str) {
        self.marks.insert(name.to_string(), Instant::now());
    }

    /// Time since the request started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time from request start to a mark.
    pub fn at(&self, name: &str) -> Option<Duration> {
        self.marks.get(name).map(|t| t.duration_since(self.start))
    }

    /// Duration between two marks.
    pub fn between(&self, from: &str, to: &str) -> Option<Duration> {
        let from = self.marks.get(from)?;
        let to = self.marks.get(to)?;
        Some(to.saturating_duration_since(*from))
    }
}

impl Default for TimingContext {
    fn default() -> Self {
        Self::new()
    }
}
