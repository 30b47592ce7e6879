//! Path template matching logic.
//!
//! # Responsibilities
//! - Compile a route template ("/tasks/:id/complete") into a reusable matcher
//! - Match concrete request paths against the template (case-sensitive)
//! - Extract named parameter values from matching paths
//!
//! # Design Decisions
//! - Segment-wise comparison, anchored start to end (no partial matches)
//! - A `:name` segment captures the whole segment between its literal
//!   boundaries; empty captures do not match
//! - No trailing-slash normalization
//! - No regex to guarantee O(n) matching

use std::collections::HashMap;

/// One segment of a compiled route template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled route-path template.
///
/// Parameters are declared with a `:` prefix, e.g. `/tasks/:id`.
#[derive(Debug, Clone)]
pub struct PathPattern {
    template: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a template into a matcher.
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let segments = template
            .split('/')
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(s.to_string()),
            })
            .collect();

        Self { template, segments }
    }

    /// The template string this pattern was compiled from, for log events.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Match a concrete path against this pattern.
    ///
    /// Returns the parameter name → value mapping on success, `None` when
    /// the path does not match the whole template.
    pub fn capture(&self, path: &str) -> Option<HashMap<String, String>> {
        let parts: Vec<&str> = path.split('/').collect();

        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) => {
                    if lit != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    // An empty segment is not a capture
                    if part.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), part.to_string());
                }
            }
        }

        Some(params)
    }
}
