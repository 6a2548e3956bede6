//! Path template compilation and matching.
//!
//! # Responsibilities
//! - Parse route templates (`/node/:id`, `/docs/*rest`) into segment matchers
//! - Match request paths against compiled templates, capturing params
//! - Reject malformed templates at compile time
//!
//! # Design Decisions
//! - Literal matching is case-sensitive
//! - A dynamic segment captures exactly one non-empty segment
//! - A catch-all captures the whole remainder, including an empty one
//! - No regex; matching is a single O(n) walk over segments

use std::collections::HashMap;

use thiserror::Error;

/// Captured path parameters, param name to raw string value.
pub type Params = HashMap<String, String>;

/// Param name used by a bare `*` catch-all segment.
const DEFAULT_CATCH_ALL_NAME: &str = "rest";

/// Error produced when a route template cannot be compiled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("template '{template}' declares more than one catch-all segment")]
    MultipleCatchAll { template: String },

    #[error("template '{template}' has a catch-all segment before the end")]
    CatchAllNotLast { template: String },

    #[error("template '{template}' has a segment with an empty param name")]
    EmptyParamName { template: String },

    #[error("template '{template}' declares param '{name}' more than once")]
    DuplicateParamName { template: String, name: String },
}

/// One position in a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the request segment exactly.
    Literal(String),
    /// Captures one non-empty request segment under the given name.
    Dynamic(String),
    /// Captures every remaining request segment under the given name.
    CatchAll(String),
}

/// A route template compiled into an ordered list of segment matchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    segments: Vec<Segment>,
    template: String,
}

impl CompiledPattern {
    /// Compile a template string.
    ///
    /// The root template `/` compiles to an empty segment list and matches
    /// only the root path.
    pub fn compile(template: &str) -> Result<CompiledPattern, PatternError> {
        let mut segments = Vec::new();
        let mut seen_names: Vec<&str> = Vec::new();
        let mut catch_all_seen = false;

        for raw in split_path(template) {
            if catch_all_seen {
                // Something follows a catch-all. Distinguish a second
                // catch-all from an ordinary trailing segment for the error.
                if raw.starts_with('*') {
                    return Err(PatternError::MultipleCatchAll {
                        template: template.to_string(),
                    });
                }
                return Err(PatternError::CatchAllNotLast {
                    template: template.to_string(),
                });
            }

            if let Some(name) = raw.strip_prefix(':') {
                if name.is_empty() {
                    return Err(PatternError::EmptyParamName {
                        template: template.to_string(),
                    });
                }
                if seen_names.contains(&name) {
                    return Err(PatternError::DuplicateParamName {
                        template: template.to_string(),
                        name: name.to_string(),
                    });
                }
                seen_names.push(name);
                segments.push(Segment::Dynamic(name.to_string()));
            } else if let Some(name) = raw.strip_prefix('*') {
                let name = if name.is_empty() {
                    DEFAULT_CATCH_ALL_NAME
                } else {
                    name
                };
                if seen_names.contains(&name) {
                    return Err(PatternError::DuplicateParamName {
                        template: template.to_string(),
                        name: name.to_string(),
                    });
                }
                seen_names.push(name);
                catch_all_seen = true;
                segments.push(Segment::CatchAll(name.to_string()));
            } else {
                segments.push(Segment::Literal(raw.to_string()));
            }
        }

        Ok(CompiledPattern {
            segments,
            template: template.to_string(),
        })
    }

    /// The template this pattern was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The compiled segments, in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True when the first segment is a catch-all, i.e. the pattern accepts
    /// any path (including the empty one).
    pub fn matches_anything(&self) -> bool {
        matches!(self.segments.first(), Some(Segment::CatchAll(_)))
    }

    /// Match a full request path. Returns captured params on success.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let request = split_path(path);
        let (params, consumed) = self.match_prefix(&request)?;
        if consumed == request.len() {
            Some(params)
        } else {
            None
        }
    }

    /// Match against the front of `request`, returning captured params and
    /// the number of request segments consumed. A catch-all consumes every
    /// remaining segment; otherwise exactly `self.segments.len()` must be
    /// available and compatible.
    pub fn match_prefix(&self, request: &[&str]) -> Option<(Params, usize)> {
        let mut params = Params::new();

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Literal(text) => {
                    if request.get(i).copied() != Some(text.as_str()) {
                        return None;
                    }
                }
                Segment::Dynamic(name) => {
                    let value = *request.get(i)?;
                    if value.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), value.to_string());
                }
                Segment::CatchAll(name) => {
                    let remainder = if i < request.len() {
                        request[i..].join("/")
                    } else {
                        String::new()
                    };
                    params.insert(name.clone(), remainder);
                    return Some((params, request.len()));
                }
            }
        }

        if request.len() < self.segments.len() {
            return None;
        }
        Some((params, self.segments.len()))
    }
}

/// Split a path into segments, ignoring leading and trailing separators.
/// `/` and the empty string yield no segments. Interior empty segments are
/// preserved so that dynamic segments can reject them.
pub fn split_path(path: &str) -> Vec<&str> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}
