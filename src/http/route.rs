//! Route pattern compilation and matching.
//!
//! A template such as `/tasks/:id` compiles into a typed segment list instead
//! of a pattern string, so the matcher can be inspected and tested directly.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled path template.
///
/// Matching is anchored to the whole path: `/tasks` matches neither
/// `/tasks/1` nor `/tasks/` (a trailing empty segment is significant). Each
/// `:name` segment captures exactly one non-empty path segment. Anything from
/// the first `?` onward is split off before matching and returned as the raw
/// query substring.
///
/// ```
/// use tasklite::http::route::RoutePattern;
///
/// let pattern = RoutePattern::compile("/tasks/:id");
/// assert!(pattern.test("/tasks/42"));
/// assert!(!pattern.test("/tasks"));
///
/// let matched = pattern.matches("/tasks/42?title=a").unwrap();
/// assert_eq!(matched.params.get("id").map(String::as_str), Some("42"));
/// assert_eq!(matched.query.as_deref(), Some("title=a"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    segments: Vec<Segment>,
}

/// The outcome of a successful [`RoutePattern::matches`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMatch {
    /// Captured `:name` segments, keyed by name.
    pub params: HashMap<String, String>,
    /// Raw query substring following the first `?`, without the `?` itself.
    pub query: Option<String>,
}

impl RoutePattern {
    /// Compiles a path template. A segment starting with `:` becomes a named
    /// capture; every other segment must match literally.
    pub fn compile(template: &str) -> Self {
        let segments = template
            .split('/')
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) if !name.is_empty() => Segment::Param(name.to_string()),
                _ => Segment::Literal(segment.to_string()),
            })
            .collect();
        Self { segments }
    }

    /// Whether `target` matches this pattern.
    pub fn test(&self, target: &str) -> bool {
        self.matches(target).is_some()
    }

    /// Matches `target` against the pattern, returning captures and the query
    /// substring on success.
    pub fn matches(&self, target: &str) -> Option<RouteMatch> {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (target, None),
        };

        let mut actual = path.split('/');
        let mut params = HashMap::new();
        for expected in &self.segments {
            let segment = actual.next()?;
            match expected {
                Segment::Literal(literal) => {
                    if literal != segment {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if segment.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), segment.to_string());
                }
            }
        }
        if actual.next().is_some() {
            return None;
        }

        Some(RouteMatch { params, query })
    }
}
