//! # Selection Patterns
//!
//! Wildcard matching of library-relative paths against the patterns used in
//! `resources:` selection rules.
//!
//! A pattern is split on `/` into segments and parsed once into a sequence of
//! [`Segment`] matchers:
//!
//! - `*` on its own is a [`Segment::Wildcard`]. As the last segment it spans
//!   zero or more whole path segments, so `auth/*` matches `auth/oauth.md`
//!   and `auth/legacy/basic.md`. Followed by more segments it stands for
//!   exactly one segment, so `api/*/handlers.md` matches `api/v1/handlers.md`
//!   but not `api/v1/internal/handlers.md`.
//! - `**` on its own is a [`Segment::Recursive`] and spans zero or more
//!   segments wherever it appears.
//! - A segment mixing `*` with text (`error-*`, `*-validation.md`) is a
//!   [`Segment::Partial`] glob confined to a single path segment.
//! - Everything else is a [`Segment::Literal`]. There are no character
//!   classes, alternations or escapes; `?`, `[` and `{` are plain characters.
//!
//! Matching is case-sensitive, total and side-effect free. Paths and patterns
//! are normalized the same way before comparison (see [`normalize_path`]),
//! so host separators never leak into results.

use std::fmt;

/// One parsed segment of a [`Pattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches one path segment with exactly this text.
    Literal(String),
    /// A bare `*`.
    Wildcard,
    /// A bare `**`.
    Recursive,
    /// A segment containing `*` alongside other characters.
    Partial(String),
}

impl Segment {
    fn parse(text: &str) -> Self {
        match text {
            "*" => Segment::Wildcard,
            "**" => Segment::Recursive,
            t if t.contains('*') => Segment::Partial(t.to_string()),
            t => Segment::Literal(t.to_string()),
        }
    }

    /// Whether this segment accepts a single path segment.
    fn matches_one(&self, segment: &str) -> bool {
        match self {
            Segment::Literal(text) => text == segment,
            Segment::Wildcard | Segment::Recursive => true,
            Segment::Partial(glob) => glob_segment(glob, segment),
        }
    }
}

/// A compiled selection pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parse a pattern. Never fails: unsupported syntax is kept literally.
    pub fn new(source: &str) -> Self {
        let normalized = normalize_path(source);
        let mut segments: Vec<Segment> = split_segments(&normalized)
            .into_iter()
            .map(Segment::parse)
            .collect();
        // `**/**` spans exactly what `**` does.
        segments.dedup_by(|a, b| *a == Segment::Recursive && *b == Segment::Recursive);
        Self {
            source: source.to_string(),
            segments,
        }
    }

    /// The pattern text as written in the configuration.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The parsed segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True when the pattern contains no wildcard and can only match one
    /// exact path.
    pub fn is_literal(&self) -> bool {
        self.segments
            .iter()
            .all(|segment| matches!(segment, Segment::Literal(_)))
    }

    /// Test a library-relative path against this pattern.
    pub fn matches(&self, path: &str) -> bool {
        let normalized = normalize_path(path);
        let parts = split_segments(&normalized);
        match_from(&self.segments, &parts)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Patterns from one side of a rule, compiled together.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    pub fn new<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: sources
                .into_iter()
                .map(|s| Pattern::new(s.as_ref()))
                .collect(),
        }
    }

    /// The first pattern, in configuration order, that matches `path`.
    pub fn first_match(&self, path: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|pattern| pattern.matches(path))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Match a single pattern against a single path.
///
/// Convenience wrapper around [`Pattern::new`] and [`Pattern::matches`] for
/// one-off checks; the filter compiles its patterns once instead.
pub fn matches(pattern: &str, path: &str) -> bool {
    Pattern::new(pattern).matches(path)
}

/// Normalize a library-relative path.
///
/// Backslashes become `/`, and empty or `.` segments are dropped, which also
/// removes leading `./` and leading or trailing separators.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

fn split_segments(normalized: &str) -> Vec<&str> {
    if normalized.is_empty() {
        Vec::new()
    } else {
        normalized.split('/').collect()
    }
}

/// Walk the segments once, tracking every path position the prefix seen so
/// far can end at. Runs in `segments × path` steps whatever the pattern.
fn match_from(segments: &[Segment], path: &[&str]) -> bool {
    let mut reachable = vec![false; path.len() + 1];
    reachable[0] = true;

    for (i, segment) in segments.iter().enumerate() {
        let Some(first) = reachable.iter().position(|&r| r) else {
            return false;
        };
        match segment {
            Segment::Recursive => reachable[first..].fill(true),
            Segment::Wildcard if i + 1 == segments.len() => return true,
            _ => {
                let mut next = vec![false; path.len() + 1];
                for (j, part) in path.iter().enumerate() {
                    if reachable[j] && segment.matches_one(part) {
                        next[j + 1] = true;
                    }
                }
                reachable = next;
            }
        }
    }

    reachable[path.len()]
}

/// `*`-only glob over a single segment.
fn glob_segment(glob: &str, text: &str) -> bool {
    let pattern: Vec<char> = glob.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    let mut star: Option<usize> = None;
    let mut resume = 0;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == '*' {
            star = Some(p);
            p += 1;
            resume = t;
        } else if p < pattern.len() && pattern[p] == text[t] {
            p += 1;
            t += 1;
        } else if let Some(s) = star {
            p = s + 1;
            resume += 1;
            t = resume;
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}
