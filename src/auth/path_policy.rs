// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Paths that bypass authentication.
//!
//! Patterns are matched segment by segment over `/`-separated paths:
//!
//! - `**` matches zero or more whole segments
//! - `*` matches any run of characters inside one segment
//! - `?` matches exactly one character inside one segment
//!
//! A trailing `/**` therefore also matches the bare prefix:
//! `/health/**` matches both `/health` and `/health/live`.

/// Static set of exemption patterns, fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct PathPolicy {
    patterns: Vec<String>,
}

impl PathPolicy {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Check if `path` matches any exemption pattern.
    pub fn is_exempt(&self, path: &str) -> bool {
        self.patterns.iter().any(|pattern| matches(pattern, path))
    }
}

/// Match a single pattern against a request path.
pub fn matches(pattern: &str, path: &str) -> bool {
    // Absolute patterns only match absolute paths and vice versa.
    if pattern.starts_with('/') != path.starts_with('/') {
        return false;
    }
    let pattern_segments = segments(pattern);
    let path_segments = segments(path);
    match_segments(&pattern_segments, &path_segments)
}

fn segments(s: &str) -> Vec<&str> {
    s.split('/').filter(|seg| !seg.is_empty()).collect()
}

fn match_segments(pattern: &[&str], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((&"**", rest)) => {
            // Try every possible number of consumed segments.
            (0..=path.len()).any(|skip| match_segments(rest, &path[skip..]))
        }
        Some((head, rest)) => match path.split_first() {
            Some((segment, path_rest)) => {
                match_segment(head, segment) && match_segments(rest, path_rest)
            }
            None => false,
        },
    }
}

fn match_segment(pattern: &str, segment: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let segment: Vec<char> = segment.chars().collect();

    // Iterative wildcard match with single-star backtracking.
    let (mut p, mut s) = (0usize, 0usize);
    let mut star: Option<usize> = None;
    let mut star_s = 0usize;

    while s < segment.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == segment[s]) {
            p += 1;
            s += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star = Some(p);
            star_s = s;
            p += 1;
        } else if let Some(star_p) = star {
            p = star_p + 1;
            star_s += 1;
            s = star_s;
        } else {
            return false;
        }
    }

    while p < pattern.len() && pattern[p] == '*' {
        p += 1;
    }
    p == pattern.len()
}
