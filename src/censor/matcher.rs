use std::ops::Range;

use regex::Regex;

/// One block-list hit, as it appears in the folded text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detected<'t> {
    pub term: &'t str,
    pub start: usize,
    pub end: usize,
}

impl<'t> Detected<'t> {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Immutable matcher compiled from one version of the block-list.
#[derive(Debug, Clone)]
pub struct CompiledMatcher {
    regex: Option<Regex>,
    term_count: usize,
}

impl CompiledMatcher {
    pub(crate) fn new(regex: Regex, term_count: usize) -> Self {
        Self {
            regex: Some(regex),
            term_count,
        }
    }

    pub(crate) fn empty() -> Self {
        Self {
            regex: None,
            term_count: 0,
        }
    }

    pub fn term_count(&self) -> usize {
        self.term_count
    }

    pub fn is_match(&self, normalized: &str) -> bool {
        self.regex.as_ref().map_or(false, |r| r.is_match(normalized))
    }

    /// Left to right, non-overlapping, duplicates kept.
    pub fn detect<'t>(&self, normalized: &'t str) -> Vec<Detected<'t>> {
        match &self.regex {
            Some(regex) => regex
                .find_iter(normalized)
                .map(|m| Detected {
                    term: m.as_str(),
                    start: m.start(),
                    end: m.end(),
                })
                .collect(),
            None => Vec::new(),
        }
    }
}
