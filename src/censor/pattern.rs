//! Compiles a block-list into a single whole-word alternation.
//!
//! Every term is folded, escaped and wrapped in edge assertions: `\b` on an
//! edge that is a word character and `\B` on an edge that is not. Either way
//! the character just outside the term must not be a word character, so `abc`
//! never fires inside `helloabcworld` and `c++` never fires inside `xc++`.

use log::debug;
use regex::RegexBuilder;
use regex_syntax::is_word_character;

use super::{config::FilterConfigError, matcher::CompiledMatcher, normalizer::normalize};

fn edge_assertion(c: char) -> &'static str {
    if is_word_character(c) {
        r"\b"
    } else {
        r"\B"
    }
}

fn whole_word(term: &str) -> Option<String> {
    let first = term.chars().next()?;
    let last = term.chars().next_back()?;
    Some(format!(
        "{}{}{}",
        edge_assertion(first),
        regex::escape(term),
        edge_assertion(last)
    ))
}

/// Builds the matcher for `terms`. An empty (or all blank) list matches
/// nothing.
pub fn build<S: AsRef<str>>(terms: &[S]) -> Result<CompiledMatcher, FilterConfigError> {
    let alternatives: Vec<String> = terms
        .iter()
        .map(|t| normalize(t.as_ref().trim()))
        .filter_map(|t| whole_word(t.trim()))
        .collect();

    if alternatives.is_empty() {
        return Ok(CompiledMatcher::empty());
    }

    let pattern = format!("(?:{})", alternatives.join("|"));
    debug!("compiled block-list pattern: {}", pattern);
    let regex = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(FilterConfigError::Pattern)?;
    Ok(CompiledMatcher::new(regex, alternatives.len()))
}
