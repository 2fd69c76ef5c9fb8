use std::ops::Range;

use log::debug;
use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::{
    char::{canonical_combining_class, compose},
    UnicodeNormalization,
};

/// Accent-folded copy of a message, used only for detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldedText {
    text: String,
    original_len: usize,
    segments: Vec<Segment>,
}

/// A run of the original that folds to the same output alone as it does in
/// context.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    folded: Range<usize>,
    original: Range<usize>,
}

impl FoldedText {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    fn single_segment(text: &str, folded: String) -> Self {
        debug!("folding of {:?} does not split, mapping it as one segment", text);
        Self {
            segments: vec![Segment {
                folded: 0..folded.len(),
                original: 0..text.len(),
            }],
            text: folded,
            original_len: text.len(),
        }
    }

    /// Maps a byte range of the folded text to the original segments it was
    /// produced from. Partially covered segments are included whole.
    pub fn original_range(&self, folded: Range<usize>) -> Range<usize> {
        let first = self
            .segments
            .partition_point(|s| s.folded.end <= folded.start);
        let last = self
            .segments
            .partition_point(|s| s.folded.start < folded.end);

        let start = self
            .segments
            .get(first)
            .map_or(self.original_len, |s| s.original.start);
        if last <= first {
            return start..start;
        }
        start..self.segments[last - 1].original.end
    }
}

/// Only non-spacing marks are accents; spacing vowel signs carry meaning.
fn is_nonspacing_mark(c: char) -> bool {
    get_general_category(c) == GeneralCategory::NonspacingMark
}

fn fold_str(text: &str) -> String {
    text.nfd().filter(|c| !is_nonspacing_mark(*c)).nfc().collect()
}

/// Byte offsets where a new segment may open: a starter that cannot compose
/// with what was kept before it.
fn segment_starts(text: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut kept: Option<char> = None;
    for (i, c) in text.char_indices() {
        if is_nonspacing_mark(c) {
            if i == 0 {
                starts.push(i);
            }
            continue;
        }
        let composed = kept.and_then(|k| compose(k, c));
        if i == 0 || (composed.is_none() && canonical_combining_class(c) == 0) {
            starts.push(i);
        }
        kept = Some(composed.unwrap_or(c));
    }
    starts
}

/// Decomposes, drops every non-spacing mark, then recomposes the whole text.
pub fn normalize(text: &str) -> String {
    fold_str(text)
}

pub fn fold(text: &str) -> FoldedText {
    let folded = fold_str(text);

    let mut bounds = segment_starts(text);
    bounds.push(text.len());
    let mut segments = Vec::with_capacity(bounds.len());
    let mut offset = 0;
    for window in bounds.windows(2) {
        let original = window[0]..window[1];
        let piece = fold_str(&text[original.clone()]);
        if !folded[offset..].starts_with(piece.as_str()) {
            return FoldedText::single_segment(text, folded);
        }
        segments.push(Segment {
            folded: offset..offset + piece.len(),
            original,
        });
        offset += piece.len();
    }
    if offset != folded.len() {
        return FoldedText::single_segment(text, folded);
    }

    FoldedText {
        text: folded,
        original_len: text.len(),
        segments,
    }
}
