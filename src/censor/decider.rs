use log::debug;

use super::{
    config::{FilterConfig, RedactionStrategy},
    matcher::Detected,
    normalizer::{fold, FoldedText},
    store::FilterSnapshot,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectionInput<'a> {
    pub text: &'a str,
    pub from_bot: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectionResult {
    Pass,
    Rejected {
        matched: Vec<String>,
        /// Short plain-text line for the caller's logs.
        diagnostic: String,
        /// Rendered warning template for the author.
        warning: String,
    },
    Redacted(String),
}

pub fn inspect(snapshot: &FilterSnapshot, input: &InspectionInput<'_>) -> InspectionResult {
    let config = snapshot.config();
    if config.exclude_bots && input.from_bot {
        debug!("skipping inspection of a bot message");
        return InspectionResult::Pass;
    }

    let folded = fold(input.text);
    let found = snapshot.matcher().detect(folded.as_str());
    if found.is_empty() {
        return InspectionResult::Pass;
    }

    if config.reject_posts {
        let matched: Vec<String> = found.iter().map(|d| d.term.to_string()).collect();
        let joined = matched.join(", ");
        return InspectionResult::Rejected {
            diagnostic: format!("Profane word not allowed: {}", joined),
            warning: config.render_warning(&joined),
            matched,
        };
    }

    let redacted = match config.redaction {
        RedactionStrategy::Literal => redact_literal(config, input.text, &found),
        RedactionStrategy::Positional => redact_positional(config, input.text, &folded, &found),
    };
    InspectionResult::Redacted(redacted)
}

fn mask(config: &FilterConfig, term: &str) -> String {
    config
        .censor_character
        .to_string()
        .repeat(config.mask_width.of(term))
}

/// Replaces every occurrence of each matched string in the original text.
/// A match that only exists after folding has no occurrence to replace.
fn redact_literal(config: &FilterConfig, text: &str, found: &[Detected<'_>]) -> String {
    let mut message = text.to_string();
    for detected in found {
        message = message.replace(detected.term, &mask(config, detected.term));
    }
    message
}

fn redact_positional(
    config: &FilterConfig,
    text: &str,
    folded: &FoldedText,
    found: &[Detected<'_>],
) -> String {
    let mut message = String::with_capacity(text.len());
    let mut cursor = 0;
    for detected in found {
        let range = folded.original_range(detected.range());
        let start = range.start.max(cursor);
        if start >= range.end {
            continue;
        }
        message.push_str(&text[cursor..start]);
        message.push_str(&mask(config, &text[start..range.end]));
        cursor = range.end;
    }
    message.push_str(&text[cursor..]);
    message
}
