use std::fmt::{Display, Formatter};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WARNING_MESSAGE: &str =
    "Your message was rejected because the following words are not allowed: %s";

/// How many mask characters replace a redacted term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskWidth {
    /// One mask character per UTF-8 byte of the term.
    Bytes,
    /// One mask character per unicode scalar of the term.
    Chars,
}

impl MaskWidth {
    pub fn of(self, term: &str) -> usize {
        match self {
            MaskWidth::Bytes => term.len(),
            MaskWidth::Chars => term.chars().count(),
        }
    }
}

/// Where redaction takes its targets from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedactionStrategy {
    /// Re-search the original message for every matched (folded) string.
    /// Accent variants that only match after folding are left as they are.
    Literal,
    /// Mask the original ranges the matches were folded from.
    Positional,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(default, setter(into))]
#[serde(default)]
pub struct FilterConfig {
    /// Comma separated block-list.
    pub bad_words: String,
    pub censor_character: char,
    pub reject_posts: bool,
    pub exclude_bots: bool,
    pub warning_message: String,
    pub mask_width: MaskWidth,
    pub redaction: RedactionStrategy,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            bad_words: String::new(),
            censor_character: '*',
            reject_posts: false,
            exclude_bots: true,
            warning_message: DEFAULT_WARNING_MESSAGE.to_string(),
            mask_width: MaskWidth::Bytes,
            redaction: RedactionStrategy::Literal,
        }
    }
}

impl FilterConfig {
    pub fn from_json(raw: &[u8]) -> Result<Self, FilterConfigError> {
        serde_json::from_slice(raw).map_err(FilterConfigError::Parse)
    }

    /// The block-list in configured order, trimmed, without empty entries.
    pub fn terms(&self) -> Vec<String> {
        self.bad_words
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn render_warning(&self, matched: &str) -> String {
        self.warning_message.replacen("%s", matched, 1)
    }
}

#[derive(Debug)]
pub enum FilterConfigError {
    Pattern(regex::Error),
    Parse(serde_json::Error),
}

impl Display for FilterConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterConfigError::Pattern(e) => write!(f, "invalid block-list: {}", e),
            FilterConfigError::Parse(e) => write!(f, "invalid filter configuration: {}", e),
        }
    }
}

impl std::error::Error for FilterConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FilterConfigError::Pattern(e) => Some(e),
            FilterConfigError::Parse(e) => Some(e),
        }
    }
}
