//! Query parsing & normalization
//!
//! Turns the transport-form query parameters (`q` free text, `tags`
//! comma-separated) into a typed, canonicalized query.

use unicode_normalization::UnicodeNormalization;

use crate::error::AppError;

/// Longest free-text term accepted from the transport layer
const MAX_TERM_CHARS: usize = 500;

/// A parsed search query: free-text term and/or tag filter.
///
/// At least one criterion is always present; construction fails otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Normalized free-text term, `None` when absent or blank
    pub term: Option<String>,
    /// Normalized tag filter entries, empty when absent
    pub tags: Vec<String>,
}

impl SearchQuery {
    /// Parse from transport form.
    ///
    /// Blank entries are dropped ("lofi,,chill" keeps two tags). Fails with
    /// `InvalidQuery` when both criteria end up empty; callers must supply
    /// at least one.
    pub fn parse(q: Option<&str>, tags: Option<&str>) -> Result<Self, AppError> {
        let term = q.map(normalize).filter(|t| !t.is_empty());

        if let Some(term) = &term {
            if term.chars().count() > MAX_TERM_CHARS {
                return Err(AppError::InvalidQuery(format!(
                    "search term too long, maximum {} characters",
                    MAX_TERM_CHARS
                )));
            }
        }

        let tags: Vec<String> = tags
            .map(|raw| {
                raw.split(',')
                    .map(normalize)
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        if term.is_none() && tags.is_empty() {
            return Err(AppError::InvalidQuery(
                "at least one of `q` or `tags` is required".to_string(),
            ));
        }

        Ok(Self { term, tags })
    }
}

/// Canonicalize text for matching: Unicode NFC, trim, lowercase.
///
/// Applied to both the query and the indexed field text, so comparison is
/// case-insensitive by construction.
pub fn normalize(text: &str) -> String {
    text.nfc().collect::<String>().trim().to_lowercase()
}
