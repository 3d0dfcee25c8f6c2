//! Ranking & scoring
//!
//! The fixed field weight table and the rule that combines per-field fuzzy
//! scores into one relevance value per post. Weights are relative, not
//! absolute scores; only their ordering and ratios matter for ranking.

/// Searchable post fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Message,
    CreatorUsername,
    Tags,
}

/// Relative weights per field, fixed at index-build time.
///
/// A match in a higher-weight field outranks matches in lower-weight fields;
/// tags dominate so that a tag hit always beats a title-only hit.
#[derive(Debug, Clone)]
pub struct FieldWeights {
    pub title: f64,
    pub message: f64,
    pub creator_username: f64,
    pub tags: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            title: 8.0,
            message: 1.0,
            creator_username: 2.0,
            tags: 64.0,
        }
    }
}

impl FieldWeights {
    /// Weight for a single field
    pub fn for_field(&self, field: Field) -> f64 {
        match field {
            Field::Title => self.title,
            Field::Message => self.message,
            Field::CreatorUsername => self.creator_username,
            Field::Tags => self.tags,
        }
    }
}

/// Accumulates weighted per-field contributions for one post.
///
/// Each contributing field adds weight × score; a post with no contributing
/// field is not a match at all.
#[derive(Debug, Clone, Default)]
pub struct RelevanceScore {
    total: f64,
    matched: bool,
}

impl RelevanceScore {
    /// Record a field's match score, scaled by its weight
    pub fn add_field(&mut self, field: Field, score: f64, weights: &FieldWeights) {
        self.total += weights.for_field(field) * score;
        self.matched = true;
    }

    /// Whether any field contributed
    pub fn is_match(&self) -> bool {
        self.matched
    }

    /// Combined relevance value
    pub fn value(&self) -> f64 {
        self.total
    }
}
