//! Search engine
//!
//! Ties together query normalization, fuzzy matching, and weighted ranking.
//! The index is ephemeral: built fresh from a snapshot for every search, no
//! shared mutable state, no background work.

use std::cmp::Ordering;

use tracing::debug;

use super::fuzzy::FuzzyMatcher;
use super::parser::{normalize, SearchQuery};
use super::ranking::{Field, FieldWeights, RelevanceScore};
use crate::error::AppError;
use crate::posts::records::Post;

/// One post with its field text pre-normalized for matching
struct IndexEntry {
    post: Post,
    title: String,
    message: String,
    creator_username: String,
    tags: Vec<String>,
}

/// Ephemeral in-memory index over one snapshot of the post collection
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
    weights: FieldWeights,
}

impl SearchIndex {
    /// Build an index from a snapshot.
    ///
    /// Pure function of its input, `O(n)` in the number of posts: field text
    /// is canonicalized once here so the per-query work stays in `search`.
    pub fn build(posts: &[Post]) -> Self {
        let entries = posts
            .iter()
            .map(|post| IndexEntry {
                title: normalize(&post.title),
                message: normalize(&post.message),
                creator_username: normalize(&post.creator_username),
                tags: post.tags.iter().map(|t| normalize(t)).collect(),
                post: post.clone(),
            })
            .collect();

        Self {
            entries,
            weights: FieldWeights::default(),
        }
    }

    /// Rank the snapshot against a query.
    ///
    /// Returns matching posts in descending relevance order; ties keep the
    /// original collection order, so identical inputs always produce
    /// identical output. No posts matching is an empty result, not an error;
    /// `InvalidQuery` is returned only when the query carries no criteria at
    /// all.
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<Post>, AppError> {
        if query.term.is_none() && query.tags.is_empty() {
            return Err(AppError::InvalidQuery(
                "at least one of `q` or `tags` is required".to_string(),
            ));
        }

        let mut matcher = FuzzyMatcher::new();
        let mut scored: Vec<(f64, &IndexEntry)> = Vec::new();

        for entry in &self.entries {
            let score = self.score_entry(&mut matcher, entry, query);
            if score.is_match() {
                scored.push((score.value(), entry));
            }
        }

        // Stable sort: equal scores keep original collection order
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        debug!(
            "{} of {} posts matched the query",
            scored.len(),
            self.entries.len()
        );

        Ok(scored.into_iter().map(|(_, e)| e.post.clone()).collect())
    }

    /// Combine per-field match scores for one entry.
    ///
    /// The free-text term runs against every configured field; the tag
    /// filter runs against the tags field only. A post matches when either
    /// signal clears the threshold, mirroring an or-combination of criteria.
    fn score_entry(
        &self,
        matcher: &mut FuzzyMatcher,
        entry: &IndexEntry,
        query: &SearchQuery,
    ) -> RelevanceScore {
        let mut score = RelevanceScore::default();

        if let Some(term) = &query.term {
            let text_fields = [
                (Field::Title, entry.title.as_str()),
                (Field::Message, entry.message.as_str()),
                (Field::CreatorUsername, entry.creator_username.as_str()),
            ];
            for (field, text) in text_fields {
                if let Some(s) = matcher.score(text, term) {
                    score.add_field(field, s, &self.weights);
                }
            }
            if let Some(s) = best_tag_score(matcher, &entry.tags, term) {
                score.add_field(Field::Tags, s, &self.weights);
            }
        }

        if !query.tags.is_empty() {
            // Average over the requested tags so the contribution stays
            // within one tag-field weight regardless of filter size; posts
            // matching more of the requested tags still rank higher.
            let mut sum = 0.0;
            let mut any = false;
            for wanted in &query.tags {
                if let Some(s) = best_tag_score(matcher, &entry.tags, wanted) {
                    sum += s;
                    any = true;
                }
            }
            if any {
                score.add_field(Field::Tags, sum / query.tags.len() as f64, &self.weights);
            }
        }

        score
    }
}

/// Best match score of a needle against any of the post's tags
fn best_tag_score(matcher: &mut FuzzyMatcher, tags: &[String], needle: &str) -> Option<f64> {
    tags.iter()
        .filter_map(|tag| matcher.score(tag, needle))
        .fold(None, |best, s| {
            Some(best.map_or(s, |b: f64| b.max(s)))
        })
}
