//! Audio post record types
//!
//! Mirrors the document shape produced by the upload backend. The search
//! component treats these records as read-only and returns them unchanged.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Shortest title the upload backend accepts
pub const TITLE_MIN_CHARS: usize = 2;
/// Longest title the upload backend accepts
pub const TITLE_MAX_CHARS: usize = 36;
/// Maximum number of tags per post
pub const MAX_TAGS: usize = 4;
/// Maximum length of a single tag
pub const TAG_MAX_CHARS: usize = 18;

/// A single audio post
///
/// Field names follow the upstream document store verbatim, including its
/// mixed naming (`fileUrl` next to `creator_username`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub creator_id: String,
    #[serde(default)]
    pub creator_username: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "fileUrl", default)]
    pub file_url: String,
    #[serde(rename = "imageFileUrl", default)]
    pub image_file_url: String,
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
}

impl Post {
    /// Check the creation-time invariants the upload backend enforces.
    ///
    /// A record violating them means the snapshot upstream is corrupt; the
    /// caller reports it as `MalformedInput` instead of skipping the record,
    /// so data-quality problems stay visible.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.id.is_empty() {
            return Err(AppError::MalformedInput(
                "post record is missing an id".to_string(),
            ));
        }

        let title_chars = self.title.chars().count();
        if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&title_chars) {
            return Err(AppError::MalformedInput(format!(
                "post {} has a title of {} characters, expected {} to {}",
                self.id, title_chars, TITLE_MIN_CHARS, TITLE_MAX_CHARS
            )));
        }

        if self.tags.len() > MAX_TAGS {
            return Err(AppError::MalformedInput(format!(
                "post {} has {} tags, expected at most {}",
                self.id,
                self.tags.len(),
                MAX_TAGS
            )));
        }

        for tag in &self.tags {
            if tag.chars().count() > TAG_MAX_CHARS {
                return Err(AppError::MalformedInput(format!(
                    "post {} has tag '{}' longer than {} characters",
                    self.id, tag, TAG_MAX_CHARS
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        Post {
            id: "6411a3".to_string(),
            title: "Chill Beats".to_string(),
            message: "late night mix".to_string(),
            creator_id: "u1".to_string(),
            creator_username: "dj_luna".to_string(),
            tags: vec!["lofi".to_string()],
            file_url: "https://media.example/audio/1.mp3".to_string(),
            image_file_url: "https://media.example/img/1.jpg".to_string(),
            likes: vec![],
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_deserialize_upstream_field_names() {
        let json = r#"{
            "_id": "6411a3",
            "title": "Chill Beats",
            "message": "late night mix",
            "creator_id": "u1",
            "creator_username": "dj_luna",
            "tags": ["lofi", "chill"],
            "fileUrl": "https://media.example/audio/1.mp3",
            "imageFileUrl": "https://media.example/img/1.jpg",
            "likes": ["u2"],
            "createdAt": "2024-01-01T00:00:00Z"
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, "6411a3");
        assert_eq!(post.creator_username, "dj_luna");
        assert_eq!(post.tags, vec!["lofi", "chill"]);
        assert_eq!(post.file_url, "https://media.example/audio/1.mp3");
        assert_eq!(post.created_at, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_serialize_round_trips_names() {
        let value = serde_json::to_value(sample_post()).unwrap();
        assert!(value.get("_id").is_some());
        assert!(value.get("fileUrl").is_some());
        assert!(value.get("imageFileUrl").is_some());
        assert!(value.get("createdAt").is_some());
        // snake_case survives for the creator fields, as upstream stores them
        assert!(value.get("creator_username").is_some());
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{ "_id": "1", "title": "Two" }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.message.is_empty());
        assert!(post.tags.is_empty());
        assert!(post.likes.is_empty());
    }

    #[test]
    fn test_validate_accepts_good_post() {
        assert!(sample_post().validate().is_ok());
    }

    #[test]
    fn test_validate_title_bounds() {
        let mut post = sample_post();
        post.title = "x".to_string();
        assert!(matches!(
            post.validate(),
            Err(AppError::MalformedInput(_))
        ));

        post.title = "a".repeat(TITLE_MAX_CHARS + 1);
        assert!(post.validate().is_err());

        post.title = "a".repeat(TITLE_MAX_CHARS);
        assert!(post.validate().is_ok());
    }

    #[test]
    fn test_validate_tag_rules() {
        let mut post = sample_post();
        post.tags = vec!["a".to_string(); MAX_TAGS + 1];
        assert!(post.validate().is_err());

        post.tags = vec!["t".repeat(TAG_MAX_CHARS + 1)];
        assert!(post.validate().is_err());

        post.tags = vec!["t".repeat(TAG_MAX_CHARS)];
        assert!(post.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_id() {
        let mut post = sample_post();
        post.id = String::new();
        assert!(matches!(
            post.validate(),
            Err(AppError::MalformedInput(_))
        ));
    }
}
