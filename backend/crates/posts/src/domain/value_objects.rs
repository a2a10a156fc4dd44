//! Domain Value Objects

use serde::{Deserialize, Serialize};

use crate::error::PostError;

/// Maximum post length in characters
pub const MAX_POST_LENGTH: usize = 1024;

/// Post body text, bounded to [`MAX_POST_LENGTH`] characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostText(String);

impl PostText {
    /// Create with validation
    pub fn new(text: impl Into<String>) -> Result<Self, PostError> {
        let text = text.into();

        // Count Unicode code points, not bytes
        let char_count = text.chars().count();
        if char_count > MAX_POST_LENGTH {
            return Err(PostError::Validation(format!(
                "Post text must be at most {} characters (got {})",
                MAX_POST_LENGTH, char_count
            )));
        }

        Ok(Self(text))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Get the text as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to string for database storage
    pub fn into_db(self) -> String {
        self.0
    }
}

impl std::fmt::Display for PostText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
