//! Core type definitions for compile-time safety.
//!
//! Word tokens and poem items share one identifier space: an image item placed
//! in the poem carries the id of the token it came from, which is how the bank
//! view knows to hide that token.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a word token or a placed poem item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    /// Create a new `ItemId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// What a poem item was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A scanned clipping taken from the bank.
    Image,
    /// A phrase typed by the visitor.
    Text,
}

impl ItemKind {
    /// Short label used in the poem pane.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Image => "clip",
            Self::Text => "text",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_serializes_as_plain_string() {
        let id = ItemId::new("zine-moon");
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, "\"zine-moon\"");
    }

    #[test]
    fn item_kind_uses_lowercase_names() {
        let json = serde_json::to_string(&ItemKind::Image).unwrap_or_default();
        assert_eq!(json, "\"image\"");
    }
}
