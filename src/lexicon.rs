//! The static word-token list.
//!
//! A lexicon is the flat list of scanned clippings the poem composer draws
//! from. It is loaded once from the JSON file the clipping scanner writes
//! (`[{ "id", "word", "source", "src" }, ...]`) and never mutated afterwards.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::ItemId;

/// One clipped word available for use in a poem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordToken {
    /// Stable identifier, derived from source group and file stem.
    pub id: ItemId,
    /// Lowercase label (alt text for the clipping).
    pub word: String,
    /// Name of the source group the clipping came from.
    pub source: String,
    /// Reference to the image asset.
    #[serde(rename = "src")]
    pub image_ref: String,
}

impl WordToken {
    /// Build a token for a clipping file, deriving `id` and `word` the way the
    /// scanner does so that ids stay stable across rescans.
    pub fn from_clipping(
        source: impl Into<String>,
        file_stem: &str,
        image_ref: impl Into<String>,
    ) -> Self {
        let source = source.into();
        Self {
            id: token_id(&source, file_stem),
            word: file_stem.to_lowercase(),
            source,
            image_ref: image_ref.into(),
        }
    }
}

/// Deterministic token id for a clipping: `"{source}-{stem}"`.
pub fn token_id(source: &str, file_stem: &str) -> ItemId {
    ItemId(format!("{source}-{file_stem}"))
}

/// Read-only collection of word tokens in scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    tokens: Vec<WordToken>,
}

impl Lexicon {
    /// Wrap an in-memory token list.
    pub fn from_tokens(tokens: Vec<WordToken>) -> Self {
        let lexicon = Self { tokens };
        lexicon.warn_on_duplicate_ids();
        lexicon
    }

    /// Load a lexicon from the scanner's JSON output.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
        let lexicon = Self::from_json(&raw).map_err(|e| match e {
            Error::Parse { message, .. } => Error::parse(message, path.to_path_buf()),
            other => other,
        })?;
        tracing::info!("Loaded {} clippings from {}", lexicon.len(), path.display());
        Ok(lexicon)
    }

    /// Parse a lexicon from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self> {
        let tokens: Vec<WordToken> =
            serde_json::from_str(raw).map_err(|e| Error::parse(e.to_string(), None))?;
        Ok(Self::from_tokens(tokens))
    }

    /// All tokens in scan order.
    pub fn tokens(&self) -> &[WordToken] {
        &self.tokens
    }

    /// Look a token up by id.
    pub fn get(&self, id: &ItemId) -> Option<&WordToken> {
        self.tokens.iter().find(|t| &t.id == id)
    }

    /// Whether any token carries this id.
    pub fn contains(&self, id: &ItemId) -> bool {
        self.tokens.iter().any(|t| &t.id == id)
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the lexicon has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    // Uniqueness is the scanner's guarantee; a broken file only gets a log line.
    fn warn_on_duplicate_ids(&self) {
        let mut seen = HashSet::with_capacity(self.tokens.len());
        for token in &self.tokens {
            if !seen.insert(&token.id) {
                tracing::warn!("Duplicate clipping id in lexicon: {}", token.id);
            }
        }
    }
}
