//! The word bank: tokens not yet placed in the poem, grouped by source.
//!
//! A [`BankView`] is never stored. It is projected from the lexicon and the
//! current poem every time it is asked for, so it cannot drift from the poem.

use std::collections::HashSet;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use indexmap::IndexMap;

use crate::lexicon::WordToken;
use crate::types::ItemId;

/// Unplaced tokens grouped by source, in first-occurrence order.
#[derive(Debug, Clone, Default)]
pub struct BankView<'a> {
    groups: IndexMap<&'a str, Vec<&'a WordToken>>,
}

// Group order is part of the view, so compare in sequence.
impl PartialEq for BankView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.groups.iter().eq(other.groups.iter())
    }
}

impl Eq for BankView<'_> {}

impl<'a> BankView<'a> {
    /// Project `tokens` minus every token whose id is in `placed`.
    ///
    /// Groups whose tokens are all placed are left out.
    pub(crate) fn project(tokens: &'a [WordToken], placed: &HashSet<&ItemId>) -> Self {
        let mut groups: IndexMap<&'a str, Vec<&'a WordToken>> = IndexMap::new();
        for token in tokens.iter().filter(|t| !placed.contains(&t.id)) {
            groups.entry(token.source.as_str()).or_default().push(token);
        }
        Self { groups }
    }

    /// Iterate groups as `(source, tokens)` pairs.
    pub fn groups(&self) -> impl Iterator<Item = (&'a str, &[&'a WordToken])> + '_ {
        self.groups.iter().map(|(source, tokens)| (*source, tokens.as_slice()))
    }

    /// Tokens of one group, if it has any left.
    pub fn group(&self, source: &str) -> Option<&[&'a WordToken]> {
        self.groups.get(source).map(Vec::as_slice)
    }

    /// Group names in display order.
    pub fn sources(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.groups.keys().copied()
    }

    /// All tokens flattened in display order.
    pub fn tokens(&self) -> impl Iterator<Item = &'a WordToken> + '_ {
        self.groups.values().flat_map(|tokens| tokens.iter().copied())
    }

    /// Token at a position in the flattened display order.
    pub fn get(&self, index: usize) -> Option<&'a WordToken> {
        self.tokens().nth(index)
    }

    /// Total number of tokens across groups.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Whether every token has been placed.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of non-empty groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Narrow the view to tokens whose word fuzzy-matches `query`.
    ///
    /// Group order and in-group order are kept; results are not re-ranked.
    #[must_use]
    pub fn search(&self, query: &str, min_score: i64) -> Self {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.clone();
        }

        let matcher = SkimMatcherV2::default();
        let mut groups: IndexMap<&'a str, Vec<&'a WordToken>> = IndexMap::new();
        for (source, tokens) in &self.groups {
            let hits: Vec<&'a WordToken> = tokens
                .iter()
                .copied()
                .filter(|t| {
                    matcher
                        .fuzzy_match(&t.word, &query)
                        .is_some_and(|score| score >= min_score)
                })
                .collect();
            if !hits.is_empty() {
                groups.insert(*source, hits);
            }
        }
        Self { groups }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> Vec<WordToken> {
        vec![
            WordToken::from_clipping("zine", "moon", "zine/moon.png"),
            WordToken::from_clipping("atlas", "salt", "atlas/salt.png"),
            WordToken::from_clipping("zine", "tide", "zine/tide.png"),
            WordToken::from_clipping("atlas", "harbour", "atlas/harbour.png"),
        ]
    }

    fn words(view: &BankView<'_>) -> Vec<String> {
        view.tokens().map(|t| t.word.clone()).collect()
    }

    #[test]
    fn groups_follow_first_occurrence_order() {
        let tokens = tokens();
        let view = BankView::project(&tokens, &HashSet::new());

        let sources: Vec<_> = view.sources().collect();
        assert_eq!(sources, vec!["zine", "atlas"]);
        assert_eq!(words(&view), vec!["moon", "tide", "salt", "harbour"]);
        assert_eq!(view.len(), 4);
    }

    #[test]
    fn views_with_reordered_groups_differ() {
        let tokens = tokens();
        let mut swapped = tokens.clone();
        swapped.rotate_left(1);

        let view = BankView::project(&tokens, &HashSet::new());
        let other = BankView::project(&swapped, &HashSet::new());

        assert_eq!(other.sources().collect::<Vec<_>>(), vec!["atlas", "zine"]);
        assert_ne!(view, other);
        assert_eq!(view, BankView::project(&tokens, &HashSet::new()));
    }

    #[test]
    fn placed_tokens_are_excluded() {
        let tokens = tokens();
        let moon = ItemId::new("zine-moon");
        let placed: HashSet<&ItemId> = [&moon].into_iter().collect();
        let view = BankView::project(&tokens, &placed);

        assert_eq!(view.group("zine").map(<[_]>::len), Some(1));
        assert!(view.tokens().all(|t| t.id != moon));
    }

    #[test]
    fn exhausted_group_disappears() {
        let tokens = tokens();
        let moon = ItemId::new("zine-moon");
        let tide = ItemId::new("zine-tide");
        let placed: HashSet<&ItemId> = [&moon, &tide].into_iter().collect();
        let view = BankView::project(&tokens, &placed);

        assert_eq!(view.group_count(), 1);
        assert!(view.group("zine").is_none());
    }

    #[test]
    fn get_indexes_flattened_order() {
        let tokens = tokens();
        let view = BankView::project(&tokens, &HashSet::new());
        assert_eq!(view.get(2).map(|t| t.word.as_str()), Some("salt"));
        assert!(view.get(4).is_none());
    }

    #[test]
    fn search_keeps_grouping_and_order() {
        let tokens = tokens();
        let view = BankView::project(&tokens, &HashSet::new());
        let found = view.search("t", 1);

        assert_eq!(words(&found), vec!["tide", "salt"]);
        assert_eq!(found.sources().collect::<Vec<_>>(), vec!["zine", "atlas"]);
    }

    #[test]
    fn blank_search_returns_everything() {
        let tokens = tokens();
        let view = BankView::project(&tokens, &HashSet::new());
        assert_eq!(view.search("   ", 50), view);
    }

    #[test]
    fn search_with_no_hits_is_empty() {
        let tokens = tokens();
        let view = BankView::project(&tokens, &HashSet::new());
        assert!(view.search("zzzz", 1).is_empty());
    }
}
