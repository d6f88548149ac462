//! The poem composer.
//!
//! Owns the ordered poem and the read-only lexicon it draws from. The word
//! bank is a projection of the two (see [`bank`]), and drag gestures are
//! tracked as an explicit state machine (see [`drag`]) layered on
//! [`Composer::reorder`].
//!
//! Every user-facing operation is total: blank text, unknown ids and repeated
//! removals are silent no-ops. Only reorder indices are checked, because a bad
//! index can only come from a caller bug.

pub mod bank;
pub mod drag;

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::lexicon::{Lexicon, WordToken};
use crate::types::{ItemId, ItemKind};

pub use bank::BankView;
pub use drag::{DragMove, DragState};

/// One placed element of the poem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoemItem {
    /// Unique within the poem. Image items reuse their token's id.
    pub id: ItemId,
    /// Whether this came from a clipping or was typed.
    pub kind: ItemKind,
    /// The word, or the typed phrase.
    pub content: String,
    /// Image asset, for image items only.
    pub image_ref: Option<String>,
    /// Source group, for image items only.
    pub source_group: Option<String>,
}

impl PoemItem {
    /// Image item for a clipping.
    pub fn from_token(token: &WordToken) -> Self {
        Self {
            id: token.id.clone(),
            kind: ItemKind::Image,
            content: token.word.clone(),
            image_ref: Some(token.image_ref.clone()),
            source_group: Some(token.source.clone()),
        }
    }

    /// Free-text item.
    pub fn text(id: ItemId, content: impl Into<String>) -> Self {
        Self {
            id,
            kind: ItemKind::Text,
            content: content.into(),
            image_ref: None,
            source_group: None,
        }
    }

    /// Whether this item came from the bank.
    pub fn is_image(&self) -> bool {
        self.kind == ItemKind::Image
    }
}

/// Ordered poem plus the lexicon it is assembled from.
#[derive(Debug, Default)]
pub struct Composer {
    lexicon: Lexicon,
    poem: Vec<PoemItem>,
    drag: DragState,
    text_counter: u64,
}

impl Composer {
    /// Start an empty poem over `lexicon`.
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            poem: Vec::new(),
            drag: DragState::Idle,
            text_counter: 0,
        }
    }

    /// The static token list.
    pub const fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// The poem in order.
    pub fn poem(&self) -> &[PoemItem] {
        &self.poem
    }

    /// Number of placed items.
    pub fn len(&self) -> usize {
        self.poem.len()
    }

    /// Whether nothing has been placed.
    pub fn is_empty(&self) -> bool {
        self.poem.is_empty()
    }

    /// Whether an item with this id is placed.
    pub fn contains(&self, id: &ItemId) -> bool {
        self.poem.iter().any(|item| &item.id == id)
    }

    /// Position of a placed item.
    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.poem.iter().position(|item| &item.id == id)
    }

    /// Append a clipping to the poem.
    ///
    /// Returns `false` without changing anything if the token is already
    /// placed, so item ids stay unique.
    pub fn add_image_token(&mut self, token: &WordToken) -> bool {
        if self.contains(&token.id) {
            tracing::debug!("Clipping {} already placed", token.id);
            return false;
        }
        self.poem.push(PoemItem::from_token(token));
        tracing::debug!("Placed clipping {} at {}", token.id, self.poem.len() - 1);
        true
    }

    /// Append the lexicon token with this id, if there is one.
    pub fn add_image_by_id(&mut self, id: &ItemId) -> bool {
        let Some(token) = self.lexicon.get(id).cloned() else {
            tracing::debug!("No clipping with id {id}");
            return false;
        };
        self.add_image_token(&token)
    }

    /// Append a typed phrase.
    ///
    /// The text is trimmed; blank input is ignored and yields `None`.
    pub fn add_text_token(&mut self, raw_text: &str) -> Option<ItemId> {
        let content = raw_text.trim();
        if content.is_empty() {
            return None;
        }
        let id = self.next_text_id();
        self.poem.push(PoemItem::text(id.clone(), content));
        tracing::debug!("Placed text {id}");
        Some(id)
    }

    /// Remove the item with this id. Unknown ids are ignored.
    ///
    /// Any drag in progress ends, since its tracked positions may no longer
    /// point at the dragged item.
    pub fn remove_item(&mut self, id: &ItemId) -> Option<PoemItem> {
        let index = self.position(id)?;
        self.drag = DragState::Idle;
        let removed = self.poem.remove(index);
        tracing::debug!("Removed {} from {index}", removed.id);
        Some(removed)
    }

    /// Move the item at `from` so that it ends up at `to`.
    ///
    /// This is a move, not a swap: `[A, B, C, D]` with `reorder(0, 2)` gives
    /// `[B, C, A, D]`. Either index past the end is rejected and the poem is
    /// left as it was. A drag in progress keeps tracking its item.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.poem.len();
        if let Some(index) = [from, to].into_iter().find(|&i| i >= len) {
            return Err(Error::IndexOutOfRange { index, len });
        }
        if from < to {
            self.poem[from..=to].rotate_left(1);
        } else if from > to {
            self.poem[to..=from].rotate_right(1);
        }
        self.drag = self.drag.after_move(from, to);
        Ok(())
    }

    /// Empty the poem. Returns how many items were discarded.
    pub fn clear(&mut self) -> usize {
        self.drag = DragState::Idle;
        let count = self.poem.len();
        self.poem.clear();
        tracing::debug!("Cleared {count} items");
        count
    }

    /// Tokens not placed in the poem, grouped by source.
    pub fn bank_view(&self) -> BankView<'_> {
        let placed: HashSet<&ItemId> = self
            .poem
            .iter()
            .filter(|item| item.is_image())
            .map(|item| &item.id)
            .collect();
        BankView::project(self.lexicon.tokens(), &placed)
    }

    /// The poem as plain text, items separated by single spaces.
    pub fn to_plain_text(&self) -> String {
        self.poem
            .iter()
            .map(|item| item.content.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Current drag gesture.
    pub const fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Pick up the item at `index`.
    ///
    /// Starting a new gesture replaces any gesture already in progress.
    pub fn begin_drag(&mut self, index: usize) -> Result<()> {
        if index >= self.poem.len() {
            return Err(Error::IndexOutOfRange { index, len: self.poem.len() });
        }
        self.drag = DragState::begin(index);
        Ok(())
    }

    /// Hover the dragged item over `index`, moving it there.
    ///
    /// Does nothing while idle or when hovering the dragged item itself. An
    /// invalid index ends the gesture and is reported.
    pub fn drag_over(&mut self, index: usize) -> Result<()> {
        let Some(DragMove { from, to }) = self.drag.hover_move(index) else {
            return Ok(());
        };
        if let Err(e) = self.reorder(from, to) {
            tracing::warn!("Drag hover rejected: {e}");
            self.drag = DragState::Idle;
            return Err(e);
        }
        Ok(())
    }

    /// Drop the dragged item where it is.
    ///
    /// Returns `(origin, final)` positions if a gesture was in progress.
    pub fn end_drag(&mut self) -> Option<(usize, usize)> {
        let state = std::mem::take(&mut self.drag);
        let moved = state.origin().zip(state.current());
        if let Some((origin, current)) = moved {
            tracing::debug!("Dropped item moved {origin} -> {current}");
        }
        moved
    }

    /// Abandon the gesture. The order reached so far is kept.
    pub fn cancel_drag(&mut self) -> Option<(usize, usize)> {
        let state = std::mem::take(&mut self.drag);
        let moved = state.origin().zip(state.current());
        if moved.is_some() {
            tracing::debug!("Drag cancelled, keeping intermediate order");
        }
        moved
    }

    fn next_text_id(&mut self) -> ItemId {
        loop {
            self.text_counter += 1;
            let candidate = ItemId(format!("text-{}", self.text_counter));
            if !self.lexicon.contains(&candidate) && !self.contains(&candidate) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::from_tokens(vec![
            WordToken::from_clipping("zine", "a", "zine/a.png"),
            WordToken::from_clipping("zine", "b", "zine/b.png"),
            WordToken::from_clipping("atlas", "c", "atlas/c.png"),
            WordToken::from_clipping("atlas", "d", "atlas/d.png"),
        ])
    }

    fn token(composer: &Composer, id: &str) -> WordToken {
        composer.lexicon().get(&ItemId::new(id)).cloned().unwrap()
    }

    fn contents(composer: &Composer) -> Vec<&str> {
        composer.poem().iter().map(|i| i.content.as_str()).collect()
    }

    fn filled() -> Composer {
        let mut composer = Composer::new(lexicon());
        for id in ["zine-a", "zine-b", "atlas-c", "atlas-d"] {
            assert!(composer.add_image_by_id(&ItemId::new(id)));
        }
        composer
    }

    #[test]
    fn starts_empty_with_full_bank() {
        let composer = Composer::new(lexicon());
        assert!(composer.is_empty());
        assert_eq!(composer.bank_view().len(), 4);
    }

    #[test]
    fn add_image_token_appends_and_hides_from_bank() {
        let mut composer = Composer::new(lexicon());
        let b = token(&composer, "zine-b");

        assert!(composer.add_image_token(&b));

        let item = &composer.poem()[0];
        assert_eq!(item.kind, ItemKind::Image);
        assert_eq!(item.content, "b");
        assert_eq!(item.image_ref.as_deref(), Some("zine/b.png"));
        assert_eq!(item.source_group.as_deref(), Some("zine"));
        assert!(composer.bank_view().tokens().all(|t| t.id != b.id));
    }

    #[test]
    fn duplicate_image_add_is_ignored() {
        let mut composer = Composer::new(lexicon());
        let a = token(&composer, "zine-a");

        assert!(composer.add_image_token(&a));
        assert!(!composer.add_image_token(&a));
        assert_eq!(composer.len(), 1);
    }

    #[test]
    fn add_image_by_unknown_id_is_ignored() {
        let mut composer = Composer::new(lexicon());
        assert!(!composer.add_image_by_id(&ItemId::new("zine-zz")));
        assert!(composer.is_empty());
    }

    #[test]
    fn text_is_trimmed() {
        let mut composer = Composer::new(lexicon());
        let id = composer.add_text_token("  hello  ").unwrap();

        let item = &composer.poem()[0];
        assert_eq!(item.id, id);
        assert_eq!(item.content, "hello");
        assert_eq!(item.kind, ItemKind::Text);
        assert!(item.image_ref.is_none());
    }

    #[test]
    fn blank_text_is_ignored() {
        let mut composer = Composer::new(lexicon());
        assert!(composer.add_text_token("   ").is_none());
        assert!(composer.add_text_token("").is_none());
        assert!(composer.is_empty());
    }

    #[test]
    fn rapid_text_ids_are_unique() {
        let mut composer = Composer::new(lexicon());
        let ids: HashSet<ItemId> = (0..100)
            .filter_map(|i| composer.add_text_token(&format!("w{i}")))
            .collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn text_ids_skip_lexicon_collisions() {
        let lexicon = Lexicon::from_tokens(vec![WordToken {
            id: ItemId::new("text-1"),
            word: "one".to_string(),
            source: "odd".to_string(),
            image_ref: "odd/one.png".to_string(),
        }]);
        let mut composer = Composer::new(lexicon);
        let id = composer.add_text_token("hi").unwrap();
        assert_ne!(id, ItemId::new("text-1"));
    }

    #[test]
    fn text_items_do_not_touch_bank() {
        let mut composer = Composer::new(lexicon());
        composer.add_text_token("and");
        assert_eq!(composer.bank_view().len(), 4);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut composer = filled();
        let b = ItemId::new("zine-b");

        assert!(composer.remove_item(&b).is_some());
        let after_first = composer.poem().to_vec();
        assert!(composer.remove_item(&b).is_none());
        assert_eq!(composer.poem(), after_first.as_slice());
    }

    #[test]
    fn removal_restores_bank_order() {
        let mut composer = Composer::new(lexicon());
        let before: Vec<ItemId> = composer.bank_view().tokens().map(|t| t.id.clone()).collect();

        let b = token(&composer, "zine-b");
        composer.add_image_token(&b);
        composer.remove_item(&b.id);

        let after: Vec<ItemId> = composer.bank_view().tokens().map(|t| t.id.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn reorder_moves_rather_than_swaps() {
        let mut composer = filled();
        composer.reorder(0, 2).unwrap();
        assert_eq!(contents(&composer), vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn reorder_backwards() {
        let mut composer = filled();
        composer.reorder(3, 1).unwrap();
        assert_eq!(contents(&composer), vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn reorder_same_index_is_noop() {
        let mut composer = filled();
        composer.reorder(2, 2).unwrap();
        assert_eq!(contents(&composer), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn reorder_out_of_range_is_rejected_untouched() {
        let mut composer = filled();
        let err = composer.reorder(1, 4).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 4, len: 4 }));
        assert_eq!(contents(&composer), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn clear_empties_and_restores_bank() {
        let mut composer = filled();
        composer.add_text_token("between");
        assert_eq!(composer.clear(), 5);
        assert!(composer.is_empty());
        assert_eq!(composer.bank_view(), Composer::new(lexicon()).bank_view());
    }

    #[test]
    fn plain_text_joins_contents() {
        let mut composer = Composer::new(lexicon());
        composer.add_image_by_id(&ItemId::new("atlas-c"));
        composer.add_text_token(" is for ");
        composer.add_image_by_id(&ItemId::new("zine-a"));
        assert_eq!(composer.to_plain_text(), "c is for a");
    }

    #[test]
    fn drag_hovers_compose() {
        let mut composer = filled();
        composer.begin_drag(0).unwrap();
        composer.drag_over(1).unwrap();
        composer.drag_over(2).unwrap();
        assert_eq!(contents(&composer), vec!["b", "c", "a", "d"]);
        assert_eq!(composer.drag_state().current(), Some(2));
        assert_eq!(composer.end_drag(), Some((0, 2)));
        assert_eq!(composer.drag_state(), DragState::Idle);
    }

    #[test]
    fn drag_over_self_is_noop() {
        let mut composer = filled();
        composer.begin_drag(1).unwrap();
        composer.drag_over(1).unwrap();
        assert_eq!(contents(&composer), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn cancelled_drag_keeps_intermediate_order() {
        let mut composer = filled();
        composer.begin_drag(3).unwrap();
        composer.drag_over(0).unwrap();
        assert_eq!(composer.cancel_drag(), Some((3, 0)));
        assert_eq!(contents(&composer), vec!["d", "a", "b", "c"]);
    }

    #[test]
    fn hover_while_idle_does_nothing() {
        let mut composer = filled();
        composer.drag_over(3).unwrap();
        assert_eq!(contents(&composer), vec!["a", "b", "c", "d"]);
        assert!(composer.end_drag().is_none());
    }

    #[test]
    fn begin_drag_out_of_range_is_rejected() {
        let mut composer = filled();
        assert!(composer.begin_drag(9).is_err());
        assert_eq!(composer.drag_state(), DragState::Idle);
    }

    #[test]
    fn invalid_hover_ends_gesture() {
        let mut composer = filled();
        composer.begin_drag(0).unwrap();
        assert!(composer.drag_over(7).is_err());
        assert_eq!(composer.drag_state(), DragState::Idle);
        assert_eq!(composer.len(), 4);
    }

    #[test]
    fn removal_and_clear_end_drag() {
        let mut composer = filled();
        composer.begin_drag(2).unwrap();
        composer.remove_item(&ItemId::new("zine-a"));
        assert_eq!(composer.drag_state(), DragState::Idle);

        composer.begin_drag(0).unwrap();
        composer.clear();
        assert_eq!(composer.drag_state(), DragState::Idle);
    }

    #[test]
    fn reorder_during_drag_keeps_tracking_dragged_item() {
        let mut composer = filled();
        composer.begin_drag(0).unwrap();
        composer.reorder(0, 3).unwrap();
        assert_eq!(composer.drag_state().current(), Some(3));

        composer.drag_over(1).unwrap();
        assert_eq!(contents(&composer), vec!["b", "a", "c", "d"]);
        assert_eq!(composer.drag_state().current(), Some(1));
    }

    #[test]
    fn reorder_of_other_item_shifts_tracked_position() {
        let mut composer = filled();
        composer.begin_drag(1).unwrap();
        composer.reorder(0, 3).unwrap();
        assert_eq!(contents(&composer), vec!["b", "c", "d", "a"]);
        assert_eq!(composer.drag_state().current(), Some(0));

        composer.drag_over(2).unwrap();
        assert_eq!(contents(&composer), vec!["c", "d", "b", "a"]);
    }

    #[test]
    fn add_by_id_ignores_already_placed_clipping() {
        let mut composer = filled();
        assert!(!composer.add_image_by_id(&ItemId::new("zine-a")));
        assert_eq!(composer.len(), 4);
    }
}
