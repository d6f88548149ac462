//! Drag gesture tracking for poem reordering.
//!
//! A gesture is `Idle -> Dragging -> Idle`. While dragging, every hover over a
//! different row becomes one move from the tracked position to the hovered
//! one, after which the hovered position becomes the tracked position. Ending
//! or cancelling a gesture keeps whatever order the hovers produced.

/// State of the current drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// An item is being dragged.
    Dragging {
        /// Position the item occupied when the gesture began.
        origin: usize,
        /// Position the item occupies now.
        current: usize,
    },
}

/// A single reorder step produced by a hover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragMove {
    /// Position to take the dragged item from.
    pub from: usize,
    /// Position to re-insert it at.
    pub to: usize,
}

impl DragState {
    /// Start a gesture on the item at `index`.
    #[must_use]
    pub const fn begin(index: usize) -> Self {
        Self::Dragging { origin: index, current: index }
    }

    /// Whether a gesture is in progress.
    #[must_use]
    pub const fn is_dragging(self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Position where the gesture started.
    #[must_use]
    pub const fn origin(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Dragging { origin, .. } => Some(origin),
        }
    }

    /// Position the dragged item currently occupies.
    #[must_use]
    pub const fn current(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Dragging { current, .. } => Some(current),
        }
    }

    /// The move a hover over `index` should issue, if any.
    ///
    /// Hovering while idle, or over the dragged item itself, issues nothing.
    #[must_use]
    pub const fn hover_move(self, index: usize) -> Option<DragMove> {
        match self {
            Self::Dragging { current, .. } if current != index => {
                Some(DragMove { from: current, to: index })
            }
            _ => None,
        }
    }

    /// State after the poem moved the item at `from` to `to`.
    ///
    /// The tracked position follows the dragged item, whether it was the item
    /// moved or one shifted aside by the move.
    #[must_use]
    pub const fn after_move(self, from: usize, to: usize) -> Self {
        match self {
            Self::Idle => Self::Idle,
            Self::Dragging { origin, current } => {
                let current = if current == from {
                    to
                } else if from < current && current <= to {
                    current - 1
                } else if to <= current && current < from {
                    current + 1
                } else {
                    current
                };
                Self::Dragging { origin, current }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_tracks_origin_as_current() {
        let state = DragState::begin(3);
        assert_eq!(state.origin(), Some(3));
        assert_eq!(state.current(), Some(3));
        assert!(state.is_dragging());
    }

    #[test]
    fn idle_hover_issues_no_move() {
        assert_eq!(DragState::Idle.hover_move(2), None);
        assert_eq!(DragState::Idle.after_move(0, 2), DragState::Idle);
    }

    #[test]
    fn hover_over_self_issues_no_move() {
        assert_eq!(DragState::begin(1).hover_move(1), None);
    }

    #[test]
    fn hovers_compose_against_tracked_position() {
        let state = DragState::begin(0);
        let first = state.hover_move(2);
        assert_eq!(first, Some(DragMove { from: 0, to: 2 }));

        let state = state.after_move(0, 2);
        assert_eq!(state.hover_move(1), Some(DragMove { from: 2, to: 1 }));
        assert_eq!(state.origin(), Some(0));
    }

    #[test]
    fn tracked_position_follows_item_shifted_by_move() {
        // [a, b, c, d] dragging b; moving a to the end shifts b left
        let state = DragState::begin(1).after_move(0, 3);
        assert_eq!(state.current(), Some(0));

        // dragging c; moving d to the front shifts c right
        let state = DragState::begin(2).after_move(3, 0);
        assert_eq!(state.current(), Some(3));

        // moves entirely on one side leave it alone
        let state = DragState::begin(0).after_move(2, 3);
        assert_eq!(state.current(), Some(0));
        assert_eq!(state.origin(), Some(0));
    }
}
