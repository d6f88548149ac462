//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Lexicon file locations.
pub mod lexicon {
    /// Where the site build writes the lexicon, relative to the site root.
    pub const SITE_RELATIVE_PATH: &str = "src/data/lexicon.json";

    /// Directory under the user data dir used as a fallback.
    pub const DATA_DIR_NAME: &str = "clippings";

    /// Lexicon file name inside the fallback directory.
    pub const FILE_NAME: &str = "lexicon.json";
}

/// Bank search constants.
pub mod search {
    /// Default minimum fuzzy score for a bank search hit.
    pub const DEFAULT_MIN_SCORE: i64 = 20;
}

/// Pointer gesture constants.
pub mod mouse {
    /// Two presses on the same row within this window count as a double-click.
    pub const DOUBLE_CLICK_MS: u64 = 400;
}

/// Event loop constants.
pub mod event_loop {
    /// How long to wait for a terminal event before redrawing.
    pub const POLL_MS: u64 = 50;
}

/// UI layout constants.
pub mod ui {
    /// Share of the screen given to the poem pane.
    pub const POEM_PANE_PERCENT: u16 = 45;

    /// Height of the text entry line including borders.
    pub const TEXT_ENTRY_HEIGHT: u16 = 3;

    /// Height of the command bar including borders.
    pub const COMMAND_BAR_HEIGHT: u16 = 3;
}
