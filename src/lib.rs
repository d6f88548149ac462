//! `clippings` - a found-poetry composer.
//!
//! Visitors assemble a poem from scanned word clippings and typed phrases.
//! The [`composer`] module holds the poem state machine; the rest of the
//! crate loads the clipping lexicon and drives the composer from a terminal UI.

// Re-export public modules for use in integration tests and as a library
pub mod app;
pub mod composer;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod lexicon;
pub mod logging;
pub mod types;
pub mod ui;
