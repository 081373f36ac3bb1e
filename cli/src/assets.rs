use anyhow::{Context, Result};

use vitrine_engine::Page;

const DECK_RAW: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/deck.toml"));

/// Build the page bundled with the binary.
pub fn page() -> Result<Page> {
    Page::from_toml(DECK_RAW).context("bundled deck is invalid")
}
