//! Decklist input formats
//!
//! Both entry points produce the same `CardRequest` records:
//! - plain text, one entry per line (see [`parser`])
//! - header-driven CSV exports (see [`csv`])

mod csv;
mod parser;

pub use self::csv::{load_from_csv, parse_csv};
pub use parser::{is_section_header, parse_decklist, parse_line};

use crate::types::{CardRequest, Result};
use std::path::Path;

/// Decide whether file contents should be read as a CSV export.
pub fn looks_like_csv(path: &Path, content: &str) -> bool {
    let csv_ext = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    csv_ext || content.trim_start().starts_with("Count,")
}

/// Parse decklist contents, picking the format from the path and content.
pub fn parse_contents(path: &Path, content: &str) -> Result<Vec<CardRequest>> {
    if looks_like_csv(path, content) {
        parse_csv(content)
    } else {
        Ok(parse_decklist(content))
    }
}

/// Load a decklist file in either format.
pub async fn load_decklist(path: impl AsRef<Path>) -> Result<Vec<CardRequest>> {
    let path = path.as_ref().to_owned();

    let contents = tokio::fs::read_to_string(&path).await?;

    let cards = tokio::task::spawn_blocking(move || parse_contents(&path, &contents)).await??;

    Ok(cards)
}

/// Render requests as plain-text decklist lines.
pub fn to_decklist_text(cards: &[CardRequest]) -> String {
    cards
        .iter()
        .map(|card| card.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
