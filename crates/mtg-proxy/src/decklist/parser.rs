//! Line-oriented decklist parsing
//!
//! Two dialects share one input stream:
//! - Simple: `4x Lightning Bolt`, `4 Lightning Bolt`, `Lightning Bolt`
//! - Printing-qualified: `1 Sol Ring (MH3) 532`, optionally followed by a
//!   finish marker such as `*F*`

use crate::types::{CardRequest, Printing};
use once_cell::sync::Lazy;
use regex::Regex;

/// Structural dividers emitted by some decklist exports.
const SECTION_HEADERS: &[&str] = &[
    "deck",
    "sideboard",
    "commander",
    "companion",
    "companions",
    "maybeboard",
    "mainboard",
    "considering",
    "acquired",
];

static QUALIFIED_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d+)x?\s+(.+?)\s+\(([a-z0-9]+)\)\s+(\S+)(?:\s+\*[a-z]+\*)?\s*$")
        .expect("qualified line pattern is valid")
});

static SIMPLE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d+)x?\s+(.+)$").expect("simple line pattern is valid"));

/// Returns true if the line is a section header like `Sideboard` or `Commander:`.
pub fn is_section_header(line: &str) -> bool {
    let label = line.trim().trim_end_matches(':').trim_end().to_lowercase();
    SECTION_HEADERS.contains(&label.as_str())
}

/// Parse a single decklist line.
///
/// Returns `None` for blank lines, `#` comments, section headers and
/// zero-quantity entries.
pub fn parse_line(line: &str) -> Option<CardRequest> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') || is_section_header(line) {
        return None;
    }

    if let Some(caps) = QUALIFIED_LINE.captures(line) {
        if let Ok(quantity) = caps[1].parse::<u32>() {
            if quantity == 0 {
                return None;
            }
            let printing = Printing::new(&caps[3], &caps[4]);
            return Some(CardRequest::new(caps[2].trim(), quantity).with_printing(printing));
        }
    }

    if let Some(caps) = SIMPLE_LINE.captures(line) {
        if let Ok(quantity) = caps[1].parse::<u32>() {
            if quantity == 0 {
                return None;
            }
            return Some(CardRequest::new(caps[2].trim(), quantity));
        }
    }

    Some(CardRequest::new(line, 1))
}

/// Parse every line of a plain-text decklist, in order.
pub fn parse_decklist(text: &str) -> Vec<CardRequest> {
    text.lines().filter_map(parse_line).collect()
}
