//! Row-major card placement across pages

use crate::types::{ProxyError, Result};

use super::{PlacementEntry, SheetCard};

/// Number of pages needed for `count` cards on a `rows × cols` grid.
pub fn page_count(count: usize, rows: usize, cols: usize) -> usize {
    let per_page = rows * cols;
    if per_page == 0 {
        return 0;
    }
    count.div_ceil(per_page)
}

/// Assign every card a `(page, row, column)` slot.
///
/// Fills row 0 left to right, then row 1, and so on; a new page starts only
/// once the current one holds `rows × cols` cards. Input order is kept.
pub fn layout(cards: Vec<SheetCard>, rows: usize, cols: usize) -> Result<Vec<PlacementEntry>> {
    if rows == 0 || cols == 0 {
        return Err(ProxyError::Config(format!(
            "Cannot lay out cards on a {}x{} grid",
            rows, cols
        )));
    }

    let per_page = rows * cols;
    let placements = cards
        .into_iter()
        .enumerate()
        .map(|(i, card)| {
            let slot = i % per_page;
            PlacementEntry {
                card,
                page_index: i / per_page,
                row: slot / cols,
                column: slot % cols,
            }
        })
        .collect();

    Ok(placements)
}

/// Split placements into consecutive per-page slices.
pub fn pages(placements: &[PlacementEntry]) -> Vec<&[PlacementEntry]> {
    placements
        .chunk_by(|a, b| a.page_index == b.page_index)
        .collect()
}
