//! Sheet grid geometry
//!
//! Cards are always `2.5in × 3.5in` on paper. The grid is centered on the
//! page and coordinates use the PDF convention (origin bottom-left).

use crate::constants::{CARD_HEIGHT_PT, CARD_WIDTH_PT};
use crate::options::PaperSize;

use super::{GridPosition, Rect};

/// Geometry of a `rows × cols` card grid centered on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetGrid {
    pub rows: usize,
    pub cols: usize,
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub card_width_pt: f32,
    pub card_height_pt: f32,
    /// Left edge of the grid
    pub margin_x_pt: f32,
    /// Distance from the page top to the top of the grid
    pub margin_y_pt: f32,
}

impl SheetGrid {
    /// Create a grid for the given paper size.
    pub fn new(rows: usize, cols: usize, paper: PaperSize) -> Self {
        let (page_width_pt, page_height_pt) = paper.dimensions_pt();
        Self::with_page_size(rows, cols, page_width_pt, page_height_pt)
    }

    /// Create a grid for a page size given in points.
    pub fn with_page_size(rows: usize, cols: usize, page_width_pt: f32, page_height_pt: f32) -> Self {
        let grid_width = cols as f32 * CARD_WIDTH_PT;
        let grid_height = rows as f32 * CARD_HEIGHT_PT;

        Self {
            rows,
            cols,
            page_width_pt,
            page_height_pt,
            card_width_pt: CARD_WIDTH_PT,
            card_height_pt: CARD_HEIGHT_PT,
            margin_x_pt: (page_width_pt - grid_width) / 2.0,
            margin_y_pt: (page_height_pt - grid_height) / 2.0,
        }
    }

    /// Total number of cells on one page
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Bounds of the cell at `pos`. Row 0 is at the top of the page.
    pub fn cell_bounds(&self, pos: GridPosition) -> Rect {
        let x = self.margin_x_pt + pos.col as f32 * self.card_width_pt;
        let y = self.page_height_pt - self.margin_y_pt - (pos.row + 1) as f32 * self.card_height_pt;
        Rect::new(x, y, self.card_width_pt, self.card_height_pt)
    }

}

// =============================================================================
// Tests
// =============================================================================
