//! Layout data types
//!
//! These types sit between the normalized artwork and the document writer.

use crate::cache::CacheKey;
use crate::normalize::NormalizedImage;
use std::sync::Arc;

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}

/// One physical copy of a card waiting to be placed.
///
/// Copies of the same card share the same `Arc` and key.
#[derive(Debug, Clone)]
pub struct SheetCard {
    pub key: CacheKey,
    pub label: String,
    pub image: Arc<NormalizedImage>,
}

/// Where one copy lands in the output.
#[derive(Debug, Clone)]
pub struct PlacementEntry {
    pub card: SheetCard,
    pub page_index: usize,
    pub row: usize,
    pub column: usize,
}

impl PlacementEntry {
    pub fn position(&self) -> GridPosition {
        GridPosition::new(self.row, self.column)
    }
}
