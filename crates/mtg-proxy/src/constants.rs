//! Shared constants for proxy sheet generation
//!
//! Physical sizes live here so the pixel density chosen for a run never
//! leaks into printed dimensions.

use std::time::Duration;

// =============================================================================
// Card Dimensions
// =============================================================================

/// Card width in inches (standard poker-size card)
pub const CARD_WIDTH_IN: f32 = 2.5;

/// Card height in inches
pub const CARD_HEIGHT_IN: f32 = 3.5;

/// Default print density (dots per inch)
pub const DEFAULT_DPI: u32 = 300;

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per inch
pub const POINTS_PER_INCH: f32 = 72.0;

/// Millimeters per inch
pub const MM_PER_INCH: f32 = 25.4;

/// Convert inches to points
#[inline]
pub fn in_to_pt(inches: f32) -> f32 {
    inches * POINTS_PER_INCH
}

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm / MM_PER_INCH * POINTS_PER_INCH
}

/// Card width in points
pub const CARD_WIDTH_PT: f32 = CARD_WIDTH_IN * POINTS_PER_INCH;

/// Card height in points
pub const CARD_HEIGHT_PT: f32 = CARD_HEIGHT_IN * POINTS_PER_INCH;

// =============================================================================
// Sheet Grid
// =============================================================================

/// Default rows per page (3 × 3.5in fits on Letter and A4)
pub const DEFAULT_ROWS: usize = 3;

/// Default columns per page
pub const DEFAULT_COLUMNS: usize = 3;

// =============================================================================
// Catalog
// =============================================================================

/// Base URL of the Scryfall REST API
pub const SCRYFALL_API: &str = "https://api.scryfall.com";

/// Minimum delay between consecutive catalog requests (milliseconds)
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 100;

/// Timeout for catalog metadata requests
pub const CATALOG_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for artwork downloads
pub const ARTWORK_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("mtg-proxy/", env!("CARGO_PKG_VERSION"));
