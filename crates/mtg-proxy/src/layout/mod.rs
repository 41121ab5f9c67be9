//! Sheet layout
//!
//! - Placement: which card goes in which `(page, row, column)` slot
//! - Grid: where that slot sits on the paper, in points

mod grid;
mod placement;
mod types;

pub use grid::*;
pub use placement::*;
pub use types::*;
