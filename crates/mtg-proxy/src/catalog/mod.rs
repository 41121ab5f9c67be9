//! Remote card catalog
//!
//! Responses are decoded once, at this boundary, into [`CardRecord`]; the
//! rest of the crate never sees raw JSON.

mod record;
mod scryfall;

pub use record::{CardFace, CardRecord, Renditions};
pub use scryfall::ScryfallClient;

use crate::fetch::FetchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("No matching card in the catalog")]
    NotFound,
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Malformed catalog response: {0}")]
    Malformed(String),
}

/// Card lookups against a catalog service.
pub trait CatalogClient {
    /// Approximate name match; tie-breaks between printings are left to the
    /// service.
    fn lookup_by_name(&self, fuzzy_name: &str) -> Result<CardRecord, CatalogError>;

    /// Exact printing lookup.
    fn lookup_by_printing(
        &self,
        set_code: &str,
        collector_number: &str,
    ) -> Result<CardRecord, CatalogError>;
}
