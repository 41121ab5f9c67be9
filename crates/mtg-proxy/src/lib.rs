pub mod cache;
pub mod catalog;
pub mod constants;
pub mod decklist;
pub mod fetch;
pub mod layout;
pub mod normalize;
mod options;
pub mod pdf;
mod pipeline;
pub mod resolver;
mod stats;
mod types;

pub use cache::{ByteStore, CacheKey, CacheStore, FsStore, MemoryStore};
pub use catalog::{CardRecord, CatalogClient, CatalogError, ScryfallClient};
pub use decklist::{load_decklist, parse_csv, parse_decklist, parse_line};
pub use fetch::{ByteFetcher, FetchError, HttpFetcher};
pub use layout::{PlacementEntry, SheetCard, SheetGrid, layout, page_count};
pub use normalize::{NormalizedImage, normalize};
pub use options::*;
pub use pdf::{DocumentWriter, PdfSheetWriter, generate_pdf, generate_pdf_bytes};
pub use pipeline::*;
pub use resolver::Resolver;
pub use stats::*;
pub use types::*;
