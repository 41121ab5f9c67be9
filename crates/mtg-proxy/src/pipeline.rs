//! Run orchestration: parse → resolve → fetch (cached) → normalize → layout
//!
//! Requests are processed one at a time, in input order. A failing request
//! is recorded and skipped; only a run that places nothing at all fails.

use crate::cache::{ByteStore, CacheKey, CacheStore, FsStore};
use crate::catalog::{CatalogClient, ScryfallClient};
use crate::constants::ARTWORK_TIMEOUT;
use crate::fetch::{ByteFetcher, HttpFetcher};
use crate::layout::{PlacementEntry, SheetCard, SheetGrid, layout};
use crate::normalize::{NormalizedImage, normalize};
use crate::options::ProxyOptions;
use crate::resolver::Resolver;
use crate::stats::{SheetStatistics, calculate_statistics};
use crate::types::{CardFailure, CardRequest, FailureKind, ProxyError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Progress after one request has been handled.
#[derive(Debug, Clone)]
pub struct Progress {
    /// Requests handled so far (1-based)
    pub processed: usize,
    pub total: usize,
    pub requested_name: String,
    /// Label of the resolved card, or why it failed
    pub outcome: std::result::Result<String, FailureKind>,
}

/// Receives a [`Progress`] after every request.
pub type ProgressObserver = Box<dyn FnMut(&Progress) + Send>;

/// Cards ready for layout, plus what went wrong along the way.
#[derive(Debug, Default)]
pub struct PreparedCards {
    pub cards: Vec<SheetCard>,
    pub failures: Vec<CardFailure>,
}

/// Result of a completed run.
#[derive(Debug)]
pub struct RunReport {
    pub placements: Vec<PlacementEntry>,
    pub failures: Vec<CardFailure>,
    pub statistics: SheetStatistics,
}

pub struct Pipeline<C, F, S> {
    resolver: Resolver<C>,
    fetcher: F,
    cache: CacheStore<S>,
    dpi: u32,
    rows: usize,
    columns: usize,
    observer: Option<ProgressObserver>,
}

impl Pipeline<ScryfallClient, HttpFetcher, FsStore> {
    /// Pipeline against the live catalog with an on-disk cache.
    pub fn from_options(options: &ProxyOptions) -> Result<Self> {
        options.validate()?;
        let store = FsStore::open(&options.cache_dir)?;
        Self::new(
            ScryfallClient::with_base_url(&options.api_base),
            HttpFetcher::new(ARTWORK_TIMEOUT),
            store,
            options,
        )
    }
}

impl<C, F, S> Pipeline<C, F, S>
where
    C: CatalogClient,
    F: ByteFetcher,
    S: ByteStore,
{
    /// Fails with [`ProxyError::Config`] when `options` do not validate.
    pub fn new(catalog: C, fetcher: F, store: S, options: &ProxyOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            resolver: Resolver::new(catalog, options.request_delay()),
            fetcher,
            cache: CacheStore::new(store, options.use_cache),
            dpi: options.dpi,
            rows: options.rows,
            columns: options.columns,
            observer: None,
        })
    }

    pub fn with_observer(mut self, observer: impl FnMut(&Progress) + Send + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn cache(&self) -> &CacheStore<S> {
        &self.cache
    }

    /// Resolve, fetch and normalize every request, expanding quantities.
    pub fn prepare(&mut self, requests: &[CardRequest]) -> PreparedCards {
        let mut prepared = PreparedCards::default();
        // Artwork already normalized during this run, by cache key
        let mut session: HashMap<CacheKey, Arc<NormalizedImage>> = HashMap::new();
        let total = requests.len();

        for (i, request) in requests.iter().enumerate() {
            let outcome = match self.process(request, &mut session) {
                Ok(card) => {
                    log::info!("✓ {} (x{})", card.label, request.quantity);
                    let label = card.label.clone();
                    prepared
                        .cards
                        .extend(std::iter::repeat_n(card, request.quantity as usize));
                    Ok(label)
                }
                Err(failure) => {
                    log::warn!("⚠ {}", failure);
                    let kind = failure.kind;
                    prepared.failures.push(failure);
                    Err(kind)
                }
            };

            if let Some(observer) = self.observer.as_mut() {
                observer(&Progress {
                    processed: i + 1,
                    total,
                    requested_name: request.name.clone(),
                    outcome,
                });
            }
        }

        prepared
    }

    fn process(
        &mut self,
        request: &CardRequest,
        session: &mut HashMap<CacheKey, Arc<NormalizedImage>>,
    ) -> std::result::Result<SheetCard, CardFailure> {
        log::info!("Fetching: {} (x{})", request.name, request.quantity);

        let card = self.resolver.resolve(request)?;
        let key = CacheKey::for_card(&card, request.printing.is_some());

        let image = match session.get(&key) {
            Some(image) => Arc::clone(image),
            None => {
                let fetcher = &self.fetcher;
                let dpi = self.dpi;
                let failure = |detail: String| {
                    CardFailure::new(&request.name, FailureKind::FetchFailure, detail)
                };
                let image = self.cache.get_or_fetch(
                    &key,
                    || fetcher.fetch(&card.artwork_ref).map_err(|e| failure(e.to_string())),
                    |bytes| normalize(bytes, dpi).map_err(|e| failure(e.to_string())),
                )?;
                let image = Arc::new(image);
                session.insert(key.clone(), Arc::clone(&image));
                image
            }
        };

        Ok(SheetCard {
            key,
            label: card.label(),
            image,
        })
    }

    /// Run the whole pipeline up to layout.
    ///
    /// Fails with [`ProxyError::EmptyResult`] when no request produced an image.
    pub fn run(&mut self, requests: &[CardRequest]) -> Result<RunReport> {
        let PreparedCards { cards, failures } = self.prepare(requests);
        if cards.is_empty() {
            return Err(ProxyError::EmptyResult(failures));
        }

        let statistics = calculate_statistics(cards.len(), self.rows, self.columns);
        let placements = layout(cards, self.rows, self.columns)?;

        Ok(RunReport {
            placements,
            failures,
            statistics,
        })
    }
}

/// Run against the live catalog without producing a document.
pub async fn prepare_proxies(
    requests: Vec<CardRequest>,
    options: ProxyOptions,
    observer: Option<ProgressObserver>,
) -> Result<RunReport> {
    let report = tokio::task::spawn_blocking(move || {
        let mut pipeline = Pipeline::from_options(&options)?;
        pipeline.observer = observer;
        pipeline.run(&requests)
    })
    .await??;

    Ok(report)
}

/// Run against the live catalog and write the PDF to `options.output_path`.
pub async fn generate_proxies(
    requests: Vec<CardRequest>,
    options: ProxyOptions,
    observer: Option<ProgressObserver>,
) -> Result<RunReport> {
    let grid = SheetGrid::new(options.rows, options.columns, options.paper_size);
    let output_path = options.output_path.clone();

    let report = prepare_proxies(requests, options, observer).await?;

    crate::pdf::generate_pdf(&report.placements, &grid, &output_path).await?;

    Ok(report)
}
