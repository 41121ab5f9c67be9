//! Request → canonical card resolution
//!
//! Lookup order:
//! 1. exact printing (set + collector number), when the request names one
//! 2. fuzzy name match
//!
//! A fixed minimum delay separates consecutive catalog queries.

use crate::catalog::{CardRecord, CatalogClient, CatalogError};
use crate::types::{CanonicalCard, CardFailure, CardRequest, FailureKind};
use std::time::{Duration, Instant};

/// Cooperative pacing between catalog queries.
#[derive(Debug)]
pub struct Pacer {
    min_interval: Duration,
    last: Option<Instant>,
}

impl Pacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: None,
        }
    }

    /// Block until at least `min_interval` has passed since the previous call.
    pub fn wait(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let pause = self.min_interval - elapsed;
                log::debug!("Pacing catalog request: sleeping {:?}", pause);
                std::thread::sleep(pause);
            }
        }
        self.last = Some(Instant::now());
    }
}

pub struct Resolver<C> {
    client: C,
    pacer: Pacer,
}

impl<C: CatalogClient> Resolver<C> {
    pub fn new(client: C, min_interval: Duration) -> Self {
        Self {
            client,
            pacer: Pacer::new(min_interval),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Resolve one request, trying the exact printing before the name.
    pub fn resolve(&mut self, request: &CardRequest) -> Result<CanonicalCard, CardFailure> {
        if let Some(printing) = &request.printing {
            self.pacer.wait();
            match self
                .client
                .lookup_by_printing(&printing.set_code, &printing.collector_number)
            {
                Ok(record) => return canonicalize(request, record),
                Err(e) => log::debug!(
                    "Printing lookup {}/{} failed for '{}': {}; falling back to name",
                    printing.set_code,
                    printing.collector_number,
                    request.name,
                    e
                ),
            }
        }

        self.pacer.wait();
        match self.client.lookup_by_name(&request.name) {
            Ok(record) => canonicalize(request, record),
            Err(CatalogError::NotFound) => Err(CardFailure::new(
                &request.name,
                FailureKind::CardNotFound,
                "",
            )),
            Err(e) => Err(CardFailure::new(
                &request.name,
                FailureKind::CardNotFound,
                e.to_string(),
            )),
        }
    }
}

fn canonicalize(request: &CardRequest, record: CardRecord) -> Result<CanonicalCard, CardFailure> {
    let Some(artwork_ref) = record.artwork_url().map(str::to_string) else {
        return Err(CardFailure::new(
            &request.name,
            FailureKind::ArtworkUnavailable,
            format!("'{}' has no printable image", record.name),
        ));
    };

    Ok(CanonicalCard {
        resolved_name: record.name,
        set_code: record.set_code,
        collector_number: record.collector_number,
        artwork_ref,
    })
}
