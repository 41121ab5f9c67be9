use super::{CardRecord, CatalogClient, CatalogError};
use crate::constants::{CATALOG_TIMEOUT, SCRYFALL_API};
use crate::fetch::{ByteFetcher, HttpFetcher};

/// Scryfall REST client.
pub struct ScryfallClient<F = HttpFetcher> {
    base_url: String,
    fetcher: F,
}

impl ScryfallClient<HttpFetcher> {
    pub fn new() -> Self {
        Self::with_base_url(SCRYFALL_API)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_fetcher(base_url, HttpFetcher::new(CATALOG_TIMEOUT))
    }
}

impl Default for ScryfallClient<HttpFetcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ByteFetcher> ScryfallClient<F> {
    pub fn with_fetcher(base_url: impl Into<String>, fetcher: F) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            fetcher,
        }
    }

    pub fn named_url(&self, fuzzy_name: &str) -> String {
        format!(
            "{}/cards/named?fuzzy={}",
            self.base_url,
            urlencoding::encode(fuzzy_name)
        )
    }

    pub fn printing_url(&self, set_code: &str, collector_number: &str) -> String {
        format!(
            "{}/cards/{}/{}",
            self.base_url,
            urlencoding::encode(set_code),
            urlencoding::encode(collector_number)
        )
    }

    fn get(&self, url: &str) -> Result<CardRecord, CatalogError> {
        let bytes = self.fetcher.fetch(url).map_err(|e| {
            if e.is_not_found() {
                CatalogError::NotFound
            } else {
                CatalogError::Fetch(e)
            }
        })?;
        serde_json::from_slice(&bytes).map_err(|e| CatalogError::Malformed(e.to_string()))
    }
}

impl<F: ByteFetcher> CatalogClient for ScryfallClient<F> {
    fn lookup_by_name(&self, fuzzy_name: &str) -> Result<CardRecord, CatalogError> {
        self.get(&self.named_url(fuzzy_name))
    }

    fn lookup_by_printing(
        &self,
        set_code: &str,
        collector_number: &str,
    ) -> Result<CardRecord, CatalogError> {
        self.get(&self.printing_url(set_code, collector_number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use std::cell::RefCell;

    struct Recorder {
        urls: RefCell<Vec<String>>,
        response: Result<&'static str, u16>,
    }

    impl ByteFetcher for Recorder {
        fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.urls.borrow_mut().push(url.to_string());
            match self.response {
                Ok(body) => Ok(body.as_bytes().to_vec()),
                Err(status) => Err(FetchError::Status {
                    status,
                    url: url.to_string(),
                }),
            }
        }
    }

    fn client(response: Result<&'static str, u16>) -> ScryfallClient<Recorder> {
        ScryfallClient::with_fetcher(
            "https://api.example/",
            Recorder {
                urls: RefCell::new(Vec::new()),
                response,
            },
        )
    }

    #[test]
    fn test_urls_are_encoded() {
        let c = client(Ok("{}"));
        assert_eq!(
            c.named_url("Fire // Ice"),
            "https://api.example/cards/named?fuzzy=Fire%20%2F%2F%20Ice"
        );
        assert_eq!(
            c.printing_url("mh3", "532"),
            "https://api.example/cards/mh3/532"
        );
    }

    #[test]
    fn test_lookup_decodes_record() {
        let c = client(Ok(r#"{"name":"Sol Ring","set":"mh3","collector_number":"532"}"#));
        let record = c.lookup_by_printing("mh3", "532").unwrap();
        assert_eq!(record.name, "Sol Ring");
        assert_eq!(
            c.fetcher.urls.borrow().as_slice(),
            ["https://api.example/cards/mh3/532"]
        );
    }

    #[test]
    fn test_404_maps_to_not_found() {
        let c = client(Err(404));
        assert!(matches!(
            c.lookup_by_name("Nonexistent Card"),
            Err(CatalogError::NotFound)
        ));
    }

    #[test]
    fn test_other_status_is_fetch_error() {
        let c = client(Err(503));
        assert!(matches!(
            c.lookup_by_name("Sol Ring"),
            Err(CatalogError::Fetch(_))
        ));
    }

    #[test]
    fn test_garbage_body_is_malformed() {
        let c = client(Ok("<html>"));
        assert!(matches!(
            c.lookup_by_name("Sol Ring"),
            Err(CatalogError::Malformed(_))
        ));
    }
}
