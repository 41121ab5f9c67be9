use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decklist error: {0}")]
    Decklist(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No cards could be placed ({} request(s) failed)", .0.len())]
    EmptyResult(Vec<CardFailure>),
}

pub type Result<T> = std::result::Result<T, ProxyError>;

/// A specific printing of a card: set code plus collector number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Printing {
    /// Lowercase set code, e.g. `mh3`
    pub set_code: String,
    /// Collector number as written (may contain letters, e.g. `123a`)
    pub collector_number: String,
}

impl Printing {
    pub fn new(set_code: impl Into<String>, collector_number: impl Into<String>) -> Self {
        Self {
            set_code: set_code.into().to_lowercase(),
            collector_number: collector_number.into(),
        }
    }
}

/// One decklist entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRequest {
    pub name: String,
    /// Always at least 1
    pub quantity: u32,
    pub printing: Option<Printing>,
}

impl CardRequest {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
            printing: None,
        }
    }

    pub fn with_printing(mut self, printing: Printing) -> Self {
        self.printing = Some(printing);
        self
    }
}

/// Renders the request back as a decklist line that the parser accepts.
impl fmt::Display for CardRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.printing {
            Some(p) => write!(
                f,
                "{} {} ({}) {}",
                self.quantity,
                self.name,
                p.set_code.to_uppercase(),
                p.collector_number
            ),
            None => write!(f, "{}x {}", self.quantity, self.name),
        }
    }
}

/// A card as resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCard {
    /// Name actually printed on the card
    pub resolved_name: String,
    pub set_code: Option<String>,
    pub collector_number: Option<String>,
    /// Locator of the chosen artwork rendition
    pub artwork_ref: String,
}

impl CanonicalCard {
    /// Short label for progress and log output, e.g. `Sol Ring [MH3]`.
    pub fn label(&self) -> String {
        match &self.set_code {
            Some(set) => format!("{} [{}]", self.resolved_name, set.to_uppercase()),
            None => self.resolved_name.clone(),
        }
    }
}

/// Why a single request produced no placeable image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Every lookup strategy came back empty
    CardNotFound,
    /// The card resolved but has no usable image rendition
    ArtworkUnavailable,
    /// Retrieving or decoding the artwork failed
    FetchFailure,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::CardNotFound => "card not found",
            FailureKind::ArtworkUnavailable => "no artwork available",
            FailureKind::FetchFailure => "artwork fetch failed",
        };
        f.write_str(s)
    }
}

/// A per-request failure, keyed by the name the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFailure {
    pub requested_name: String,
    pub kind: FailureKind,
    pub detail: String,
}

impl CardFailure {
    pub fn new(requested_name: impl Into<String>, kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            requested_name: requested_name.into(),
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for CardFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.detail.is_empty() {
            write!(f, "{}: {}", self.requested_name, self.kind)
        } else {
            write!(f, "{}: {} ({})", self.requested_name, self.kind, self.detail)
        }
    }
}
