use crate::constants::*;
use crate::types::{ProxyError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PaperSize {
    #[default]
    Letter,
    Legal,
    A4,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Portrait dimensions in millimeters
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Portrait dimensions in points
    pub fn dimensions_pt(self) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        (mm_to_pt(w), mm_to_pt(h))
    }

    pub fn name(&self) -> &'static str {
        match self {
            PaperSize::Letter => "Letter",
            PaperSize::Legal => "Legal",
            PaperSize::A4 => "A4",
            PaperSize::Custom { .. } => "Custom",
        }
    }
}

/// Run-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyOptions {
    /// Print density of the embedded card images
    pub dpi: u32,
    /// When false, artwork is always re-downloaded (the cache is still written)
    pub use_cache: bool,
    pub rows: usize,
    pub columns: usize,
    pub paper_size: PaperSize,
    pub cache_dir: PathBuf,
    /// Minimum pause between catalog requests
    pub request_delay_ms: u64,
    pub api_base: String,
    pub output_path: PathBuf,
}

impl Default for ProxyOptions {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            use_cache: true,
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            paper_size: PaperSize::Letter,
            cache_dir: PathBuf::from("cache"),
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
            api_base: SCRYFALL_API.to_string(),
            output_path: PathBuf::from("proxies.pdf"),
        }
    }
}

impl ProxyOptions {
    /// Load options from JSON file
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ProxyError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ProxyError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn cards_per_page(&self) -> usize {
        self.rows * self.columns
    }

    pub fn request_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.request_delay_ms)
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(ProxyError::Config("DPI must be positive".to_string()));
        }

        if self.rows == 0 || self.columns == 0 {
            return Err(ProxyError::Config(
                "Grid must have at least one row and one column".to_string(),
            ));
        }

        let (page_w, page_h) = self.paper_size.dimensions_pt();
        let grid_w = self.columns as f32 * CARD_WIDTH_PT;
        let grid_h = self.rows as f32 * CARD_HEIGHT_PT;
        if grid_w > page_w || grid_h > page_h {
            return Err(ProxyError::Config(format!(
                "A {}x{} card grid does not fit on {} paper",
                self.rows,
                self.columns,
                self.paper_size.name()
            )));
        }

        Ok(())
    }
}
