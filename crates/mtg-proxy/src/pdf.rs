use crate::cache::CacheKey;
use crate::constants::POINTS_PER_INCH;
use crate::layout::{PlacementEntry, Rect, SheetGrid, pages};
use crate::normalize::NormalizedImage;
use crate::types::{ProxyError, Result};
use printpdf::*;
use std::collections::HashMap;
use std::path::Path;

/// One image to draw, in points with a bottom-left origin.
#[derive(Debug, Clone, Copy)]
pub struct PlaceCommand<'a> {
    pub key: &'a CacheKey,
    pub bounds: Rect,
    pub image: &'a NormalizedImage,
}

/// Receives placement commands page by page.
pub trait DocumentWriter {
    type Output;

    /// Start a new page. Pages arrive in order, starting at 0.
    fn begin_page(&mut self, page_index: usize) -> Result<()>;

    fn place(&mut self, command: PlaceCommand<'_>) -> Result<()>;

    fn finalize(self) -> Result<Self::Output>;
}

/// Feed a layout through a document writer.
pub fn render_sheet<W: DocumentWriter>(
    placements: &[PlacementEntry],
    grid: &SheetGrid,
    mut writer: W,
) -> Result<W::Output> {
    for page in pages(placements) {
        writer.begin_page(page[0].page_index)?;
        for entry in page {
            writer.place(PlaceCommand {
                key: &entry.card.key,
                bounds: grid.cell_bounds(entry.position()),
                image: &entry.card.image,
            })?;
        }
    }
    writer.finalize()
}

/// `printpdf`-backed writer producing PDF bytes.
///
/// Each distinct artwork is embedded once and referenced from every cell
/// that shows it.
pub struct PdfSheetWriter {
    doc: PdfDocument,
    page_width_pt: f32,
    page_height_pt: f32,
    ops: Option<Vec<Op>>,
    images: HashMap<CacheKey, XObjectId>,
}

impl PdfSheetWriter {
    pub fn new(title: &str, page_width_pt: f32, page_height_pt: f32) -> Self {
        Self {
            doc: PdfDocument::new(title),
            page_width_pt,
            page_height_pt,
            ops: None,
            images: HashMap::new(),
        }
    }

    pub fn for_grid(title: &str, grid: &SheetGrid) -> Self {
        Self::new(title, grid.page_width_pt, grid.page_height_pt)
    }

    fn flush_page(&mut self) {
        if let Some(ops) = self.ops.take() {
            self.doc.pages.push(PdfPage::new(
                Mm::from(Pt(self.page_width_pt)),
                Mm::from(Pt(self.page_height_pt)),
                ops,
            ));
        }
    }

    fn image_id(&mut self, key: &CacheKey, image: &NormalizedImage) -> XObjectId {
        if let Some(id) = self.images.get(key) {
            return id.clone();
        }

        let raw = RawImage {
            pixels: RawImageData::U8(image.pixels().as_raw().clone()),
            width: image.width() as usize,
            height: image.height() as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let id = self.doc.add_image(&raw);
        self.images.insert(key.clone(), id.clone());
        id
    }
}

impl DocumentWriter for PdfSheetWriter {
    type Output = Vec<u8>;

    fn begin_page(&mut self, _page_index: usize) -> Result<()> {
        self.flush_page();
        self.ops = Some(Vec::new());
        Ok(())
    }

    fn place(&mut self, command: PlaceCommand<'_>) -> Result<()> {
        if self.ops.is_none() {
            return Err(ProxyError::Pdf("place() called before begin_page()".to_string()));
        }

        let id = self.image_id(command.key, command.image);

        // Size the image from its own pixel density, then scale to the cell
        let dpi = command.image.dpi() as f32;
        let natural_w = command.image.width() as f32 / dpi * POINTS_PER_INCH;
        let natural_h = command.image.height() as f32 / dpi * POINTS_PER_INCH;

        if let Some(ops) = self.ops.as_mut() {
            ops.push(Op::UseXobject {
                id,
                transform: XObjectTransform {
                    translate_x: Some(Pt(command.bounds.x)),
                    translate_y: Some(Pt(command.bounds.y)),
                    scale_x: Some(command.bounds.width / natural_w),
                    scale_y: Some(command.bounds.height / natural_h),
                    dpi: Some(dpi),
                    ..Default::default()
                },
            });
        }
        Ok(())
    }

    fn finalize(mut self) -> Result<Vec<u8>> {
        self.flush_page();

        let mut warnings = Vec::new();
        let bytes = self.doc.save(&PdfSaveOptions::default(), &mut warnings);
        for warning in &warnings {
            log::debug!("PDF: {:?}", warning);
        }

        Ok(bytes)
    }
}

/// Render placements to PDF bytes.
pub fn generate_pdf_bytes(placements: &[PlacementEntry], grid: &SheetGrid) -> Result<Vec<u8>> {
    render_sheet(placements, grid, PdfSheetWriter::for_grid("Proxy Sheet", grid))
}

pub async fn generate_pdf(
    placements: &[PlacementEntry],
    grid: &SheetGrid,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let placements = placements.to_vec();
    let grid = grid.clone();
    let output_path = output_path.as_ref().to_owned();

    let bytes =
        tokio::task::spawn_blocking(move || generate_pdf_bytes(&placements, &grid)).await??;

    tokio::fs::write(&output_path, bytes).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{GridPosition, SheetCard, layout};
    use crate::normalize::normalize_image;
    use ::image::{DynamicImage, RgbImage};
    use std::sync::Arc;

    /// Records commands instead of drawing them.
    #[derive(Default)]
    struct Recorder {
        pages: Vec<Vec<(String, Rect)>>,
    }

    impl DocumentWriter for Recorder {
        type Output = Vec<Vec<(String, Rect)>>;

        fn begin_page(&mut self, page_index: usize) -> Result<()> {
            assert_eq!(page_index, self.pages.len());
            self.pages.push(Vec::new());
            Ok(())
        }

        fn place(&mut self, command: PlaceCommand<'_>) -> Result<()> {
            self.pages
                .last_mut()
                .unwrap()
                .push((command.key.to_string(), command.bounds));
            Ok(())
        }

        fn finalize(self) -> Result<Self::Output> {
            Ok(self.pages)
        }
    }

    fn cards(n: usize, dpi: u32) -> Vec<SheetCard> {
        let image = Arc::new(normalize_image(
            DynamicImage::ImageRgb8(RgbImage::new(25, 35)),
            dpi,
        ));
        (0..n)
            .map(|i| SheetCard {
                key: CacheKey::new(&format!("card {}", i % 2), None),
                label: format!("card {}", i),
                image: Arc::clone(&image),
            })
            .collect()
    }

    #[test]
    fn test_render_groups_commands_by_page() {
        let grid = SheetGrid::with_page_size(3, 3, 612.0, 792.0);
        let placements = layout(cards(10, 10), 3, 3).unwrap();

        let pages = render_sheet(&placements, &grid, Recorder::default()).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 9);
        assert_eq!(pages[1].len(), 1);
        assert_eq!(pages[1][0].1, grid.cell_bounds(GridPosition::new(0, 0)));
    }

    #[test]
    fn test_physical_size_ignores_dpi() {
        let grid = SheetGrid::with_page_size(3, 3, 612.0, 792.0);
        for dpi in [10, 40] {
            let placements = layout(cards(1, dpi), 3, 3).unwrap();
            let pages = render_sheet(&placements, &grid, Recorder::default()).unwrap();
            let bounds = pages[0][0].1;
            assert!((bounds.width - 180.0).abs() < 1e-3);
            assert!((bounds.height - 252.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_place_before_page_fails() {
        let image = normalize_image(DynamicImage::ImageRgb8(RgbImage::new(5, 7)), 2);
        let key = CacheKey::new("x", None);
        let mut writer = PdfSheetWriter::new("t", 612.0, 792.0);

        let result = writer.place(PlaceCommand {
            key: &key,
            bounds: Rect::default(),
            image: &image,
        });
        assert!(matches!(result, Err(ProxyError::Pdf(_))));
    }
}
