use image::{DynamicImage, RgbImage};
use lopdf::Document;
use mtg_proxy::normalize::normalize_image;
use mtg_proxy::*;
use std::sync::Arc;

fn sheet_cards(count: usize) -> Vec<SheetCard> {
    let image = Arc::new(normalize_image(
        DynamicImage::ImageRgb8(RgbImage::new(40, 40)),
        20,
    ));
    (0..count)
        .map(|i| SheetCard {
            key: CacheKey::new(if i % 2 == 0 { "Forest" } else { "Island" }, None),
            label: format!("card {}", i),
            image: Arc::clone(&image),
        })
        .collect()
}

fn page_sizes(doc: &Document) -> Vec<(f32, f32)> {
    doc.get_pages()
        .values()
        .map(|id| {
            let page = doc.get_dictionary(*id).unwrap();
            let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
            let w = media_box[2].as_float().unwrap();
            let h = media_box[3].as_float().unwrap();
            (w, h)
        })
        .collect()
}

#[test]
fn test_one_page_per_nine_cards() {
    let grid = SheetGrid::new(3, 3, PaperSize::Letter);
    let placements = layout(sheet_cards(10), 3, 3).unwrap();

    let bytes = generate_pdf_bytes(&placements, &grid).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();

    assert_eq!(doc.get_pages().len(), 2);
}

#[test]
fn test_pages_are_letter_sized() {
    let grid = SheetGrid::new(3, 3, PaperSize::Letter);
    let placements = layout(sheet_cards(3), 3, 3).unwrap();

    let bytes = generate_pdf_bytes(&placements, &grid).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();

    for (w, h) in page_sizes(&doc) {
        assert!((w - 612.0).abs() < 1.0, "width {}", w);
        assert!((h - 792.0).abs() < 1.0, "height {}", h);
    }
}

#[tokio::test]
async fn test_generate_pdf_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("proxies.pdf");
    let grid = SheetGrid::new(3, 3, PaperSize::A4);
    let placements = layout(sheet_cards(18), 3, 3).unwrap();

    generate_pdf(&placements, &grid, &output).await.unwrap();

    let doc = Document::load(&output).unwrap();
    assert_eq!(doc.get_pages().len(), 2);
}
