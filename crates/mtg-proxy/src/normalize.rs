//! Artwork normalization
//!
//! Turns arbitrary downloaded artwork into an opaque RGB raster of exactly
//! `2.5in × 3.5in` at the requested density: flatten onto white,
//! center-crop to the card's aspect ratio, then resize to the target box.

use crate::constants::{CARD_HEIGHT_IN, CARD_WIDTH_IN};
use crate::types::Result;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};

/// A card image at exact print dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage {
    pixels: RgbImage,
    dpi: u32,
}

impl NormalizedImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }
}

/// Pixel dimensions of a card at `dpi`.
pub fn target_dimensions(dpi: u32) -> (u32, u32) {
    let width = (f64::from(CARD_WIDTH_IN) * f64::from(dpi)).floor() as u32;
    let height = (f64::from(CARD_HEIGHT_IN) * f64::from(dpi)).floor() as u32;
    (width.max(1), height.max(1))
}

/// Centered region of `source` with the aspect ratio of `target`.
///
/// Returns `(x, y, width, height)`. The region always lies inside the source
/// and is at least one pixel on each side.
pub fn crop_region(source: (u32, u32), target: (u32, u32)) -> (u32, u32, u32, u32) {
    let (sw, sh) = (u64::from(source.0.max(1)), u64::from(source.1.max(1)));
    let (tw, th) = (u64::from(target.0.max(1)), u64::from(target.1.max(1)));

    // Compare sw/sh against tw/th without floating point
    let (cw, ch) = if sw * th > tw * sh {
        (((sh * tw + th / 2) / th).clamp(1, sw), sh)
    } else {
        (sw, ((sw * th + tw / 2) / tw).clamp(1, sh))
    };

    let to_u32 = |v: u64| u32::try_from(v).unwrap_or(u32::MAX);
    (
        to_u32((sw - cw) / 2),
        to_u32((sh - ch) / 2),
        to_u32(cw),
        to_u32(ch),
    )
}

/// Composite any alpha channel onto opaque white.
fn flatten_onto_white(image: DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.into_rgb8();
    }

    let rgba = image.into_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (dst, src) in out.pixels_mut().zip(rgba.pixels()) {
        let alpha = u32::from(src[3]);
        let blend = |c: u8| ((u32::from(c) * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        *dst = Rgb([blend(src[0]), blend(src[1]), blend(src[2])]);
    }
    out
}

/// Trim `image` to the aspect ratio of `target`, equally from both ends,
/// and resize the remainder to exactly `target`.
pub fn cover_and_crop(image: &RgbImage, target: (u32, u32)) -> RgbImage {
    let (tw, th) = target;
    if image.dimensions() == target {
        return image.clone();
    }

    let (x, y, w, h) = crop_region(image.dimensions(), target);
    let cropped = imageops::crop_imm(image, x, y, w, h).to_image();
    imageops::resize(&cropped, tw, th, FilterType::Lanczos3)
}

/// Decode artwork bytes and normalize them for printing at `dpi`.
pub fn normalize(raw: &[u8], dpi: u32) -> Result<NormalizedImage> {
    let decoded = image::load_from_memory(raw)?;
    Ok(normalize_image(decoded, dpi))
}

/// Normalize an already-decoded image.
pub fn normalize_image(image: DynamicImage, dpi: u32) -> NormalizedImage {
    let flat = flatten_onto_white(image);
    let pixels = cover_and_crop(&flat, target_dimensions(dpi));
    NormalizedImage { pixels, dpi }
}
