//! Thumbnail generation for the image allow-list.
//!
//! - Vector and icon formats (`.svg`, `.ico`) pass through untouched.
//! - Everything else is decoded, shrunk to fit a `max_edge` square (never enlarged),
//!   and re-encoded. GIFs become PNGs so transparency survives the resize.

mod generator;


pub use generator::generate_thumbnail;

use image::ImageFormat;

/// Extensions (lower-cased, with dot) we treat as images.
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp", ".svg", ".ico"];

/// Smallest and largest thumbnail edge a request may ask for.
pub const MIN_THUMBNAIL_EDGE: u32 = 16;
pub const MAX_THUMBNAIL_EDGE: u32 = 1024;

/// Encoded thumbnail ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// What to do with a given image extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ThumbnailPlan {
    /// Serve the original bytes with this content type.
    PassThrough(&'static str),
    /// Decode, shrink, and encode as this format.
    Resize(ImageFormat),
}

pub fn is_image_extension(extension: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&extension)
}

/// Picks the plan for an extension, or `None` if it's not an image.
pub(crate) fn plan_for_extension(extension: &str) -> Option<ThumbnailPlan> {
    let plan = match extension {
        ".svg" => ThumbnailPlan::PassThrough("image/svg+xml"),
        ".ico" => ThumbnailPlan::PassThrough("image/x-icon"),
        ".jpg" | ".jpeg" => ThumbnailPlan::Resize(ImageFormat::Jpeg),
        ".png" => ThumbnailPlan::Resize(ImageFormat::Png),
        // Multi-frame and palette formats go to PNG
        ".gif" => ThumbnailPlan::Resize(ImageFormat::Png),
        ".webp" => ThumbnailPlan::Resize(ImageFormat::WebP),
        ".bmp" => ThumbnailPlan::Resize(ImageFormat::Bmp),
        _ => return None,
    };
    Some(plan)
}

/// Clamps a requested edge size into the supported range.
pub fn clamp_edge(requested: u32) -> u32 {
    requested.clamp(MIN_THUMBNAIL_EDGE, MAX_THUMBNAIL_EDGE)
}

/// Computes the size that fits `width`×`height` inside a `max_edge` square without enlarging.
pub fn fit_within(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width <= max_edge && height <= max_edge {
        return (width, height);
    }
    let scale = f64::from(max_edge) / f64::from(width.max(height));
    let fit = |side: u32| ((f64::from(side) * scale).round() as u32).clamp(1, max_edge);
    (fit(width), fit(height))
}
