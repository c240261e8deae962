//! Decode, shrink, and re-encode images into thumbnails.
//!
//! CPU-bound. Async callers run this on `spawn_blocking`.

use std::fs;
use std::io::Cursor;
use std::time::Instant;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};

use super::{Thumbnail, ThumbnailPlan, fit_within, plan_for_extension};
use crate::file_system::listing::reading::extension_of;
use crate::file_system::{BrowseError, ResolvedPath};

/// Builds a thumbnail no larger than `max_edge` on its longer side.
///
/// The whole output is encoded into memory before returning, so a failure never
/// leaves a partial payload behind.
pub fn generate_thumbnail(resolved: &ResolvedPath, max_edge: u32) -> Result<Thumbnail, BrowseError> {
    let path = &resolved.absolute;

    let metadata = fs::metadata(path).map_err(|e| BrowseError::from_io(&e, &resolved.requested))?;
    if metadata.is_dir() {
        return Err(BrowseError::IsADirectory {
            path: resolved.requested.clone(),
        });
    }

    let name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
    let extension = extension_of(&name);
    let Some(plan) = plan_for_extension(&extension) else {
        return Err(BrowseError::UnsupportedType { extension });
    };

    match plan {
        ThumbnailPlan::PassThrough(content_type) => {
            let bytes = fs::read(path).map_err(|e| BrowseError::from_io(&e, &resolved.requested))?;
            Ok(Thumbnail {
                bytes,
                content_type: content_type.to_string(),
            })
        }
        ThumbnailPlan::Resize(format) => resize_image(resolved, max_edge.max(1), format),
    }
}

fn resize_image(resolved: &ResolvedPath, max_edge: u32, format: ImageFormat) -> Result<Thumbnail, BrowseError> {
    let start = Instant::now();

    let reader = ImageReader::open(&resolved.absolute)
        .map_err(|e| BrowseError::from_io(&e, &resolved.requested))?
        .with_guessed_format()
        .map_err(|e| BrowseError::from_io(&e, &resolved.requested))?;
    let image = reader.decode().map_err(|e| processing_error(resolved, "decode", &e))?;
    let decode_time = start.elapsed();

    let (width, height) = fit_within(image.width(), image.height(), max_edge);
    let resized = if (width, height) == (image.width(), image.height()) {
        image
    } else {
        image.resize_exact(width, height, FilterType::Triangle)
    };
    let resize_time = start.elapsed() - decode_time;

    let encodable = prepare_for_format(resized, format);
    let mut bytes = Vec::new();
    encodable
        .write_to(&mut Cursor::new(&mut bytes), format)
        .map_err(|e| processing_error(resolved, "encode", &e))?;

    log::debug!(
        "generate_thumbnail: path={}, size={}x{}, decode={}ms, resize={}ms, total={}ms",
        resolved.absolute.display(),
        width,
        height,
        decode_time.as_millis(),
        resize_time.as_millis(),
        start.elapsed().as_millis()
    );

    Ok(Thumbnail {
        bytes,
        content_type: format.to_mime_type().to_string(),
    })
}

/// Converts pixel layouts the target encoder can't take.
fn prepare_for_format(image: DynamicImage, format: ImageFormat) -> DynamicImage {
    match format {
        // JPEG has no alpha channel
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
        ImageFormat::WebP | ImageFormat::Bmp => {
            if image.color().has_alpha() {
                DynamicImage::ImageRgba8(image.to_rgba8())
            } else {
                DynamicImage::ImageRgb8(image.to_rgb8())
            }
        }
        _ => image,
    }
}

fn processing_error(resolved: &ResolvedPath, stage: &str, err: &image::ImageError) -> BrowseError {
    log::warn!(
        "generate_thumbnail: {} failed for {}: {}",
        stage,
        resolved.absolute.display(),
        err
    );
    BrowseError::Processing {
        message: format!("couldn't {} {}: {}", stage, resolved.requested, err),
    }
}
