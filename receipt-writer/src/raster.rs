//! Image preparation for raster printing
//!
//! Images are:
//! - Loaded from a resource, an in-memory bitmap, or a file
//! - Scaled down to the printer's maximum raster width (never up)
//! - Cut top-to-bottom into bands of at most `height_parting` rows
//! - Encoded as one GS v 0 command per band
//!
//! Encoded sources have their size read from the header before decoding. Images at least
//! twice as wide as the printer are first subsampled by an integer
//! factor, then resized to the exact width.
//!
//! Every failure (missing resource, bad data, decoder limits exceeded)
//! yields `None` and is logged; nothing is propagated.

use crate::config::{HEIGHT_PARTING_DEFAULT, is_valid_height_parting};
use crate::escpos;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageError, ImageReader, ImageResult, Limits};
use std::borrow::Cow;
use std::collections::HashMap;
use std::io::{BufRead, Cursor, Seek};
use std::ops::Range;
use std::path::Path;
use tracing::{debug, instrument, warn};

/// Looks up encoded image data (PNG, JPEG, ...) by numeric id
pub trait ResourceResolver {
    fn resolve(&self, id: u32) -> Option<Cow<'_, [u8]>>;
}

impl ResourceResolver for HashMap<u32, Vec<u8>> {
    fn resolve(&self, id: u32) -> Option<Cow<'_, [u8]>> {
        self.get(&id).map(|bytes| Cow::Borrowed(bytes.as_slice()))
    }
}

/// Where an image comes from
#[derive(Clone, Copy)]
pub enum ImageSource<'a> {
    /// Encoded bytes looked up through a resolver
    Resource {
        resolver: &'a dyn ResourceResolver,
        id: u32,
    },
    /// Already decoded bitmap
    Bitmap(&'a DynamicImage),
    /// Encoded image file
    Path(&'a Path),
}

impl std::fmt::Debug for ImageSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageSource::Resource { id, .. } => f.debug_struct("Resource").field("id", id).finish(),
            ImageSource::Bitmap(img) => f.debug_tuple("Bitmap").field(&img.dimensions()).finish(),
            ImageSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
        }
    }
}

/// Decoder limits allowing at most `max_alloc` bytes
pub fn decode_limits(max_alloc: u64) -> Limits {
    let mut limits = Limits::default();
    limits.max_alloc = Some(max_alloc);
    limits
}

/// Integer subsampling factor applied while decoding
///
/// `floor(native_width / max_width)` when that is at least 2, otherwise 1.
pub fn sample_size(native_width: u32, max_width: u32) -> u32 {
    if max_width == 0 || native_width <= max_width {
        return 1;
    }
    (native_width / max_width).max(1)
}

/// Resize to exactly `max_width` keeping the aspect ratio
///
/// Images no wider than `max_width` (or any image when `max_width` is 0)
/// are returned as-is.
pub fn scale_to_fit(img: DynamicImage, max_width: u32) -> DynamicImage {
    let (width, height) = img.dimensions();
    if max_width == 0 || width <= max_width {
        return img;
    }
    let new_height = scaled_height(width, height, max_width);
    debug!(width, height, max_width, new_height, "exact scale");
    img.resize_exact(max_width, new_height, FilterType::Triangle)
}

/// Height of a `width` x `height` image resized to `max_width` wide
///
/// Rounded to the nearest row, never less than 1.
pub fn scaled_height(width: u32, height: u32, max_width: u32) -> u32 {
    if width == 0 {
        return height.max(1);
    }
    let scale = max_width as f64 / width as f64;
    ((height as f64 * scale).round() as u32).max(1)
}

/// Row ranges of at most `parting` rows covering `0..height`, top to bottom
///
/// An out-of-range `parting` falls back to the default of 255.
pub fn slice_bands(height: u32, parting: u32) -> Vec<Range<u32>> {
    let parting = if is_valid_height_parting(parting) {
        parting
    } else {
        HEIGHT_PARTING_DEFAULT
    };
    (0..height)
        .step_by(parting as usize)
        .map(|start| start..(start + parting).min(height))
        .collect()
}

/// Encode `img` as raster commands, one per band
pub fn raster_chunks(img: &DynamicImage, parting: u32) -> Vec<Vec<u8>> {
    let rgba = img.to_rgba8();
    slice_bands(rgba.height(), parting)
        .into_iter()
        .map(|rows| escpos::raster_band(&rgba, rows))
        .collect()
}

/// Load `source` and scale it to fit `max_width`
#[instrument(skip(limits))]
pub fn prepare(source: ImageSource<'_>, max_width: u32, limits: &Limits) -> Option<DynamicImage> {
    let result = match source {
        ImageSource::Resource { resolver, id } => {
            let Some(bytes) = resolver.resolve(id) else {
                warn!(id, "image resource not found");
                return None;
            };
            decode_sampled(
                || Ok(ImageReader::new(Cursor::new(&*bytes)).with_guessed_format()?),
                max_width,
                limits,
            )
        }
        ImageSource::Path(path) => decode_sampled(
            || Ok(ImageReader::open(path)?.with_guessed_format()?),
            max_width,
            limits,
        ),
        ImageSource::Bitmap(img) => {
            if img.width() == 0 || img.height() == 0 {
                warn!("empty bitmap");
                return None;
            }
            fit_bitmap(img, max_width, limits)
        }
    };

    match result {
        Ok(img) => Some(img),
        Err(ImageError::Limits(e)) => {
            warn!(error = %e, "image exceeds decoder limits");
            None
        }
        Err(e) => {
            warn!(error = %e, "image load failed");
            None
        }
    }
}

/// Load, scale, and slice `source` into raster commands
pub fn image_chunks(
    source: ImageSource<'_>,
    max_width: u32,
    parting: u32,
    limits: &Limits,
) -> Option<Vec<Vec<u8>>> {
    let img = prepare(source, max_width, limits)?;
    let chunks = raster_chunks(&img, parting);
    debug!(
        width = img.width(),
        height = img.height(),
        chunks = chunks.len(),
        "image rasterized"
    );
    Some(chunks)
}

/// Read the header size, decode, subsample coarsely, then scale exactly
///
/// `image` cannot subsample while decoding, so the coarse step runs on the
/// full decode; `limits.max_alloc` is what bounds memory.
fn decode_sampled<R: BufRead + Seek>(
    open: impl Fn() -> ImageResult<ImageReader<R>>,
    max_width: u32,
    limits: &Limits,
) -> ImageResult<DynamicImage> {
    let (width, height) = open()?.into_dimensions()?;
    limits.check_dimensions(width, height)?;

    let mut reader = open()?;
    reader.limits(limits.clone());
    let mut img = reader.decode()?;

    let sample = sample_size(width, max_width);
    if sample > 1 {
        debug!(width, height, sample, "coarse subsample");
        img = img.resize_exact(
            (img.width() / sample).max(1),
            (img.height() / sample).max(1),
            FilterType::Nearest,
        );
    }

    Ok(scale_to_fit(img, max_width))
}

/// Scale an in-memory bitmap, checking the output against the limits
fn fit_bitmap(img: &DynamicImage, max_width: u32, limits: &Limits) -> ImageResult<DynamicImage> {
    let (width, height) = img.dimensions();
    if max_width == 0 || width <= max_width {
        return Ok(img.clone());
    }
    limits.check_dimensions(max_width, scaled_height(width, height, max_width))?;
    Ok(scale_to_fit(img.clone(), max_width))
}
