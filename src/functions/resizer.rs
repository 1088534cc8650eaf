//! Image resizer
//!
//! Serves resized copies of bucket images. A resized copy is written back to
//! the bucket under `resized/<namespace>/<image>` and the caller is redirected
//! to its public URL.

use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::Path;
use tracing::info;

use super::{IMAGE_LIST, list_image_names};
use crate::api::Function;
use crate::clients::{NewObject, ObjectStore, S3ObjectStore};
use crate::core::config::BucketConfig;
use crate::core::models::{Invocation, Outcome};
use crate::errors::FunctionError;

const JPEG_QUALITY: u8 = 100;

/// Largest output image, in pixels, a single request may ask for.
pub const MAX_OUTPUT_PIXELS: u64 = 40_000_000;

fn check_output_size(width: u32, height: u32) -> Result<(), FunctionError> {
    if u64::from(width) * u64::from(height) > MAX_OUTPUT_PIXELS {
        return Err(FunctionError::BadRequest(format!(
            "Requested size {width}x{height} exceeds {MAX_OUTPUT_PIXELS} pixels"
        )));
    }
    Ok(())
}

/// Requested output dimensions. At least one side is always set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSpec {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

fn parse_dimension(name: &str, raw: &str) -> Result<u32, FunctionError> {
    raw.parse::<u32>()
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| FunctionError::BadRequest(format!("Invalid {name}: {raw}")))
}

impl ResizeSpec {
    /// Read `w` and `h` from the query; `None` when neither is present.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` when a present value is not a positive integer,
    /// or when the requested sides alone exceed [`MAX_OUTPUT_PIXELS`].
    pub fn from_invocation(invocation: &Invocation) -> Result<Option<Self>, FunctionError> {
        let width = invocation
            .param("w")
            .map(|w| parse_dimension("width", w))
            .transpose()?;
        let height = invocation
            .param("h")
            .map(|h| parse_dimension("height", h))
            .transpose()?;

        if width.is_none() && height.is_none() {
            return Ok(None);
        }
        check_output_size(width.unwrap_or(1), height.unwrap_or(1))?;
        Ok(Some(Self { width, height }))
    }

    /// Key namespace for the resized copy: `100`, `wx50` or `100x50`.
    #[must_use]
    pub fn namespace(&self) -> String {
        match (self.width, self.height) {
            (Some(w), Some(h)) => format!("{w}x{h}"),
            (Some(w), None) => w.to_string(),
            (None, Some(h)) => format!("wx{h}"),
            (None, None) => String::new(),
        }
    }
}

/// Output format named by the image's file extension.
///
/// # Errors
///
/// Returns `BadRequest` for a missing or unsupported extension.
pub fn output_format(image: &str) -> Result<ImageFormat, FunctionError> {
    Path::new(image)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ImageFormat::from_extension)
        .ok_or_else(|| FunctionError::BadRequest(format!("Unsupported image type: {image}")))
}

fn scale_side(other: u32, target: u32, side: u32) -> u32 {
    let scaled = u64::from(other) * u64::from(target) / u64::from(side.max(1));
    u32::try_from(scaled.max(1)).unwrap_or(u32::MAX)
}

/// Decode, resize and re-encode an image.
///
/// A single side keeps the aspect ratio; both sides fill and crop to exactly
/// that size.
///
/// # Errors
///
/// Returns `BadRequest` when the output would exceed [`MAX_OUTPUT_PIXELS`],
/// and `Upstream` when the bytes cannot be decoded or encoded.
pub fn resize_image(
    bytes: &[u8],
    spec: ResizeSpec,
    format: ImageFormat,
) -> Result<Vec<u8>, FunctionError> {
    let img = image::load_from_memory(bytes)?;
    let (width, height) = (img.width(), img.height());

    let target = match (spec.width, spec.height) {
        (Some(w), Some(h)) => Some((w, h, true)),
        (Some(w), None) => Some((w, scale_side(height, w, width), false)),
        (None, Some(h)) => Some((scale_side(width, h, height), h, false)),
        (None, None) => None,
    };

    let resized = match target {
        Some((w, h, fill)) => {
            check_output_size(w, h)?;
            if fill {
                img.resize_to_fill(w, h, FilterType::Lanczos3)
            } else {
                img.resize_exact(w, h, FilterType::Lanczos3)
            }
        }
        None => img,
    };

    let mut buf = Cursor::new(Vec::new());
    match format {
        ImageFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
            DynamicImage::ImageRgb8(resized.to_rgb8()).write_with_encoder(encoder)?;
        }
        ImageFormat::WebP => {
            DynamicImage::ImageRgba8(resized.to_rgba8()).write_to(&mut buf, format)?;
        }
        other => resized.write_to(&mut buf, other)?,
    }
    Ok(buf.into_inner())
}

pub struct ImageFunction<S = S3ObjectStore> {
    config: BucketConfig,
    store: S,
}

impl<S: ObjectStore> ImageFunction<S> {
    pub fn new(config: BucketConfig, store: S) -> Self {
        Self { config, store }
    }

    fn original_url(&self, image: &str) -> String {
        format!(
            "{}/{}",
            self.config.public_domain(),
            self.config.source_key(image)
        )
    }

    async fn resize_and_store(&self, image: &str, spec: ResizeSpec) -> Result<String, FunctionError> {
        let format = output_format(image)?;
        let content_type = mime_guess::from_path(image)
            .first_or_octet_stream()
            .to_string();

        let original = self.store.get(&self.config.source_key(image)).await?;
        let resized =
            tokio::task::spawn_blocking(move || resize_image(&original, spec, format)).await??;

        let key = format!("resized/{}/{}", spec.namespace(), image);
        info!(key = %key, bytes = resized.len(), "Storing resized image");
        self.store
            .put(NewObject {
                key: key.clone(),
                body: resized,
                content_type,
            })
            .await?;

        Ok(format!("{}/{}", self.config.public_domain(), key))
    }
}

#[async_trait]
impl<S: ObjectStore> Function for ImageFunction<S> {
    fn name(&self) -> &'static str {
        "image-resizer"
    }

    fn expiration_time(&self) -> Option<&str> {
        self.config.expiration_time.as_deref()
    }

    async fn call(&self, invocation: &Invocation) -> Result<Outcome, FunctionError> {
        let image = invocation.resource_id();
        if image == IMAGE_LIST {
            let names = list_image_names(&self.store, &self.config.bucket_path).await?;
            return Ok(Outcome::Json(serde_json::json!(names)));
        }

        let Some(spec) = ResizeSpec::from_invocation(invocation)? else {
            return Ok(Outcome::Redirect(self.original_url(image)));
        };

        let url = self.resize_and_store(image, spec).await?;
        Ok(Outcome::Redirect(url))
    }
}
