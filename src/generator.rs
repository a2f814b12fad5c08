//! The render pipeline: base raster, optional gradient, optional logo, PNG.

use std::io::Cursor;
use std::time::Duration;

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::{Error, Result};
use crate::gradient::apply_gradient;
use crate::logo::{embed_logo, LogoFetcher, SourceFetcher};
use crate::matrix;
use crate::request::{RenderOptions, RenderRequest};

/// Renders styled QR codes.
///
/// A generator holds no per-render state; the same instance can serve any number of
/// requests, from several threads when its fetcher allows it.
///
/// # Example
///
/// ```rust
/// use qrstyle::{Generator, RenderRequest};
///
/// let generator = Generator::new();
/// let png = generator
///     .generate(&RenderRequest::new("https://example.com").foreground("rgb(20,40,160)"))
///     .unwrap();
/// assert!(png.starts_with(b"\x89PNG"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Generator<F = SourceFetcher> {
    fetcher: F,
}

impl Generator {
    /// Creates a generator that downloads or reads logos with the default timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator whose logo downloads give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { fetcher: SourceFetcher::new(timeout) }
    }
}

impl<F: LogoFetcher> Generator<F> {
    /// Creates a generator that retrieves logos through `fetcher`.
    pub fn with_fetcher(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Renders `request` and encodes it as PNG.
    ///
    /// # Errors
    ///
    /// * [`Error::Validation`] - `data` is empty.
    /// * [`Error::EncodingCapacity`] - `data` does not fit at the chosen level.
    /// * [`Error::Fetch`] / [`Error::Decode`] - the logo could not be loaded.
    /// * [`Error::Encode`] - PNG serialization failed.
    pub fn generate(&self, request: &RenderRequest) -> Result<Vec<u8>> {
        let img = self.generate_image(request)?;
        encode_png(img)
    }

    /// Renders `request` to an in-memory RGBA raster.
    pub fn generate_image(&self, request: &RenderRequest) -> Result<RgbaImage> {
        let options = request.normalize()?;
        self.render(&options)
    }

    fn render(&self, options: &RenderOptions) -> Result<RgbaImage> {
        let mut img = matrix::render(
            &options.data,
            options.error_level,
            options.size,
            options.border,
            options.foreground,
            options.background,
        )?;

        if let Some(gradient) = &options.gradient {
            img = apply_gradient(&img, options.foreground, options.background, gradient);
        }

        if let Some(logo) = &options.logo {
            img = embed_logo(img, &self.fetcher, &logo.source, logo.size_percent)?;
        }

        Ok(img)
    }
}

/// Encodes a raster as a PNG byte stream.
pub fn encode_png(img: RgbaImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut out, ImageFormat::Png)
        .map_err(Error::Encode)?;
    Ok(out.into_inner())
}

/// Renders `request` as PNG with a default [`Generator`].
///
/// # Example
///
/// ```rust
/// use qrstyle::RenderRequest;
///
/// let png = qrstyle::generate(&RenderRequest::new("Hello, World!").size(200)).unwrap();
/// let img = image::load_from_memory(&png).unwrap();
/// assert_eq!((img.width(), img.height()), (200, 200));
/// ```
pub fn generate(request: &RenderRequest) -> Result<Vec<u8>> {
    Generator::new().generate(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_png_signature() {
        let png = generate(&RenderRequest::new("test")).unwrap();
        assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn test_fetcher_not_called_without_logo() {
        let fetcher = |_: &str| -> Result<Vec<u8>> { panic!("logo fetched") };
        let generator = Generator::with_fetcher(fetcher);
        generator.generate(&RenderRequest::new("test")).unwrap();
    }

    #[test]
    fn test_fetch_error_aborts() {
        let fetcher = |s: &str| -> Result<Vec<u8>> { Err(Error::Fetch(s.to_string())) };
        let generator = Generator::with_fetcher(fetcher);
        let err = generator
            .generate(&RenderRequest::new("test").logo("https://unreachable.invalid/x.png", 20.0))
            .unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
    }

    #[test]
    fn test_generator_reusable() {
        let generator = Generator::with_timeout(Duration::from_secs(1));
        let first = generator.generate(&RenderRequest::new("first")).unwrap();
        let second = generator.generate(&RenderRequest::new("second")).unwrap();
        assert_ne!(first, second);
        assert_eq!(first, generator.generate(&RenderRequest::new("first")).unwrap());
    }
}
