//! Logo retrieval and center overlay.

use std::fs;
use std::time::Duration;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

use crate::error::{Error, Result};

/// Logo size, in percent of the QR raster, used when none (or a non-positive one) is given.
pub const DEFAULT_LOGO_SIZE: f64 = 20.0;

/// Upper bound on a single logo download.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Retrieves raw logo bytes from a source reference.
pub trait LogoFetcher {
    fn fetch(&self, source: &str) -> Result<Vec<u8>>;
}

impl<F> LogoFetcher for F
where
    F: Fn(&str) -> Result<Vec<u8>>,
{
    fn fetch(&self, source: &str) -> Result<Vec<u8>> {
        self(source)
    }
}

/// Fetches `http(s)://` sources over the network and reads anything else from disk.
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    timeout: Duration,
}

impl SourceFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn fetch_http(&self, url: &str) -> Result<Vec<u8>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::Fetch(e.to_string()))?;
        let resp = client
            .get(url)
            .send()
            .map_err(|e| Error::Fetch(format!("{}: {}", url, e)))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("{}: HTTP {}", url, status)));
        }
        let body = resp
            .bytes()
            .map_err(|e| Error::Fetch(format!("{}: {}", url, e)))?;
        Ok(body.to_vec())
    }
}

impl Default for SourceFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_TIMEOUT)
    }
}

impl LogoFetcher for SourceFetcher {
    fn fetch(&self, source: &str) -> Result<Vec<u8>> {
        if source.starts_with("http://") || source.starts_with("https://") {
            log::debug!("downloading logo from {}", source);
            return self.fetch_http(source);
        }
        let path = source.strip_prefix("file://").unwrap_or(source);
        log::debug!("reading logo from {}", path);
        fs::read(path).map_err(|e| Error::Fetch(format!("{}: {}", path, e)))
    }
}

/// Decodes logo bytes, sniffing the format from their content.
pub fn decode_logo(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(Error::Decode)
}

/// Box the logo must fit in: `size_percent` of each raster dimension, floored.
pub fn target_box(width: u32, height: u32, size_percent: f64) -> (u32, u32) {
    let scale = |d: u32| (d as f64 * size_percent / 100.0) as u32;
    (scale(width), scale(height))
}

/// Dimensions of `(src_w, src_h)` scaled to fit `(max_w, max_h)` with the aspect ratio kept.
///
/// Sources already inside the box keep their size. A zero-area box yields `(0, 0)`.
pub fn fit_dimensions(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if max_w == 0 || max_h == 0 || src_w == 0 || src_h == 0 {
        return (0, 0);
    }
    if src_w <= max_w && src_h <= max_h {
        return (src_w, src_h);
    }
    let src_aspect = src_w as f64 / src_h as f64;
    let max_aspect = max_w as f64 / max_h as f64;
    let (w, h) = if src_aspect > max_aspect {
        (max_w, (max_w as f64 / src_aspect).round() as u32)
    } else {
        ((max_h as f64 * src_aspect).round() as u32, max_h)
    };
    (w.max(1), h.max(1))
}

/// Overlays `logo` centered on `qr`.
///
/// The logo is scaled down (Lanczos) to fit within `size_percent` of the raster and
/// alpha-blended over it. A logo wider or taller than the raster is cropped evenly on
/// both sides.
///
/// # Arguments
///
/// * `qr` - The QR raster, consumed and returned with the logo drawn on it.
/// * `logo` - The decoded logo.
/// * `size_percent` - Maximum logo extent as a percentage of the raster.
///
/// # Returns
///
/// The composited raster.
pub fn overlay_logo(mut qr: RgbaImage, logo: &DynamicImage, size_percent: f64) -> RgbaImage {
    let (qr_w, qr_h) = qr.dimensions();
    let (max_w, max_h) = target_box(qr_w, qr_h, size_percent);
    let (logo_w, logo_h) = fit_dimensions(logo.width(), logo.height(), max_w, max_h);
    if logo_w == 0 || logo_h == 0 {
        log::debug!("logo box {}x{} is empty, skipping overlay", max_w, max_h);
        return qr;
    }

    let logo = logo.to_rgba8();
    let logo = if logo.dimensions() == (logo_w, logo_h) {
        logo
    } else {
        imageops::resize(&logo, logo_w, logo_h, FilterType::Lanczos3)
    };
    // Negative offsets are clipped by `overlay`.
    let x = (qr_w as i64 - logo_w as i64) / 2;
    let y = (qr_h as i64 - logo_h as i64) / 2;
    log::debug!("placing {}x{} logo at ({}, {})", logo_w, logo_h, x, y);
    imageops::overlay(&mut qr, &logo, x, y);
    qr
}

/// Fetches, decodes and overlays the logo at `source`.
pub fn embed_logo<F: LogoFetcher + ?Sized>(
    qr: RgbaImage,
    fetcher: &F,
    source: &str,
    size_percent: f64,
) -> Result<RgbaImage> {
    let bytes = fetcher.fetch(source)?;
    let logo = decode_logo(&bytes)?;
    Ok(overlay_logo(qr, &logo, size_percent))
}
