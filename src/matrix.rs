//! Base raster rendering.
//!
//! Symbol encoding is delegated to the `qrcode` crate; this module only decides the
//! raster geometry (size, quiet zone) and paints modules with the requested colors.

use image::{ImageBuffer, Rgba, RgbaImage};
use qrcode::types::{Color, EcLevel};
use qrcode::QrCode;

use crate::error::{Error, Result};

/// Width of the quiet zone, in modules, drawn whenever a border is requested.
///
/// Border compensation subtracts this from the requested border width. It belongs to
/// this renderer; a different encoder with a different quiet zone needs its own value.
pub const INTRINSIC_BORDER_MODULES: i32 = 4;

/// Largest edge length, in pixels, a raster may have after border compensation.
pub const MAX_RASTER_SIZE: u32 = 8192;

/// Error correction level of the generated symbol.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub enum ErrorLevel {
    /// Tolerates ~7% erroneous codewords (`L`).
    Low,
    /// Tolerates ~15% erroneous codewords (`M`).
    #[default]
    Medium,
    /// Tolerates ~25% erroneous codewords (`Q`).
    High,
    /// Tolerates ~30% erroneous codewords (`H`).
    Highest,
}

impl ErrorLevel {
    /// Maps a level letter to a level. Unknown or empty input yields [`ErrorLevel::Medium`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use qrstyle::matrix::ErrorLevel;
    ///
    /// assert_eq!(ErrorLevel::parse("Q"), ErrorLevel::High);
    /// assert_eq!(ErrorLevel::parse("?"), ErrorLevel::Medium);
    /// ```
    pub fn parse(level: &str) -> Self {
        match level {
            "L" => ErrorLevel::Low,
            "M" => ErrorLevel::Medium,
            "Q" => ErrorLevel::High,
            "H" => ErrorLevel::Highest,
            "" => ErrorLevel::Medium,
            other => {
                log::warn!("unrecognized error correction level {:?}, using M", other);
                ErrorLevel::Medium
            }
        }
    }

    fn ec_level(self) -> EcLevel {
        match self {
            ErrorLevel::Low => EcLevel::L,
            ErrorLevel::Medium => EcLevel::M,
            ErrorLevel::High => EcLevel::Q,
            ErrorLevel::Highest => EcLevel::H,
        }
    }
}

/// Returns the pixel size to render at once border compensation is applied.
///
/// A border of 0 disables the quiet zone and leaves the size alone. A positive border
/// grows the size by `2 * (border - 4)` when the border exceeds the intrinsic quiet zone.
pub fn compensated_size(size: u32, border: u32) -> u32 {
    let extra = border as i64 - INTRINSIC_BORDER_MODULES as i64;
    if border == 0 || extra <= 0 {
        return size;
    }
    u32::try_from(size as i64 + extra * 2).unwrap_or(u32::MAX)
}

/// Renders `data` as a square two-color raster.
///
/// # Arguments
///
/// * `data` - The content to encode.
/// * `level` - Error correction level.
/// * `size` - Requested edge length in pixels, before border compensation.
/// * `border` - Border width in pixels; 0 removes the quiet zone.
/// * `foreground` - Color of dark modules.
/// * `background` - Color of light modules and the quiet zone.
///
/// # Returns
///
/// The raster, or [`Error::EncodingCapacity`] when the data does not fit in any symbol
/// version at `level`. A compensated size above [`MAX_RASTER_SIZE`] is rejected with
/// [`Error::Validation`] before anything is allocated.
///
/// # Example
///
/// ```rust
/// use qrstyle::color::{BLACK, WHITE};
/// use qrstyle::matrix::{render, ErrorLevel};
///
/// let img = render("Hello, World!", ErrorLevel::Medium, 300, 0, BLACK, WHITE).unwrap();
/// assert_eq!(img.dimensions(), (300, 300));
/// ```
pub fn render(
    data: &str,
    level: ErrorLevel,
    size: u32,
    border: u32,
    foreground: Rgba<u8>,
    background: Rgba<u8>,
) -> Result<RgbaImage> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), level.ec_level())?;
    let quiet_zone = if border == 0 { 0 } else { INTRINSIC_BORDER_MODULES as usize };
    let width = code.width();
    let colors = code.to_colors();

    let modules = (width + 2 * quiet_zone) as u32;
    let size = compensated_size(size, border).max(modules);
    if size > MAX_RASTER_SIZE {
        return Err(Error::Validation(format!(
            "raster size {}px exceeds the {}px limit",
            size, MAX_RASTER_SIZE
        )));
    }
    log::debug!(
        "rendering {}x{} modules (quiet zone {}) at {}px, level {:?}",
        width,
        width,
        quiet_zone,
        size,
        level
    );

    // Nearest-module sampling: every pixel takes the module its position falls in.
    let module_at = |p: u32| (p as u64 * modules as u64 / size as u64) as usize;
    let img = ImageBuffer::from_fn(size, size, |x, y| {
        let (mx, my) = (module_at(x), module_at(y));
        let dark = mx >= quiet_zone
            && my >= quiet_zone
            && mx - quiet_zone < width
            && my - quiet_zone < width
            && colors[(my - quiet_zone) * width + (mx - quiet_zone)] == Color::Dark;
        if dark {
            foreground
        } else {
            background
        }
    });
    Ok(img)
}
