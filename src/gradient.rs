//! Gradient coloring of the QR pattern.

use image::{ImageBuffer, Rgba, RgbaImage};

/// Shape of the gradient field.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum GradientKind {
    /// Left to right.
    #[default]
    Linear,
    /// From the center outwards to the corners.
    Radial,
}

impl GradientKind {
    /// Maps a gradient type name to a kind. Anything but `"radial"` is linear.
    pub fn parse(kind: &str) -> Self {
        match kind {
            "radial" => GradientKind::Radial,
            "linear" | "" => GradientKind::Linear,
            other => {
                log::warn!("unrecognized gradient type {:?}, using linear", other);
                GradientKind::Linear
            }
        }
    }
}

/// A resolved two-stop gradient.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Gradient {
    pub start: Rgba<u8>,
    pub end: Rgba<u8>,
    pub kind: GradientKind,
}

/// Position of pixel `(x, y)` along the gradient, in `[0, 1]`.
pub fn ratio(kind: GradientKind, x: u32, y: u32, width: u32, height: u32) -> f64 {
    match kind {
        GradientKind::Linear => {
            if width <= 1 {
                0.0
            } else {
                x as f64 / (width - 1) as f64
            }
        }
        GradientKind::Radial => {
            let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
            let max_distance = cx.hypot(cy);
            if max_distance == 0.0 {
                return 0.0;
            }
            let distance = (x as f64 - cx).hypot(y as f64 - cy);
            (distance / max_distance).min(1.0)
        }
    }
}

fn lerp(start: u8, end: u8, ratio: f64) -> u8 {
    (start as f64 + ratio * (end as f64 - start as f64)) as u8
}

/// Builds an opaque `width x height` gradient field.
///
/// Each channel is `start + ratio * (end - start)`, truncated. The alpha channel of
/// both stops is ignored.
pub fn gradient_field(width: u32, height: u32, gradient: &Gradient) -> RgbaImage {
    let Gradient { start, end, kind } = *gradient;
    ImageBuffer::from_fn(width, height, |x, y| {
        let t = ratio(kind, x, y, width, height);
        Rgba([
            lerp(start[0], end[0], t),
            lerp(start[1], end[1], t),
            lerp(start[2], end[2], t),
            255,
        ])
    })
}

/// Recolors a two-color QR raster with a gradient.
///
/// Pixels whose RGB exactly equals `foreground` take the gradient sample at their
/// position; every other pixel becomes `background`. Alpha is not compared.
///
/// # Arguments
///
/// * `base` - The rendered QR raster.
/// * `foreground` - The color the QR pattern was rendered with.
/// * `background` - Color written to every non-pattern pixel.
/// * `gradient` - Gradient stops and shape.
///
/// # Returns
///
/// A new raster with the same dimensions as `base`.
pub fn apply_gradient(
    base: &RgbaImage,
    foreground: Rgba<u8>,
    background: Rgba<u8>,
    gradient: &Gradient,
) -> RgbaImage {
    let (width, height) = base.dimensions();
    log::debug!("applying {:?} gradient to {}x{} raster", gradient.kind, width, height);
    let mut out = gradient_field(width, height, gradient);
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let source = base.get_pixel(x, y);
        if source.0[..3] != foreground.0[..3] {
            *pixel = background;
        }
    }
    out
}
