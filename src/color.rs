//! Color descriptor parsing.
//!
//! Descriptors are the strings accepted in a [`RenderRequest`](crate::RenderRequest):
//! `rgb(r,g,b)`, `rgba(r,g,b,a)` or one of a handful of color names. Parsing never
//! fails; anything unrecognized resolves to opaque black.

use image::Rgba;

/// Opaque black, the fallback for every unrecognized descriptor.
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Opaque white.
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// The recognized shape of a color descriptor.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ColorSpec {
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, u8),
    Named(Rgba<u8>),
    Unrecognized,
}

impl ColorSpec {
    /// Classifies a descriptor. The functional forms are tried before names.
    pub fn parse(s: &str) -> Self {
        if let Some([r, g, b]) = channels::<3>(s, "rgb(") {
            return ColorSpec::Rgb(r, g, b);
        }
        if let Some([r, g, b, a]) = channels::<4>(s, "rgba(") {
            return ColorSpec::Rgba(r, g, b, a);
        }
        match s.to_ascii_lowercase().as_str() {
            "black" => ColorSpec::Named(BLACK),
            "white" => ColorSpec::Named(WHITE),
            "red" => ColorSpec::Named(Rgba([255, 0, 0, 255])),
            "green" => ColorSpec::Named(Rgba([0, 255, 0, 255])),
            "blue" => ColorSpec::Named(Rgba([0, 0, 255, 255])),
            _ => ColorSpec::Unrecognized,
        }
    }

    /// Resolves the descriptor to concrete channel bytes.
    pub fn resolve(self) -> Rgba<u8> {
        match self {
            ColorSpec::Rgb(r, g, b) => Rgba([r, g, b, 255]),
            ColorSpec::Rgba(r, g, b, a) => Rgba([r, g, b, a]),
            ColorSpec::Named(color) => color,
            ColorSpec::Unrecognized => BLACK,
        }
    }
}

/// Parses a color descriptor into RGBA bytes.
///
/// # Arguments
///
/// * `s` - The descriptor, e.g. `"rgb(10,20,30)"`, `"rgba(0,0,0,128)"` or `"Red"`.
///
/// # Returns
///
/// The parsed color, or opaque black when the descriptor is not recognized.
///
/// # Example
///
/// ```rust
/// use qrstyle::color::parse_color;
/// use image::Rgba;
///
/// assert_eq!(parse_color("rgb(10,20,30)"), Rgba([10, 20, 30, 255]));
/// assert_eq!(parse_color("not a color"), Rgba([0, 0, 0, 255]));
/// ```
pub fn parse_color(s: &str) -> Rgba<u8> {
    let spec = ColorSpec::parse(s);
    if spec == ColorSpec::Unrecognized && !s.is_empty() {
        log::warn!("unrecognized color {:?}, using black", s);
    }
    spec.resolve()
}

/// Reads exactly `N` comma separated bytes between `prefix` and the closing paren.
fn channels<const N: usize>(s: &str, prefix: &str) -> Option<[u8; N]> {
    let inner = s.strip_prefix(prefix)?;
    let inner = &inner[..inner.find(')')?];
    let mut out = [0u8; N];
    let mut parts = inner.split(',');
    for slot in out.iter_mut() {
        *slot = parts.next()?.trim().parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb() {
        assert_eq!(parse_color("rgb(10,20,30)"), Rgba([10, 20, 30, 255]));
        assert_eq!(parse_color("rgb(255, 0, 128)"), Rgba([255, 0, 128, 255]));
    }

    #[test]
    fn test_parse_rgba() {
        assert_eq!(parse_color("rgba(10,20,30,40)"), Rgba([10, 20, 30, 40]));
        assert_eq!(ColorSpec::parse("rgba(1,2,3,4)"), ColorSpec::Rgba(1, 2, 3, 4));
    }

    #[test]
    fn test_parse_named_any_case() {
        assert_eq!(parse_color("BLACK"), BLACK);
        assert_eq!(parse_color("black"), BLACK);
        assert_eq!(parse_color("White"), WHITE);
        assert_eq!(parse_color("rEd"), Rgba([255, 0, 0, 255]));
        assert_eq!(parse_color("green"), Rgba([0, 255, 0, 255]));
        assert_eq!(parse_color("BLUE"), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_parse_fallback() {
        for s in [
            "",
            "invalid-color",
            "rgb(256,0,0)",
            "rgb(-1,0,0)",
            "rgb(1,2)",
            "rgb(1,2,3,4)",
            "rgba(1,2,3)",
            "rgb(1,2,3",
            "#ff0000",
            "purple",
        ] {
            assert_eq!(parse_color(s), BLACK, "descriptor {:?}", s);
        }
    }
}
