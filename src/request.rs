//! Render configuration.
//!
//! [`RenderRequest`] is the loose, user-facing form: every field is optional except
//! `data`, and malformed values are tolerated. [`RenderRequest::normalize`] turns it into
//! [`RenderOptions`], where every value is concrete.

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::color::{parse_color, BLACK, WHITE};
use crate::error::{Error, Result};
use crate::gradient::{Gradient, GradientKind};
use crate::logo::DEFAULT_LOGO_SIZE;
use crate::matrix::ErrorLevel;

/// Edge length in pixels used when no positive size is given.
pub const DEFAULT_SIZE: u32 = 300;

/// Options for a single QR render.
///
/// Deserializes from camelCase JSON, with every field but `data` defaulted:
///
/// ```rust
/// let req: qrstyle::RenderRequest =
///     serde_json::from_str(r#"{"data": "hi", "gradientStart": "red"}"#).unwrap();
/// assert_eq!(req.size, 300);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderRequest {
    /// The content to encode (required).
    pub data: String,
    /// Edge length in pixels; non-positive means 300.
    pub size: i32,
    /// Pattern color: `rgb(r,g,b)`, `rgba(r,g,b,a)` or black/white/red/green/blue.
    pub foreground: Option<String>,
    /// Background color, same syntax as `foreground`.
    pub background: Option<String>,
    /// `L`, `M`, `Q` or `H`; anything else means `M`.
    #[serde(rename = "error")]
    pub error_level: Option<String>,
    /// Border width in pixels; 0 means no quiet zone.
    pub border: i32,
    /// Logo to center on the code, as an http(s) URL or a file path.
    pub logo_url: Option<String>,
    /// Logo extent as a percentage of the image; non-positive means 20.
    pub logo_size: f64,
    /// First gradient stop; needs `gradient_end` too.
    pub gradient_start: Option<String>,
    /// Second gradient stop; needs `gradient_start` too.
    pub gradient_end: Option<String>,
    /// `linear` or `radial`.
    pub gradient_type: Option<String>,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            data: String::new(),
            size: DEFAULT_SIZE as i32,
            foreground: None,
            background: None,
            error_level: None,
            border: 0,
            logo_url: None,
            logo_size: DEFAULT_LOGO_SIZE,
            gradient_start: None,
            gradient_end: None,
            gradient_type: None,
        }
    }
}

impl RenderRequest {
    /// Starts a request for `data` with every other option at its default.
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into(), ..Default::default() }
    }

    pub fn size(mut self, size: i32) -> Self {
        self.size = size;
        self
    }

    pub fn foreground(mut self, color: impl Into<String>) -> Self {
        self.foreground = Some(color.into());
        self
    }

    pub fn background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    pub fn error_level(mut self, level: impl Into<String>) -> Self {
        self.error_level = Some(level.into());
        self
    }

    pub fn border(mut self, border: i32) -> Self {
        self.border = border;
        self
    }

    pub fn logo(mut self, source: impl Into<String>, size_percent: f64) -> Self {
        self.logo_url = Some(source.into());
        self.logo_size = size_percent;
        self
    }

    pub fn gradient(
        mut self,
        start: impl Into<String>,
        end: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        self.gradient_start = Some(start.into());
        self.gradient_end = Some(end.into());
        self.gradient_type = Some(kind.into());
        self
    }

    /// Validates the request and resolves every option to a concrete value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when `data` is empty. No other input is rejected.
    pub fn normalize(&self) -> Result<RenderOptions> {
        if self.data.is_empty() {
            return Err(Error::Validation("data is required".to_string()));
        }

        let size = if self.size <= 0 { DEFAULT_SIZE } else { self.size as u32 };
        let logo_size = if self.logo_size > 0.0 { self.logo_size } else { DEFAULT_LOGO_SIZE };

        let gradient = match (non_empty(&self.gradient_start), non_empty(&self.gradient_end)) {
            (Some(start), Some(end)) => Some(Gradient {
                start: parse_color(start),
                end: parse_color(end),
                kind: GradientKind::parse(non_empty(&self.gradient_type).unwrap_or("linear")),
            }),
            _ => None,
        };

        let options = RenderOptions {
            data: self.data.clone(),
            size,
            foreground: non_empty(&self.foreground).map_or(BLACK, parse_color),
            background: non_empty(&self.background).map_or(WHITE, parse_color),
            error_level: ErrorLevel::parse(non_empty(&self.error_level).unwrap_or("")),
            border: self.border.max(0) as u32,
            logo: non_empty(&self.logo_url).map(|source| LogoOptions {
                source: source.to_string(),
                size_percent: logo_size,
            }),
            gradient,
        };
        log::debug!("normalized render options: {:?}", options);
        Ok(options)
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Where the logo comes from and how large it may be.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoOptions {
    pub source: String,
    pub size_percent: f64,
}

/// A fully resolved render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub data: String,
    pub size: u32,
    pub foreground: Rgba<u8>,
    pub background: Rgba<u8>,
    pub error_level: ErrorLevel,
    pub border: u32,
    pub logo: Option<LogoOptions>,
    pub gradient: Option<Gradient>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_data_is_rejected() {
        let err = RenderRequest::new("").normalize().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = RenderRequest::new("")
            .size(-5)
            .gradient("red", "blue", "radial")
            .logo("https://example.com/logo.png", 30.0)
            .normalize()
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_defaults() {
        let opts = RenderRequest::new("https://example.com").normalize().unwrap();
        assert_eq!(opts.size, 300);
        assert_eq!(opts.foreground, BLACK);
        assert_eq!(opts.background, WHITE);
        assert_eq!(opts.error_level, ErrorLevel::Medium);
        assert_eq!(opts.border, 0);
        assert_eq!(opts.logo, None);
        assert_eq!(opts.gradient, None);
    }

    #[test]
    fn test_out_of_range_values_are_normalized() {
        let mut req = RenderRequest::new("x").size(0).border(-3).error_level("Z");
        req.logo_url = Some("logo.png".to_string());
        req.logo_size = -1.0;
        let opts = req.normalize().unwrap();
        assert_eq!(opts.size, 300);
        assert_eq!(opts.border, 0);
        assert_eq!(opts.error_level, ErrorLevel::Medium);
        assert_eq!(opts.logo.unwrap().size_percent, 20.0);

        let opts = RenderRequest::new("x").size(-100).normalize().unwrap();
        assert_eq!(opts.size, 300);

        let mut req = RenderRequest::new("x").logo("logo.png", 0.0);
        assert_eq!(req.normalize().unwrap().logo.unwrap().size_percent, 20.0);
        req.logo_size = f64::NAN;
        assert_eq!(req.normalize().unwrap().logo.unwrap().size_percent, 20.0);
    }

    #[test]
    fn test_gradient_requires_both_stops() {
        let mut req = RenderRequest::new("x");
        req.gradient_start = Some("red".to_string());
        assert_eq!(req.normalize().unwrap().gradient, None);

        req.gradient_end = Some(String::new());
        assert_eq!(req.normalize().unwrap().gradient, None);

        req.gradient_end = Some("rgb(0,0,255)".to_string());
        let gradient = req.normalize().unwrap().gradient.unwrap();
        assert_eq!(gradient.start, Rgba([255, 0, 0, 255]));
        assert_eq!(gradient.end, Rgba([0, 0, 255, 255]));
        assert_eq!(gradient.kind, GradientKind::Linear);
    }

    #[test]
    fn test_empty_logo_url_disables_logo() {
        let req = RenderRequest::new("x").logo("", 50.0);
        assert_eq!(req.normalize().unwrap().logo, None);
    }

    #[test]
    fn test_bad_colors_fall_back_to_black() {
        let opts = RenderRequest::new("x")
            .foreground("invalid-color")
            .background("also-invalid")
            .normalize()
            .unwrap();
        assert_eq!(opts.foreground, BLACK);
        assert_eq!(opts.background, BLACK);
    }
}
