//! # qrstyle
//!
//! A Rust library for rendering QR codes as styled raster images.
//!
//! `qrstyle` draws the QR symbol (encoded by the [`qrcode`](https://docs.rs/qrcode) crate)
//! into an RGBA raster and layers optional styling on top of it before writing a PNG.
//!
//! ## Features
//!
//! - Custom foreground and background colors: `rgb(r,g,b)`, `rgba(r,g,b,a)` or a color name.
//! - Four error correction levels: `L`, `M`, `Q`, `H`.
//! - Border (quiet zone) control, in pixels.
//! - Linear or radial gradients across the QR pattern.
//! - A centered logo from an http(s) URL or a local file, in PNG, JPEG, GIF or WebP.
//! - Permissive configuration: malformed styling options fall back to defaults, only an
//!   empty payload is an error.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qrstyle = "0.1"
//! ```
//!
//! ## Example
//!
//! Generate a QR code with a radial gradient:
//!
//! ```rust
//! use qrstyle::RenderRequest;
//!
//! let request = RenderRequest::new("https://example.com")
//!     .size(300)
//!     .error_level("H")
//!     .gradient("rgb(255,0,0)", "rgb(0,0,255)", "radial");
//! let png = qrstyle::generate(&request).unwrap();
//! assert!(!png.is_empty());
//! ```
//!
//! Add a logo (requires network access):
//!
//! ```no_run
//! use qrstyle::{Generator, RenderRequest};
//!
//! let generator = Generator::new();
//! let request = RenderRequest::new("https://example.com")
//!     .error_level("H")
//!     .logo("https://example.com/logo.png", 20.0);
//! let png = generator.generate(&request)?;
//! std::fs::write("qr.png", png)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`color`]: Color descriptor parsing.
//! - [`matrix`]: Base QR raster rendering.
//! - [`gradient`]: Gradient recoloring.
//! - [`logo`]: Logo retrieval and overlay.
//! - [`request`]: Render configuration.

pub mod color;
pub mod error;
pub mod generator;
pub mod gradient;
pub mod logo;
pub mod matrix;
pub mod request;

pub use error::{Error, Result};
pub use generator::{generate, Generator};
pub use gradient::GradientKind;
pub use logo::{LogoFetcher, SourceFetcher};
pub use matrix::ErrorLevel;
pub use request::{RenderOptions, RenderRequest};
