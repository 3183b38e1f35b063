//! QR symbol rendering for encoded payloads.
//!
//! Thin adapter over the `qrcode` crate. Symbols use error-correction level
//! M, which is what phone camera apps handle best at typical screen sizes.

use log::debug;
use qrcode::render::{svg, unicode};
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};
use std::fmt;

/// Minimum edge length of SVG output, in pixels.
pub const SVG_MIN_SIZE: u32 = 200;

fn build(payload: &str) -> Result<QrCode, RenderError> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::M)?;
    debug!(
        "Built QR symbol: {} modules wide for {} byte payload",
        code.width(),
        payload.len()
    );
    Ok(code)
}

/// Draw a payload with Unicode half-block characters for a terminal.
pub fn render_unicode(payload: &str) -> Result<String, RenderError> {
    let code = build(payload)?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .quiet_zone(true)
        .build())
}

/// Draw a payload as an SVG document.
pub fn render_svg(payload: &str) -> Result<String, RenderError> {
    let code = build(payload)?;
    Ok(code
        .render()
        .min_dimensions(SVG_MIN_SIZE, SVG_MIN_SIZE)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build())
}

/// Error from the QR symbol builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderError(QrError);

impl From<QrError> for RenderError {
    fn from(err: QrError) -> Self {
        Self(err)
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to build QR code: {}", self.0)
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}
