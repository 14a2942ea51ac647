//! QR rendering as terminal text

use anyhow::{Context, Result};
use qrcode::render::unicode::Dense1x2;
use qrcode::QrCode;

/// Render `text` as half-block characters, two modules per cell row.
///
/// Colors are inverted so the code scans on a dark terminal background.
pub fn render_qr(text: &str) -> Result<String> {
    let code = QrCode::new(text.as_bytes()).context("address does not fit in a QR code")?;
    Ok(code
        .render::<Dense1x2>()
        .dark_color(Dense1x2::Light)
        .light_color(Dense1x2::Dark)
        .quiet_zone(true)
        .build())
}
