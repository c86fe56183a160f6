use crate::ids::{TransactionId, UpiId};
use crate::Money;

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use image::{ImageError, ImageFormat, Luma};

use qrcode::render::unicode::Dense1x2;
use qrcode::types::QrError;
use qrcode::QrCode;

use thiserror::Error;

pub const PAYEE_NAME: &str = "Merchant";
pub const MERCHANT_CATEGORY_CODE: &str = "0000";
pub const CURRENCY: &str = "INR";

#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("Could not encode payment URI as a QR code: {0}")]
    Qr(QrError),

    #[error("Could not serialize QR code as PNG: {0}")]
    Image(#[from] ImageError),
}

/// Rendered payment QR code, kept as the base64 text of a PNG and as terminal text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage {
    uri: String,
    png_base64: String,
    terminal: String,
}

impl QrImage {
    /// The payment URI encoded in the image
    pub fn uri(&self) -> &str {
        return &self.uri;
    }

    pub fn png_base64(&self) -> &str {
        return &self.png_base64;
    }

    pub fn png_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        return STANDARD.decode(&self.png_base64);
    }

    /// Inline-displayable form, e.g. for an `<img src=...>` attribute
    pub fn data_uri(&self) -> String {
        return format!("data:image/png;base64,{}", self.png_base64);
    }

    /// Unicode half blocks, light modules drawn as blocks for dark terminals
    pub fn terminal(&self) -> &str {
        return &self.terminal;
    }
}

pub fn payment_uri(upi_id: &UpiId, amount: Money, tid: &TransactionId) -> String {
    return format!(
        "upi://pay?pa={upi_id}&pn={PAYEE_NAME}&mc={MERCHANT_CATEGORY_CODE}&tid={tid}&am={}&cu={CURRENCY}",
        amount.to_fixed_2(),
    );
}

/// Builds the payment URI and encodes it once, rendering both the base64 PNG and the
/// terminal form from the same code.
///
/// Deterministic: the same inputs always produce the same bytes.
pub fn generate(
    upi_id: &UpiId,
    amount: Money,
    tid: &TransactionId,
) -> Result<QrImage, EncodingError> {
    let uri = payment_uri(upi_id, amount, tid);
    log::debug!("Encoding payment URI: {uri}");

    let code = encode(&uri)?;
    let pixels = code.render::<Luma<u8>>().build();

    let mut png = Vec::new();
    pixels.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    log::debug!("Encoded {} byte PNG for tid {tid}", png.len());

    let terminal = code
        .render::<Dense1x2>()
        .dark_color(Dense1x2::Light)
        .light_color(Dense1x2::Dark)
        .build();

    return Ok(QrImage {
        uri,
        png_base64: STANDARD.encode(&png),
        terminal,
    });
}

fn encode(uri: &str) -> Result<QrCode, EncodingError> {
    return QrCode::new(uri.as_bytes()).map_err(EncodingError::Qr);
}
