//! QR codes: `/api/qr-code`.

pub mod client;
pub mod types;

pub use client::QrCodeClient;
pub use types::{
    CallTarget, EmailTarget, FreeTextTarget, GeolocationTarget, QrCode, QrCodeListParams,
    QrCodeRequest, QrCodeTarget, SmsTarget, UrlTarget, WifiTarget,
};
