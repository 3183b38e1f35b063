//! Wi-Fi QR payload codec.
//!
//! Reads and writes the `WIFI:S:<ssid>;T:<security>;P:<password>;H:<hidden>;;`
//! text that phones and QR generators use to share network credentials.
//! Camera access, image decoding and joining the network are left to the
//! caller; this crate only deals with the text.

pub mod codec;
pub mod config;
pub mod credential;
#[cfg(feature = "render")]
pub mod render;

// Re-export commonly used items
pub use codec::{decode, encode, is_wifi_payload, CodecError};
pub use config::{ConfigError, EncodeConfig, OutputFormat};
pub use credential::{Security, SecurityToken, ValidationError, WifiCredential};

#[cfg(feature = "render")]
pub use render::{render_svg, render_unicode, RenderError};
