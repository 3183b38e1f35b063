//! Wi-Fi credential data structures.
//!
//! [`WifiCredential`] is the record carried by a Wi-Fi QR payload. It is a
//! plain value: built once by [`WifiCredential::new`] or by
//! [`decode`](crate::codec::decode) and never mutated afterwards.
//!
//! # Example
//!
//! ```
//! use wifi_qr::{Security, WifiCredential};
//!
//! let credential = WifiCredential::new("MyNetwork", "MyPassword", Security::Wpa).unwrap();
//! assert!(credential.validate().is_ok());
//! assert_eq!(credential.security.known(), Some(Security::Wpa));
//!
//! let open = WifiCredential::open("Cafe").unwrap().with_hidden(true);
//! assert!(open.is_open());
//! assert!(open.hidden);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Maximum SSID length per IEEE 802.11 standard.
pub const MAX_SSID_LEN: usize = 32;

/// Maximum password length, applied to WPA2 passphrases and WEP keys alike.
pub const MAX_PASSWORD_LEN: usize = 64;

/// Minimum passphrase length for WPA2.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Authentication scheme that can be written into a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Security {
    /// WPA/WPA2 passphrase.
    Wpa,
    /// Legacy WEP key.
    Wep,
    /// No authentication.
    Open,
}

impl Security {
    /// Wire token used in the `T:` field.
    pub fn as_token(&self) -> &'static str {
        match self {
            Self::Wpa => "WPA",
            Self::Wep => "WEP",
            Self::Open => "nopass",
        }
    }

    /// Map a wire token to a known scheme. Matching is case-sensitive.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "WPA" => Some(Self::Wpa),
            "WEP" => Some(Self::Wep),
            "nopass" => Some(Self::Open),
            _ => None,
        }
    }

    /// Label suitable for showing to a user.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Wpa => "WPA/WPA2",
            Self::Wep => "WEP",
            Self::Open => "Open",
        }
    }

    /// Whether this scheme needs a password to join.
    pub fn requires_password(&self) -> bool {
        !matches!(self, Self::Open)
    }
}

impl fmt::Display for Security {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Security field of a decoded credential.
///
/// Tokens this crate does not know about are kept verbatim so that newer
/// schemes (`SAE`, `WPA2-EAP`, ...) survive a decode instead of failing it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SecurityToken {
    /// One of the canonical schemes.
    Known(Security),
    /// Any other `T:` value, as it appeared in the payload.
    Unknown(String),
}

impl SecurityToken {
    /// Classify a raw `T:` value.
    pub fn from_token(token: &str) -> Self {
        match Security::from_token(token) {
            Some(security) => Self::Known(security),
            None => Self::Unknown(token.to_string()),
        }
    }

    /// Wire token, or the raw text for unknown schemes.
    pub fn as_token(&self) -> &str {
        match self {
            Self::Known(security) => security.as_token(),
            Self::Unknown(raw) => raw,
        }
    }

    /// The canonical scheme, if recognized.
    pub fn known(&self) -> Option<Security> {
        match self {
            Self::Known(security) => Some(*security),
            Self::Unknown(_) => None,
        }
    }

    /// Whether this is the canonical open scheme.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Known(Security::Open))
    }
}

impl Default for SecurityToken {
    fn default() -> Self {
        Self::Known(Security::Open)
    }
}

impl From<Security> for SecurityToken {
    fn from(security: Security) -> Self {
        Self::Known(security)
    }
}

impl From<String> for SecurityToken {
    fn from(token: String) -> Self {
        match Security::from_token(&token) {
            Some(security) => Self::Known(security),
            None => Self::Unknown(token),
        }
    }
}

impl From<SecurityToken> for String {
    fn from(token: SecurityToken) -> Self {
        match token {
            SecurityToken::Known(security) => security.as_token().to_string(),
            SecurityToken::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for SecurityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(security) => write!(f, "{}", security),
            Self::Unknown(raw) if raw.is_empty() => write!(f, "Unknown"),
            Self::Unknown(raw) => write!(f, "{}", raw),
        }
    }
}

/// Wi-Fi network credentials as carried by a QR payload.
///
/// The password is wiped from memory when the value is dropped.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct WifiCredential {
    /// Network name. Never empty in a decoded credential.
    pub ssid: String,
    /// Passphrase, empty for open networks.
    #[serde(default)]
    pub password: String,
    /// Authentication scheme.
    #[serde(default)]
    #[zeroize(skip)]
    pub security: SecurityToken,
    /// Whether the network hides its SSID.
    #[serde(default)]
    pub hidden: bool,
}

impl WifiCredential {
    /// Create a validated credential.
    ///
    /// For [`Security::Open`] the password is discarded.
    pub fn new(
        ssid: impl Into<String>,
        password: impl Into<String>,
        security: Security,
    ) -> Result<Self, ValidationError> {
        let mut password = password.into();
        if !security.requires_password() {
            password.zeroize();
        }
        let credential = Self {
            ssid: ssid.into(),
            password,
            security: security.into(),
            hidden: false,
        };
        credential.validate()?;
        Ok(credential)
    }

    /// Create a credential for an open network (no password).
    pub fn open(ssid: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(ssid, String::new(), Security::Open)
    }

    /// Mark the network as hidden (or not).
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Check the credential is something a device could actually join.
    ///
    /// Decoded credentials are not validated automatically; scanners in the
    /// wild emit SSIDs and passwords outside these limits.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ssid.trim().is_empty() {
            return Err(ValidationError::SsidEmpty);
        }
        if self.ssid.len() > MAX_SSID_LEN {
            return Err(ValidationError::SsidTooLong {
                len: self.ssid.len(),
                max: MAX_SSID_LEN,
            });
        }

        let security = match &self.security {
            SecurityToken::Known(security) => *security,
            SecurityToken::Unknown(raw) => {
                return Err(ValidationError::UnknownSecurity(raw.clone()));
            }
        };

        if security.requires_password() && self.password.trim().is_empty() {
            return Err(ValidationError::PasswordRequired(security));
        }
        if security == Security::Wpa && self.password.len() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort {
                len: self.password.len(),
                min: MIN_PASSWORD_LEN,
            });
        }
        if self.password.len() > MAX_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooLong {
                len: self.password.len(),
                max: MAX_PASSWORD_LEN,
            });
        }

        Ok(())
    }

    /// Check if this is an open network.
    pub fn is_open(&self) -> bool {
        self.security.is_open()
    }
}

// Keeps the password out of logs and panic messages.
impl fmt::Debug for WifiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WifiCredential")
            .field("ssid", &self.ssid)
            .field(
                "password",
                &if self.password.is_empty() { "" } else { "****" },
            )
            .field("security", &self.security)
            .field("hidden", &self.hidden)
            .finish()
    }
}

/// Reasons a credential is not usable for joining a network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// SSID is empty or whitespace.
    SsidEmpty,
    /// SSID exceeds maximum length.
    SsidTooLong { len: usize, max: usize },
    /// A secured network was given no password.
    PasswordRequired(Security),
    /// Password is too short for WPA2.
    PasswordTooShort { len: usize, min: usize },
    /// Password exceeds maximum length.
    PasswordTooLong { len: usize, max: usize },
    /// Security token this crate cannot join with.
    UnknownSecurity(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SsidEmpty => write!(f, "SSID cannot be empty"),
            Self::SsidTooLong { len, max } => {
                write!(f, "SSID too long: {} bytes (max {})", len, max)
            }
            Self::PasswordRequired(security) => {
                write!(f, "password required for {} network", security)
            }
            Self::PasswordTooShort { len, min } => {
                write!(f, "password too short: {} bytes (min {})", len, min)
            }
            Self::PasswordTooLong { len, max } => {
                write!(f, "password too long: {} bytes (max {})", len, max)
            }
            Self::UnknownSecurity(raw) => write!(f, "unknown security type: {:?}", raw),
        }
    }
}

impl std::error::Error for ValidationError {}
