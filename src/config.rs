//! Environment-driven configuration for building a payload.
//!
//! The `wifi-qr encode` command takes its credential from the environment
//! rather than the command line, so passwords stay out of shell history and
//! process listings.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `WIFI_SSID` | network name | required |
//! | `WIFI_PASSWORD` | passphrase | empty |
//! | `WIFI_SECURITY` | `WPA`, `WEP` or `nopass` (any case) | `WPA` with a password, `nopass` without |
//! | `WIFI_HIDDEN` | `true`/`false`/`1`/`0`/`yes`/`no` | `false` |
//! | `WIFI_QR_FORMAT` | `text`, `unicode` or `svg` | `text` |
//!
//! ```
//! use wifi_qr::config::{EncodeConfig, OutputFormat};
//!
//! let config = EncodeConfig::from_lookup(|name| match name {
//!     "WIFI_SSID" => Some("Office".to_string()),
//!     "WIFI_PASSWORD" => Some("correct horse".to_string()),
//!     _ => None,
//! })
//! .unwrap();
//! assert_eq!(config.format, OutputFormat::Text);
//! assert_eq!(
//!     config.credential.to_payload().unwrap(),
//!     "WIFI:S:Office;T:WPA;P:correct horse;H:false;;"
//! );
//! ```

use crate::credential::{Security, ValidationError, WifiCredential};
use std::fmt;
use zeroize::Zeroize;

/// Network name variable.
pub const SSID_VAR: &str = "WIFI_SSID";
/// Passphrase variable.
pub const PASSWORD_VAR: &str = "WIFI_PASSWORD";
/// Security scheme variable.
pub const SECURITY_VAR: &str = "WIFI_SECURITY";
/// Hidden-network flag variable.
pub const HIDDEN_VAR: &str = "WIFI_HIDDEN";
/// Output format variable.
pub const FORMAT_VAR: &str = "WIFI_QR_FORMAT";

/// How `wifi-qr encode` prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The payload text itself.
    #[default]
    Text,
    /// A QR symbol drawn with Unicode block characters.
    Unicode,
    /// A QR symbol as an SVG document.
    Svg,
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "unicode" => Ok(Self::Unicode),
            "svg" => Ok(Self::Svg),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

/// Everything needed to produce one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeConfig {
    /// Validated credential to encode.
    pub credential: WifiCredential,
    /// How to print the payload.
    pub format: OutputFormat,
}

impl EncodeConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ssid = lookup(SSID_VAR)
            .filter(|ssid| !ssid.is_empty())
            .ok_or(ConfigError::MissingVar(SSID_VAR))?;
        let mut password = lookup(PASSWORD_VAR).unwrap_or_default();

        let security = match lookup(SECURITY_VAR) {
            Some(value) => parse_security(&value)?,
            None if password.is_empty() => Security::Open,
            None => Security::Wpa,
        };

        let hidden = match lookup(HIDDEN_VAR) {
            Some(value) => parse_bool(&value).ok_or(ConfigError::InvalidHidden(value))?,
            None => false,
        };

        let format = match lookup(FORMAT_VAR) {
            Some(value) => value.parse()?,
            None => OutputFormat::default(),
        };

        let credential = WifiCredential::new(ssid, password.as_str(), security);
        password.zeroize();

        Ok(Self {
            credential: credential?.with_hidden(hidden),
            format,
        })
    }
}

fn parse_security(value: &str) -> Result<Security, ConfigError> {
    match value.trim().to_uppercase().as_str() {
        "WPA" | "WPA2" => Ok(Security::Wpa),
        "WEP" => Ok(Security::Wep),
        "NOPASS" | "OPEN" | "NONE" => Ok(Security::Open),
        _ => Err(ConfigError::InvalidSecurity(value.to_string())),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}

/// Errors that can occur while reading the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    MissingVar(&'static str),
    /// `WIFI_SECURITY` is not a known scheme.
    InvalidSecurity(String),
    /// `WIFI_HIDDEN` is not a boolean.
    InvalidHidden(String),
    /// `WIFI_QR_FORMAT` is not a known format.
    InvalidFormat(String),
    /// The credential itself is unusable.
    Invalid(ValidationError),
}

impl From<ValidationError> for ConfigError {
    fn from(err: ValidationError) -> Self {
        Self::Invalid(err)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVar(name) => write!(f, "{} is not set", name),
            Self::InvalidSecurity(value) => {
                write!(f, "invalid {}: {:?} (expected WPA, WEP or nopass)", SECURITY_VAR, value)
            }
            Self::InvalidHidden(value) => {
                write!(f, "invalid {}: {:?} (expected true or false)", HIDDEN_VAR, value)
            }
            Self::InvalidFormat(value) => {
                write!(f, "invalid {}: {:?} (expected text, unicode or svg)", FORMAT_VAR, value)
            }
            Self::Invalid(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            _ => None,
        }
    }
}
