//! Wi-Fi QR payload codec.
//!
//! Converts between [`WifiCredential`] and the text carried by Wi-Fi QR
//! codes, as understood by Android, iOS and most third-party scanners:
//!
//! ```text
//! WIFI:S:<ssid>;T:<WPA|WEP|nopass>;P:<password>;H:<true|false>;;
//! ```
//!
//! Encoding always emits the fields in the order above. Decoding accepts
//! them in any order, ignores fields it does not know, and lets the last
//! occurrence of a duplicated field win.
//!
//! # Example
//!
//! ```
//! use wifi_qr::codec::{decode, encode, is_wifi_payload};
//! use wifi_qr::Security;
//!
//! let payload = encode("Home;Net", "s3cret:pass", Security::Wpa, false);
//! assert_eq!(payload, "WIFI:S:Home\\;Net;T:WPA;P:s3cret\\:pass;H:false;;");
//! assert!(is_wifi_payload(&payload));
//!
//! let credential = decode(&payload).unwrap();
//! assert_eq!(credential.ssid, "Home;Net");
//! assert_eq!(credential.password, "s3cret:pass");
//! ```

pub mod escape;

use crate::credential::{Security, SecurityToken, WifiCredential};
use escape::{FIELD_SEPARATOR, KEY_SEPARATOR};
use log::{debug, trace};
use std::fmt;

/// Prefix every Wi-Fi payload starts with.
pub const PREFIX: &str = "WIFI:";

/// Marks the end of the field list.
pub const TERMINATOR: &str = ";;";

/// Quick check whether `text` looks like a Wi-Fi payload.
///
/// Only a pre-filter: a payload accepted here can still fail [`decode`].
pub fn is_wifi_payload(text: &str) -> bool {
    text.strip_prefix(PREFIX)
        .is_some_and(|rest| rest.contains("S:"))
}

/// Build a payload from its parts.
///
/// The password of an open network is not written.
pub fn encode(ssid: &str, password: &str, security: Security, hidden: bool) -> String {
    let password = if security.requires_password() {
        escape::escape(password)
    } else {
        String::new()
    };
    format!(
        "{}S:{};T:{};P:{};H:{}{}",
        PREFIX,
        escape::escape(ssid),
        security.as_token(),
        password,
        hidden,
        TERMINATOR
    )
}

/// Parse a payload into a credential.
///
/// The body ends at the last `;;` that is not part of an escape, so
/// `WIFI:S:a\;;` has no terminator and decodes to the SSID `a;` rather than
/// `a\`.
///
/// Without a `T:` field the network is treated as open, and open networks
/// never carry a password.
pub fn decode(text: &str) -> Result<WifiCredential, CodecError> {
    let content = text.strip_prefix(PREFIX).ok_or_else(|| {
        trace!("Payload rejected: missing {} prefix", PREFIX);
        CodecError::NotWifiPayload
    })?;

    let body = match escape::find_terminator(content) {
        Some(end) => &content[..end],
        None => {
            debug!("Payload has no terminator, reading to end of text");
            content
        }
    };

    let mut ssid: Option<&str> = None;
    let mut password: Option<&str> = None;
    let mut security: Option<&str> = None;
    let mut hidden = false;

    for field in escape::split_unescaped(body, FIELD_SEPARATOR) {
        let Some((key, value)) = escape::split_once_unescaped(field, KEY_SEPARATOR) else {
            continue;
        };
        match key {
            "S" => ssid = Some(value),
            "P" => password = Some(value),
            "T" => security = Some(value),
            "H" => hidden = value == "true",
            _ => trace!("Ignoring unknown field {:?}", key),
        }
    }

    let ssid = ssid.map(escape::unescape).unwrap_or_default();
    if ssid.is_empty() {
        debug!("Payload rejected: {}", CodecError::MissingSsid);
        return Err(CodecError::MissingSsid);
    }

    let security = security.map(SecurityToken::from_token).unwrap_or_default();
    if let SecurityToken::Unknown(raw) = &security {
        debug!("Keeping unrecognized security type {:?}", raw);
    }

    let password = match password {
        Some(value) if !security.is_open() => escape::unescape(value),
        _ => String::new(),
    };

    Ok(WifiCredential {
        ssid,
        password,
        security,
        hidden,
    })
}

impl WifiCredential {
    /// Encode this credential as a payload.
    ///
    /// Fails for credentials carrying a security type this crate does not
    /// know how to write.
    pub fn to_payload(&self) -> Result<String, CodecError> {
        match &self.security {
            SecurityToken::Known(security) => Ok(encode(
                &self.ssid,
                &self.password,
                *security,
                self.hidden,
            )),
            SecurityToken::Unknown(raw) => Err(CodecError::UnencodableSecurity(raw.clone())),
        }
    }
}

impl std::str::FromStr for WifiCredential {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

/// Errors produced by the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Text does not start with `WIFI:`.
    NotWifiPayload,
    /// No `S:` field, or an empty one.
    MissingSsid,
    /// Security type has no wire token this crate can emit.
    UnencodableSecurity(String),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotWifiPayload => write!(f, "not a Wi-Fi QR payload"),
            Self::MissingSsid => write!(f, "missing or empty SSID"),
            Self::UnencodableSecurity(raw) => {
                write!(f, "cannot encode security type {:?}", raw)
            }
        }
    }
}

impl std::error::Error for CodecError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential(ssid: &str, password: &str, security: Security, hidden: bool) -> WifiCredential {
        WifiCredential {
            ssid: ssid.to_string(),
            password: password.to_string(),
            security: security.into(),
            hidden,
        }
    }

    // ==================== Classification Tests ====================

    #[test]
    fn test_is_wifi_payload() {
        assert!(is_wifi_payload("WIFI:S:Home;;"));
        assert!(is_wifi_payload("WIFI:T:WPA;S:Home;;"));
        // Accepted here, rejected by decode.
        assert!(is_wifi_payload("WIFI:S:;;"));
    }

    #[test]
    fn test_is_not_wifi_payload() {
        assert!(!is_wifi_payload("HELLO"));
        assert!(!is_wifi_payload("wifi:S:Home;;"));
        assert!(!is_wifi_payload("WIFI:T:WPA;;"));
        assert!(!is_wifi_payload("S:Home WIFI:"));
        assert!(!is_wifi_payload(""));
    }

    #[test]
    fn test_is_wifi_payload_deterministic() {
        let input = "WIFI:S:Home;T:WPA;;";
        let first = is_wifi_payload(input);
        for _ in 0..3 {
            assert_eq!(is_wifi_payload(input), first);
        }
    }

    // ==================== Encode Tests ====================

    #[test]
    fn test_encode_field_order() {
        assert_eq!(
            encode("MyHome", "secret123", Security::Wpa, false),
            "WIFI:S:MyHome;T:WPA;P:secret123;H:false;;"
        );
        assert_eq!(
            encode("Office", "abc", Security::Wep, true),
            "WIFI:S:Office;T:WEP;P:abc;H:true;;"
        );
    }

    #[test]
    fn test_encode_open_drops_password() {
        assert_eq!(
            encode("Cafe", "leaked", Security::Open, false),
            "WIFI:S:Cafe;T:nopass;P:;H:false;;"
        );
    }

    #[test]
    fn test_encode_escapes_values() {
        assert_eq!(
            encode("Home;Net", "p:a,ss\"w\\rd", Security::Wpa, false),
            "WIFI:S:Home\\;Net;T:WPA;P:p\\:a\\,ss\\\"w\\\\rd;H:false;;"
        );
    }

    #[test]
    fn test_to_payload_unknown_security() {
        let credential = WifiCredential {
            ssid: "Net".to_string(),
            password: "x".to_string(),
            security: SecurityToken::from_token("SAE"),
            hidden: false,
        };
        assert_eq!(
            credential.to_payload(),
            Err(CodecError::UnencodableSecurity("SAE".to_string()))
        );
    }

    // ==================== Decode Tests ====================

    #[test]
    fn test_decode_basic() {
        let decoded = decode("WIFI:S:MyHome;T:WPA;P:secret123;H:false;;").unwrap();
        assert_eq!(decoded, credential("MyHome", "secret123", Security::Wpa, false));
    }

    #[test]
    fn test_decode_hidden() {
        let decoded = decode("WIFI:S:Office;T:WEP;P:abc;H:true;;").unwrap();
        assert!(decoded.hidden);
        assert_eq!(decoded.security, SecurityToken::Known(Security::Wep));
    }

    #[test]
    fn test_decode_hidden_is_exact_literal() {
        assert!(!decode("WIFI:S:a;H:TRUE;;").unwrap().hidden);
        assert!(!decode("WIFI:S:a;H:1;;").unwrap().hidden);
        assert!(!decode("WIFI:S:a;H:;;").unwrap().hidden);
    }

    #[test]
    fn test_decode_rejects() {
        assert_eq!(decode("HELLO"), Err(CodecError::NotWifiPayload));
        assert_eq!(decode("WIFI:T:WPA;;"), Err(CodecError::MissingSsid));
        assert_eq!(decode("WIFI:S:;;"), Err(CodecError::MissingSsid));
        assert_eq!(decode(""), Err(CodecError::NotWifiPayload));
        assert_eq!(decode("WIFI:"), Err(CodecError::MissingSsid));
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let decoded = decode("WIFI:S:X;T:WPA;P:y;H:false;A:ignored;;").unwrap();
        assert_eq!(decoded, credential("X", "y", Security::Wpa, false));
    }

    #[test]
    fn test_decode_ignores_multi_char_keys_and_bare_segments() {
        let decoded = decode("WIFI:SS:wrong;garbage;S:right;T:WPA;P:pw;;").unwrap();
        assert_eq!(decoded.ssid, "right");
    }

    #[test]
    fn test_decode_any_field_order() {
        let decoded = decode("WIFI:T:WPA;P:pw;H:true;S:Net;;").unwrap();
        assert_eq!(decoded, credential("Net", "pw", Security::Wpa, true));
    }

    #[test]
    fn test_decode_last_duplicate_wins() {
        let decoded = decode("WIFI:S:first;S:second;T:WEP;T:WPA;P:a;P:b;;").unwrap();
        assert_eq!(decoded, credential("second", "b", Security::Wpa, false));

        assert_eq!(decode("WIFI:S:Home;S:;;"), Err(CodecError::MissingSsid));
    }

    #[test]
    fn test_decode_defaults() {
        let decoded = decode("WIFI:S:Lobby;;").unwrap();
        assert_eq!(decoded, credential("Lobby", "", Security::Open, false));

        let decoded = decode("WIFI:S:Lab;T:WPA;;").unwrap();
        assert_eq!(decoded.password, "");
    }

    #[test]
    fn test_decode_open_ignores_password() {
        let decoded = decode("WIFI:S:Cafe;T:nopass;P:stray;;").unwrap();
        assert!(decoded.is_open());
        assert_eq!(decoded.password, "");

        let decoded = decode("WIFI:S:Cafe;P:stray;;").unwrap();
        assert_eq!(decoded.password, "");
    }

    #[test]
    fn test_decode_unknown_security_preserved() {
        let decoded = decode("WIFI:S:Net;T:SAE;P:pw;;").unwrap();
        assert_eq!(decoded.security, SecurityToken::Unknown("SAE".to_string()));
        assert_eq!(decoded.password, "pw");

        let decoded = decode("WIFI:S:Net;T:wpa;P:pw;;").unwrap();
        assert_eq!(decoded.security, SecurityToken::Unknown("wpa".to_string()));
    }

    #[test]
    fn test_decode_without_terminator() {
        let decoded = decode("WIFI:S:Home;T:WPA;P:pw").unwrap();
        assert_eq!(decoded, credential("Home", "pw", Security::Wpa, false));
    }

    #[test]
    fn test_decode_discards_text_after_terminator() {
        let decoded = decode("WIFI:S:Home;T:WPA;P:pw;;trailing").unwrap();
        assert_eq!(decoded.password, "pw");
    }

    #[test]
    fn test_decode_escaped_semicolon_is_not_terminator() {
        let decoded = decode("WIFI:S:a\\;;").unwrap();
        assert_eq!(decoded.ssid, "a;");
        assert!(decoded.is_open());

        let decoded = decode("WIFI:S:a\\\\;;").unwrap();
        assert_eq!(decoded.ssid, "a\\");
    }

    #[test]
    fn test_decode_escaped_separators() {
        let decoded = decode("WIFI:S:Home\\;Net\\:5G;T:WPA;P:a\\,b\\\"c;;").unwrap();
        assert_eq!(decoded.ssid, "Home;Net:5G");
        assert_eq!(decoded.password, "a,b\"c");
    }

    #[test]
    fn test_decode_backslash_before_separator() {
        // Password is `pass\`, followed by a real field separator.
        let decoded = decode("WIFI:S:Home;T:WPA;P:pass\\\\;H:true;;").unwrap();
        assert_eq!(decoded.password, "pass\\");
        assert!(decoded.hidden);
    }

    #[test]
    fn test_decode_value_containing_raw_colon() {
        let decoded = decode("WIFI:S:a:b;T:WPA;P:x:y;;").unwrap();
        assert_eq!(decoded.ssid, "a:b");
        assert_eq!(decoded.password, "x:y");
    }

    #[test]
    fn test_decode_unicode() {
        let decoded = decode("WIFI:S:Caf\u{e9} \u{1f4f6};T:WPA;P:\u{5bc6}\u{7801};;").unwrap();
        assert_eq!(decoded.ssid, "Caf\u{e9} \u{1f4f6}");
        assert_eq!(decoded.password, "\u{5bc6}\u{7801}");
    }

    #[test]
    fn test_from_str() {
        let decoded: WifiCredential = "WIFI:S:Home;T:WEP;P:key;;".parse().unwrap();
        assert_eq!(decoded.ssid, "Home");
        assert!("nope".parse::<WifiCredential>().is_err());
    }

    // ==================== Round-trip Tests ====================

    #[test]
    fn test_round_trip_reserved_characters() {
        let samples = [
            "plain",
            "Home;Net",
            "p:a,ss\"w\\rd",
            "\\",
            "\\;",
            ";;",
            "end\\",
            "\\\\:,,\"\"",
            "WIFI:S:nested;;",
            "Caf\u{e9} \u{1f4f6}",
        ];
        let securities = [Security::Wpa, Security::Wep, Security::Open];

        for ssid in samples {
            for password in samples {
                for security in securities {
                    for hidden in [false, true] {
                        let payload = encode(ssid, password, security, hidden);
                        let decoded = decode(&payload).unwrap();
                        let expected_password = if security == Security::Open {
                            ""
                        } else {
                            password
                        };
                        assert_eq!(
                            decoded,
                            credential(ssid, expected_password, security, hidden),
                            "payload {:?}",
                            payload
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_round_trip_escaping_scenario() {
        let payload = encode("Home;Net", "p:a,ss\"w\\rd", Security::Wpa, false);
        let decoded = decode(&payload).unwrap();
        assert_eq!(decoded.ssid, "Home;Net");
        assert_eq!(decoded.password, "p:a,ss\"w\\rd");
    }

    #[test]
    fn test_round_trip_via_credential() {
        let original = WifiCredential::new("Guest", "welcome2024", Security::Wpa)
            .unwrap()
            .with_hidden(true);
        let payload = original.to_payload().unwrap();
        assert_eq!(payload.parse::<WifiCredential>().unwrap(), original);
    }

    #[test]
    fn test_encode_empty_ssid_fails_own_decode() {
        let payload = encode("", "pw", Security::Wpa, false);
        assert_eq!(decode(&payload), Err(CodecError::MissingSsid));
    }
}
