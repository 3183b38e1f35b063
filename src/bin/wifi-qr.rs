//! Command-line front end for the Wi-Fi QR codec.
//!
//! Usage:
//!   WIFI_SSID="MyNetwork" WIFI_PASSWORD="secret" wifi-qr encode
//!   wifi-qr decode 'WIFI:S:MyNetwork;T:WPA;P:secret;H:false;;'
//!   wifi-qr check '<scanned text>'
//!
//! `encode` reads its credential from the environment; see the `config`
//! module for the full list of variables. Set `WIFI_QR_FORMAT=unicode` to
//! print a scannable code in the terminal.

use log::{error, info};
use std::process::ExitCode;
use wifi_qr::{decode, is_wifi_payload, EncodeConfig, OutputFormat};

const USAGE: &str = "\
Usage:
  WIFI_SSID=\"MyNetwork\" WIFI_PASSWORD=\"secret\" wifi-qr encode
  wifi-qr decode <payload>
  wifi-qr check <payload>

Environment for encode:
  WIFI_SSID       network name (required)
  WIFI_PASSWORD   passphrase (empty for open networks)
  WIFI_SECURITY   WPA, WEP or nopass
  WIFI_HIDDEN     true or false
  WIFI_QR_FORMAT  text, unicode or svg";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [command] if command == "encode" => run_encode(),
        [command, payload] if command == "decode" => run_decode(payload),
        [command, payload] if command == "check" => run_check(payload),
        _ => {
            eprintln!("{}", USAGE);
            ExitCode::from(2)
        }
    }
}

fn run_encode() -> ExitCode {
    let config = match EncodeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let credential = &config.credential;
    info!(
        "Encoding network {:?} ({}, password {}, hidden: {})",
        credential.ssid,
        credential.security,
        if credential.password.is_empty() {
            "(none)"
        } else {
            "****"
        },
        credential.hidden
    );

    let payload = match credential.to_payload() {
        Ok(payload) => payload,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match render(&payload, config.format) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(feature = "render")]
fn render(payload: &str, format: OutputFormat) -> Result<String, wifi_qr::RenderError> {
    match format {
        OutputFormat::Text => Ok(payload.to_string()),
        OutputFormat::Unicode => wifi_qr::render_unicode(payload),
        OutputFormat::Svg => wifi_qr::render_svg(payload),
    }
}

#[cfg(not(feature = "render"))]
fn render(payload: &str, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Text => Ok(payload.to_string()),
        _ => Err("QR rendering requires the 'render' feature".to_string()),
    }
}

fn run_decode(payload: &str) -> ExitCode {
    let credential = match decode(payload) {
        Ok(credential) => credential,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if credential.security.known().is_none() {
        info!("Unrecognized security type {:?}", credential.security.as_token());
    }

    match serde_json::to_string_pretty(&credential) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to serialize credential: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_check(payload: &str) -> ExitCode {
    if is_wifi_payload(payload) {
        println!("wifi");
        ExitCode::SUCCESS
    } else {
        println!("not wifi");
        ExitCode::FAILURE
    }
}
