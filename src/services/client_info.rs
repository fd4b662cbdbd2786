//! User-Agent classification
//!
//! Pure family-level classification of a raw User-Agent header using
//! woothee: device category, OS family, browser family. Versions are
//! deliberately not exposed.

use woothee::parser::Parser;

/// Family-level classification of a requesting client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    pub device_type: Option<String>,
    pub os: Option<String>,
    pub browser: Option<String>,
}

/// Everything the tracking handlers capture about the requesting client
#[derive(Debug, Clone, Default)]
pub struct ClientReport {
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub info: ClientInfo,
}

/// Classify a raw User-Agent header string
///
/// Unrecognized or empty input yields an all-None classification rather
/// than failing; woothee's UNKNOWN sentinels map to None.
pub fn classify(ua_string: &str) -> ClientInfo {
    if ua_string.is_empty() {
        return ClientInfo::default();
    }

    let parser = Parser::new();
    let result = parser.parse(ua_string).unwrap_or_default();

    ClientInfo {
        device_type: if result.category != "UNKNOWN" && !result.category.is_empty() {
            Some(result.category.to_string())
        } else {
            None
        },
        os: if result.os != "UNKNOWN" && !result.os.is_empty() {
            Some(result.os.to_string())
        } else {
            None
        },
        browser: if result.name != "UNKNOWN" && !result.name.is_empty() {
            Some(result.name.to_string())
        } else {
            None
        },
    }
}
