//! MIME type detection utilities.
//!
//! Provides consistent MIME type detection across the serve layer.

#![allow(dead_code)]

/// Common MIME type constants.
pub mod types {
    pub const HTML: &str = "text/html; charset=utf-8";
    pub const PLAIN: &str = "text/plain; charset=utf-8";
    pub const CSS: &str = "text/css; charset=utf-8";
    pub const JAVASCRIPT: &str = "text/javascript; charset=utf-8";
    pub const JSON: &str = "application/json";
    pub const SVG: &str = "image/svg+xml";
    pub const PNG: &str = "image/png";
    pub const ICO: &str = "image/x-icon";
    pub const OCTET_STREAM: &str = "application/octet-stream";
}

/// Guess MIME type from file extension string.
///
/// Returns a full MIME type string suitable for HTTP Content-Type header.
pub fn from_extension(ext: Option<&str>) -> &'static str {
    match ext {
        Some("html" | "htm") => types::HTML,
        Some("css") => types::CSS,
        Some("js" | "mjs" | "jsx") => types::JAVASCRIPT,
        Some("json") => types::JSON,
        Some("svg") => types::SVG,
        Some("png") => types::PNG,
        Some("ico") => types::ICO,
        Some("txt" | "py" | "md") => types::PLAIN,
        _ => types::OCTET_STREAM,
    }
}

/// Guess MIME type from a URL path.
pub fn from_url_path(path: &str) -> &'static str {
    from_extension(path.rsplit('.').next().filter(|e| !e.contains('/')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(from_extension(Some("html")), types::HTML);
        assert_eq!(from_extension(Some("css")), types::CSS);
        assert_eq!(from_extension(Some("js")), types::JAVASCRIPT);
        assert_eq!(from_extension(Some("jsx")), types::JAVASCRIPT);
        assert_eq!(from_extension(Some("py")), types::PLAIN);
        assert_eq!(from_extension(Some("xyz")), types::OCTET_STREAM);
        assert_eq!(from_extension(None), types::OCTET_STREAM);
    }

    #[test]
    fn test_from_url_path() {
        assert_eq!(from_url_path("/assets/editor.css"), types::CSS);
        assert_eq!(from_url_path("/assets/playground.js"), types::JAVASCRIPT);
        assert_eq!(from_url_path("/no-extension"), types::OCTET_STREAM);
    }
}
