//! MIME type detection module
//!
//! Maps file extensions to the Content-Type sent for static files.

/// Get the Content-Type for a file extension
///
/// Unrecognized and missing extensions fall back to
/// `application/octet-stream`.
pub fn from_extension(extension: Option<&str>) -> &'static str {
    match extension {
        // Text
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("txt") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",

        // JavaScript/WASM
        Some("js" | "mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("wasm") => "application/wasm",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",

        // Audio/Video
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",
        Some("eot") => "application/vnd.ms-fontobject",

        // Default
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_types() {
        assert_eq!(from_extension(Some("html")), "text/html; charset=utf-8");
        assert_eq!(from_extension(Some("css")), "text/css");
        assert_eq!(from_extension(Some("js")), "application/javascript");
        assert_eq!(from_extension(Some("json")), "application/json");
        assert_eq!(from_extension(Some("png")), "image/png");
        assert_eq!(from_extension(Some("mp4")), "video/mp4");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(from_extension(Some("xyz")), "application/octet-stream");
        assert_eq!(from_extension(None), "application/octet-stream");
    }

    #[test]
    fn test_expects_lowercase() {
        // Callers lowercase the extension before lookup
        assert_eq!(from_extension(Some("HTML")), "application/octet-stream");
        assert_eq!(from_extension(Some("html")), "text/html; charset=utf-8");
    }
}
