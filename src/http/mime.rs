use std::path::Path;

/// Content-Type for static files, from a deliberately minimal extension
/// table: HTML is served as such, everything else as an opaque download.
pub fn from_path(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_maps_to_text_html() {
        assert_eq!(from_path(Path::new("static/index.html")), "text/html");
    }

    #[test]
    fn everything_else_is_octet_stream() {
        assert_eq!(from_path(Path::new("static/stars.js")), "application/octet-stream");
        assert_eq!(from_path(Path::new("static/noext")), "application/octet-stream");
    }
}
