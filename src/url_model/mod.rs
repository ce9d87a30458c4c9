//! URL modeling and filename inference.
//!
//! Derives a local filename from the URL path; URLs whose last segment does
//! not look like a filename (no extension) get a synthesized per-index name.

mod path;

pub use path::filename_from_url_path;

/// Infers the local filename for the `index`-th URL of a batch (0-based).
///
/// Uses the last non-empty path segment verbatim when it contains a `.`;
/// otherwise (including malformed URLs and root paths) synthesizes
/// `download-{index+1}.jpg`.
///
/// # Examples
///
/// - `infer_filename("https://a/b/c.png", 0)` → `"c.png"`
/// - `infer_filename("https://a/b/", 2)` → `"download-3.jpg"`
pub fn infer_filename(url: &str, index: usize) -> String {
    match filename_from_url_path(url) {
        Some(name) if name.contains('.') => name,
        _ => format!("download-{}.jpg", index + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_filename_from_url_path() {
        assert_eq!(infer_filename("https://a/b/c.png", 0), "c.png");
        assert_eq!(
            infer_filename("https://cdn.example.com/img/photo.jpeg?w=640", 5),
            "photo.jpeg"
        );
    }

    #[test]
    fn infer_filename_no_extension_synthesized() {
        assert_eq!(infer_filename("https://a/b/", 2), "download-3.jpg");
        assert_eq!(infer_filename("https://example.com/gallery", 0), "download-1.jpg");
    }

    #[test]
    fn infer_filename_malformed_url_synthesized() {
        assert_eq!(infer_filename("not a url", 0), "download-1.jpg");
        assert_eq!(infer_filename("", 9), "download-10.jpg");
    }
}
