/// Build a link to an uploaded asset (logo, writing-task image).
///
/// The backend stores uploads as paths relative to its root; absolute URLs
/// are passed through untouched. Returns `None` for an empty path.
pub fn asset_url(base_url: &str, path: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }

    if path.starts_with("http://") || path.starts_with("https://") {
        return Some(path.to_string());
    }

    Some(format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_without_doubling_slashes() {
        assert_eq!(
            asset_url("https://api.example.com/", "/uploads/logo.png").as_deref(),
            Some("https://api.example.com/uploads/logo.png")
        );
        assert_eq!(
            asset_url("https://api.example.com", "uploads/logo.png").as_deref(),
            Some("https://api.example.com/uploads/logo.png")
        );
    }

    #[test]
    fn absolute_urls_pass_through() {
        assert_eq!(
            asset_url("https://api.example.com", "https://cdn.example.com/a.png").as_deref(),
            Some("https://cdn.example.com/a.png")
        );
    }

    #[test]
    fn empty_path_has_no_url() {
        assert_eq!(asset_url("https://api.example.com", "  "), None);
    }
}
