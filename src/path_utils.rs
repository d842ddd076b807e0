use url::Url;

/// Local-file component of `url`, normalized to the host platform's native
/// path separators. Pure, no I/O; `None` for non-file URLs.
pub(crate) fn convert_url_to_local_path(url: &Url) -> Option<String> {
    let path = url.to_file_path().ok()?;
    Some(to_native_separators(&path.to_string_lossy()))
}

#[cfg(target_os = "windows")]
fn to_native_separators(path: &str) -> String {
    path.replace('/', "\\")
}

#[cfg(not(target_os = "windows"))]
fn to_native_separators(path: &str) -> String {
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::convert_url_to_local_path;
    use url::Url;

    #[test]
    #[cfg(not(target_os = "windows"))]
    fn file_urls_map_to_local_paths() {
        let url = Url::parse("file:///tmp/recordings/call.wav").expect("valid url");
        assert_eq!(
            convert_url_to_local_path(&url).as_deref(),
            Some("/tmp/recordings/call.wav")
        );
    }

    #[test]
    fn non_file_urls_have_no_local_path() {
        let url = Url::parse("https://example.org/call.wav").expect("valid url");
        assert_eq!(convert_url_to_local_path(&url), None);
    }

    #[test]
    #[cfg(not(target_os = "windows"))]
    fn percent_encoded_components_are_decoded() {
        let url = Url::parse("file:///tmp/my%20calls/log.txt").expect("valid url");
        assert_eq!(
            convert_url_to_local_path(&url).as_deref(),
            Some("/tmp/my calls/log.txt")
        );
    }
}
