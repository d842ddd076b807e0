use std::{
    fs,
    path::{Path, PathBuf},
};

use tauri::http;

use crate::runtime_paths;

pub(crate) const AVATAR_PROVIDER_ID: &str = "avatar";
pub(crate) const THUMBNAIL_PROVIDER_ID: &str = "thumbnail";

/// Serves `avatar://` and `thumbnail://` requests from the per-user image
/// caches. Requests are confined to the provider's own directory.
pub(crate) fn handle_request(
    provider_id: &str,
    request: &http::Request<Vec<u8>>,
) -> http::Response<Vec<u8>> {
    let Some(root) = runtime_paths::image_provider_root(provider_id) else {
        return response_with(404, None, Vec::new());
    };
    let Some(path) = resolve_request_path(&root, request.uri().path()) else {
        return response_with(404, None, Vec::new());
    };

    match fs::read(&path) {
        Ok(bytes) => response_with(200, Some(content_type_for(&path)), bytes),
        Err(_) => response_with(404, None, Vec::new()),
    }
}

/// Maps a request path onto a file under `root`. Rejects empty paths and
/// anything that could escape the provider directory.
pub(crate) fn resolve_request_path(root: &Path, uri_path: &str) -> Option<PathBuf> {
    let relative = uri_path.trim_start_matches('/');
    if relative.is_empty() || relative.contains('\\') {
        return None;
    }
    if relative
        .split('/')
        .any(|part| part.is_empty() || part == "." || part == "..")
    {
        return None;
    }
    Some(root.join(relative))
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

fn response_with(
    status: u16,
    content_type: Option<&str>,
    body: Vec<u8>,
) -> http::Response<Vec<u8>> {
    let mut builder = http::Response::builder().status(status);
    if let Some(content_type) = content_type {
        builder = builder.header(http::header::CONTENT_TYPE, content_type);
    }
    builder
        .body(body)
        .unwrap_or_else(|_error| http::Response::new(Vec::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_paths_stay_inside_the_provider_root() {
        let root = Path::new("/data/avatars");
        assert_eq!(
            resolve_request_path(root, "/alice.png"),
            Some(PathBuf::from("/data/avatars/alice.png"))
        );
        assert_eq!(
            resolve_request_path(root, "/team/bob.jpg"),
            Some(PathBuf::from("/data/avatars/team/bob.jpg"))
        );
    }

    #[test]
    fn traversal_and_empty_requests_are_rejected() {
        let root = Path::new("/data/avatars");
        assert_eq!(resolve_request_path(root, "/"), None);
        assert_eq!(resolve_request_path(root, "/../secrets"), None);
        assert_eq!(resolve_request_path(root, "/a//b.png"), None);
        assert_eq!(resolve_request_path(root, "/./x.png"), None);
        assert_eq!(resolve_request_path(root, "/a\\b.png"), None);
    }

    #[test]
    fn content_types_follow_the_file_extension() {
        assert_eq!(content_type_for(Path::new("a.png")), "image/png");
        assert_eq!(content_type_for(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("a.svg")), "image/svg+xml");
        assert_eq!(content_type_for(Path::new("a.bin")), "application/octet-stream");
    }
}
