/// Maps a pathname to a content type by its trailing extension. Covers the
/// asset formats the content repository actually hosts; anything else is
/// unknown and the asset route answers 404 for it.
pub fn from_path(path: &str) -> Option<&'static str> {
    let (_, extension) = path.rsplit_once('.')?;
    let mime = match extension {
        "gif" => "image/gif",
        "html" => "text/html",
        "jpeg" | "jpg" => "image/jpeg",
        "png" => "image/png",
        "svg" => "image/svg+xml",
        "txt" => "text/plain",
        "webp" => "image/webp",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_extensions() {
        assert_eq!(from_path("posts/x/assets/cover.png"), Some("image/png"));
        assert_eq!(from_path("a/b.jpeg"), Some("image/jpeg"));
        assert_eq!(from_path("diagram.svg"), Some("image/svg+xml"));
    }

    #[test]
    fn rejects_unknown_extensions() {
        assert_eq!(from_path("archive.tar.gz"), None);
        assert_eq!(from_path("no-extension"), None);
    }

    #[test]
    fn dotless_name_matching_an_extension_is_unknown() {
        assert_eq!(from_path("png"), None);
        assert_eq!(from_path("assets/svg"), None);
    }
}
