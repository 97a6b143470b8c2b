//! Local filename derivation from a resolved artifact URL.

/// Last path segment of `url`, percent-decoded, for use as the on-disk name.
///
/// Returns `None` if the URL cannot be parsed or its path ends without a name
/// (root, trailing slash, `.` or `..`). A segment that decodes to invalid
/// UTF-8 or to something containing a path separator is kept encoded.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.last()?;
    let name = match urlencoding::decode(segment) {
        Ok(decoded) if !decoded.contains(['/', '\\']) => decoded.into_owned(),
        _ => segment.to_string(),
    };
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    Some(name)
}
