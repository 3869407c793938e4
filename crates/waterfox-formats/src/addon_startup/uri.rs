//! `jar:file://` URIs for add-on packages

use url::Url;

/// Render `base` as a `file:///` URL
///
/// Both `/` and `\` separate segments, so Windows and POSIX paths render the
/// same way regardless of the host. Each segment is percent-encoded with the
/// URL path-segment set (spaces become `%20`).
///
/// Returns `None` unless `base` is absolute (`/...`, `\...` or `X:\...`)
/// and free of `.` and `..` segments, which a URL cannot carry faithfully.
pub fn file_url(base: &str) -> Option<Url> {
    if !is_absolute(base) {
        return None;
    }
    let segments: Vec<&str> = base
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .collect();
    if segments.iter().any(|segment| matches!(*segment, "." | "..")) {
        return None;
    }

    let mut url = Url::parse("file:///").ok()?;
    url.path_segments_mut().ok()?.clear().extend(segments);
    Some(url)
}

fn is_absolute(base: &str) -> bool {
    base.starts_with(['/', '\\'])
        || matches!(base.as_bytes(), [drive, b':', b'/' | b'\\', ..] if drive.is_ascii_alphabetic())
}

/// Build the `rootURI` for add-on `addon_id` installed under `base`
///
/// ```
/// use waterfox_formats::addon_startup::jar_root_uri;
///
/// assert_eq!(
///     jar_root_uri(r"D:\Portable Apps\profile\extensions", "my addon").as_deref(),
///     Some("jar:file:///D:/Portable%20Apps/profile/extensions/my%20addon.xpi!/"),
/// );
/// ```
pub fn jar_root_uri(base: &str, addon_id: &str) -> Option<String> {
    let mut url = file_url(base)?;
    url.path_segments_mut().ok()?.push(&format!("{addon_id}.xpi"));
    Some(format!("jar:{url}!/"))
}
