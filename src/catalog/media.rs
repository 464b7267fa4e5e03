//! Asset URL resolution for thumbnails and videos
//!
//! The backend stores a mix of absolute URLs, API-relative paths and bare
//! upload filenames; every display path goes through this one resolver.

/// Placeholder used when a course carries no thumbnail at all
pub const DEFAULT_THUMBNAIL: &str = "/default-course-image.jpg";

/// Resolve a raw asset reference into a fetchable URL.
///
/// - absolute `http(s)` URLs pass through unchanged (after trimming);
/// - paths with a leading `/` are joined onto the API base;
/// - bare filenames are joined onto `asset_base`, falling back to
///   `<api base>/uploads/courses`;
/// - anything else is treated as an API-relative path.
pub fn resolve_asset_url(raw: Option<&str>, api_base: &str, asset_base: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return DEFAULT_THUMBNAIL.to_string();
    };

    if raw.starts_with("http://") || raw.starts_with("https://") {
        return raw.to_string();
    }

    let api_base = api_base.trim_end_matches('/');

    if let Some(path) = raw.strip_prefix('/') {
        return format!("{}/{}", api_base, path);
    }

    if !raw.contains('/') {
        return match asset_base {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), raw),
            None => format!("{}/uploads/courses/{}", api_base, raw),
        };
    }

    format!("{}/{}", api_base, raw)
}
