//! Mapping from public image URLs to storage resource identifiers.
//!
//! Stored image URLs look like
//! `https://cdn.example.com/media/listings/3f2a…d1.jpg`. The store addresses
//! objects by the path suffix starting at the `listings` root segment with
//! the file extension stripped: `listings/3f2a…d1`. Both the per-listing
//! delete and the cascading account delete go through this one function, so
//! a change in URL shape only has to be handled here.

/// The known root segment under which all listing images are stored.
pub const MEDIA_ROOT_SEGMENT: &str = "listings";

/// Derive the storage resource identifier from a public image URL.
///
/// Returns `None` when the URL does not contain the media root segment;
/// callers skip such URLs rather than failing the whole delete.
pub fn resource_id_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let root_idx = segments.iter().position(|s| *s == MEDIA_ROOT_SEGMENT)?;

    let mut suffix: Vec<&str> = segments[root_idx..].to_vec();
    let last = suffix.pop()?;
    let stem = match last.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => last,
    };
    suffix.push(stem);

    Some(suffix.join("/"))
}
