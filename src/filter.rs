//! Same-location filtering: decides which observed URLs are siblings of the
//! rendered page, as opposed to unrelated traffic (analytics, CDNs, fonts).

use std::collections::BTreeSet;

use url::Url;

/// True when `candidate` shares host, port and path-directory with `origin`.
///
/// Scheme, query and fragment are ignored. Host case and default ports are
/// normalized by the URL parser on both sides, so `https://Host:443/a/x`
/// and `http://host/a/y` compare as the same location.
pub fn same_location(origin: &Url, candidate: &Url) -> bool {
    origin.host_str() == candidate.host_str()
        && origin.port() == candidate.port()
        && path_directory(origin.path()) == path_directory(candidate.path())
}

/// Keep the candidates that live next to `origin`. Candidates that do not
/// parse as absolute URLs are dropped; an unparseable origin keeps nothing.
pub fn filter_same_location(origin: &str, candidates: &BTreeSet<String>) -> BTreeSet<String> {
    let origin = match Url::parse(origin) {
        Ok(parsed) => parsed,
        Err(_) => return BTreeSet::new(),
    };
    candidates
        .iter()
        .filter(|candidate| {
            matches!(Url::parse(candidate), Ok(parsed) if same_location(&origin, &parsed))
        })
        .cloned()
        .collect()
}

/// Path with its final segment stripped: `/ahc020/db.html` -> `/ahc020`,
/// `/db.html` -> `/`, `db.html` -> ``.
fn path_directory(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(i) => &path[..i],
        None => "",
    }
}
