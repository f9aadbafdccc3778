//! Converting between stored URLs and host-relative paths.

use url::Url;

/// Hosts whose URLs are always treated as our own.
const LOCAL_HOSTS: &[&str] = &["127.0.0.1", "localhost"];

/// Strip scheme and host from `full` when it points at `base_url`'s host or
/// at a local host, keeping path, query, and fragment. Relative inputs,
/// unparseable URLs, and foreign hosts are returned unchanged.
pub fn strip_domain(base_url: &str, full: &str) -> String {
    if !(full.starts_with("http://") || full.starts_with("https://")) {
        return full.to_string();
    }
    let Ok(parsed) = Url::parse(full) else {
        return full.to_string();
    };
    let Some(host) = parsed.host_str() else {
        return full.to_string();
    };

    let ours = base_host(base_url).map_or(false, |b| b.eq_ignore_ascii_case(host));
    if !(ours || LOCAL_HOSTS.contains(&host)) {
        return full.to_string();
    }

    let mut out = parsed.path().to_string();
    if let Some(q) = parsed.query() {
        out.push('?');
        out.push_str(q);
    }
    if let Some(f) = parsed.fragment() {
        out.push('#');
        out.push_str(f);
    }
    out
}

/// Prefix a host-relative path with `base_url`. Absolute URLs and empty
/// paths are returned unchanged.
pub fn with_domain(base_url: &str, path: &str) -> String {
    if path.is_empty() || path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

fn base_host(base_url: &str) -> Option<String> {
    Url::parse(base_url).ok()?.host_str().map(str::to_string)
}
