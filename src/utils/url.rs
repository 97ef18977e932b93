// src/utils/url.rs

//! URL manipulation utilities.
//!
//! A match is identified by its detail-page URL with the tab suffix
//! stripped; every tab document of the same match must canonicalize to the
//! same identifier.

/// Tab suffixes that diverge from one base match URL.
const TAB_SUFFIXES: [&str; 4] = ["/live", "/info", "/scorecard", "/squads"];

/// Canonicalize a match URL by stripping one trailing tab suffix.
///
/// # Examples
/// ```
/// use crickwatch::utils::canonical_match_id;
///
/// assert_eq!(canonical_match_id("https://x/e1/live"), "https://x/e1");
/// assert_eq!(canonical_match_id("https://x/e1"), "https://x/e1");
/// ```
pub fn canonical_match_id(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    for suffix in TAB_SUFFIXES {
        if let Some(base) = trimmed.strip_suffix(suffix) {
            return base.to_string();
        }
    }
    trimmed.to_string()
}

/// Build the URL of a specific tab for a canonical match identifier.
pub fn tab_url(match_id: &str, tab: &str) -> String {
    format!("{}/{}", match_id.trim_end_matches('/'), tab)
}

/// Resolve a potentially relative href against a base URL.
pub fn resolve(base: &str, href: &str) -> String {
    // Already absolute
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }

    // Absolute path - combine with base domain
    if href.starts_with('/') {
        if let Some(scheme_end) = base.find("://") {
            let after_scheme = &base[scheme_end + 3..];
            if let Some(slash_idx) = after_scheme.find('/') {
                let domain = &base[..scheme_end + 3 + slash_idx];
                return format!("{domain}{href}");
            }
        }
        return format!("{}{}", base.trim_end_matches('/'), href);
    }

    // Relative path - combine with base directory
    let base_dir = if base.ends_with('/') {
        base.to_string()
    } else {
        match base.rfind('/') {
            Some(idx) => base[..=idx].to_string(),
            None => format!("{base}/"),
        }
    };
    format!("{base_dir}{href}")
}
