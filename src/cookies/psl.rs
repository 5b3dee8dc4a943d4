//! Public Suffix List (PSL) validation for cookie domain security.
//!
//! Prevents supercookie attacks by rejecting cookies set on public
//! suffixes like `.com`, `.co.uk`, etc.

use crate::base::neterror::NetError;
use psl::{List, Psl};

/// Check if a domain is a public suffix (e.g., "com", "co.uk").
pub fn is_public_suffix(domain: &str) -> bool {
    let domain_lower = domain.to_ascii_lowercase();
    let domain_bytes = domain_lower.as_bytes();

    List.suffix(domain_bytes)
        .is_some_and(|suffix| suffix.as_bytes() == domain_bytes)
}

/// Validate the `Domain` attribute of a cookie received from `request_host`.
///
/// Returns the normalized (lowercase, no leading dot) domain on success.
pub fn check_cookie_domain(cookie_domain: &str, request_host: &str) -> Result<String, NetError> {
    let domain = cookie_domain
        .strip_prefix('.')
        .unwrap_or(cookie_domain)
        .to_ascii_lowercase();
    let host = request_host.to_ascii_lowercase();

    if domain.is_empty() {
        return Err(NetError::CookiePublicSuffix);
    }

    // A host may always name itself.
    if domain == host {
        return Ok(domain);
    }

    if is_public_suffix(&domain) {
        return Err(NetError::CookiePublicSuffix);
    }

    if host.ends_with(&format!(".{}", domain)) {
        Ok(domain)
    } else {
        Err(NetError::CookiePublicSuffix)
    }
}
