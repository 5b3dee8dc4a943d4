use crate::cookies::canonicalcookie::CanonicalCookie;
use crate::cookies::store::CookieStore;
use crate::http::request::Request;
use crate::http::response::Response;
use dashmap::DashMap;
use http::header::{HeaderValue, COOKIE};
use std::sync::Arc;
use time::OffsetDateTime;
use url::Url;

/// Maximum cookies per domain (Chromium default).
const MAX_COOKIES_PER_DOMAIN: usize = 50;

/// Maximum total cookies.
const MAX_COOKIES_TOTAL: usize = 3000;

/// The default in-memory cookie jar.
/// Modeled after Chromium's `net::CookieMonster`.
#[derive(Clone, Default)]
pub struct CookieMonster {
    // Domain -> cookies stored under that domain.
    store: Arc<DashMap<String, Vec<CanonicalCookie>>>,
}

impl CookieMonster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a cookie. An already-expired cookie only deletes
    /// its stored equivalent.
    pub fn set_canonical_cookie(&self, cookie: CanonicalCookie) {
        let now = OffsetDateTime::now_utc();
        let mut entry = self.store.entry(cookie.domain.clone()).or_default();

        entry.retain(|c| !c.is_equivalent(&cookie));
        if cookie.is_expired(now) {
            tracing::debug!(name = %cookie.name, domain = %cookie.domain, "cookie deleted");
            return;
        }

        // Drop expired entries before evicting live ones.
        entry.retain(|c| !c.is_expired(now));
        while entry.len() >= MAX_COOKIES_PER_DOMAIN {
            let Some(oldest) = oldest_index(&entry) else {
                break;
            };
            entry.remove(oldest);
        }

        entry.push(cookie);
        drop(entry); // Release shard lock before the global pass

        self.enforce_global_limit();
    }

    /// Enforce the global cookie limit by evicting oldest cookies.
    fn enforce_global_limit(&self) {
        while self.total_cookie_count() > MAX_COOKIES_TOTAL {
            let oldest = self
                .store
                .iter()
                .filter_map(|entry| {
                    oldest_index(entry.value())
                        .map(|idx| (entry.key().clone(), entry.value()[idx].creation_time))
                })
                .min_by_key(|(_, created)| *created);

            let Some((domain, _)) = oldest else {
                break;
            };
            if let Some(mut entry) = self.store.get_mut(&domain) {
                if let Some(idx) = oldest_index(&entry) {
                    entry.remove(idx);
                }
            }
        }
    }

    /// Get cookies matching the URL, longest path first then oldest first.
    pub fn get_cookies_for_url(&self, url: &Url) -> Vec<CanonicalCookie> {
        let host = url.host_str().unwrap_or("").to_ascii_lowercase();
        let now = OffsetDateTime::now_utc();

        let mut result: Vec<CanonicalCookie> = Self::candidate_domains(&host)
            .iter()
            .filter_map(|domain| self.store.get(domain))
            .flat_map(|entry| {
                entry
                    .iter()
                    .filter(|c| c.include_for(url, now))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .collect();

        result.sort_by(|a, b| {
            b.path
                .len()
                .cmp(&a.path.len())
                .then_with(|| a.creation_time.cmp(&b.creation_time))
        });
        result
    }

    /// The host itself and each parent domain, e.g. "a.b.example.com",
    /// "b.example.com", "example.com".
    fn candidate_domains(host: &str) -> Vec<String> {
        let parts: Vec<&str> = host.split('.').collect();
        let mut domains = vec![host.to_string()];
        for i in 1..parts.len().saturating_sub(1) {
            domains.push(parts[i..].join("."));
        }
        domains
    }

    /// Parse a `Set-Cookie` value received from `url` and store it.
    /// Rejected cookies are dropped silently, like browsers do.
    pub fn parse_and_save_cookie(&self, url: &Url, cookie_line: &str) {
        let now = OffsetDateTime::now_utc();
        match CanonicalCookie::from_set_cookie(url, cookie_line, now) {
            Ok(cookie) => self.set_canonical_cookie(cookie),
            Err(e) => {
                tracing::debug!(url = %url, line = cookie_line, error = %e, "cookie rejected");
            }
        }
    }

    /// `name=value; name2=value2` for `url`, if any cookie matches.
    pub fn cookie_header_for_url(&self, url: &Url) -> Option<String> {
        let cookies = self.get_cookies_for_url(url);
        if cookies.is_empty() {
            return None;
        }
        Some(
            cookies
                .iter()
                .map(|c| format!("{}={}", c.name, c.value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Get total cookie count.
    pub fn total_cookie_count(&self) -> usize {
        self.store.iter().map(|e| e.value().len()).sum()
    }

    /// Clear all cookies.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Iterate over all cookies.
    pub fn iter_all_cookies(&self) -> impl Iterator<Item = CanonicalCookie> + '_ {
        self.store.iter().flat_map(|entry| entry.value().clone())
    }
}

fn oldest_index(cookies: &[CanonicalCookie]) -> Option<usize> {
    cookies
        .iter()
        .enumerate()
        .min_by_key(|(_, c)| c.creation_time)
        .map(|(i, _)| i)
}

impl CookieStore for CookieMonster {
    fn attach(&self, request: &mut Request) {
        let Some(jar_cookies) = self.cookie_header_for_url(request.url()) else {
            return;
        };

        // Keep a caller-supplied Cookie header in front of the jar's.
        let value = match request.cookie_header() {
            Some(existing) if !existing.is_empty() => format!("{}; {}", existing, jar_cookies),
            _ => jar_cookies,
        };

        match HeaderValue::from_str(&value) {
            Ok(v) => request.insert_header(COOKIE, v),
            Err(_) => tracing::debug!(url = %request.url(), "cookie header not representable"),
        }
    }

    fn absorb(&self, response: &Response) {
        let url = response.request().url();
        for line in response.set_cookies() {
            self.parse_and_save_cookie(url, line);
        }
    }
}
