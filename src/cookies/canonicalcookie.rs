use crate::base::neterror::NetError;
use crate::cookies::psl::check_cookie_domain;
use time::{OffsetDateTime, PrimitiveDateTime};
use url::Url;

/// Represents a cookie.
/// Modeled after Chromium's `net::CanonicalCookie`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    pub creation_time: OffsetDateTime,
    pub expiration_time: Option<OffsetDateTime>,
    pub secure: bool,
    pub http_only: bool,
    pub host_only: bool,
    pub same_site: SameSite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Unspecified,
    NoRestriction,
    Lax,
    Strict,
}

impl From<Option<cookie::SameSite>> for SameSite {
    fn from(value: Option<cookie::SameSite>) -> Self {
        match value {
            Some(cookie::SameSite::Lax) => SameSite::Lax,
            Some(cookie::SameSite::Strict) => SameSite::Strict,
            Some(cookie::SameSite::None) => SameSite::NoRestriction,
            None => SameSite::Unspecified,
        }
    }
}

impl CanonicalCookie {
    /// Session cookie, host-only, no flags.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        domain: impl Into<String>,
        path: impl Into<String>,
        creation_time: OffsetDateTime,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: domain.into(),
            path: path.into(),
            creation_time,
            expiration_time: None,
            secure: false,
            http_only: false,
            host_only: true,
            same_site: SameSite::Unspecified,
        }
    }

    /// Parse one `Set-Cookie` value received from `url`.
    pub fn from_set_cookie(url: &Url, line: &str, now: OffsetDateTime) -> Result<Self, NetError> {
        let parsed = cookie::Cookie::parse(line).map_err(|_| NetError::CookieInvalidData)?;
        let host = url.host_str().ok_or(NetError::InvalidUrl)?;

        let (domain, host_only) = match parsed.domain() {
            Some(d) if !d.trim_start_matches('.').is_empty() => {
                (check_cookie_domain(d, host)?, false)
            }
            _ => (host.to_ascii_lowercase(), true),
        };

        let path = match parsed.path() {
            Some(p) if p.starts_with('/') => p.to_string(),
            _ => default_path(url),
        };

        // Max-Age wins over Expires.
        let expiration_time = match parsed.max_age() {
            Some(max_age) => Some(
                now.checked_add(max_age)
                    .unwrap_or_else(|| PrimitiveDateTime::MAX.assume_utc()),
            ),
            None => parsed.expires().and_then(|e| e.datetime()),
        };

        let cookie = Self {
            name: parsed.name().to_string(),
            value: parsed.value().to_string(),
            domain,
            path,
            creation_time: now,
            expiration_time,
            secure: parsed.secure().unwrap_or(false),
            http_only: parsed.http_only().unwrap_or(false),
            host_only,
            same_site: parsed.same_site().into(),
        };

        cookie.validate_prefix(url.scheme() == "https")?;
        Ok(cookie)
    }

    pub fn is_expired(&self, current_time: OffsetDateTime) -> bool {
        self.expiration_time
            .is_some_and(|expiry| expiry <= current_time)
    }

    /// Same name, domain and path: the later one replaces the earlier.
    pub fn is_equivalent(&self, other: &CanonicalCookie) -> bool {
        self.name == other.name && self.domain == other.domain && self.path == other.path
    }

    /// Validate __Secure- and __Host- cookie prefixes per RFC 6265bis.
    /// - __Secure- cookies MUST have the Secure attribute
    /// - __Host- cookies MUST have Secure, Path="/", and no Domain attribute
    pub fn validate_prefix(&self, secure_origin: bool) -> Result<(), NetError> {
        if self.name.starts_with("__Secure-") && (!self.secure || !secure_origin) {
            return Err(NetError::CookieInvalidPrefix);
        }

        if self.name.starts_with("__Host-")
            && (!self.secure || self.path != "/" || !self.host_only || !secure_origin)
        {
            return Err(NetError::CookieInvalidPrefix);
        }

        Ok(())
    }

    /// RFC 6265 domain matching.
    pub fn domain_matches(&self, host: &str) -> bool {
        if self.host_only {
            return self.domain.eq_ignore_ascii_case(host);
        }
        if host.eq_ignore_ascii_case(&self.domain) {
            return true;
        }
        let host = host.to_ascii_lowercase();
        host.strip_suffix(&self.domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
    }

    /// RFC 6265 path matching.
    pub fn path_matches(&self, request_path: &str) -> bool {
        let Some(rest) = request_path.strip_prefix(self.path.as_str()) else {
            return false;
        };
        rest.is_empty() || self.path.ends_with('/') || rest.starts_with('/')
    }

    /// Whether this cookie goes out with a request to `url` at `now`.
    pub fn include_for(&self, url: &Url, now: OffsetDateTime) -> bool {
        let host = url.host_str().unwrap_or("");
        self.domain_matches(host)
            && self.path_matches(url.path())
            && (!self.secure || url.scheme() == "https")
            && !self.is_expired(now)
    }
}

/// RFC 6265 section 5.1.4 default-path.
fn default_path(url: &Url) -> String {
    let path = url.path();
    match path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => path[..idx].to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn parse(u: &str, line: &str) -> Result<CanonicalCookie, NetError> {
        CanonicalCookie::from_set_cookie(&url(u), line, OffsetDateTime::now_utc())
    }

    #[test]
    fn test_host_only_by_default() {
        let c = parse("https://Example.com/a/b", "sid=1").unwrap();
        assert!(c.host_only);
        assert_eq!(c.domain, "example.com");
        assert_eq!(c.path, "/a");
    }

    #[test]
    fn test_default_path_root() {
        assert_eq!(parse("https://example.com/", "a=1").unwrap().path, "/");
        assert_eq!(parse("https://example.com/file", "a=1").unwrap().path, "/");
    }

    #[test]
    fn test_domain_attribute() {
        let c = parse("https://a.example.com/", "d=1; Domain=.example.com").unwrap();
        assert!(!c.host_only);
        assert_eq!(c.domain, "example.com");
        assert!(c.domain_matches("b.example.com"));
        assert!(c.domain_matches("example.com"));
        assert!(!c.domain_matches("badexample.com"));
    }

    #[test]
    fn test_public_suffix_domain_rejected() {
        let err = parse("https://example.com/", "d=1; Domain=com").unwrap_err();
        assert_eq!(err, NetError::CookiePublicSuffix);
    }

    #[test]
    fn test_max_age_overrides_expires() {
        let now = OffsetDateTime::now_utc();
        let c = CanonicalCookie::from_set_cookie(
            &url("https://example.com/"),
            "a=1; Max-Age=60; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
            now,
        )
        .unwrap();
        assert_eq!(c.expiration_time, Some(now + time::Duration::seconds(60)));
        assert!(!c.is_expired(now));
    }

    #[test]
    fn test_oversized_max_age_saturates() {
        let now = OffsetDateTime::now_utc();
        for line in ["a=1; Max-Age=999999999999", "a=1; Max-Age=99999999999999999999"] {
            let c = CanonicalCookie::from_set_cookie(&url("https://example.com/"), line, now)
                .unwrap();
            assert_eq!(
                c.expiration_time,
                Some(PrimitiveDateTime::MAX.assume_utc()),
                "{line}"
            );
            assert!(!c.is_expired(now));
        }
    }

    #[test]
    fn test_negative_max_age_is_expired() {
        let now = OffsetDateTime::now_utc();
        let c = CanonicalCookie::from_set_cookie(&url("https://example.com/"), "a=1; Max-Age=-5", now)
            .unwrap();
        assert!(c.is_expired(now));
    }

    #[test]
    fn test_max_age_zero_is_expired() {
        let now = OffsetDateTime::now_utc();
        let c = CanonicalCookie::from_set_cookie(&url("https://example.com/"), "a=1; Max-Age=0", now)
            .unwrap();
        assert!(c.is_expired(now));
    }

    #[test]
    fn test_prefix_rules() {
        assert!(parse("https://example.com/", "__Secure-a=1; Secure").is_ok());
        assert_eq!(
            parse("http://example.com/", "__Secure-a=1; Secure").unwrap_err(),
            NetError::CookieInvalidPrefix
        );
        assert!(parse("https://example.com/", "__Host-a=1; Secure; Path=/").is_ok());
        assert!(parse("https://example.com/", "__Host-a=1; Secure; Path=/; Domain=example.com").is_err());
    }

    #[test]
    fn test_path_matching() {
        let c = CanonicalCookie::new("a", "1", "example.com", "/foo", OffsetDateTime::now_utc());
        assert!(c.path_matches("/foo"));
        assert!(c.path_matches("/foo/bar"));
        assert!(!c.path_matches("/foobar"));
        assert!(!c.path_matches("/"));
    }

    #[test]
    fn test_secure_only_over_https() {
        let mut c = CanonicalCookie::new("a", "1", "example.com", "/", OffsetDateTime::now_utc());
        c.secure = true;
        let now = OffsetDateTime::now_utc();
        assert!(c.include_for(&url("https://example.com/"), now));
        assert!(!c.include_for(&url("http://example.com/"), now));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(parse("https://example.com/", "no-equals-sign").is_err());
    }
}
