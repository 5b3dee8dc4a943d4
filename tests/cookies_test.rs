//! Cookie jar behavior, both directly and through the client.

mod common;

use common::{ok, redirect, MockTransport};
use http::Method;
use jarnet::cookies::psl::{check_cookie_domain, is_public_suffix};
use jarnet::{Client, CookieMonster, CookieStore, RawResult, Request, Response};
use std::sync::Arc;
use url::Url;

fn response_from(url: &str, set_cookie: &str) -> Response {
    let request = Request::new(Method::GET, Url::parse(url).unwrap());
    let raw = RawResult::new(200).with_header("Set-Cookie", set_cookie);
    Response::build(request, raw, None)
}

#[test]
fn test_parse_and_save() {
    let store = CookieMonster::new();
    let url = Url::parse("https://example.com/foo").unwrap();
    store.parse_and_save_cookie(&url, "foo=bar; Path=/");

    let cookies = store.get_cookies_for_url(&url);
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookies[0].name, "foo");
    assert_eq!(cookies[0].value, "bar");
    assert_eq!(cookies[0].path, "/");
}

#[test]
fn test_domain_matching() {
    let store = CookieMonster::new();
    let url = Url::parse("https://a.example.com").unwrap();

    store.parse_and_save_cookie(&url, "host=val");
    store.parse_and_save_cookie(&url, "domain=val; Domain=example.com");

    let cookies = store.get_cookies_for_url(&url);
    assert!(cookies.iter().any(|c| c.name == "host"));
    assert!(cookies.iter().any(|c| c.name == "domain"));

    // Only the domain cookie reaches a sibling host.
    let sibling = Url::parse("https://b.example.com").unwrap();
    let cookies = store.get_cookies_for_url(&sibling);
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookies[0].name, "domain");
}

#[test]
fn test_path_matching() {
    let store = CookieMonster::new();
    let url = Url::parse("https://example.com/foo/bar").unwrap();

    store.parse_and_save_cookie(&url, "root=val; Path=/");
    store.parse_and_save_cookie(&url, "foo=val; Path=/foo");
    store.parse_and_save_cookie(&url, "baz=val; Path=/baz");

    let cookies = store.get_cookies_for_url(&url);
    assert_eq!(cookies.len(), 2);
    // Longest path first.
    assert_eq!(cookies[0].name, "foo");
    assert_eq!(cookies[1].name, "root");
}

#[test]
fn test_secure_flag() {
    let store = CookieMonster::new();
    let https_url = Url::parse("https://example.com").unwrap();
    let http_url = Url::parse("http://example.com").unwrap();

    store.parse_and_save_cookie(&https_url, "sec=saved; Secure");

    assert_eq!(store.get_cookies_for_url(&https_url).len(), 1);
    assert_eq!(store.get_cookies_for_url(&http_url).len(), 0);
}

#[test]
fn test_supercookie_rejected() {
    let store = CookieMonster::new();
    let url = Url::parse("https://example.co.uk").unwrap();

    store.parse_and_save_cookie(&url, "evil=1; Domain=co.uk");
    store.parse_and_save_cookie(&url, "other=1; Domain=unrelated.com");

    assert_eq!(store.total_cookie_count(), 0);
}

#[test]
fn test_public_suffix_list() {
    assert!(is_public_suffix("com"));
    assert!(is_public_suffix("co.uk"));
    assert!(is_public_suffix("github.io"));
    assert!(!is_public_suffix("example.com"));
    assert!(!is_public_suffix("user.github.io"));

    assert_eq!(
        check_cookie_domain(".Example.com", "sub.example.com").unwrap(),
        "example.com"
    );
    assert!(check_cookie_domain("github.io", "user.github.io").is_err());
    assert!(check_cookie_domain("other.com", "example.com").is_err());
}

#[test]
fn test_max_age_zero_deletes() {
    let store = CookieMonster::new();
    let url = Url::parse("https://example.com/").unwrap();

    store.parse_and_save_cookie(&url, "id=1");
    assert_eq!(store.total_cookie_count(), 1);

    store.parse_and_save_cookie(&url, "id=gone; Max-Age=0");
    assert_eq!(store.total_cookie_count(), 0);
}

#[test]
fn test_extreme_max_age_through_absorb() {
    let store = CookieMonster::new();
    let url = Url::parse("https://example.com/").unwrap();

    store.absorb(&response_from("https://example.com/", "huge=1; Max-Age=999999999999"));
    store.absorb(&response_from(
        "https://example.com/",
        "huger=1; Max-Age=99999999999999999999",
    ));
    store.absorb(&response_from("https://example.com/", "neg=1; Max-Age=-30"));

    let names: Vec<String> = store
        .get_cookies_for_url(&url)
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["huge", "huger"]);
    assert_eq!(store.total_cookie_count(), 2);
}

#[test]
fn test_negative_max_age_deletes_existing() {
    let store = CookieMonster::new();
    let url = Url::parse("https://example.com/").unwrap();

    store.absorb(&response_from("https://example.com/", "id=1"));
    store.absorb(&response_from("https://example.com/", "id=x; Max-Age=-1"));

    assert!(store.get_cookies_for_url(&url).is_empty());
    assert_eq!(store.total_cookie_count(), 0);
}

#[test]
fn test_store_absorb_then_attach() {
    let store = CookieMonster::new();
    store.absorb(&response_from(
        "https://shop.example.com/cart",
        "cart=3; Path=/, user=ann; Domain=example.com; Path=/",
    ));

    let mut request = Request::get(Url::parse("https://shop.example.com/").unwrap());
    store.attach(&mut request);
    assert_eq!(request.cookie_header(), Some("cart=3; user=ann"));

    let mut request = Request::get(Url::parse("https://www.example.com/").unwrap());
    store.attach(&mut request);
    assert_eq!(request.cookie_header(), Some("user=ann"));

    let mut request = Request::get(Url::parse("https://other.org/").unwrap());
    store.attach(&mut request);
    assert_eq!(request.cookie_header(), None);
}

#[test]
fn test_expires_comma_is_not_a_boundary() {
    let store = CookieMonster::new();
    store.absorb(&response_from(
        "https://example.com/",
        "a=1; Expires=Wed, 21 Oct 2099 07:28:00 GMT, b=2",
    ));

    let url = Url::parse("https://example.com/").unwrap();
    let cookies = store.get_cookies_for_url(&url);
    assert_eq!(cookies.len(), 2);
    let a = cookies.iter().find(|c| c.name == "a").unwrap();
    assert!(a.expiration_time.is_some());
}

#[tokio::test]
async fn test_jar_shared_between_clients() {
    let jar = Arc::new(CookieMonster::new());

    let first = MockTransport::new([ok("").with_header("Set-Cookie", "token=t1")]);
    let client_a = Client::builder()
        .transport(first)
        .cookie_store(jar.clone())
        .build()
        .unwrap();
    client_a.get("http://api.test/login").send().await.unwrap();

    let second = MockTransport::new([ok("")]);
    let client_b = Client::builder()
        .transport(second.clone())
        .cookie_store(jar.clone())
        .build()
        .unwrap();
    client_b.get("http://api.test/data").send().await.unwrap();

    assert_eq!(second.calls()[0].header("cookie"), Some("token=t1"));
    assert_eq!(jar.total_cookie_count(), 1);
}

#[tokio::test]
async fn test_caller_cookie_header_kept_in_front() {
    let transport = MockTransport::new([
        redirect(302, "http://api.test/next").with_header("Set-Cookie", "jar=1"),
        ok(""),
    ]);
    let client = Client::builder().transport(transport.clone()).build().unwrap();

    client
        .get("http://api.test/")
        .header("Cookie", "mine=0")
        .send()
        .await
        .unwrap();

    let calls = transport.calls();
    assert_eq!(calls[0].header("cookie"), Some("mine=0"));
    // The redirected request is fresh, so only the jar's cookie remains.
    assert_eq!(calls[1].header("cookie"), Some("jar=1"));
}

#[tokio::test]
async fn test_concurrent_chains_share_jar() {
    let jar = Arc::new(CookieMonster::new());
    let mut handles = Vec::new();
    for i in 0..8 {
        let transport = MockTransport::new([
            redirect(302, &format!("http://h{i}.test/2")).with_header("Set-Cookie", &format!("n{i}={i}")),
            ok(""),
        ]);
        let client = Client::builder()
            .transport(transport.clone())
            .cookie_store(jar.clone())
            .build()
            .unwrap();
        handles.push(tokio::spawn(async move {
            client.get(format!("http://h{i}.test/")).send().await.unwrap();
            transport.calls()[1].header("cookie").map(str::to_string)
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.await.unwrap(), Some(format!("n{i}={i}")));
    }
    assert_eq!(jar.total_cookie_count(), 8);
}
