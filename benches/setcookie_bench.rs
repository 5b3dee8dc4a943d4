use criterion::{black_box, criterion_group, criterion_main, Criterion};
use http::Method;
use jarnet::http::setcookie::split_set_cookie;
use jarnet::{RawResult, Request, Response};
use url::Url;

const JOINED: &str = "sid=9f2c; Path=/; HttpOnly, \
    pref=dark; Expires=Wed, 21 Oct 2099 07:28:00 GMT; Path=/, \
    list=1,2,3, \
    token=a=b=c; Secure; SameSite=Lax";

fn benchmark_split(c: &mut Criterion) {
    c.bench_function("split_set_cookie", |b| {
        b.iter(|| black_box(split_set_cookie(black_box(JOINED))))
    });
}

fn benchmark_build(c: &mut Criterion) {
    let url = Url::parse("https://example.com/").unwrap();
    let raw = RawResult::new(302)
        .with_version("1.1")
        .with_header("Location", "/next")
        .with_header("Set-Cookie", JOINED);

    c.bench_function("response_build", |b| {
        b.iter(|| {
            let request = Request::new(Method::GET, url.clone());
            black_box(Response::build(request, black_box(raw.clone()), None))
        })
    });
}

criterion_group!(benches, benchmark_split, benchmark_build);
criterion_main!(benches);
