//! Splitting of comma-joined `Set-Cookie` values.
//!
//! Some transports fold several `Set-Cookie` headers into one value joined
//! by commas. Commas also appear inside cookies (`Expires=Wed, 21 Oct ...`),
//! so a comma only starts a new cookie when it is followed by `token=`.

/// RFC 7230 `tchar`.
fn is_tchar(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'.'
                | b'^'
                | b'_'
                | b'`'
                | b'|'
                | b'~'
        )
}

/// If a new cookie starts right after the comma at `comma`, return the
/// offset of its first name byte.
fn cookie_start_after(bytes: &[u8], comma: usize) -> Option<usize> {
    let mut i = comma + 1;
    while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
        i += 1;
    }
    let name_start = i;
    while i < bytes.len() && is_tchar(bytes[i]) {
        i += 1;
    }
    (i > name_start && i < bytes.len() && bytes[i] == b'=').then_some(name_start)
}

/// Split a possibly comma-joined `Set-Cookie` value into single cookies,
/// preserving order.
///
/// ```
/// use jarnet::http::setcookie::split_set_cookie;
///
/// assert_eq!(split_set_cookie("a=1,b=2=3"), vec!["a=1", "b=2=3"]);
/// ```
pub fn split_set_cookie(joined: &str) -> Vec<&str> {
    let bytes = joined.as_bytes();
    let mut cookies = Vec::new();
    let mut start = 0;

    for (pos, _) in joined.match_indices(',') {
        if let Some(next) = cookie_start_after(bytes, pos) {
            push_segment(&mut cookies, &joined[start..pos]);
            start = next;
        }
    }
    // A trailing separator belongs to no cookie.
    let last = joined[start..].trim_end().trim_end_matches(',');
    push_segment(&mut cookies, last);

    if cookies.len() > 1 {
        tracing::trace!(count = cookies.len(), "split joined Set-Cookie value");
    }
    cookies
}

fn push_segment<'a>(out: &mut Vec<&'a str>, segment: &'a str) {
    let segment = segment.trim();
    if !segment.is_empty() {
        out.push(segment);
    }
}
