//! The cookie capability the client depends on.

use crate::http::request::Request;
use crate::http::response::Response;
use std::sync::Arc;

/// Anything that can decorate outgoing requests with cookies and learn
/// cookies from responses.
///
/// One store is shared by every request a client issues, including
/// concurrent chains, so each call must be atomic with respect to the
/// others.
pub trait CookieStore: Send + Sync {
    /// Add a `Cookie` header for the cookies matching `request`'s URL.
    fn attach(&self, request: &mut Request);

    /// Store the `Set-Cookie` values of `response`, scoped to the URL of
    /// the request that produced it.
    fn absorb(&self, response: &Response);
}

impl<S: CookieStore + ?Sized> CookieStore for Arc<S> {
    fn attach(&self, request: &mut Request) {
        (**self).attach(request)
    }

    fn absorb(&self, response: &Response) {
        (**self).absorb(response)
    }
}
