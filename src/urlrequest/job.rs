//! The redirect engine.
//!
//! One call to [`URLRequestHttpJob::start`] drives a whole chain:
//!
//! ```text
//! Dispatched -> Built -> Decide -+-> Terminal
//!     ^                          |
//!     +------- Redirecting <-----+
//! ```
//!
//! The chain state is (current request, previous response, remaining
//! budget) and lives in the loop, never in the client.

use crate::base::neterror::NetError;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::transport::TransportOptions;
use crate::urlrequest::context::URLRequestContext;

/// Outcome of the decide step for one built response.
#[derive(Debug)]
pub enum Decision {
    /// Hand the response to the caller.
    Terminal,
    /// Dispatch this request next.
    Follow(Request),
}

/// Decide whether `response` ends the chain.
///
/// `remaining` is `None` until the first redirect of a chain, where it
/// starts at `max_redirects`; each followed redirect takes one from it.
pub fn decide(response: &Response, remaining: &mut Option<u32>, max_redirects: u32) -> Decision {
    if !response.is_redirect() {
        return Decision::Terminal;
    }

    let budget = remaining.get_or_insert(max_redirects);
    if *budget == 0 {
        tracing::warn!(
            status = response.status(),
            url = %response.request().url(),
            max_redirects,
            "redirect limit reached, returning redirect response"
        );
        return Decision::Terminal;
    }

    let Some(location) = response.location() else {
        tracing::warn!(
            status = response.status(),
            error = %NetError::InvalidRedirect,
            "redirect without Location"
        );
        return Decision::Terminal;
    };

    let current = response.request().url();
    let target = match current.join(location) {
        Ok(target) => target,
        Err(e) => {
            tracing::warn!(
                %location,
                reason = %e,
                error = %NetError::InvalidRedirect,
                "unresolvable redirect Location"
            );
            return Decision::Terminal;
        }
    };

    *budget -= 1;
    tracing::debug!(
        status = response.status(),
        from = %current,
        to = %target,
        remaining = *budget,
        "following redirect"
    );
    Decision::Follow(response.request().for_redirect(target))
}

/// Runs one logical request, following redirects, against a context.
pub struct URLRequestHttpJob<'a> {
    context: &'a URLRequestContext,
}

impl<'a> URLRequestHttpJob<'a> {
    pub fn new(context: &'a URLRequestContext) -> Self {
        Self { context }
    }

    /// Drive the chain to its final response. Transport failures are
    /// ordinary status-0 responses, so this never fails.
    pub async fn start(&self, request: Request) -> Response {
        let max_redirects = self.context.config().max_redirects;
        let mut request = request;
        let mut previous: Option<Response> = None;
        let mut remaining: Option<u32> = None;

        loop {
            let response = self.dispatch(request, previous.take()).await;

            match decide(&response, &mut remaining, max_redirects) {
                Decision::Terminal => return response,
                Decision::Follow(next) => {
                    request = next;
                    previous = Some(response);
                }
            }
        }
    }

    /// One hop: decorate, send, build, absorb cookies.
    async fn dispatch(&self, mut request: Request, previous: Option<Response>) -> Response {
        let config = self.context.config();
        let cookie_store = self.context.cookie_store();

        if let Err(e) = request.set_user_agent(&config.agent) {
            tracing::warn!(error = %e, "configured agent is not a valid header value");
        }
        cookie_store.attach(&mut request);

        let options = TransportOptions {
            timeout: config.timeout,
            headers: request.headers().clone(),
            body: request.body().cloned(),
            recurse: 0,
        };

        tracing::debug!(method = %request.method(), url = %request.url(), "dispatching");
        let raw = self
            .context
            .transport()
            .send(request.method().clone(), request.url().clone(), options)
            .await;
        if raw.is_failure() {
            tracing::debug!(url = %request.url(), error = ?raw.error, "transport failed");
        } else {
            tracing::debug!(url = %request.url(), status = raw.status, "transport completed");
        }

        let response = Response::build(request, raw, previous);
        cookie_store.absorb(&response);
        response
    }
}
