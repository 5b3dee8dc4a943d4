//! Cookie management.
//!
//! The client only knows the two-method [`CookieStore`](store::CookieStore)
//! trait. [`CookieMonster`](monster::CookieMonster) is the default
//! in-memory implementation.
//!
//! | Chromium (C++) | jarnet (Rust) | Responsibility |
//! |----------------|---------------|----------------|
//! | `net::CookieMonster` | [`CookieMonster`](monster::CookieMonster) | Cookie jar with LRU eviction |
//! | `net::CanonicalCookie` | [`CanonicalCookie`](canonicalcookie::CanonicalCookie) | Single cookie representation |
//! | `net::CookieStore` | [`CookieStore`](store::CookieStore) | Jar interface used by requests |

pub mod canonicalcookie;
pub mod monster;
pub mod psl;
pub mod store;

pub use monster::CookieMonster;
pub use store::CookieStore;
