//! The token data source seam.
//!
//! The viewer only needs one thing from a source: a single fetch that yields
//! parsed token data or an error it can show verbatim.

use std::future::Future;

use tokenbook_core::models::TokenData;

pub trait TokenSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Human-readable location, for logs and the loading indicator.
    fn describe(&self) -> String;

    /// Fetch and parse the token document. No retry, no caching.
    fn fetch(&self) -> impl Future<Output = Result<TokenData, Self::Error>> + Send;
}
