//! Common test infrastructure
//!
//! Tests import from here: an in-process Brands service that follows the
//! same contract as the remote one, and helpers to point clients at it.

mod server;

#[allow(unused_imports)]
pub use server::{MockBehavior, MockBrandsServer, RecordedRequest};

use brands_contract::Config;
use brands_contract::http::HttpClient;

/// HTTP client bound to the given base URL.
#[allow(dead_code)]
pub fn http_client(base_url: &str) -> HttpClient {
    HttpClient::new(&Config::with_base_url(base_url)).expect("Failed to build HTTP client")
}
