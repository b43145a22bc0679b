//! Mirror a browser-rendered visualizer page and the assets it loads.
//!
//! The pipeline renders the page in headless Chrome, records the network
//! trace, keeps the URLs that live alongside the page (same host, same
//! directory) and re-fetches each one to a local path derived from the URL
//! path. A separate entry point scrapes a contest task page for the
//! visualizer link itself.

pub mod error;
pub mod filter;
pub mod locate;
pub mod mirror;
pub mod trace;

pub use error::{MirrorError, Result};

use std::time::Duration;

/// Shared HTTP client for asset fetches and task-page scraping.
pub fn http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(ua_generator::ua::spoof_ua())
        .redirect(reqwest::redirect::Policy::limited(8))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .timeout(Duration::from_secs(30))
        .build()
}
