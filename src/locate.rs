//! Discover a contest's visualizer URL by scanning its task page.

use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::debug;

use crate::error::{MirrorError, Result};

/// Task page that carries the visualizer link for a contest id like
/// `ahc020`.
pub fn task_page_url(contest_id: &str) -> String {
    format!("https://atcoder.jp/contests/{contest_id}/tasks/{contest_id}_a")
}

/// First hyperlink in document order matching the visualizer URL shape.
///
/// The pattern stops at `?`, so a matched link comes back with its query
/// string stripped and the mirror step fetches the bare URL.
pub fn find_visualizer_link(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").unwrap();
    let pattern = Regex::new(r"https://img\.atcoder\.jp/ahc\d{3}/[^?]+\.html").unwrap();

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(found) = pattern.find(href) {
                return Some(found.as_str().to_string());
            }
        }
    }
    None
}

/// Fetch a task page and scan it for the visualizer link. The link target
/// itself is not validated.
pub async fn fetch_visualizer_url(client: &Client, task_page_url: &str) -> Result<String> {
    let response = client.get(task_page_url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(MirrorError::NotFound(format!(
            "{task_page_url} returned HTTP {}",
            status.as_u16()
        )));
    }

    let html = response.text().await?;
    debug!("scanning {} bytes of task page HTML", html.len());
    find_visualizer_link(&html).ok_or_else(|| MirrorError::NotFound(task_page_url.to_string()))
}

/// Discover the visualizer URL for a contest id such as `ahc020`.
pub async fn locate(client: &Client, contest_id: &str) -> Result<String> {
    fetch_visualizer_url(client, &task_page_url(contest_id)).await
}
