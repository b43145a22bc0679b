//! Network trace capture for a rendered page.
//!
//! Chrome is the only external process this crate touches. The browser is
//! owned for the duration of one [`capture`] call and the process is killed
//! when the `Browser` guard drops, including on early error returns.

use std::collections::BTreeSet;
use std::ffi::{OsStr, OsString};
use std::sync::{Arc, Mutex};

use headless_chrome::protocol::cdp::types::Event;
use headless_chrome::protocol::cdp::Network;
use headless_chrome::{Browser, LaunchOptionsBuilder};
use tracing::debug;

use crate::error::{MirrorError, Result};

/// Direction of one observed network action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Request,
    Response,
}

/// One request or response URL observed while the page rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkEvent {
    pub kind: EventKind,
    pub url: String,
}

/// Render `url` in headless Chrome and return every network request and
/// response observed during the load.
///
/// Whatever Chrome reports as navigation-complete is authoritative; no
/// extra settling delay is added on top. CDP events other than the two
/// network shapes are skipped.
pub fn capture(url: &str) -> Result<Vec<NetworkEvent>> {
    let arg_vec: Vec<OsString> = vec![
        OsString::from("--disable-gpu"),
        OsString::from("--disable-dev-shm-usage"),
        OsString::from("--no-first-run"),
        OsString::from("--no-default-browser-check"),
        OsString::from("--hide-scrollbars"),
    ];

    let launch_opts = LaunchOptionsBuilder::default()
        .headless(true)
        .args(
            arg_vec
                .iter()
                .map(|s| s.as_os_str())
                .collect::<Vec<&OsStr>>(),
        )
        .build()
        .map_err(|e| MirrorError::Session(e.to_string()))?;

    let browser = Browser::new(launch_opts).map_err(|e| MirrorError::Session(e.to_string()))?;
    let tab = browser
        .new_tab()
        .map_err(|e| MirrorError::Session(e.to_string()))?;

    tab.call_method(Network::Enable {
        max_total_buffer_size: None,
        max_resource_buffer_size: None,
        max_post_data_size: None,
        report_direct_socket_traffic: None,
        enable_durable_messages: None,
    })
    .map_err(|e| MirrorError::Session(e.to_string()))?;

    let events: Arc<Mutex<Vec<NetworkEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    tab.add_event_listener(Arc::new(move |event: &Event| match event {
        Event::NetworkResponseReceived(e) => sink.lock().unwrap().push(NetworkEvent {
            kind: EventKind::Response,
            url: e.params.response.url.clone(),
        }),
        Event::NetworkRequestWillBeSent(e) => sink.lock().unwrap().push(NetworkEvent {
            kind: EventKind::Request,
            url: e.params.request.url.clone(),
        }),
        _ => {}
    }))
    .map_err(|e| MirrorError::Session(e.to_string()))?;

    tab.navigate_to(url)
        .map_err(|e| MirrorError::Session(e.to_string()))?;
    tab.wait_until_navigated()
        .map_err(|e| MirrorError::Session(e.to_string()))?;

    let trace = events.lock().unwrap().clone();
    debug!("captured {} network events from {}", trace.len(), url);
    Ok(trace)
}

/// Collapse a trace into the set of distinct URLs it mentions. The kind of
/// each event is irrelevant here; a URL seen as both request and response
/// counts once.
pub fn extract_urls(events: &[NetworkEvent]) -> BTreeSet<String> {
    events.iter().map(|e| e.url.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_trace_extracts_nothing() {
        assert!(extract_urls(&[]).is_empty());
    }

    #[test]
    fn duplicates_across_request_and_response_collapse() {
        let events = vec![
            NetworkEvent {
                kind: EventKind::Request,
                url: "https://img.example.jp/ahc020/db611066.html".to_string(),
            },
            NetworkEvent {
                kind: EventKind::Response,
                url: "https://img.example.jp/ahc020/db611066.html".to_string(),
            },
            NetworkEvent {
                kind: EventKind::Response,
                url: "https://img.example.jp/ahc020/style.css".to_string(),
            },
        ];

        let urls = extract_urls(&events);
        assert_eq!(urls.len(), 2);
        assert!(urls.contains("https://img.example.jp/ahc020/db611066.html"));
        assert!(urls.contains("https://img.example.jp/ahc020/style.css"));
    }

    #[test]
    fn urls_differing_only_by_trailing_slash_stay_distinct() {
        let events = vec![
            NetworkEvent {
                kind: EventKind::Response,
                url: "https://img.example.jp/ahc020".to_string(),
            },
            NetworkEvent {
                kind: EventKind::Response,
                url: "https://img.example.jp/ahc020/".to_string(),
            },
        ];

        assert_eq!(extract_urls(&events).len(), 2);
    }
}
