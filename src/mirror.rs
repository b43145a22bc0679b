//! Fetch accepted URLs and write each body under a destination root,
//! recreating the URL's path structure.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Client;
use serde::Serialize;
use tracing::debug;
use url::Url;

/// Why one asset could not be mirrored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The server answered with a non-2xx status.
    Status(u16),
    /// Network-level failure: timeout, refused connection, TLS.
    Transport(String),
    /// The local path could not be derived or written.
    Write(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Status(code) => write!(f, "HTTP {code}"),
            FailureReason::Transport(err) => write!(f, "transport error: {err}"),
            FailureReason::Write(err) => write!(f, "write error: {err}"),
        }
    }
}

/// Terminal per-URL result of a mirror run. Nothing is ever deleted; a
/// successful write is the final state for that path.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum MirrorOutcome {
    Saved { url: String, path: PathBuf },
    Failed { url: String, reason: FailureReason },
}

/// Fetch every URL in `urls` and write each body under `dest_root`. One
/// outcome per URL, in the set's lexicographic order; each outcome is also
/// printed to stdout as it happens. A failed asset never aborts the rest.
///
/// Two URLs that map to the same local path (e.g. differing only by query
/// string) overwrite each other; the later one in iteration order wins.
pub async fn mirror(
    client: &Client,
    urls: &BTreeSet<String>,
    dest_root: &Path,
) -> Vec<MirrorOutcome> {
    let mut outcomes = Vec::with_capacity(urls.len());
    for url in urls {
        let outcome = mirror_one(client, url, dest_root).await;
        match &outcome {
            MirrorOutcome::Saved { path, .. } => {
                println!("Saved {} successfully.", path.display());
            }
            MirrorOutcome::Failed { url, reason } => {
                println!("Failed to retrieve {url} ({reason}).");
            }
        }
        outcomes.push(outcome);
    }
    outcomes
}

async fn mirror_one(client: &Client, url: &str, dest_root: &Path) -> MirrorOutcome {
    debug!("fetching {url}");
    let response = match client.get(url).send().await {
        Ok(r) => r,
        Err(e) => return failed(url, FailureReason::Transport(e.to_string())),
    };

    let status = response.status();
    if !status.is_success() {
        return failed(url, FailureReason::Status(status.as_u16()));
    }

    let body = match response.bytes().await {
        Ok(b) => b,
        Err(e) => return failed(url, FailureReason::Transport(e.to_string())),
    };

    let rel = match relative_path(url) {
        Some(p) => p,
        None => return failed(url, FailureReason::Write("URL path has no file name".into())),
    };

    let target = dest_root.join(rel);
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = fs::create_dir_all(parent) {
                return failed(url, FailureReason::Write(e.to_string()));
            }
        }
    }
    if let Err(e) = fs::write(&target, &body) {
        return failed(url, FailureReason::Write(e.to_string()));
    }

    MirrorOutcome::Saved {
        url: url.to_string(),
        path: target,
    }
}

fn failed(url: &str, reason: FailureReason) -> MirrorOutcome {
    MirrorOutcome::Failed {
        url: url.to_string(),
        reason,
    }
}

/// Local path for a mirrored URL: the URL path with every leading slash
/// stripped, so the result always stays relative to the destination root. A
/// path without a final file segment has no local path.
fn relative_path(url: &str) -> Option<PathBuf> {
    let parsed = Url::parse(url).ok()?;
    let rel = parsed.path().trim_start_matches('/');
    if rel.is_empty() || rel.ends_with('/') {
        return None;
    }
    Some(PathBuf::from(rel))
}
