use reqwest::{Client, ClientBuilder};
use scraper::{Html, Node};
use std::time::Duration;
use once_cell::sync::Lazy;
use tracing::{info, warn};
use crate::error::Result;
use crate::formatter::normalize_whitespace;

/// Hard cap on extracted article length, in characters.
pub const MAX_ARTICLE_CHARS: usize = 12_000;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

// Create a static client to reuse connections
static CLIENT: Lazy<Client> = Lazy::new(|| {
    build_client(FETCH_TIMEOUT).expect("Failed to build HTTP client")
});

const SKIPPED_ELEMENTS: [&str; 2] = ["script", "style"];

fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(10)
        .build()
}

/// Body of `url` decoded with the charset from its `Content-Type`.
pub async fn fetch_html(url: &str) -> Result<String> {
    let response = CLIENT.get(url).send().await?.error_for_status()?;
    let html = response.text().await?;
    Ok(html)
}

/// Fetches `url` and returns its cleaned, length-capped text.
///
/// Never fails: fetch errors come back as a bracketed placeholder that callers
/// treat like any other article text.
pub async fn fetch_article(url: &str) -> String {
    let fetch_start = std::time::Instant::now();
    match fetch_html(url).await {
        Ok(html) => {
            let text = truncate_chars(&clean_text(&html), MAX_ARTICLE_CHARS);
            info!(url, chars = text.chars().count(), elapsed = ?fetch_start.elapsed(), "article fetched");
            text
        }
        Err(e) => {
            warn!(url, error = %e, "article fetch failed");
            failure_placeholder(&e)
        }
    }
}

pub fn failure_placeholder(cause: &dyn std::fmt::Display) -> String {
    format!("[Failed to fetch article: {}]", cause)
}

/// Plain text of an HTML document with `script`/`style` bodies dropped.
pub fn clean_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut joined = String::with_capacity(html.len() / 2);

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }
        joined.push_str(text);
        joined.push(' ');
    }

    normalize_whitespace(&joined)
}

pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
