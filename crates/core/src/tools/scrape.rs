//! Page fetching with rough text extraction for research context.

use anyhow::{Context, Result};
use std::sync::OnceLock;
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

// Enough context for a prompt without blowing the token budget.
const MAX_TEXT_CHARS: usize = 2000;

/// Extracted page content.
#[derive(Debug, Clone)]
pub struct PageText {
    pub title: String,
    pub text: String,
}

/// Fetch a URL and reduce it to title + readable text.
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<PageText> {
    let response = client
        .get(url)
        .timeout(FETCH_TIMEOUT)
        .send()
        .await
        .with_context(|| format!("failed to fetch {url}"))?
        .error_for_status()
        .with_context(|| format!("non-success status from {url}"))?;

    let html = response.text().await.context("failed to read page body")?;
    Ok(extract_text(&html))
}

/// Strip markup down to plain text.
pub(crate) fn extract_text(html: &str) -> PageText {
    static TITLE_RE: OnceLock<regex::Regex> = OnceLock::new();
    static BLOCK_RE: OnceLock<regex::Regex> = OnceLock::new();
    static TAG_RE: OnceLock<regex::Regex> = OnceLock::new();
    static SPACE_RE: OnceLock<regex::Regex> = OnceLock::new();

    let title_re =
        TITLE_RE.get_or_init(|| regex::Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());
    let block_re = BLOCK_RE.get_or_init(|| {
        regex::Regex::new(
            r"(?is)<script[^>]*>.*?</script>|<style[^>]*>.*?</style>|<nav[^>]*>.*?</nav>|<header[^>]*>.*?</header>|<footer[^>]*>.*?</footer>",
        )
        .unwrap()
    });
    let tag_re = TAG_RE.get_or_init(|| regex::Regex::new(r"(?s)<[^>]+>").unwrap());
    let space_re = SPACE_RE.get_or_init(|| regex::Regex::new(r"\s+").unwrap());

    let title = title_re
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| space_re.replace_all(m.as_str().trim(), " ").into_owned())
        .unwrap_or_else(|| "No title".to_string());

    let without_blocks = block_re.replace_all(html, " ");
    let without_tags = tag_re.replace_all(&without_blocks, " ");
    let mut text = space_re.replace_all(&without_tags, " ").trim().to_string();

    if text.len() > MAX_TEXT_CHARS {
        let mut cut = MAX_TEXT_CHARS;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push_str("...");
    }

    PageText { title, text }
}
