//! Live dump-site queries: connectivity, collection list, dump dates.
//!
//! The dump site publishes a `backup-index.html` page with one `<li>` per
//! collection, and one directory per snapshot date under each collection
//! (`{url}/{collection}/20201001/`).

use anyhow::{Context, Result};
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use std::time::Duration;

use crate::config::CollectionsConfig;

/// HTTP client honouring `collections.timeout_secs`.
pub fn client(config: &CollectionsConfig) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?)
}

/// Whether the dump site answers at `url`.
///
/// Connection failures and timeouts mean offline. An HTTP error status means
/// the site is reachable but unhealthy, which is returned as an error.
pub async fn is_online(client: &reqwest::Client, url: &str) -> Result<bool> {
    match client.get(url).send().await {
        Ok(resp) => {
            resp.error_for_status()
                .with_context(|| format!("Dump site {} returned an error", url))?;
            Ok(true)
        }
        Err(e) if e.is_connect() || e.is_timeout() => Ok(false),
        Err(e) => Err(e).with_context(|| format!("Failed to reach {}", url)),
    }
}

/// Collection ids listed on `{base_url}/backup-index.html`.
pub async fn fetch_online_collections(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<Vec<String>> {
    let url = format!("{}/backup-index.html", base_url);
    let html = fetch_text(client, &url).await?;
    Ok(parse_backup_index(&html))
}

/// Snapshot dates published for `collection`, ascending.
pub async fn fetch_online_dumps(
    client: &reqwest::Client,
    base_url: &str,
    collection: &str,
) -> Result<Vec<String>> {
    let url = format!("{}/{}/", base_url, collection);
    let html = fetch_text(client, &url)
        .await
        .with_context(|| format!("Failed to list dumps for {}", collection))?;
    Ok(parse_dump_dates(&html))
}

async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let resp = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("GET {} failed", url))?;
    Ok(resp.text().await?)
}

/// Text of the first link in each list item.
///
/// Items of in-progress dumps carry status text after the link; only the
/// link text is taken.
pub fn parse_backup_index(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let (li, a) = match (Selector::parse("li"), Selector::parse("a")) {
        (Ok(li), Ok(a)) => (li, a),
        _ => return Vec::new(),
    };

    document
        .select(&li)
        .filter_map(|item| item.select(&a).next())
        .map(|link| link.text().collect::<String>().trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Eight-digit directory links of a collection page, sorted and deduplicated.
pub fn parse_dump_dates(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let dates: BTreeSet<String> = document
        .select(&selector)
        .filter_map(|link| link.value().attr("href"))
        .map(|href| href.trim_end_matches('/'))
        .filter(|href| href.len() == 8 && href.bytes().all(|b| b.is_ascii_digit()))
        .map(str::to_string)
        .collect();

    dates.into_iter().collect()
}
