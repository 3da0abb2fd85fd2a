//! Selection of the known-collection list handed to ingestion.

use anyhow::{Context, Result};
use dump_wrangler_core::KnownCollections;
use std::fmt;
use std::path::PathBuf;

use crate::config::CollectionsConfig;
use crate::online;

const BUNDLED_LIST: &str = include_str!("../data/known_collections.txt");

/// Where a collection list came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    Bundled,
    File(PathBuf),
    Online(String),
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Bundled => write!(f, "bundled"),
            Provenance::File(path) => write!(f, "file:{}", path.display()),
            Provenance::Online(url) => write!(f, "online:{}", url),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CollectionSet {
    pub known: KnownCollections,
    pub provenance: Provenance,
}

/// The list compiled into the binary.
pub fn bundled() -> KnownCollections {
    KnownCollections::from_lines(BUNDLED_LIST)
}

/// The configured list file, or the bundled list.
pub fn offline(config: &CollectionsConfig) -> Result<CollectionSet> {
    match &config.known_list {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| {
                format!("Failed to read collection list: {}", path.display())
            })?;
            Ok(CollectionSet {
                known: KnownCollections::from_lines(&text),
                provenance: Provenance::File(path.clone()),
            })
        }
        None => Ok(CollectionSet {
            known: bundled(),
            provenance: Provenance::Bundled,
        }),
    }
}

/// The live list when `online` is set and the site answers, else [`offline`].
pub async fn resolve(config: &CollectionsConfig) -> Result<CollectionSet> {
    if !config.online {
        return offline(config);
    }

    let base_url = config.base_url();
    let client = online::client(config)?;
    if !online::is_online(&client, base_url).await? {
        eprintln!(
            "Warning: {} is unreachable, using the offline collection list",
            base_url
        );
        return offline(config);
    }

    let names = online::fetch_online_collections(&client, base_url).await?;
    if names.is_empty() {
        eprintln!(
            "Warning: {} listed no collections, using the offline collection list",
            base_url
        );
        return offline(config);
    }

    Ok(CollectionSet {
        known: names.into_iter().collect(),
        provenance: Provenance::Online(base_url.to_string()),
    })
}

/// Print the selected collection ids, one per line, then a summary.
pub async fn run_collections(config: &CollectionsConfig) -> Result<()> {
    let set = resolve(config).await?;
    for id in set.known.sorted() {
        println!("{}", id);
    }
    println!();
    println!("{} collections ({})", set.known.len(), set.provenance);
    Ok(())
}

/// Print the snapshot dates the dump site publishes for `collection`.
pub async fn run_dumps(config: &CollectionsConfig, collection: &str) -> Result<()> {
    let base_url = config.base_url();
    let client = online::client(config)?;
    if !online::is_online(&client, base_url).await? {
        anyhow::bail!("{} is unreachable; listing dumps needs network access", base_url);
    }

    let dates = online::fetch_online_dumps(&client, base_url, collection).await?;
    for date in &dates {
        println!("{}", date);
    }
    println!();
    println!("{} dumps of {}", dates.len(), collection);
    Ok(())
}
