//! Collection and snapshot-date extraction from dump file names.
//!
//! Dump files are named `<collection>-<YYYYMMDD>-<description>`. The
//! extractor splits a name on `-` into at most three parts and attributes it
//! to a collection only when the first part is a known collection id. The
//! date check is purely syntactic (eight ASCII digits); no calendar
//! validation is done.
//!
//! Collections or descriptions that themselves contain `-` in a way that
//! fits this pattern are mis-split. That greedy three-way split is the
//! contract; callers rely on it for stable bucketing.

use std::collections::HashSet;

/// The set of collection identifiers a name may be attributed to.
///
/// An explicit, immutable value passed into extraction rather than global
/// state, so any set (bundled list, a file, a live listing) can be used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownCollections {
    ids: HashSet<String>,
}

impl KnownCollections {
    /// Parse a one-id-per-line list. Blank lines and `#` comments are skipped.
    pub fn from_lines(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Identifiers in ascending order.
    pub fn sorted(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.ids.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl<S: Into<String>> FromIterator<S> for KnownCollections {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// The attribution parts of a dump file name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpInfo<'a> {
    pub collection: Option<&'a str>,
    pub date: Option<&'a str>,
    pub remainder: Option<&'a str>,
}

/// Split `name` into collection, snapshot date, and remainder.
///
/// - first part not a known collection → all `None`
/// - second part is eight digits → `(collection, date, third part if any)`
/// - otherwise → `(collection, None, None)`; a third part is dropped and
///   never classified
pub fn extract<'a>(name: &'a str, known: &KnownCollections) -> DumpInfo<'a> {
    let mut parts = name.splitn(3, '-');
    let first = parts.next().unwrap_or_default();
    if !known.contains(first) {
        return DumpInfo::default();
    }

    match parts.next() {
        Some(second) if is_dump_date(second) => DumpInfo {
            collection: Some(first),
            date: Some(second),
            remainder: parts.next(),
        },
        _ => DumpInfo {
            collection: Some(first),
            date: None,
            remainder: None,
        },
    }
}

fn is_dump_date(part: &str) -> bool {
    part.len() == 8 && part.bytes().all(|b| b.is_ascii_digit())
}
