//! Content-kind vocabulary and the boolean content descriptor.
//!
//! A [`ContentDescriptor`] records, as a fixed set of flags, what a dump file
//! holds according to its name. The all-false descriptor is the sentinel for
//! a name that matched no known convention.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::IndexError;

/// One flag of the closed content-kind vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentTag {
    Pages,
    RevMetadata,
    History,
    Current,
    Articles,
    Indexed,
    Index,
    Logging,
    Stubs,
    Abstracts,
    Sql,
    Checksum,
    Titles,
    Namespaces,
    Set,
}

impl ContentTag {
    /// Every tag, in descriptor field order.
    pub const ALL: [ContentTag; 15] = [
        ContentTag::Pages,
        ContentTag::RevMetadata,
        ContentTag::History,
        ContentTag::Current,
        ContentTag::Articles,
        ContentTag::Indexed,
        ContentTag::Index,
        ContentTag::Logging,
        ContentTag::Stubs,
        ContentTag::Abstracts,
        ContentTag::Sql,
        ContentTag::Checksum,
        ContentTag::Titles,
        ContentTag::Namespaces,
        ContentTag::Set,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentTag::Pages => "pages",
            ContentTag::RevMetadata => "rev_metadata",
            ContentTag::History => "history",
            ContentTag::Current => "current",
            ContentTag::Articles => "articles",
            ContentTag::Indexed => "indexed",
            ContentTag::Index => "index",
            ContentTag::Logging => "logging",
            ContentTag::Stubs => "stubs",
            ContentTag::Abstracts => "abstracts",
            ContentTag::Sql => "sql",
            ContentTag::Checksum => "checksum",
            ContentTag::Titles => "titles",
            ContentTag::Namespaces => "namespaces",
            ContentTag::Set => "set",
        }
    }
}

impl fmt::Display for ContentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentTag {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        ContentTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == needle)
            .ok_or_else(|| IndexError::UnknownTag(s.trim().to_string()))
    }
}

/// Named boolean flags describing a file's content, inferred from its name.
///
/// Flags are set coarse-to-fine by the name parser, so a fine flag (for
/// example `history`) never appears without its coarser parents
/// (`rev_metadata`, `pages`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ContentDescriptor {
    pub pages: bool,
    pub rev_metadata: bool,
    pub history: bool,
    pub current: bool,
    pub articles: bool,
    pub indexed: bool,
    pub index: bool,
    pub logging: bool,
    pub stubs: bool,
    pub abstracts: bool,
    pub sql: bool,
    pub checksum: bool,
    pub titles: bool,
    pub namespaces: bool,
    pub set: bool,
}

impl ContentDescriptor {
    /// Build a descriptor with exactly the given tags set.
    pub fn with_tags(tags: &[ContentTag]) -> Self {
        let mut descriptor = Self::default();
        for &tag in tags {
            descriptor.set_tag(tag);
        }
        descriptor
    }

    pub fn has(&self, tag: ContentTag) -> bool {
        match tag {
            ContentTag::Pages => self.pages,
            ContentTag::RevMetadata => self.rev_metadata,
            ContentTag::History => self.history,
            ContentTag::Current => self.current,
            ContentTag::Articles => self.articles,
            ContentTag::Indexed => self.indexed,
            ContentTag::Index => self.index,
            ContentTag::Logging => self.logging,
            ContentTag::Stubs => self.stubs,
            ContentTag::Abstracts => self.abstracts,
            ContentTag::Sql => self.sql,
            ContentTag::Checksum => self.checksum,
            ContentTag::Titles => self.titles,
            ContentTag::Namespaces => self.namespaces,
            ContentTag::Set => self.set,
        }
    }

    /// Set a flag. Flags are never cleared once set.
    pub fn set_tag(&mut self, tag: ContentTag) {
        let flag = match tag {
            ContentTag::Pages => &mut self.pages,
            ContentTag::RevMetadata => &mut self.rev_metadata,
            ContentTag::History => &mut self.history,
            ContentTag::Current => &mut self.current,
            ContentTag::Articles => &mut self.articles,
            ContentTag::Indexed => &mut self.indexed,
            ContentTag::Index => &mut self.index,
            ContentTag::Logging => &mut self.logging,
            ContentTag::Stubs => &mut self.stubs,
            ContentTag::Abstracts => &mut self.abstracts,
            ContentTag::Sql => &mut self.sql,
            ContentTag::Checksum => &mut self.checksum,
            ContentTag::Titles => &mut self.titles,
            ContentTag::Namespaces => &mut self.namespaces,
            ContentTag::Set => &mut self.set,
        };
        *flag = true;
    }

    /// True when no flag is set, i.e. the name is unclassifiable.
    pub fn is_empty(&self) -> bool {
        !ContentTag::ALL.iter().any(|&tag| self.has(tag))
    }

    /// The set flags, in vocabulary order.
    pub fn tags(&self) -> Vec<ContentTag> {
        ContentTag::ALL
            .iter()
            .copied()
            .filter(|&tag| self.has(tag))
            .collect()
    }
}

impl fmt::Display for ContentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.tags().into_iter().map(ContentTag::as_str).collect();
        if names.is_empty() {
            f.write_str("-")
        } else {
            f.write_str(&names.join(","))
        }
    }
}

/// A predicate requiring every listed tag to be set.
///
/// An empty filter matches every descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    required: Vec<ContentTag>,
}

impl TagFilter {
    pub fn new(required: Vec<ContentTag>) -> Self {
        Self { required }
    }

    /// Parse a comma-separated list such as `"articles,indexed"`.
    pub fn parse(list: &str) -> Result<Self, IndexError> {
        let required = list
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(ContentTag::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { required })
    }

    pub fn matches(&self, descriptor: &ContentDescriptor) -> bool {
        self.required.iter().all(|&tag| descriptor.has(tag))
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }
}
