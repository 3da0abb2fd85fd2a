//! File-name classification.
//!
//! Maps the descriptive remainder of a dump file name (collection, date, and
//! extension already stripped) to a [`ContentDescriptor`].
//!
//! # Rule Tree
//!
//! Classification walks an ordered tree of rules. At each level the
//! first rule whose matcher accepts the name wins and its tags are set;
//! then, if the rule has a shape and the whole name matches it, `set` is
//! added and the walk stops, otherwise the walk descends into the rule's
//! children. Siblings are mutually exclusive, so a name starting with
//! `pages` is never also classified as `sql`.
//!
//! ```text
//! pages ─┬─ pages-meta ─┬─ pages-meta-history            (shape → set)
//!        │              └─ pages-meta-current            (shape → set)
//!        ├─ pages-articles ── pages-articles-multistream  (shape → set)
//!        │       (shape → set)      └─ …-multistream-index (shape → set)
//!        └─ pages-logging                                (shape → set)
//! stub ──┬─ stub-articles                                (shape → set)
//!        └─ stub-meta ─┬─ stub-meta-current              (shape → set)
//!                      └─ stub-meta-history              (shape → set)
//! abstract                                               (shape → set)
//! *.sql*  │  md5sums | sha1sums  │  all-titles*  │  siteinfo-namespaces.json
//! ```
//!
//! A shape is the numbered-file form of a prefix: a one or two digit shard
//! number, the inner extension, and for paginated dumps a `-pSTARTpEND`
//! page range, e.g. `pages-meta-history27.xml-p1000p2000`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::descriptor::{ContentDescriptor, ContentTag};

/// How a rule recognises a name.
#[derive(Debug, Clone, Copy)]
enum Matcher {
    Prefix(&'static str),
    Contains(&'static str),
    OneOf(&'static [&'static str]),
}

impl Matcher {
    fn matches(self, name: &str) -> bool {
        match self {
            Matcher::Prefix(prefix) => name.starts_with(prefix),
            Matcher::Contains(needle) => name.contains(needle),
            Matcher::OneOf(names) => names.contains(&name),
        }
    }
}

#[derive(Debug)]
struct Rule {
    matcher: Matcher,
    tags: &'static [ContentTag],
    /// Anchored regex source; a full match additionally sets `set`.
    shape: Option<&'static str>,
    children: &'static [Rule],
}

static RULES: &[Rule] = &[
    Rule {
        matcher: Matcher::Prefix("pages"),
        tags: &[ContentTag::Pages],
        shape: None,
        children: &[
            Rule {
                matcher: Matcher::Prefix("pages-meta"),
                tags: &[ContentTag::RevMetadata],
                shape: None,
                children: &[
                    Rule {
                        matcher: Matcher::Prefix("pages-meta-history"),
                        tags: &[ContentTag::History],
                        shape: Some(r"^pages-meta-history[0-9]{1,2}\.xml-p[0-9]+p[0-9]+$"),
                        children: &[],
                    },
                    Rule {
                        matcher: Matcher::Prefix("pages-meta-current"),
                        tags: &[ContentTag::Current],
                        shape: Some(r"^pages-meta-current[0-9]{1,2}\.xml-p[0-9]+p[0-9]+$"),
                        children: &[],
                    },
                ],
            },
            Rule {
                matcher: Matcher::Prefix("pages-articles"),
                tags: &[ContentTag::Articles],
                shape: Some(r"^pages-articles[0-9]{1,2}\.xml-p[0-9]+p[0-9]+$"),
                children: &[Rule {
                    matcher: Matcher::Prefix("pages-articles-multistream"),
                    tags: &[ContentTag::Indexed],
                    shape: Some(r"^pages-articles-multistream[0-9]{1,2}\.xml-p[0-9]+p[0-9]+$"),
                    children: &[Rule {
                        matcher: Matcher::Prefix("pages-articles-multistream-index"),
                        tags: &[ContentTag::Index],
                        shape: Some(
                            r"^pages-articles-multistream-index[0-9]{1,2}\.txt-p[0-9]+p[0-9]+$",
                        ),
                        children: &[],
                    }],
                }],
            },
            Rule {
                matcher: Matcher::Prefix("pages-logging"),
                tags: &[ContentTag::Logging],
                shape: Some(r"^pages-logging[0-9]{1,2}\.xml$"),
                children: &[],
            },
        ],
    },
    Rule {
        matcher: Matcher::Prefix("stub"),
        tags: &[],
        shape: None,
        children: &[
            Rule {
                matcher: Matcher::Prefix("stub-articles"),
                tags: &[ContentTag::Articles],
                shape: Some(r"^stub-articles[0-9]{1,2}\.xml$"),
                children: &[],
            },
            Rule {
                matcher: Matcher::Prefix("stub-meta"),
                tags: &[ContentTag::RevMetadata],
                shape: None,
                children: &[
                    Rule {
                        matcher: Matcher::Prefix("stub-meta-current"),
                        tags: &[ContentTag::Current],
                        shape: Some(r"^stub-meta-current[0-9]{1,2}\.xml$"),
                        children: &[],
                    },
                    Rule {
                        matcher: Matcher::Prefix("stub-meta-history"),
                        tags: &[ContentTag::History],
                        shape: Some(r"^stub-meta-history[0-9]{1,2}\.xml$"),
                        children: &[],
                    },
                ],
            },
        ],
    },
    Rule {
        matcher: Matcher::Prefix("abstract"),
        tags: &[ContentTag::Abstracts],
        shape: Some(r"^abstract[0-9]{1,2}\.xml$"),
        children: &[],
    },
    Rule {
        matcher: Matcher::Contains(".sql"),
        tags: &[ContentTag::Sql],
        shape: None,
        children: &[],
    },
    Rule {
        matcher: Matcher::OneOf(&["md5sums", "sha1sums"]),
        tags: &[ContentTag::Checksum],
        shape: None,
        children: &[],
    },
    Rule {
        matcher: Matcher::Prefix("all-titles"),
        tags: &[ContentTag::Titles],
        shape: None,
        children: &[],
    },
    Rule {
        matcher: Matcher::OneOf(&["siteinfo-namespaces.json"]),
        tags: &[ContentTag::Namespaces],
        shape: None,
        children: &[],
    },
];

/// Every shape pattern in the tree, compiled once.
static SHAPES: Lazy<HashMap<&'static str, Regex>> = Lazy::new(|| {
    let mut shapes = HashMap::new();
    collect_shapes(RULES, &mut shapes);
    shapes
});

fn collect_shapes(rules: &'static [Rule], shapes: &mut HashMap<&'static str, Regex>) {
    for rule in rules {
        if let Some(pattern) = rule.shape {
            let regex = Regex::new(pattern).expect("shape patterns are static and valid");
            shapes.insert(pattern, regex);
        }
        collect_shapes(rule.children, shapes);
    }
}

fn shape_matches(pattern: &str, name: &str) -> bool {
    SHAPES
        .get(pattern)
        .map(|regex| regex.is_match(name))
        .unwrap_or(false)
}

/// Classify a name remainder.
///
/// Returns the all-false descriptor when no rule applies.
pub fn classify(remainder: &str) -> ContentDescriptor {
    let mut descriptor = ContentDescriptor::default();
    walk(RULES, remainder, &mut descriptor);
    descriptor
}

fn walk(rules: &'static [Rule], name: &str, descriptor: &mut ContentDescriptor) {
    let Some(rule) = rules.iter().find(|rule| rule.matcher.matches(name)) else {
        return;
    };
    for &tag in rule.tags {
        descriptor.set_tag(tag);
    }
    if let Some(pattern) = rule.shape {
        if shape_matches(pattern, name) {
            descriptor.set_tag(ContentTag::Set);
            return;
        }
    }
    walk(rule.children, name, descriptor);
}
