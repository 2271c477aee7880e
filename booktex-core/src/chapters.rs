// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

//! Chapter identities and cross-chapter link resolution.

use once_cell::sync::Lazy;
use regex::Regex;

static CHAPTER_FILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}_([A-Za-z0-9_]+)\.md$").unwrap());
static DOCUMENT_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{2})_([^.]+)").unwrap());
static CHAPTER_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z0-9_]+)(?:#(.*))?$").unwrap());

/// Slug given to documents that are not numbered chapter files.
pub const FALLBACK_SLUG: &str = "hints";
const FRONT_MATTER_PREFIX: &str = "00";

/// The chapters of the book in reading order.
///
/// A chapter's number is its zero-based position. Slugs are expected to be unique; should one
/// repeat, lookups answer with its first position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChapterRegistry {
    slugs: Vec<String>,
}

impl ChapterRegistry {
    pub fn new<I, S>(slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            slugs: slugs.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds the registry from the names of the manuscript files, e.g. `03_data.md`.
    ///
    /// Names that do not follow the `NN_slug.md` pattern are ignored. The two-digit prefix
    /// encodes reading order, so the names are sorted before the slugs are extracted.
    pub fn from_file_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names = names
            .into_iter()
            .filter(|name| CHAPTER_FILE.is_match(name.as_ref()))
            .map(|name| name.as_ref().to_string())
            .collect::<Vec<_>>();
        names.sort();

        let registry = Self::new(names.iter().filter_map(|name| {
            CHAPTER_FILE
                .captures(name)
                .and_then(|captures| captures.get(1))
                .map(|slug| slug.as_str().to_string())
        }));
        tracing::debug!(chapters = registry.len(), "built chapter registry");
        registry
    }

    pub fn index_of(&self, slug: &str) -> Option<usize> {
        self.slugs.iter().position(|known| known == slug)
    }

    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }

    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.slugs.iter().map(String::as_str)
    }

    /// Resolves a link target of the form `slug` or `slug#anchor` against the registry.
    ///
    /// Returns `None` for anything that is not a registered chapter, which callers render as
    /// an external hyperlink.
    pub fn resolve(&self, href: &str) -> Option<ChapterLink> {
        let captures = CHAPTER_LINK.captures(href)?;
        let slug = captures.get(1)?.as_str();
        let index = self.index_of(slug)?;
        let label = match captures.get(2).map(|anchor| anchor.as_str()) {
            Some(anchor) if !anchor.is_empty() => format!("{slug}.{anchor}"),
            _ => slug.to_string(),
        };
        Some(ChapterLink { index, label })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChapterLink {
    pub index: usize,
    pub label: String,
}

/// The document currently being rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chapter {
    pub slug: String,
    /// Front matter gets `\chapter*` instead of a numbered chapter.
    pub unnumbered: bool,
}

impl Chapter {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            unnumbered: false,
        }
    }

    pub fn unnumbered(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            unnumbered: true,
        }
    }

    /// Derives the chapter from a document file name such as `00_intro.md` or `04_dom.json`.
    pub fn from_file_name(name: &str) -> Self {
        match DOCUMENT_NAME.captures(name) {
            Some(captures) => Self {
                slug: captures[2].to_string(),
                unnumbered: &captures[1] == FRONT_MATTER_PREFIX,
            },
            None => Self::new(FALLBACK_SLUG),
        }
    }
}
