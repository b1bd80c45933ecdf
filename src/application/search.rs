//! Case-insensitive substring search over the featured content arrays.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::domain::content::{ContentArray, ContentCategory, ContentItem, ContentStore};

pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Arrays scanned by the search engine, in result order.
const SEARCHED_ARRAYS: [(ContentArray, ContentCategory); 4] = [
    (ContentArray::FeaturedMovies, ContentCategory::Movie),
    (ContentArray::FeaturedGames, ContentCategory::Game),
    (ContentArray::FeaturedMusic, ContentCategory::Music),
    (ContentArray::FeaturedArt, ContentCategory::Art),
];

/// Field compared against the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchType {
    #[default]
    Title,
    Author,
}

impl SearchType {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchType::Title => "title",
            SearchType::Author => "author",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "title" => Ok(SearchType::Title),
            "author" => Ok(SearchType::Author),
            other => Err(format!(
                "unknown search type `{other}` (expected `title` or `author`)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: Option<String>,
    pub title: String,
    pub author: String,
    pub url: Option<String>,
    pub content_type: ContentCategory,
}

impl SearchResult {
    fn from_item(item: &ContentItem, content_type: ContentCategory) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone().unwrap_or_default(),
            author: item
                .author
                .clone()
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            url: item.url.clone(),
            content_type,
        }
    }
}

/// Scan movies, games, music and art for items whose selected field
/// contains `query`, ignoring case. Results keep scan order.
pub fn search(store: &ContentStore, query: &str, search_type: SearchType) -> Vec<SearchResult> {
    let needle = query.to_lowercase();

    SEARCHED_ARRAYS
        .iter()
        .flat_map(|(array, category)| {
            store
                .section(*array)
                .unwrap_or_default()
                .iter()
                .map(move |item| (item, *category))
        })
        .filter(|(item, _)| matches(item, &needle, search_type))
        .map(|(item, category)| SearchResult::from_item(item, category))
        .collect()
}

fn matches(item: &ContentItem, needle: &str, search_type: SearchType) -> bool {
    let field = match search_type {
        SearchType::Title => item.title.as_deref(),
        SearchType::Author => item.author.as_deref(),
    };
    field.is_some_and(|value| value.to_lowercase().contains(needle))
}
