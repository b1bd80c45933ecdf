//! Homepage content document: named arrays of loosely-typed records.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};

/// Parsed content document. Every array is optional; an absent array makes
/// the corresponding renderer a no-op.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentStore {
    pub site_news: Option<Vec<ContentItem>>,
    pub featured_games: Option<Vec<ContentItem>>,
    pub featured_movies: Option<Vec<ContentItem>>,
    pub featured_music: Option<Vec<ContentItem>>,
    pub featured_art: Option<Vec<ContentItem>>,
    pub latest_submissions: Option<Vec<ContentItem>>,
}

impl ContentStore {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn section(&self, array: ContentArray) -> Option<&[ContentItem]> {
        let items = match array {
            ContentArray::SiteNews => &self.site_news,
            ContentArray::FeaturedGames => &self.featured_games,
            ContentArray::FeaturedMovies => &self.featured_movies,
            ContentArray::FeaturedMusic => &self.featured_music,
            ContentArray::FeaturedArt => &self.featured_art,
            ContentArray::LatestSubmissions => &self.latest_submissions,
        };
        items.as_deref()
    }
}

/// Names of the arrays carried by the content document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentArray {
    SiteNews,
    FeaturedGames,
    FeaturedMovies,
    FeaturedMusic,
    FeaturedArt,
    LatestSubmissions,
}

impl ContentArray {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentArray::SiteNews => "siteNews",
            ContentArray::FeaturedGames => "featuredGames",
            ContentArray::FeaturedMovies => "featuredMovies",
            ContentArray::FeaturedMusic => "featuredMusic",
            ContentArray::FeaturedArt => "featuredArt",
            ContentArray::LatestSubmissions => "latestSubmissions",
        }
    }
}

/// One record of a content array. All fields are optional; scalar values of
/// any JSON type are kept in their string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContentItem {
    #[serde(deserialize_with = "loose_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub author: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub thumbnail: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub rating: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub shortdescription: Option<String>,
    #[serde(rename = "type", deserialize_with = "loose_string")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub score: Option<String>,
}

impl ContentItem {
    pub fn id_or_empty(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

/// Source category attached to an item while it is searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentCategory {
    Movie,
    Game,
    Music,
    Art,
}

impl ContentCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentCategory::Movie => "movie",
            ContentCategory::Game => "game",
            ContentCategory::Music => "music",
            ContentCategory::Art => "art",
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Flag(bool),
    Other(IgnoredAny),
}

/// Scalars of any JSON type in string form. Arrays and objects read as absent.
pub(crate) fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.and_then(|scalar| match scalar {
        Scalar::Text(text) => Some(text),
        Scalar::Integer(value) => Some(value.to_string()),
        Scalar::Unsigned(value) => Some(value.to_string()),
        Scalar::Float(value) => Some(value.to_string()),
        Scalar::Flag(value) => Some(value.to_string()),
        Scalar::Other(_) => None,
    }))
}
