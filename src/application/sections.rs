//! Section renderers: one markup fragment per content item.

use tracing::debug;

use crate::{
    domain::{
        content::{ContentArray, ContentItem, ContentStore},
        links::{LinkIndex, portal_href},
    },
    infra::telemetry::SECTION_ITEMS_RENDERED,
    presentation::views::{
        GameItemView, GamesSectionTemplate, NewsItemView, NewsSectionTemplate,
        SubmissionItemView, SubmissionsSectionTemplate, render_template,
    },
};

#[cfg(feature = "featured-movies")]
use crate::presentation::views::{MovieItemView, MoviesSectionTemplate};

use super::{error::RenderError, state::AppState};

pub const DEFAULT_NEWS_THUMBNAIL: &str = "https://via.placeholder.com/46x46/333/fff?text=Tom";
pub const DEFAULT_GAME_THUMBNAIL: &str = "assets/thumbs/antilgoc.png";
pub const DEFAULT_RATING: &str = "Everyone";
pub const DEFAULT_SCORE: &str = "awesome";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    News,
    Games,
    Submissions,
    #[cfg(feature = "featured-movies")]
    Movies,
}

impl Section {
    /// Sections rendered once the documents have loaded, in render order.
    pub fn bootstrap_order() -> &'static [Section] {
        #[cfg(feature = "featured-movies")]
        {
            &[
                Section::News,
                Section::Games,
                Section::Submissions,
                Section::Movies,
            ]
        }
        #[cfg(not(feature = "featured-movies"))]
        {
            &[Section::News, Section::Games, Section::Submissions]
        }
    }

    pub fn array(self) -> ContentArray {
        match self {
            Section::News => ContentArray::SiteNews,
            Section::Games => ContentArray::FeaturedGames,
            Section::Submissions => ContentArray::LatestSubmissions,
            #[cfg(feature = "featured-movies")]
            Section::Movies => ContentArray::FeaturedMovies,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Section::News => "news",
            Section::Games => "games",
            Section::Submissions => "submissions",
            #[cfg(feature = "featured-movies")]
            Section::Movies => "movies",
        }
    }
}

/// Markup that replaces one section container.
#[derive(Debug, Clone)]
pub struct RenderedSection {
    pub section: Section,
    pub items: usize,
    pub html: String,
}

/// Fallback thumbnails substituted for items without one.
#[derive(Debug, Clone)]
pub struct Placeholders {
    pub news_thumbnail: String,
    pub game_thumbnail: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            news_thumbnail: DEFAULT_NEWS_THUMBNAIL.to_string(),
            game_thumbnail: DEFAULT_GAME_THUMBNAIL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SectionRenderer {
    placeholders: Placeholders,
}

impl SectionRenderer {
    pub fn new(placeholders: Placeholders) -> Self {
        Self { placeholders }
    }

    /// Render one section. `None` means the store has no array for it and
    /// the container must be left untouched.
    pub fn render(
        &self,
        section: Section,
        state: &AppState,
    ) -> Result<Option<RenderedSection>, RenderError> {
        let html = match section {
            Section::News => self.render_news(&state.store)?,
            Section::Games => self.render_games(&state.store, &state.links)?,
            Section::Submissions => self.render_submissions(&state.store, &state.links)?,
            #[cfg(feature = "featured-movies")]
            Section::Movies => self.render_movies(&state.store)?,
        };

        let Some(html) = html else {
            debug!(
                target = "frontpage::sections",
                section = section.as_str(),
                "Section array absent; container left untouched"
            );
            return Ok(None);
        };

        let items = state
            .store
            .section(section.array())
            .map_or(0, <[ContentItem]>::len);
        metrics::counter!(SECTION_ITEMS_RENDERED, "section" => section.as_str())
            .increment(items as u64);
        debug!(
            target = "frontpage::sections",
            section = section.as_str(),
            items,
            "Section rendered"
        );

        Ok(Some(RenderedSection {
            section,
            items,
            html,
        }))
    }

    pub fn render_news(&self, store: &ContentStore) -> Result<Option<String>, RenderError> {
        let Some(news) = store.section(ContentArray::SiteNews) else {
            return Ok(None);
        };

        let items = news
            .iter()
            .map(|item| NewsItemView {
                url: text(&item.url),
                thumbnail: or_fallback(&item.thumbnail, &self.placeholders.news_thumbnail),
                author: text(&item.author),
                title: text(&item.title),
            })
            .collect();

        Ok(Some(render_template(&NewsSectionTemplate { items })?))
    }

    pub fn render_games(
        &self,
        store: &ContentStore,
        links: &LinkIndex,
    ) -> Result<Option<String>, RenderError> {
        let Some(games) = store.section(ContentArray::FeaturedGames) else {
            return Ok(None);
        };

        let items = games
            .iter()
            .map(|item| GameItemView {
                href: portal_href(item.id_or_empty(), links),
                rating: rating(item),
                thumbnail: or_fallback(&item.thumbnail, &self.placeholders.game_thumbnail),
                title: text(&item.title),
                description_lines: item
                    .shortdescription
                    .as_deref()
                    .map(|description| description.split('\n').map(str::to_string).collect())
                    .unwrap_or_default(),
            })
            .collect();

        Ok(Some(render_template(&GamesSectionTemplate { items })?))
    }

    pub fn render_submissions(
        &self,
        store: &ContentStore,
        links: &LinkIndex,
    ) -> Result<Option<String>, RenderError> {
        let Some(submissions) = store.section(ContentArray::LatestSubmissions) else {
            return Ok(None);
        };

        let items = submissions
            .iter()
            .map(|item| SubmissionItemView {
                kind: item.kind.clone(),
                href: portal_href(item.id_or_empty(), links),
                rating: rating(item),
                score: or_fallback(&item.score, DEFAULT_SCORE),
                title: text(&item.title),
            })
            .collect();

        Ok(Some(render_template(&SubmissionsSectionTemplate {
            items,
        })?))
    }

    #[cfg(feature = "featured-movies")]
    pub fn render_movies(&self, store: &ContentStore) -> Result<Option<String>, RenderError> {
        let Some(movies) = store.section(ContentArray::FeaturedMovies) else {
            return Ok(None);
        };

        let items = movies
            .iter()
            .map(|item| MovieItemView {
                url: text(&item.url),
                rating: rating(item),
                thumbnail: or_fallback(&item.thumbnail, &self.placeholders.news_thumbnail),
                title: text(&item.title),
                description: text(&item.description),
            })
            .collect();

        Ok(Some(render_template(&MoviesSectionTemplate { items })?))
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Empty strings count as missing.
fn or_fallback(value: &Option<String>, fallback: &str) -> String {
    value
        .as_deref()
        .filter(|value| !value.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

fn rating(item: &ContentItem) -> String {
    or_fallback(&item.rating, DEFAULT_RATING)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(content: &str, links: &str) -> AppState {
        AppState::new(
            ContentStore::from_json(content).expect("content"),
            LinkIndex::from_json(links).expect("links"),
        )
    }

    #[test]
    fn absent_array_is_a_no_op() {
        let renderer = SectionRenderer::default();
        let state = state("{}", "{}");
        for section in Section::bootstrap_order() {
            assert!(renderer.render(*section, &state).expect("render").is_none());
        }
    }

    #[test]
    fn empty_array_renders_an_empty_section() {
        let renderer = SectionRenderer::default();
        let rendered = renderer
            .render(Section::News, &state(r#"{"siteNews": []}"#, "{}"))
            .expect("render")
            .expect("present");
        assert_eq!(rendered.items, 0);
        assert!(rendered.html.trim().is_empty());
    }

    #[test]
    fn game_links_follow_the_link_index() {
        let renderer = SectionRenderer::default();
        let content = r#"{"featuredGames":[{"id":"g1","title":"Cave Run","rating":"Everyone"}]}"#;

        let unity = renderer
            .render_games(
                &ContentStore::from_json(content).expect("content"),
                &LinkIndex::from_json(r#"{"games":{"g1":{"type":"unity"}}}"#).expect("links"),
            )
            .expect("render")
            .expect("present");
        assert!(unity.contains(r#"href="uportal.html?id=g1""#));

        let plain = renderer
            .render_games(
                &ContentStore::from_json(content).expect("content"),
                &LinkIndex::default(),
            )
            .expect("render")
            .expect("present");
        assert!(plain.contains(r#"href="portal.html?id=g1""#));
    }

    #[test]
    fn game_fallbacks_and_line_breaks() {
        let renderer = SectionRenderer::default();
        let html = renderer
            .render_games(
                &ContentStore::from_json(
                    r#"{"featuredGames":[{"id":"g2","title":"Drift","shortdescription":"fast\ncars"}]}"#,
                )
                .expect("content"),
                &LinkIndex::default(),
            )
            .expect("render")
            .expect("present");

        assert!(html.contains(r#"title="Suitable For Everyone""#));
        assert!(html.contains(DEFAULT_GAME_THUMBNAIL));
        assert!(html.contains("fast<br>cars"));
    }

    #[test]
    fn submissions_default_score_and_shared_routing() {
        let renderer = SectionRenderer::default();
        let html = renderer
            .render_submissions(
                &ContentStore::from_json(
                    r#"{"latestSubmissions":[{"id":"s1","title":"Tiny","type":"game"},{"id":"s2","title":"Huge","score":"great"}]}"#,
                )
                .expect("content"),
                &LinkIndex::from_json(r#"{"games":{"s2":{"type":"unity"}}}"#).expect("links"),
            )
            .expect("render")
            .expect("present");

        assert!(html.contains(
            r#"<li class="game"><a href="portal.html?id=s1" title="Suitable For Everyone" class="awesome">Tiny</a></li>"#
        ));
        assert!(html.contains(r#"<li><a href="uportal.html?id=s2""#));
        assert!(html.contains(r#"class="great">Huge</a>"#));
    }

    #[test]
    fn empty_score_and_rating_use_defaults() {
        let renderer = SectionRenderer::default();
        let html = renderer
            .render_submissions(
                &ContentStore::from_json(
                    r#"{"latestSubmissions":[{"id":"s1","title":"T","score":"","rating":""}]}"#,
                )
                .expect("content"),
                &LinkIndex::default(),
            )
            .expect("render")
            .expect("present");

        assert!(html.contains(
            r#"<li><a href="portal.html?id=s1" title="Suitable For Everyone" class="awesome">T</a></li>"#
        ));
        assert!(!html.contains(r#"class="""#));
    }

    #[test]
    fn structured_fields_fall_back_instead_of_failing() {
        let renderer = SectionRenderer::default();
        let html = renderer
            .render_games(
                &ContentStore::from_json(
                    r#"{"featuredGames":[{"id":"g1","title":"Cave Run","thumbnail":{"src":"x.png"}}]}"#,
                )
                .expect("content"),
                &LinkIndex::from_json(r#"{"games":{"g1":{"type":7}}}"#).expect("links"),
            )
            .expect("render")
            .expect("present");

        assert!(html.contains(r#"href="portal.html?id=g1""#));
        assert!(html.contains(&format!(r#"<img src="{DEFAULT_GAME_THUMBNAIL}""#)));
    }

    #[test]
    fn news_uses_placeholder_and_escapes_text() {
        let renderer = SectionRenderer::default();
        let html = renderer
            .render_news(
                &ContentStore::from_json(
                    r#"{"siteNews":[{"title":"<b>big</b> news","author":"Tom","url":"news.html"}]}"#,
                )
                .expect("content"),
            )
            .expect("render")
            .expect("present");

        assert!(html.contains(DEFAULT_NEWS_THUMBNAIL));
        assert!(html.contains("<strong>Tom</strong> sez:"));
        assert!(html.contains("&lt;b&gt;big&lt;/b&gt; news"));
        assert!(!html.contains("<b>big</b>"));
    }

    #[test]
    fn custom_placeholders_are_used() {
        let renderer = SectionRenderer::new(Placeholders {
            news_thumbnail: "news.png".to_string(),
            game_thumbnail: "game.png".to_string(),
        });
        let store = ContentStore::from_json(
            r#"{"siteNews":[{"title":"a"}],"featuredGames":[{"id":"g","title":"b","thumbnail":""}]}"#,
        )
        .expect("content");

        let news = renderer.render_news(&store).expect("news").expect("present");
        let games = renderer
            .render_games(&store, &LinkIndex::default())
            .expect("games")
            .expect("present");
        assert!(news.contains(r#"src="news.png""#));
        assert!(games.contains(r#"src="game.png""#));
    }

    #[cfg(feature = "featured-movies")]
    #[test]
    fn movies_render_when_the_feature_is_enabled() {
        let renderer = SectionRenderer::default();
        let html = renderer
            .render_movies(
                &ContentStore::from_json(
                    r#"{"featuredMovies":[{"title":"Reel","description":"short film","url":"m.html"}]}"#,
                )
                .expect("content"),
            )
            .expect("render")
            .expect("present");
        assert!(html.contains(r#"<span class="ftitle">Reel</span>short film"#));
        assert!(html.contains(r#"title="Suitable For Everyone""#));
    }
}
