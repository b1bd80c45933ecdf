use askama::{Error as AskamaError, Template};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(public_message: &'static str, error: AskamaError) -> Self {
        Self {
            public_message,
            error,
        }
    }
}

pub fn render_template<T: Template>(template: &T) -> Result<String, TemplateRenderError> {
    template.render().map_err(|err| {
        TemplateRenderError::new("Template rendering failed", err)
    })
}

#[derive(Clone, Debug)]
pub struct NewsItemView {
    pub url: String,
    pub thumbnail: String,
    pub author: String,
    pub title: String,
}

#[derive(Template)]
#[template(path = "sections/news.html")]
pub struct NewsSectionTemplate {
    pub items: Vec<NewsItemView>,
}

#[derive(Clone, Debug)]
pub struct GameItemView {
    pub href: String,
    pub rating: String,
    pub thumbnail: String,
    pub title: String,
    /// Short description split on newlines; rendered joined by `<br>`.
    pub description_lines: Vec<String>,
}

#[derive(Template)]
#[template(path = "sections/games.html")]
pub struct GamesSectionTemplate {
    pub items: Vec<GameItemView>,
}

#[derive(Clone, Debug)]
pub struct SubmissionItemView {
    pub kind: Option<String>,
    pub href: String,
    pub rating: String,
    pub score: String,
    pub title: String,
}

#[derive(Template)]
#[template(path = "sections/submissions.html")]
pub struct SubmissionsSectionTemplate {
    pub items: Vec<SubmissionItemView>,
}

#[cfg(feature = "featured-movies")]
#[derive(Clone, Debug)]
pub struct MovieItemView {
    pub url: String,
    pub rating: String,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
}

#[cfg(feature = "featured-movies")]
#[derive(Template)]
#[template(path = "sections/movies.html")]
pub struct MoviesSectionTemplate {
    pub items: Vec<MovieItemView>,
}

#[derive(Clone, Debug)]
pub struct SearchRowView {
    pub href: String,
    pub title: String,
    pub author: String,
    pub content_type: &'static str,
    pub background: &'static str,
}

#[derive(Template)]
#[template(path = "search/panel.html")]
pub struct SearchPanelTemplate {
    pub display: &'static str,
    /// Set when the last search matched nothing; holds the submitted query.
    pub empty_query: Option<String>,
    pub rows: Vec<SearchRowView>,
}
