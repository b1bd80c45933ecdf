//! Dropdown results panel attached to the search form.

use crate::{
    domain::{
        content::ContentCategory,
        links::{LinkIndex, portal_href},
    },
    presentation::views::{SearchPanelTemplate, SearchRowView, render_template},
};

use super::{error::RenderError, search::SearchResult};

const HOVER_BACKGROUND: &str = "#2a2c32";
const IDLE_BACKGROUND: &str = "transparent";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelVisibility {
    Hidden,
    Visible,
}

/// A navigation requested by clicking a result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub title: String,
    pub author: String,
    pub content_type: ContentCategory,
    pub href: String,
}

impl ResultRow {
    fn from_result(result: &SearchResult, links: &LinkIndex) -> Self {
        Self {
            title: result.title.clone(),
            author: result.author.clone(),
            content_type: result.content_type,
            href: result_href(result, links),
        }
    }
}

/// Navigation target of a search result: games go through the portal
/// routing, everything else to its stored url.
pub fn result_href(result: &SearchResult, links: &LinkIndex) -> String {
    match result.content_type {
        ContentCategory::Game => portal_href(result.id.as_deref().unwrap_or_default(), links),
        _ => result.url.clone().unwrap_or_default(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelContent {
    NoResults { query: String },
    Rows(Vec<ResultRow>),
}

impl PanelContent {
    /// Number of child nodes the panel holds.
    pub fn len(&self) -> usize {
        match self {
            PanelContent::NoResults { .. } => 1,
            PanelContent::Rows(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Results panel. Created on the first search, then repopulated by every
/// later search; hidden by outside clicks and shown again on focus.
#[derive(Debug, Clone)]
pub struct SearchPanel {
    visibility: PanelVisibility,
    content: PanelContent,
    hovered: Option<usize>,
}

impl Default for SearchPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchPanel {
    /// A freshly attached panel: hidden and empty until the first search.
    pub fn new() -> Self {
        Self {
            visibility: PanelVisibility::Hidden,
            content: PanelContent::Rows(Vec::new()),
            hovered: None,
        }
    }

    pub fn populated(results: &[SearchResult], query: &str, links: &LinkIndex) -> Self {
        let mut panel = Self::new();
        panel.populate(results, query, links);
        panel
    }

    /// Replace the panel content with a new result list and show it.
    pub fn populate(&mut self, results: &[SearchResult], query: &str, links: &LinkIndex) {
        self.content = if results.is_empty() {
            PanelContent::NoResults {
                query: query.to_string(),
            }
        } else {
            PanelContent::Rows(
                results
                    .iter()
                    .map(|result| ResultRow::from_result(result, links))
                    .collect(),
            )
        };
        self.hovered = None;
        self.visibility = PanelVisibility::Visible;
    }

    pub fn visibility(&self) -> PanelVisibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == PanelVisibility::Visible
    }

    pub fn content(&self) -> &PanelContent {
        &self.content
    }

    pub fn rows(&self) -> &[ResultRow] {
        match &self.content {
            PanelContent::Rows(rows) => rows,
            PanelContent::NoResults { .. } => &[],
        }
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn dismiss(&mut self) {
        self.visibility = PanelVisibility::Hidden;
    }

    /// Show the panel again if it holds anything. Content is never touched.
    pub fn reveal(&mut self) {
        if !self.content.is_empty() {
            self.visibility = PanelVisibility::Visible;
        }
    }

    pub fn hover(&mut self, row: usize) {
        if row < self.rows().len() {
            self.hovered = Some(row);
        }
    }

    pub fn leave(&mut self, row: usize) {
        if self.hovered == Some(row) {
            self.hovered = None;
        }
    }

    pub fn click(&self, row: usize) -> Option<Navigation> {
        self.rows().get(row).map(|row| Navigation {
            href: row.href.clone(),
        })
    }

    pub fn render(&self) -> Result<String, RenderError> {
        let display = match self.visibility {
            PanelVisibility::Visible => "block",
            PanelVisibility::Hidden => "none",
        };

        let template = match &self.content {
            PanelContent::NoResults { query } => SearchPanelTemplate {
                display,
                empty_query: Some(query.clone()),
                rows: Vec::new(),
            },
            PanelContent::Rows(rows) => SearchPanelTemplate {
                display,
                empty_query: None,
                rows: rows
                    .iter()
                    .enumerate()
                    .map(|(index, row)| SearchRowView {
                        href: row.href.clone(),
                        title: row.title.clone(),
                        author: row.author.clone(),
                        content_type: row.content_type.as_str(),
                        background: if self.hovered == Some(index) {
                            HOVER_BACKGROUND
                        } else {
                            IDLE_BACKGROUND
                        },
                    })
                    .collect(),
            },
        };

        Ok(render_template(&template)?)
    }
}
