//! Host page composition: selector-driven section injection plus the
//! bootstrap adjustments applied at load time.

use std::{cell::Cell, rc::Rc, str::FromStr};

use lol_html::{RewriteStrSettings, Selector, element, html_content::ContentType, rewrite_str};

use super::{
    error::RenderError,
    sections::{RenderedSection, Section},
};

pub const DEFAULT_NEWS_SELECTOR: &str = "#leftcol .featurefix.dotted";
pub const DEFAULT_GAMES_SELECTOR: &str = "#featured-games .featurefix";
pub const DEFAULT_MOVIES_SELECTOR: &str = "#featured-movies .featurefix";
pub const DEFAULT_SUBMISSIONS_SELECTOR: &str = ".entries";
pub const DEFAULT_SEARCH_FORM_SELECTOR: &str = "#search";
pub const DEFAULT_LEFT_COLUMN_SELECTOR: &str = "#leftcol";
pub const DEFAULT_RIGHT_COLUMN_SELECTOR: &str = "#rightcol";

const LAYOUT_NUDGE: &str = "position: relative";

/// Stable selector for every container the homepage touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSelectors {
    pub news: String,
    pub games: String,
    pub movies: String,
    pub submissions: String,
    pub search_form: String,
    pub left_column: String,
    pub right_column: String,
}

impl Default for SectionSelectors {
    fn default() -> Self {
        Self {
            news: DEFAULT_NEWS_SELECTOR.to_string(),
            games: DEFAULT_GAMES_SELECTOR.to_string(),
            movies: DEFAULT_MOVIES_SELECTOR.to_string(),
            submissions: DEFAULT_SUBMISSIONS_SELECTOR.to_string(),
            search_form: DEFAULT_SEARCH_FORM_SELECTOR.to_string(),
            left_column: DEFAULT_LEFT_COLUMN_SELECTOR.to_string(),
            right_column: DEFAULT_RIGHT_COLUMN_SELECTOR.to_string(),
        }
    }
}

impl SectionSelectors {
    pub fn for_section(&self, section: Section) -> &str {
        match section {
            Section::News => &self.news,
            Section::Games => &self.games,
            Section::Submissions => &self.submissions,
            #[cfg(feature = "featured-movies")]
            Section::Movies => &self.movies,
        }
    }

    /// Check every selector parses; element handlers assume they do.
    pub fn validate(&self) -> Result<(), RenderError> {
        let entries = [
            ("news", &self.news),
            ("games", &self.games),
            ("movies", &self.movies),
            ("submissions", &self.submissions),
            ("search_form", &self.search_form),
            ("left_column", &self.left_column),
            ("right_column", &self.right_column),
        ];
        for (target, selector) in entries {
            Selector::from_str(selector).map_err(|err| RenderError::Selector {
                target,
                selector: selector.clone(),
                reason: err.to_string(),
            })?;
        }
        Ok(())
    }
}

/// What to inject into a host page.
#[derive(Debug, Clone, Default)]
pub struct PageComposition<'a> {
    pub sections: &'a [RenderedSection],
    /// Results panel markup, appended inside the search form.
    pub panel: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct PageComposer {
    selectors: SectionSelectors,
}

impl PageComposer {
    pub fn new(selectors: SectionSelectors) -> Result<Self, RenderError> {
        selectors.validate()?;
        Ok(Self { selectors })
    }

    /// Rewrite `host` in one pass: images present in the host get lazy
    /// loading, both columns get the layout nudge when both exist, each
    /// rendered section replaces the content of the first container its
    /// selector matches, and the panel is appended to the search form.
    /// Markup inserted here is not seen by the other handlers.
    pub fn compose(
        &self,
        host: &str,
        composition: &PageComposition<'_>,
    ) -> Result<String, RenderError> {
        let nudge_columns = self.columns_present(host)?;

        let mut handlers = vec![element!("img", |el| {
            el.set_attribute("loading", "lazy")?;
            Ok(())
        })];

        if nudge_columns {
            for selector in [&self.selectors.left_column, &self.selectors.right_column] {
                handlers.push(element!(selector.as_str(), |el| {
                    let style = merge_style(el.get_attribute("style"), LAYOUT_NUDGE);
                    el.set_attribute("style", &style)?;
                    Ok(())
                }));
            }
        }

        for rendered in composition.sections {
            let selector = self.selectors.for_section(rendered.section);
            let filled = Rc::new(Cell::new(false));
            let markup = rendered.html.as_str();
            handlers.push(element!(selector, move |el| {
                if !filled.replace(true) {
                    el.set_inner_content(markup, ContentType::Html);
                }
                Ok(())
            }));
        }

        if let Some(panel) = composition.panel {
            let attached = Rc::new(Cell::new(false));
            handlers.push(element!(self.selectors.search_form.as_str(), move |el| {
                if !attached.replace(true) {
                    el.append(panel, ContentType::Html);
                }
                Ok(())
            }));
        }

        let html = rewrite_str(
            host,
            RewriteStrSettings {
                element_content_handlers: handlers,
                ..RewriteStrSettings::default()
            },
        )?;
        Ok(html)
    }

    fn columns_present(&self, host: &str) -> Result<bool, RenderError> {
        let left = Rc::new(Cell::new(false));
        let right = Rc::new(Cell::new(false));

        rewrite_str(
            host,
            RewriteStrSettings {
                element_content_handlers: vec![
                    element!(self.selectors.left_column.as_str(), {
                        let left = Rc::clone(&left);
                        move |_| {
                            left.set(true);
                            Ok(())
                        }
                    }),
                    element!(self.selectors.right_column.as_str(), {
                        let right = Rc::clone(&right);
                        move |_| {
                            right.set(true);
                            Ok(())
                        }
                    }),
                ],
                ..RewriteStrSettings::default()
            },
        )?;

        Ok(left.get() && right.get())
    }
}

fn merge_style(existing: Option<String>, declaration: &str) -> String {
    match existing {
        Some(style) if !style.trim().is_empty() => {
            let trimmed = style.trim().trim_end_matches(';');
            format!("{trimmed}; {declaration};")
        }
        _ => format!("{declaration};"),
    }
}
