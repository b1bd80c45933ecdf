//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::application::{
    loader::{DEFAULT_CONTENT_PATH, DEFAULT_LINKS_PATH, DocumentSource, DocumentSources},
    page::{
        DEFAULT_GAMES_SELECTOR, DEFAULT_LEFT_COLUMN_SELECTOR, DEFAULT_MOVIES_SELECTOR,
        DEFAULT_NEWS_SELECTOR, DEFAULT_RIGHT_COLUMN_SELECTOR, DEFAULT_SEARCH_FORM_SELECTOR,
        DEFAULT_SUBMISSIONS_SELECTOR, SectionSelectors,
    },
    sections::{DEFAULT_GAME_THUMBNAIL, DEFAULT_NEWS_THUMBNAIL, Placeholders},
};

mod cli;

pub use cli::{
    CliArgs, Command, LoggingOverrides, RenderArgs, RenderOverrides, SearchArgs,
    SearchOverrides, SearchTypeArg, SourceOverrides,
};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "frontpage";
const ENV_PREFIX: &str = "FRONTPAGE";
const DEFAULT_SOURCES_BASE: &str = ".";
const DEFAULT_TEMPLATE_PATH: &str = "index.html";

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub sources: DocumentSources,
    pub page: PageSettings,
    pub sections: SectionSelectors,
    pub render: RenderSettings,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct PageSettings {
    pub template: PathBuf,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub placeholders: Placeholders,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    match cli.command.as_ref() {
        Some(Command::Render(args)) => raw.apply_render_overrides(&args.overrides),
        Some(Command::Search(args)) => raw.apply_search_overrides(&args.overrides),
        None => raw.apply_render_overrides(&RenderOverrides::default()),
    }

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    logging: RawLoggingSettings,
    sources: RawSourceSettings,
    page: RawPageSettings,
    sections: RawSectionSettings,
    render: RawRenderSettings,
}

impl RawSettings {
    fn apply_render_overrides(&mut self, overrides: &RenderOverrides) {
        self.apply_logging_overrides(&overrides.logging);
        self.apply_source_overrides(&overrides.sources);
        if let Some(template) = overrides.template.as_ref() {
            self.page.template = Some(template.clone());
        }
        if let Some(output) = overrides.output.as_ref() {
            self.page.output = Some(output.clone());
        }
    }

    fn apply_search_overrides(&mut self, overrides: &SearchOverrides) {
        self.apply_logging_overrides(&overrides.logging);
        self.apply_source_overrides(&overrides.sources);
    }

    fn apply_logging_overrides(&mut self, overrides: &LoggingOverrides) {
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }

    fn apply_source_overrides(&mut self, overrides: &SourceOverrides) {
        if let Some(base) = overrides.sources_base.as_ref() {
            self.sources.base = Some(base.clone());
        }
        if let Some(content) = overrides.content.as_ref() {
            self.sources.content = Some(content.clone());
        }
        if let Some(links) = overrides.links.as_ref() {
            self.sources.links = Some(links.clone());
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            logging,
            sources,
            page,
            sections,
            render,
        } = raw;

        let logging = build_logging_settings(logging)?;
        let sources = build_source_settings(sources)?;
        let page = build_page_settings(page)?;
        let sections = build_section_selectors(sections)?;
        let render = build_render_settings(render)?;

        Ok(Self {
            logging,
            sources,
            page,
            sections,
            render,
        })
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_source_settings(sources: RawSourceSettings) -> Result<DocumentSources, LoadError> {
    let base = non_empty(sources.base).unwrap_or_else(|| DEFAULT_SOURCES_BASE.to_string());
    let content =
        non_empty(sources.content).unwrap_or_else(|| DEFAULT_CONTENT_PATH.to_string());
    let links = non_empty(sources.links).unwrap_or_else(|| DEFAULT_LINKS_PATH.to_string());

    let content = DocumentSource::resolve(&base, &content)
        .map_err(|err| LoadError::invalid("sources.content", err.to_string()))?;
    let links = DocumentSource::resolve(&base, &links)
        .map_err(|err| LoadError::invalid("sources.links", err.to_string()))?;

    Ok(DocumentSources { content, links })
}

fn build_page_settings(page: RawPageSettings) -> Result<PageSettings, LoadError> {
    let template = page
        .template
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_PATH));
    if template.as_os_str().is_empty() {
        return Err(LoadError::invalid("page.template", "path must not be empty"));
    }

    let output = page.output.filter(|path| !path.as_os_str().is_empty());

    Ok(PageSettings { template, output })
}

fn build_section_selectors(sections: RawSectionSettings) -> Result<SectionSelectors, LoadError> {
    let selectors = SectionSelectors {
        news: non_empty(sections.news).unwrap_or_else(|| DEFAULT_NEWS_SELECTOR.to_string()),
        games: non_empty(sections.games).unwrap_or_else(|| DEFAULT_GAMES_SELECTOR.to_string()),
        movies: non_empty(sections.movies).unwrap_or_else(|| DEFAULT_MOVIES_SELECTOR.to_string()),
        submissions: non_empty(sections.submissions)
            .unwrap_or_else(|| DEFAULT_SUBMISSIONS_SELECTOR.to_string()),
        search_form: non_empty(sections.search_form)
            .unwrap_or_else(|| DEFAULT_SEARCH_FORM_SELECTOR.to_string()),
        left_column: non_empty(sections.left_column)
            .unwrap_or_else(|| DEFAULT_LEFT_COLUMN_SELECTOR.to_string()),
        right_column: non_empty(sections.right_column)
            .unwrap_or_else(|| DEFAULT_RIGHT_COLUMN_SELECTOR.to_string()),
    };

    selectors
        .validate()
        .map_err(|err| LoadError::invalid("sections", err.to_string()))?;

    Ok(selectors)
}

fn build_render_settings(render: RawRenderSettings) -> Result<RenderSettings, LoadError> {
    let news_thumbnail =
        non_empty(render.news_placeholder).unwrap_or_else(|| DEFAULT_NEWS_THUMBNAIL.to_string());
    let game_thumbnail =
        non_empty(render.game_placeholder).unwrap_or_else(|| DEFAULT_GAME_THUMBNAIL.to_string());

    Ok(RenderSettings {
        placeholders: Placeholders {
            news_thumbnail,
            game_thumbnail,
        },
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSourceSettings {
    base: Option<String>,
    content: Option<String>,
    links: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawPageSettings {
    template: Option<PathBuf>,
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSectionSettings {
    news: Option<String>,
    games: Option<String>,
    movies: Option<String>,
    submissions: Option<String>,
    search_form: Option<String>,
    left_column: Option<String>,
    right_column: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawRenderSettings {
    news_placeholder: Option<String>,
    game_placeholder: Option<String>,
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[cfg(test)]
mod tests;
