use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint, builder::BoolishValueParser};

use crate::application::search::SearchType;

/// Command-line arguments for the frontpage binary.
#[derive(Debug, Parser)]
#[command(name = "frontpage", version, about = "Portal homepage renderer")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "FRONTPAGE_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Render the homepage: boot the host page, load content and inject sections.
    Render(Box<RenderArgs>),
    /// Load content and print the items matching a query.
    Search(SearchArgs),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SearchTypeArg {
    #[default]
    Title,
    Author,
}

impl From<SearchTypeArg> for SearchType {
    fn from(value: SearchTypeArg) -> Self {
        match value {
            SearchTypeArg::Title => SearchType::Title,
            SearchTypeArg::Author => SearchType::Author,
        }
    }
}

#[derive(Debug, Args, Default, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub overrides: RenderOverrides,

    /// Submit this query after loading and include the results panel.
    #[arg(long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Field matched by --query.
    #[arg(long = "search-type", value_enum, default_value_t = SearchTypeArg::Title)]
    pub search_type: SearchTypeArg,
}

#[derive(Debug, Args, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub overrides: SearchOverrides,

    /// Text to look for.
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Field matched by the query.
    #[arg(long = "search-type", value_enum, default_value_t = SearchTypeArg::Title)]
    pub search_type: SearchTypeArg,

    /// Print results as a JSON array.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub json: bool,
}

#[derive(Debug, Args, Default, Clone)]
pub struct LoggingOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct SourceOverrides {
    /// Directory or URL the default document paths are resolved against.
    #[arg(long = "sources-base", value_name = "LOCATION")]
    pub sources_base: Option<String>,

    /// Override the content document location.
    #[arg(long = "content", value_name = "LOCATION")]
    pub content: Option<String>,

    /// Override the link-index document location.
    #[arg(long = "links", value_name = "LOCATION")]
    pub links: Option<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct RenderOverrides {
    #[command(flatten)]
    pub logging: LoggingOverrides,

    #[command(flatten)]
    pub sources: SourceOverrides,

    /// Override the host page template.
    #[arg(long = "template", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub template: Option<PathBuf>,

    /// Write the rendered page here instead of stdout.
    #[arg(long = "output", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct SearchOverrides {
    #[command(flatten)]
    pub logging: LoggingOverrides,

    #[command(flatten)]
    pub sources: SourceOverrides,
}
