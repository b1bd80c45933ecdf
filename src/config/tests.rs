use std::path::{Path, PathBuf};

use super::*;

#[test]
fn defaults_resolve_documents_under_data() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(
        settings.sources.content,
        DocumentSource::File(Path::new(".").join("data/content.json"))
    );
    assert_eq!(
        settings.sources.links,
        DocumentSource::File(Path::new(".").join("data/contentlinks.json"))
    );
    assert_eq!(settings.page.template, PathBuf::from("index.html"));
    assert!(settings.page.output.is_none());
    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
    assert_eq!(settings.sections, SectionSelectors::default());
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("info".to_string());
    raw.page.template = Some(PathBuf::from("site/index.html"));

    let overrides = RenderOverrides {
        logging: LoggingOverrides {
            log_level: Some("debug".to_string()),
            ..Default::default()
        },
        template: Some(PathBuf::from("other.html")),
        ..Default::default()
    };

    raw.apply_render_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
    assert_eq!(settings.page.template, PathBuf::from("other.html"));
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = SearchOverrides {
        logging: LoggingOverrides {
            log_json: Some(true),
            ..Default::default()
        },
        ..Default::default()
    };

    raw.apply_search_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn url_base_resolves_both_documents() {
    let mut raw = RawSettings::default();
    raw.sources.base = Some("https://portal.example/site".to_string());

    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(
        settings.sources.content.to_string(),
        "https://portal.example/site/data/content.json"
    );
    assert_eq!(
        settings.sources.links.to_string(),
        "https://portal.example/site/data/contentlinks.json"
    );
}

#[test]
fn explicit_document_urls_ignore_the_base() {
    let mut raw = RawSettings::default();
    raw.sources.base = Some("fixtures".to_string());
    raw.apply_search_overrides(&SearchOverrides {
        sources: SourceOverrides {
            links: Some("https://cdn.example/links.json".to_string()),
            ..Default::default()
        },
        ..Default::default()
    });

    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(
        settings.sources.content,
        DocumentSource::File(Path::new("fixtures").join("data/content.json"))
    );
    assert_eq!(
        settings.sources.links.to_string(),
        "https://cdn.example/links.json"
    );
}

#[test]
fn invalid_log_level_is_reported_with_its_key() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("loud".to_string());

    let error = Settings::from_raw(raw).expect_err("invalid level");
    assert!(matches!(
        error,
        LoadError::Invalid {
            key: "logging.level",
            ..
        }
    ));
}

#[test]
fn invalid_selectors_are_rejected() {
    let mut raw = RawSettings::default();
    raw.sections.games = Some("#featured-games [".to_string());

    let error = Settings::from_raw(raw).expect_err("invalid selector");
    assert!(matches!(error, LoadError::Invalid { key: "sections", .. }));
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let mut raw = RawSettings::default();
    raw.sections.news = Some("   ".to_string());
    raw.render.game_placeholder = Some(String::new());
    raw.render.news_placeholder = Some("img/news.png".to_string());

    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.sections.news, DEFAULT_NEWS_SELECTOR);
    assert_eq!(
        settings.render.placeholders.game_thumbnail,
        DEFAULT_GAME_THUMBNAIL
    );
    assert_eq!(settings.render.placeholders.news_thumbnail, "img/news.png");
}

#[test]
fn default_to_render_command() {
    let args = CliArgs::parse_from(["frontpage"]);
    let command = args
        .command
        .unwrap_or(Command::Render(Box::<RenderArgs>::default()));
    assert!(matches!(command, Command::Render(_)));
}

#[test]
fn parse_render_arguments() {
    let args = CliArgs::parse_from([
        "frontpage",
        "render",
        "--template",
        "site/index.html",
        "--output",
        "out.html",
        "--sources-base",
        "site",
        "--query",
        "cave",
        "--search-type",
        "author",
    ]);

    match args.command.expect("render command") {
        Command::Render(args) => {
            assert_eq!(
                args.overrides.template.as_deref(),
                Some(Path::new("site/index.html"))
            );
            assert_eq!(args.overrides.output.as_deref(), Some(Path::new("out.html")));
            assert_eq!(args.overrides.sources.sources_base.as_deref(), Some("site"));
            assert_eq!(args.query.as_deref(), Some("cave"));
            assert_eq!(args.search_type, SearchTypeArg::Author);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_search_arguments() {
    let args = CliArgs::parse_from([
        "frontpage",
        "search",
        "cave",
        "--json",
        "--content",
        "fixtures/content.json",
        "--log-json",
        "true",
    ]);

    match args.command.expect("search command") {
        Command::Search(args) => {
            assert_eq!(args.query, "cave");
            assert!(args.json);
            assert_eq!(args.search_type, SearchTypeArg::Title);
            assert_eq!(
                args.overrides.sources.content.as_deref(),
                Some("fixtures/content.json")
            );
            assert_eq!(args.overrides.logging.log_json, Some(true));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn config_file_layer_is_applied() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("frontpage.toml");
    std::fs::write(
        &path,
        r##"
[page]
template = "site/home.html"

[sections]
submissions = "#latest ul"
"##,
    )
    .expect("write config");

    let args = CliArgs::parse_from([
        "frontpage",
        "--config-file",
        path.to_str().expect("utf-8 path"),
        "render",
    ]);
    let settings = load(&args).expect("settings");

    assert_eq!(settings.page.template, PathBuf::from("site/home.html"));
    assert_eq!(settings.sections.submissions, "#latest ul");
}
