use std::{
    io::{self, Write},
    path::Path,
    process,
    sync::Arc,
};

use frontpage::{
    application::{
        error::AppError,
        homepage::{Homepage, LoadOutcome},
        loader::ContentLoader,
        page::PageComposer,
        panel::result_href,
        search::{SearchType, search},
        sections::SectionRenderer,
    },
    config,
    infra::{error::InfraError, sources::SourceFetcher, telemetry},
};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Render(Box::<config::RenderArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Render(args) => run_render(settings, *args).await,
        config::Command::Search(args) => run_search(settings, args).await,
    }
}

fn build_loader(settings: &config::Settings) -> Result<ContentLoader, AppError> {
    let fetcher = SourceFetcher::new()?;
    Ok(ContentLoader::new(Arc::new(fetcher), settings.sources.clone()))
}

async fn run_render(settings: config::Settings, args: config::RenderArgs) -> Result<(), AppError> {
    let template = &settings.page.template;
    let host = tokio::fs::read_to_string(template)
        .await
        .map_err(InfraError::from)?;

    let loader = build_loader(&settings)?;
    info!(
        target = "frontpage::render",
        template = %template.display(),
        content = %loader.sources().content,
        links = %loader.sources().links,
        "Starting render"
    );

    let mut homepage = Homepage::new(
        SectionRenderer::new(settings.render.placeholders.clone()),
        PageComposer::new(settings.sections.clone())?,
    );

    let outcome = homepage.load(&loader).await;

    if let Some(query) = args.query.as_deref() {
        let search_type = SearchType::from(args.search_type);
        if outcome == LoadOutcome::Failed {
            warn!(
                target = "frontpage::render",
                query, "Skipping search, content is not loaded"
            );
        } else if homepage.submit(query, search_type).is_none() {
            warn!(target = "frontpage::render", "Ignoring blank search query");
        }
    }

    let html = homepage.compose(&host)?;
    write_output(settings.page.output.as_deref(), &html).await?;

    info!(
        target = "frontpage::render",
        sections = homepage.sections().len(),
        loaded = homepage.is_loaded(),
        "Render completed"
    );
    Ok(())
}

async fn run_search(settings: config::Settings, args: config::SearchArgs) -> Result<(), AppError> {
    let query = args.query.trim();
    if query.is_empty() {
        return Err(AppError::validation("search requires a non-empty query"));
    }

    let loader = build_loader(&settings)?;
    let state = loader.load().await?;
    let search_type = SearchType::from(args.search_type);
    let results = search(&state.store, query, search_type);

    info!(
        target = "frontpage::search",
        query,
        search_type = search_type.as_str(),
        results = results.len(),
        "Search completed"
    );

    let mut rendered = String::new();
    if args.json {
        rendered = serde_json::to_string_pretty(&results)
            .map_err(|err| AppError::unexpected(format!("failed to encode results: {err}")))?;
        rendered.push('\n');
    } else if results.is_empty() {
        rendered.push_str(&format!("No results found for \"{query}\"\n"));
    } else {
        for result in &results {
            rendered.push_str(&format!(
                "{} by {} ({}) -> {}\n",
                result.title,
                result.author,
                result.content_type,
                result_href(result, &state.links)
            ));
        }
    }

    write_output(None, &rendered).await
}

async fn write_output(path: Option<&Path>, contents: &str) -> Result<(), AppError> {
    match path {
        Some(path) => {
            tokio::fs::write(path, contents)
                .await
                .map_err(InfraError::from)?;
            info!(
                target = "frontpage::render",
                output = %path.display(),
                bytes = contents.len(),
                "Wrote page"
            );
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(contents.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(InfraError::from)?;
        }
    }
    Ok(())
}
