use std::sync::Once;

use metrics::{Unit, describe_counter};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

pub const SECTION_ITEMS_RENDERED: &str = "frontpage_section_items_rendered_total";
pub const SEARCHES_TOTAL: &str = "frontpage_search_total";
pub const LOAD_FAILURES_TOTAL: &str = "frontpage_load_failure_total";

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            SECTION_ITEMS_RENDERED,
            Unit::Count,
            "Total number of content items rendered into homepage sections."
        );
        describe_counter!(
            SEARCHES_TOTAL,
            Unit::Count,
            "Total number of search submissions that reached the search engine."
        );
        describe_counter!(
            LOAD_FAILURES_TOTAL,
            Unit::Count,
            "Total number of failed homepage document loads."
        );
    });
}
