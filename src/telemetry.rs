use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

/// Initialize structured JSON logging on stderr.
///
/// Stdout is reserved for the tool protocol, so nothing may be logged there.
/// `RUST_LOG` wins over `default_level` when set.
pub fn init_telemetry(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init()?;

    tracing::info!("Website generator telemetry initialized with structured logging");
    Ok(())
}

/// Generate a correlation ID for linking the log lines of one tool invocation
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Create a span with common tool invocation attributes
pub fn create_tool_span(tool: &str, project: Option<&str>, correlation_id: &str) -> tracing::Span {
    tracing::info_span!(
        "tool_invocation",
        tool = tool,
        project.name = project,
        correlation.id = correlation_id,
    )
}
