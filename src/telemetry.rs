use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::ObservabilityConfig;

/// Initialize tracing with either JSON or human-readable output.
///
/// `RUST_LOG` wins over the configured level when it is set.
pub fn init_telemetry(observability: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&observability.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if observability.json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }

    tracing::debug!("signup-flow telemetry initialized");
    Ok(())
}

/// Generate a correlation ID for linking the steps of one submission
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Create the span wrapping one registration attempt
pub fn create_registration_span(correlation_id: &str, username: &str) -> tracing::Span {
    tracing::info_span!(
        "registration",
        correlation.id = correlation_id,
        user.username = username
    )
}

/// Shutdown telemetry gracefully
pub fn shutdown_telemetry() {
    tracing::debug!("signup-flow telemetry shutdown complete");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correlation_ids_are_unique_uuids() {
        let first = generate_correlation_id();
        let second = generate_correlation_id();

        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
    }

    #[test]
    fn registration_span_carries_correlation_fields_only() {
        tracing::subscriber::with_default(tracing_subscriber::registry(), || {
            let span = create_registration_span("c-1", "ann1");
            let fields = span.metadata().expect("span should be enabled").fields();

            assert!(fields.field("correlation.id").is_some());
            assert!(fields.field("user.username").is_some());
            assert_eq!(fields.len(), 2);
        });
    }
}
