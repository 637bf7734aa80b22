use thiserror::Error;

/// Failures the widget can run into while turning a query into a chart.
///
/// Collaborators report their own errors through `anyhow`; the orchestrator
/// folds them into one of these variants before deciding what to show.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("No place matches '{0}'")]
    NoMatch(String),

    #[error("Forecast payload is unusable: {0}")]
    MalformedPayload(String),

    #[error("Network request failed: {0:#}")]
    NetworkFailure(anyhow::Error),

    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("Query is empty")]
    EmptyQuery,
}
