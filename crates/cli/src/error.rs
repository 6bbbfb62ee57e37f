//! CLI error type.

use thiserror::Error;

use handcraft_storefront::AppError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Log the error, capturing storefront faults to Sentry.
    pub fn report(&self) {
        match self {
            Self::App(e) => e.report(),
            Self::Output(e) => {
                let event_id = sentry::capture_error(e);
                tracing::error!(error = %e, sentry_event_id = %event_id, "Output error");
            }
        }
    }
}

impl From<handcraft_storefront::config::ConfigError> for CliError {
    fn from(e: handcraft_storefront::config::ConfigError) -> Self {
        Self::App(AppError::from(e))
    }
}
