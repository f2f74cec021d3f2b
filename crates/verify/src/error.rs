use nucap_db::DbError;

use crate::step::Step;

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("DATABASE_URL is not set in environment variables")]
    MissingDatabaseUrl,

    #[error("Invalid configuration: {key}={value:?} ({reason})")]
    InvalidConfig {
        key: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Migrations failed: {0}")]
    Migrate(#[source] DbError),

    #[error("Step {} ({}) failed: {source}", .step.number(), .step.label())]
    Step {
        step: Step,
        #[source]
        source: DbError,
    },

    #[error("Step {} ({}) check failed: {message}", .step.number(), .step.label())]
    Check { step: Step, message: String },
}

impl VerifyError {
    /// `true` for errors raised before any client was constructed.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::MissingDatabaseUrl | Self::InvalidConfig { .. }
        )
    }

    /// The step that failed, if the error came from one.
    pub fn step(&self) -> Option<Step> {
        match self {
            Self::Step { step, .. } | Self::Check { step, .. } => Some(*step),
            _ => None,
        }
    }
}
