//! End-to-end verification of the university database through both the
//! lightweight sqlx handle and the diesel ORM client.

pub mod config;
pub mod connector;
pub mod error;
pub mod report;
pub mod runner;
pub mod step;

pub use config::VerifyConfig;
pub use error::VerifyError;
pub use runner::{run, RunSummary};
