//! Scoring, recommendation and assessment lifecycle for the Proof Your Health questionnaire.
//!
//! The [`assessment`] module holds the question catalog, the scoring engine and the service
//! that walks a user through one run of the survey. Configuration, telemetry and the
//! application error type are shared with the `proof-your-health-api` binary.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
