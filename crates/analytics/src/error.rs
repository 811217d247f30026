use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Cannot aggregate an empty list of marks.")]
    EmptyInput,

    #[error("Inconsistent data: {0}")]
    DataIntegrity(String),
}
