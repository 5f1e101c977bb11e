use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightError {
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Missing data: {0}")]
    MissingData(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
