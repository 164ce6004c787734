#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Source file not found: {0}")]
    SourceNotFound(String),

    #[error("Source is not a file: {0}")]
    SourceNotAFile(String),

    #[error("Output path exists and is not a directory: {0}")]
    OutputNotADirectory(String),

    #[error("Invalid depth: {0}")]
    InvalidDepth(String),
}
