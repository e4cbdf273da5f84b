use thiserror::Error;

/// Errors raised while talking to an image-analysis provider.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("API key is missing")]
    MissingApiKey,
    #[error("Unsupported AI provider: {0}")]
    UnsupportedProvider(String),
    #[error("No AI provider was configured")]
    MissingAiProvider,
}

/// Errors raised while fetching an image or decoding its EXIF block.
///
/// These never leave the metadata boundary; they are logged and turned into
/// an empty metadata record.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Failed to fetch image: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("Image request to {url} failed with status {status}")]
    FetchStatus { url: String, status: u16 },
    #[error("Failed to decode EXIF data: {0}")]
    Decode(#[from] exif::Error),
}

/// Errors raised while writing the final output artifact.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write output file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize JSON output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to write CSV output: {0}")]
    Csv(#[from] csv::Error),
    #[error("Unknown output format: {0}")]
    UnknownFormat(String),
}
