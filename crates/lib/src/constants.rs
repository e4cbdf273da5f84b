//! # Shared Constants
//!
//! Defaults and sentinel values shared by the library and the CLI.

/// Concurrency bound used when none is configured or the value is not a number.
pub const DEFAULT_CONCURRENCY: i64 = 5;

/// Category assigned when the model gives none or the analysis failed.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Caption assigned when the analysis failed or its response could not be parsed.
pub const UNAVAILABLE_CAPTION: &str = "description unavailable";

/// The default model used for image analysis.
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// The OpenAI Responses API endpoint.
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/responses";

/// The default file holding the newline-delimited list of image URLs.
pub const DEFAULT_URLS_FILE: &str = "urls.txt";

/// Default output file names per output format.
pub const DEFAULT_JSON_OUTPUT: &str = "captions.json";
pub const DEFAULT_CSV_OUTPUT: &str = "captions.csv";

/// Separator used to join categories into a single CSV cell.
pub const CSV_CATEGORY_SEPARATOR: &str = "|";
