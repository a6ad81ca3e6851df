/// Error types for the hazard core
use thiserror::Error;

/// Main error type for catalog loading, rainfall fetching and aggregation.
///
/// Fetch-level variants never escape [`crate::fetcher::RainfallFetcher`];
/// they are logged and folded into a fallback measurement.
#[derive(Error, Debug)]
pub enum HazardError {
    /// HTTP request failed
    #[cfg(feature = "api")]
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Weather endpoint answered with a non-success status
    #[error("Bad response status: {0}")]
    BadStatus(u16),

    /// Request did not resolve before the deadline
    #[error("Request timed out after {0} ms")]
    Timeout(u128),

    /// Response body did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Daily precipitation series too short to cover 48 hours
    #[error("Precipitation series too short (needed: {needed}, found: {found})")]
    ShortSeries { needed: usize, found: usize },

    /// A day inside the 48 hour window had no value
    #[error("Missing precipitation value for day {0}")]
    MissingDailyValue(usize),

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// Failed to parse JSON data
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Unknown risk tier or threat type label
    #[error("Invalid label: {0}")]
    InvalidLabel(String),

    /// Boundary polygon with fewer than three vertices
    #[error("District {id} has an invalid boundary ({vertices} vertices)")]
    InvalidPolygon { id: String, vertices: usize },

    /// Two catalog entries share an id
    #[error("Duplicate id in catalog: {0}")]
    DuplicateId(String),

    /// Measurement keyed by a district the snapshot does not know
    #[error("Unknown district: {0}")]
    UnknownDistrict(String),

    /// Snapshot read before every district reported
    #[error("Aggregation snapshot is still pending ({missing} districts outstanding)")]
    SnapshotPending { missing: usize },
}

/// Type alias for Results using HazardError
pub type Result<T> = std::result::Result<T, HazardError>;
