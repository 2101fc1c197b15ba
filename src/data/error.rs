use thiserror::Error;

// ---------------------------------------------------------------------------
// Data-layer errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong between the HTTP request and a query result.
///
/// All variants are surfaced to the UI as a status message; a failed load
/// never leaves the dashboard silently running on an undefined table.
#[derive(Debug, Error)]
pub enum DataError {
    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("request for {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("download of {url} failed with HTTP status {status}")]
    Fetch {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Malformed workbook bytes, or the named worksheet is absent.
    #[error("could not read workbook")]
    Parse(#[from] calamine::XlsxError),

    /// The worksheet exists but has no header row at all.
    #[error("sheet {0:?} has no header row")]
    EmptySheet(String),

    /// No column name contains the required marker substring.
    #[error("no column name contains {marker:?}")]
    ColumnNotFound { marker: String },

    /// Aggregation or ranking was requested over zero rows.
    #[error("no rows to aggregate")]
    EmptyTable,
}
