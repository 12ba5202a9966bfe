use thiserror::Error;

/// Internal failure taxonomy for one analysis request. The external
/// contract collapses every variant into `{"error": "Blocked"}`; the
/// distinction only exists for logging.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned {0}")]
    UpstreamStatus(reqwest::StatusCode),
}
