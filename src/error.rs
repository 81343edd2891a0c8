use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScoreError>;

pub const API_ERROR_PREFIX: &str = "API error : ";
pub const LOADING_MESSAGE: &str = "Loading...";
pub const NO_DATA_MESSAGE: &str = "No data available";
pub const NO_COMMITS_MESSAGE: &str = "No commits available";
pub const NETWORK_ERROR_MESSAGE: &str = "Error fetching data";

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Error fetching data")]
    Network(#[source] reqwest::Error),
    #[error("{0}")]
    HttpStatus(String),
    #[error("Invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("No data available")]
    NoData,
    #[error("No commits available")]
    NoCommits,
    #[error("Invalid username: {0:?}")]
    InvalidUsername(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScoreError {
    /// True for the two notices that mean "nothing to draw" rather than a failure.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, ScoreError::NoData | ScoreError::NoCommits)
    }
}

impl From<reqwest::Error> for ScoreError {
    fn from(err: reqwest::Error) -> Self {
        ScoreError::Network(err)
    }
}

/// Text for the status line: `None` clears it, the loading and no-data notices
/// pass through as-is, everything else is an API error.
pub fn status_line(message: Option<&str>) -> Option<String> {
    match message {
        None => None,
        Some(m @ (LOADING_MESSAGE | NO_DATA_MESSAGE | NO_COMMITS_MESSAGE)) => Some(m.to_string()),
        Some(m) => Some(format!("{API_ERROR_PREFIX}{m}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_line_prefixes_api_errors() {
        assert_eq!(status_line(Some("Not Found")), Some("API error : Not Found".to_string()));
        assert_eq!(
            status_line(Some(NETWORK_ERROR_MESSAGE)),
            Some("API error : Error fetching data".to_string())
        );
    }

    #[test]
    fn status_line_passes_notices_through() {
        assert_eq!(status_line(None), None);
        assert_eq!(status_line(Some("Loading...")), Some("Loading...".to_string()));
        assert_eq!(status_line(Some("No data available")), Some("No data available".to_string()));
        assert_eq!(
            status_line(Some("No commits available")),
            Some("No commits available".to_string())
        );
    }

    #[test]
    fn http_status_displays_reason_only() {
        let err = ScoreError::HttpStatus("Forbidden".to_string());
        assert_eq!(status_line(Some(&err.to_string())), Some("API error : Forbidden".to_string()));
        assert!(!err.is_empty_result());
        assert!(ScoreError::NoData.is_empty_result());
    }
}
