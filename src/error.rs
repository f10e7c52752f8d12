use crate::wizard::Step;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the evaluation client, the draft store and the wizard
#[derive(Debug, Error)]
pub enum SurveyError {
    /// The request never produced a response
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status
    #[error("{url} returned {status}: {body}")]
    HttpStatus { url: String, status: u16, body: String },
    /// The body was not valid JSON or did not match the expected schema
    #[error("malformed response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    /// The draft file could not be written
    #[error("failed to write draft {}: {source}", path.display())]
    DraftIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Rating inputs do not line up with the models on the current page
    #[error("expected ratings for {expected} models on this page, got {got}")]
    PageMismatch { expected: usize, got: usize },
    /// A handler was invoked outside the step it belongs to
    #[error("action requires step {expected:?} but the survey is at {actual:?}")]
    InvalidStep { expected: Step, actual: Step },
}

pub type Result<T> = std::result::Result<T, SurveyError>;
