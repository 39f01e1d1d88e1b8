//! Error taxonomy for a comparison run.

use std::fmt;

use thiserror::Error;

/// Failure below the JSON layer: the request never produced a usable body.
#[derive(Error, Debug)]
pub enum TransportFailure {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("response body is not valid JSON: {0}")]
    Body(#[from] serde_json::Error),
}

/// Which part of a profile's request cycle failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Extracting,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Fetching => f.write_str("fetching"),
            Stage::Extracting => f.write_str("extracting"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    /// Rejected before any request is sent.
    #[error("invalid coordinate input {input:?}: {reason}")]
    InvalidInput { input: Vec<f64>, reason: &'static str },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportFailure,
    },

    /// The backend answered with a non-`Ok` status code in its body.
    #[error("backend answered with code `{code}`: {message}")]
    Backend { code: String, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("{profile} profile failed while {stage}: {source}")]
    Profile {
        profile: String,
        stage: Stage,
        #[source]
        source: Box<Error>,
    },

    #[error("failed to encode feature collection: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("visualization sink failed: {0}")]
    Sink(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn in_profile(self, profile: &str, stage: Stage) -> Self {
        Error::Profile {
            profile: profile.to_string(),
            stage,
            source: Box::new(self),
        }
    }

    /// Strips profile context and returns the underlying failure.
    pub fn root(&self) -> &Error {
        match self {
            Error::Profile { source, .. } => source.root(),
            other => other,
        }
    }

    /// Profile label attached to this error, if any.
    pub fn profile(&self) -> Option<&str> {
        match self {
            Error::Profile { profile, .. } => Some(profile),
            _ => None,
        }
    }
}
