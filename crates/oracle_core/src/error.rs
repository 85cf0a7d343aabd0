use std::path::PathBuf;

use shared::domain::{SessionState, UserAction};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot {action} while {from}")]
    InvalidTransition {
        from: SessionState,
        action: UserAction,
    },
}

/// Why a reason fetch failed. The controller folds every variant into the fallback.
#[derive(Debug, Error)]
pub enum ReasonFetchError {
    #[error("reason request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("reason service answered with status {status}")]
    Status { status: u16 },
    #[error("malformed reason body: {0}")]
    Malformed(String),
    #[error("reason service returned an empty reason")]
    EmptyReason,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{list} phrase list is empty")]
    Empty { list: &'static str },
    #[error("{list} phrase list has a blank entry at index {index}")]
    BlankPhrase { list: &'static str, index: usize },
    #[error("failed reading {list} phrase file {}: {source}", path.display())]
    Read {
        list: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed parsing {list} phrases: {source}")]
    Parse {
        list: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed reading settings file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed parsing settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid reason endpoint '{value}': {source}")]
    InvalidEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("fallback reason must not be blank")]
    BlankFallback,
}
