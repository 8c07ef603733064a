use std::path::PathBuf;

use thiserror::Error;

/// Result type used across the lexvec crates.
pub type Result<T, E = DomainError> = std::result::Result<T, E>;

/// Every failure the measurement layer can report.
///
/// Nothing here is transient: all inputs are static files, so callers either
/// skip the offending entity or abort.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The `(name, pos, lang)` triple is not attested in the lexical database.
    #[error("word {name}.{pos}.{lang} is not defined in the lexical database")]
    UnknownWord {
        name: String,
        pos: String,
        lang: String,
    },

    /// A required vector resolved to the all-zero sentinel.
    #[error("no vector data for {0}")]
    NoVectorData(String),

    /// Ambiguity has nothing to normalise against.
    #[error("all frequencies are 0 for {0}")]
    AllFrequenciesZero(String),

    /// No sense pair of the two words has a finite path in the semantic graph.
    #[error("{0} and {1} are not connected")]
    Disconnected(String, String),

    #[error("{0} is not registered as a topic")]
    UnknownTopic(String),

    #[error("language {0} is not supported")]
    UnsupportedLanguage(String),

    #[error("{0} is not a part-of-speech tag")]
    UnknownPos(String),

    #[error("{0} is not a relation symbol")]
    UnknownRelation(String),

    #[error("sense {0} does not exist")]
    UnknownSense(String),

    /// A resource file violates an invariant the store relies on
    /// (e.g. a frequency table whose total count is zero).
    #[error("corrupt resource {path:?}: {msg}")]
    CorruptResource { path: PathBuf, msg: String },

    /// A line could not be parsed.
    #[error("invalid format in {path:?} at line {line}: {msg}")]
    InvalidFormat {
        path: PathBuf,
        line: usize,
        msg: String,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DomainError {
    pub fn unknown_word(name: &str, pos: impl std::fmt::Display, lang: &str) -> Self {
        Self::UnknownWord {
            name: name.to_string(),
            pos: pos.to_string(),
            lang: lang.to_string(),
        }
    }

    pub fn invalid_format<S: Into<String>>(path: impl Into<PathBuf>, line: usize, msg: S) -> Self {
        Self::InvalidFormat {
            path: path.into(),
            line,
            msg: msg.into(),
        }
    }

    pub fn corrupt<S: Into<String>>(path: impl Into<PathBuf>, msg: S) -> Self {
        Self::CorruptResource {
            path: path.into(),
            msg: msg.into(),
        }
    }
}
