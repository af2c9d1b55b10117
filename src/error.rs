use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the extraction, normalization and topic search stages.
#[derive(Error, Debug)]
pub enum TopicError {
    #[error("no sections with lang=\"{language}\" found in the document")]
    NoMatchingLanguage { language: String },

    #[error("token stream is empty, cannot build a vocabulary")]
    EmptyCorpus,

    #[error("invalid topic range {min}..={max}")]
    InvalidTopicRange { min: usize, max: usize },

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("topic model error: {0}")]
    Model(String),
}

pub type Result<T> = std::result::Result<T, TopicError>;
