// patent-topics: topic decomposition of a single multilingual patent document.
//
// Pipeline: document -> segment -> normalize -> selection -> report.

pub mod coherence;
pub mod config;
pub mod corpus;
pub mod document;
pub mod error;
pub mod lemmatize;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod segment;
pub mod selection;
pub mod stopwords;
pub mod topic_modeling;
pub mod traits;

pub use error::{Result, TopicError};
