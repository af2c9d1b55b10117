// extract -> normalize -> select -> report

use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::coherence::CvCoherence;
use crate::config::Config;
use crate::document::Document;
use crate::error::{Result, TopicError};
use crate::lemmatize::MorphyLemmatizer;
use crate::normalize::Normalizer;
use crate::report::TopicReport;
use crate::segment::SegmentExtractor;
use crate::selection::{SelectionConfig, TopicCountSelector};
use crate::stopwords::StopwordSet;
use crate::topic_modeling::{GibbsLDA, LDAConfig};

pub fn normalizer_for(config: &Config) -> Normalizer {
    Normalizer::new(
        StopwordSet::english(config.stopwords),
        Arc::new(MorphyLemmatizer::new()),
    )
}

pub fn selector_for(config: &Config) -> TopicCountSelector<GibbsLDA, CvCoherence> {
    let modeler = GibbsLDA::new(LDAConfig {
        iterations: config.iterations,
        seed: config.seed,
        ..LDAConfig::default()
    });
    let selection = SelectionConfig {
        min_topics: config.min_topics,
        max_topics: config.max_topics,
        passes: config.passes,
        top_words: config.top_words,
        parallel: config.parallel,
    };
    TopicCountSelector::new(modeler, CvCoherence::default(), selection)
}

/// Extract and normalize the target-language text of an XML document.
pub fn tokens_from_xml(xml: &str, config: &Config) -> Result<Vec<String>> {
    let document = Document::parse(xml)?;
    let text = SegmentExtractor::new(&config.language).extract(&document)?;
    let tokens = normalizer_for(config).normalize(&text);
    info!(tokens = tokens.len(), "Normalized segment");
    Ok(tokens)
}

pub fn analyze_tokens(tokens: &[String], config: &Config) -> Result<TopicReport> {
    let selection = selector_for(config).select(tokens)?;
    let topic_prevalence = selection.model.document_topics(0);

    Ok(TopicReport {
        source: None,
        language: config.language.clone(),
        generated_at: Utc::now(),
        token_count: tokens.len(),
        vocabulary_size: selection.model.vocabulary.len(),
        optimal_num_topics: selection.best_k,
        candidates: selection.scores,
        topic_prevalence,
        topics: selection.summaries,
    })
}

pub fn analyze_xml(xml: &str, config: &Config) -> Result<TopicReport> {
    let tokens = tokens_from_xml(xml, config)?;
    analyze_tokens(&tokens, config)
}

pub fn analyze_file(path: &Path, config: &Config) -> Result<TopicReport> {
    info!(path = %path.display(), "Reading document");
    let xml = fs::read_to_string(path).map_err(|source| TopicError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut report = analyze_xml(&xml, config)?;
    report.source = Some(path.display().to_string());
    Ok(report)
}
