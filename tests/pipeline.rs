// End-to-end runs over small patent-like XML documents: extraction,
// normalization and the topic search through the public pipeline API.

use std::io::Write;

use patent_topics::config::Config;
use patent_topics::pipeline::{analyze_file, analyze_xml, tokens_from_xml};
use patent_topics::segment::read_application;
use patent_topics::TopicError;

const PATENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE patent-document SYSTEM "patent-document.dtd">
<patent-document lang="sv" country="SE">
  <abstract lang="sv"><p>Uppfinningen avser en ventil med ett säte.</p></abstract>
  <abstract lang="en">
    <p>The invention relates to a valve having a valve seat and a spring.</p>
    <p>The spring presses the valve body against the valve seat.</p>
  </abstract>
  <description>
    <p>A pump drives fluid through the valve. The pump motor turns a shaft.</p>
    <p>Bearings support the shaft of the pump motor.</p>
  </description>
  <claims lang="sv"><claim>En ventil enligt krav 1.</claim></claims>
  <claims lang="en"><claim>A valve according to claim 1.</claim></claims>
</patent-document>
"#;

fn config() -> Config {
    Config {
        min_topics: 2,
        max_topics: 4,
        passes: 2,
        iterations: 5,
        seed: Some(17),
        ..Config::default()
    }
}

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn extracts_only_the_first_english_run() {
    let file = write_temp(PATENT);
    let text = read_application(file.path(), "en").unwrap();

    assert!(text.starts_with("The invention relates to a valve"));
    assert!(text.contains("Bearings support the shaft"));
    assert!(!text.contains("Uppfinningen"));
    assert!(!text.contains("claim 1"));
}

#[test]
fn tokens_are_normalized() {
    let tokens = tokens_from_xml(PATENT, &config()).unwrap();

    assert!(tokens.contains(&"valve".to_string()));
    assert!(tokens.contains(&"bearing".to_string()));
    assert!(tokens.contains(&"valve seat".to_string()));
    assert!(!tokens.contains(&"the".to_string()));
    assert!(tokens.iter().all(|t| t.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == ' ')));
}

#[test]
fn analyze_file_produces_report() {
    let file = write_temp(PATENT);
    let report = analyze_file(file.path(), &config()).unwrap();

    assert!((2..=4).contains(&report.optimal_num_topics));
    assert_eq!(report.candidates.len(), 3);
    assert_eq!(report.topics.len(), report.optimal_num_topics);
    assert_eq!(report.topic_prevalence.len(), report.optimal_num_topics);
    assert!((report.topic_prevalence.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    assert!(report.coherence_of_best().is_some());
    assert_eq!(report.source.as_deref(), Some(file.path().display().to_string().as_str()));
    assert!(report.token_count > report.vocabulary_size / 2);
}

#[test]
fn fixed_range_fits_single_candidate() {
    let config = Config {
        min_topics: 2,
        max_topics: 2,
        ..config()
    };
    let report = analyze_xml(PATENT, &config).unwrap();
    assert_eq!(report.optimal_num_topics, 2);
    assert_eq!(report.candidates.len(), 1);
}

#[test]
fn json_report_round_trips_through_serde() {
    let report = analyze_xml(PATENT, &config()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(value["language"], "en");
    assert_eq!(value["optimal_num_topics"], report.optimal_num_topics);
}

#[test]
fn missing_language_is_an_error() {
    let config = Config {
        language: "fr".to_string(),
        ..config()
    };
    let err = analyze_xml(PATENT, &config).unwrap_err();
    assert!(matches!(err, TopicError::NoMatchingLanguage { ref language } if language == "fr"));
}

#[test]
fn stopword_only_text_is_an_empty_corpus() {
    let xml = r#"<doc><p lang="en">The!</p></doc>"#;
    let err = analyze_xml(xml, &config()).unwrap_err();
    assert!(matches!(err, TopicError::EmptyCorpus));
}

#[test]
fn malformed_xml_propagates_parser_error() {
    let err = analyze_xml("<doc><p lang=\"en\">text</doc>", &config()).unwrap_err();
    assert!(matches!(err, TopicError::Xml(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = analyze_file(std::path::Path::new("/nonexistent/patent.xml"), &config()).unwrap_err();
    assert!(matches!(err, TopicError::Io { .. }));
}
