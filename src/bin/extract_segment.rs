use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use patent_topics::normalize::Normalizer;
use patent_topics::segment::read_application;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <patent.xml> [language]", args[0]);
        eprintln!("Example: extract_segment SE539880C2.xml en");
        std::process::exit(1);
    }

    let path = PathBuf::from(&args[1]);
    let language = args.get(2).map(String::as_str).unwrap_or("en");

    let text = read_application(&path, language)
        .with_context(|| format!("failed to extract lang=\"{}\" text from {}", language, path.display()))?;
    println!("{}", text);

    let tokens = Normalizer::default().normalize(&text);
    let bigrams = tokens.iter().filter(|t| t.contains(' ')).count();
    println!();
    println!("Tokens: {} ({} unigrams, {} bigrams)", tokens.len(), tokens.len() - bigrams, bigrams);
    println!("{:?}", tokens);

    Ok(())
}
