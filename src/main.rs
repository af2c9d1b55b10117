use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use patent_topics::config::Config;
use patent_topics::pipeline;
use patent_topics::stopwords::StopwordSource;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Patent full-text XML file
    path: PathBuf,
    #[clap(short, long, help = "Language code of the segment to analyze (default: en)")]
    language: Option<String>,
    #[clap(long, help = "Smallest number of topics to try")]
    min_topics: Option<usize>,
    #[clap(long, help = "Largest number of topics to try")]
    max_topics: Option<usize>,
    #[clap(short, long, help = "Training passes per fit")]
    passes: Option<usize>,
    #[clap(short, long, help = "Gibbs sweeps per pass")]
    iterations: Option<usize>,
    #[clap(short, long, help = "Random seed for reproducible fits")]
    seed: Option<u64>,
    #[clap(short, long, help = "Words listed per topic")]
    top_words: Option<usize>,
    #[clap(long, help = "Stopword list: nltk or iso")]
    stopwords: Option<StopwordSource>,
    #[clap(long, help = "Fit candidate topic counts one after another")]
    sequential: bool,
    #[clap(long, help = "Print the report as JSON")]
    json: bool,
    #[clap(long, help = "Print the normalized tokens before the topic search")]
    show_tokens: bool,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(language) = &self.language {
            config.language = language.clone();
        }
        if let Some(min_topics) = self.min_topics {
            config.min_topics = min_topics;
        }
        if let Some(max_topics) = self.max_topics {
            config.max_topics = max_topics;
        }
        if let Some(passes) = self.passes {
            config.passes = passes;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(top_words) = self.top_words {
            config.top_words = top_words;
        }
        if let Some(stopwords) = self.stopwords {
            config.stopwords = stopwords;
        }
        if self.sequential {
            config.parallel = false;
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("patent_topics=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = Config::load()?;
    args.apply(&mut config);
    info!(?config, "Loaded configuration");

    let xml = std::fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    let tokens = pipeline::tokens_from_xml(&xml, &config)
        .with_context(|| format!("failed to extract text from {}", args.path.display()))?;

    if args.show_tokens {
        println!("{:?}", tokens);
    }

    let mut report = pipeline::analyze_tokens(&tokens, &config).context("topic search failed")?;
    report.source = Some(args.path.display().to_string());

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        report.print_candidates();
        report.print_summary();
    }

    Ok(())
}
