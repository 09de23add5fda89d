use std::fs;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use serde::Deserialize;
use wernicke::{BuiltinScheme, CanonicalRule, TagDecoder};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON file holding an array of {"tokens": [...], "tags": [...]} records
    #[arg(short, long)]
    input: Option<PathBuf>,
}

/// One tokenized sentence with its per-token tag predictions, as produced by
/// an upstream tokenizer/model pair.
#[derive(Debug, Deserialize)]
struct TaggedSentence {
    tokens: Vec<String>,
    tags: Vec<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    info!("=== Starting Tag Decoder Demo ===");

    let decoder = TagDecoder::builder()
        .with_scheme(BuiltinScheme::ChartQueries)?
        .add_rule(CanonicalRule::new("PLOT_TYPE", "scatter", "scatter"))?
        .build()?;

    let info = decoder.info();
    info!(
        "Decoder ready: {} labels, categories {:?}",
        info.num_labels, info.categories
    );

    let sentences: Vec<TaggedSentence> = match &args.input {
        Some(path) => {
            info!("Reading tagged sentences from {}", path.display());
            serde_json::from_str(&fs::read_to_string(path)?)?
        }
        None => sample_sentences(),
    };

    info!("=== Running Decodes ===");
    for (i, sentence) in sentences.iter().enumerate() {
        info!("Decode {}/{}", i + 1, sentences.len());
        process_input(&decoder, sentence)?;
    }

    info!("=== Demo Complete ===");
    Ok(())
}

fn process_input(
    decoder: &TagDecoder,
    sentence: &TaggedSentence,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("\nDecoding: {}", sentence.tokens.join(" "));

    let entities = decoder.decode(&sentence.tokens, &sentence.tags)?;

    println!("{}", serde_json::to_string_pretty(&entities)?);
    Ok(())
}

fn sample_sentences() -> Vec<TaggedSentence> {
    fn sentence(tokens: &[&str], tags: &[usize]) -> TaggedSentence {
        TaggedSentence {
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
            tags: tags.to_vec(),
        }
    }

    vec![
        // Subword-split plot type
        sentence(
            &["Show", "me", "a", "##scatter", "##plot", "of", "Price", "vs", "Time"],
            &[0, 0, 0, 1, 2, 0, 3, 0, 5],
        ),
        // Bracketed unit inside an axis label
        sentence(
            &["Plot", "a", "bar", "chart", "of", "Revenue", "(", "USD", ")", "by", "Quarter"],
            &[0, 0, 1, 2, 0, 3, 4, 4, 4, 0, 5],
        ),
        // Mixed-case plot type collapsing to the canonical form
        sentence(
            &["I", "want", "a", "Scatter", "chart", "of", "Height", "vs", "Weight"],
            &[0, 0, 0, 1, 2, 0, 3, 0, 5],
        ),
        sentence(
            &["Draw", "a", "line", "graph", "showing", "Temperature", "over", "Days"],
            &[0, 0, 1, 2, 0, 5, 0, 3],
        ),
    ]
}
