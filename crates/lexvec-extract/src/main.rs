use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lexvec_core::MeasureParams;
use lexvec_engine::SemanticLexicon;
use lexvec_extract::{BackwardExtractor, ForwardExtractor};
use lexvec_wordnet::WordNet;

#[derive(Parser)]
#[command(
    name = "lexvec-extract",
    about = "Export WordNet words, senses and relations as indexed tables for embedding training"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// One line per word, with sense vectors (<root>/sense_vectors)
    Backward(Source),
    /// One line per sense, with word vectors (<root>/<lang>/word_vectors)
    Forward(Source),
}

#[derive(Args)]
struct Source {
    /// WordNet dict directory (data.* and index.* files)
    #[arg(long)]
    wordnet: PathBuf,
    /// Directory of Open Multilingual WordNet wn-data-<lang>.tab files
    #[arg(long)]
    omw: Option<PathBuf>,
    /// Root directory of the vector tables
    #[arg(long)]
    root: PathBuf,
    /// Output directory; one subdirectory per language
    #[arg(long, default_value = "extracted")]
    out: PathBuf,
    /// Measure parameters (JSON); only `dimensions` matters here
    #[arg(long)]
    params: Option<PathBuf>,
    /// Languages to extract
    #[arg(required = true)]
    langs: Vec<String>,
}

fn load(source: &Source) -> anyhow::Result<SemanticLexicon> {
    let mut wordnet = WordNet::open(&source.wordnet)
        .with_context(|| format!("loading WordNet from {:?}", source.wordnet))?;
    if let Some(omw) = &source.omw {
        wordnet = wordnet
            .with_omw(omw)
            .with_context(|| format!("loading OMW from {:?}", omw))?;
    }
    let params = match &source.params {
        Some(path) => MeasureParams::from_json_file(path)
            .with_context(|| format!("reading parameters from {:?}", path))?,
        None => MeasureParams::default(),
    };
    Ok(SemanticLexicon::with_params(wordnet, &source.root, params))
}

fn run(source: &Source, extract: impl Fn(&SemanticLexicon, &Path, &str) -> anyhow::Result<()>) -> anyhow::Result<()> {
    let lexicon = load(source)?;
    for lang in &source.langs {
        extract(&lexicon, &source.out, lang).with_context(|| format!("extracting {}", lang))?;
    }
    tracing::info!("done");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    match &cli.command {
        Commands::Backward(source) => run(source, |lexicon, out, lang| {
            BackwardExtractor::new(lexicon, out, lang)?.run()?;
            Ok(())
        }),
        Commands::Forward(source) => run(source, |lexicon, out, lang| {
            ForwardExtractor::new(lexicon, out, lang)?.run()?;
            Ok(())
        }),
    }
}
