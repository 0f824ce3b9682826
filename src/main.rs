use anyhow::Context;
use clap::Parser;
use recipex::{standardize_features, FinderConfig, Recipe, RecipeFinder, SimilarResponse};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Find recipes similar to a reference recipe
#[derive(Parser, Debug)]
#[command(name = "recipex")]
#[command(about = "Rank recipes by multi-signal similarity", long_about = None)]
struct Args {
    /// JSON file holding an array of recipes
    #[arg(short, long)]
    corpus: PathBuf,

    /// Id of the reference recipe
    #[arg(short, long)]
    id: u64,

    /// Number of similar recipes to return (defaults to the configured top_n)
    #[arg(short = 'n', long)]
    top_n: Option<usize>,

    /// JSON finder configuration; missing keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Standardize the numeric features before indexing
    #[arg(long)]
    standardize: bool,

    /// Include the full recipe rows in the output
    #[arg(long)]
    full: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting recipex v{}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => FinderConfig::from_json_file(path)
            .with_context(|| format!("loading finder config {:?}", path))?,
        None => FinderConfig::default(),
    };

    let raw = std::fs::read_to_string(&args.corpus)
        .with_context(|| format!("reading corpus {:?}", args.corpus))?;
    let mut recipes: Vec<Recipe> =
        serde_json::from_str(&raw).with_context(|| format!("parsing corpus {:?}", args.corpus))?;
    info!("Loaded {} recipes from {:?}", recipes.len(), args.corpus);

    if args.standardize {
        standardize_features(&mut recipes, &config.numeric_feature_order)?;
        info!("Numeric features standardized");
    }

    let top_n = args.top_n.unwrap_or(config.top_n);
    let finder = RecipeFinder::from_recipes(recipes, config)?;
    finder.preprocess()?;

    let similar = finder
        .find_similar(args.id, top_n)
        .with_context(|| format!("finding recipes similar to {}", args.id))?;
    let candidates = finder.corpus().len().saturating_sub(1);
    let response = SimilarResponse::new(args.id, similar, candidates, args.full);

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
