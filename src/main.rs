use anyhow::Context;
use chemomatch::{
    annotate, build_ideal_profile, classify, compare_candidate, find_similar, Catalogue,
    CompareMode, EngineConfig, FallbackGenerator, InMemoryCatalogue, RequestContext, Resolver,
    SimilarityEngine,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

/// Chemotype matching for cannabis cultivars
#[derive(Parser, Debug)]
#[command(name = "chemomatch")]
#[command(about = "Chemotype similarity for cannabis cultivars", long_about = None)]
struct Args {
    /// Catalogue JSON file (defaults to the built-in cultivars)
    #[arg(long, global = true)]
    catalogue: Option<PathBuf>,

    /// Engine config JSON file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for generating unknown cultivars
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log level
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Aggregate cultivars into an ideal profile
    Profile {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Compare a candidate against favorite cultivars
    Compare {
        candidate: String,
        #[arg(long, num_args = 1.., required = true)]
        favorites: Vec<String>,
        #[arg(long, value_enum, default_value_t = Mode::Ideal)]
        mode: Mode,
    },
    /// Rate a similarity score
    Classify {
        #[arg(allow_negative_numbers = true)]
        score: f64,
    },
    /// Describe the dominant terpenes of a cultivar
    Annotate { name: String },
    /// Catalogue cultivars closest to the favorites
    Similar {
        #[arg(long, num_args = 1.., required = true)]
        favorites: Vec<String>,
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// List catalogue cultivars
    List,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    Ideal,
    Ranked,
    RankedZscore,
}

impl From<Mode> for CompareMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Ideal => CompareMode::Ideal,
            Mode::Ranked => CompareMode::RankedIndividual,
            Mode::RankedZscore => CompareMode::RankedZScored,
        }
    }
}

#[derive(Serialize)]
struct Rating {
    score: f64,
    rating: chemomatch::MatchRating,
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

    let catalogue = match &args.catalogue {
        Some(path) => InMemoryCatalogue::from_path(path)
            .with_context(|| format!("loading catalogue {}", path.display()))?,
        None => InMemoryCatalogue::builtin()?,
    };
    let generator = match args.seed {
        Some(seed) => FallbackGenerator::with_seed(seed),
        None => FallbackGenerator::new(),
    };
    let resolver = Resolver::new(catalogue, generator);

    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            EngineConfig::from_json_str(&json)?
        }
        None => EngineConfig::default(),
    };
    debug!(?config, "Engine configured");
    let engine = SimilarityEngine::new(config);

    match args.command {
        Command::Profile { names } => {
            let ctx = RequestContext::new("cli").with_favorites(names);
            print_json(&build_ideal_profile(&ctx, &resolver)?)
        }
        Command::Compare {
            candidate,
            favorites,
            mode,
        } => {
            let mode = CompareMode::from(mode);
            let ctx = match mode {
                CompareMode::Ideal => RequestContext::new("cli").with_favorites(favorites),
                _ => RequestContext::new("cli").with_ranked_favorites(favorites),
            };
            print_json(&compare_candidate(&ctx, &resolver, &engine, &candidate, mode)?)
        }
        Command::Classify { score } => print_json(&Rating {
            score,
            rating: classify(score),
        }),
        Command::Annotate { name } => {
            let record = resolver.resolve(&name)?;
            print_json(&annotate(
                record.terpenes.iter().map(|(id, v)| (id.as_str(), *v)),
            ))
        }
        Command::Similar { favorites, limit } => {
            let ctx = RequestContext::new("cli").with_favorites(favorites);
            print_json(&find_similar(&ctx, &resolver, &engine, Some(limit))?)
        }
        Command::List => print_json(&resolver.catalogue().names()),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
