use clap::{Args, Parser, Subcommand};
use std::process;
use swipe_engine::gesture::resample_path;
use swipe_engine::template::ideal_waypoints;
use swipe_engine::types::gesture_from_coords;
use swipe_engine::{GesturePoint, PredictionResponse, ScoringConfig, SwipeEngine, SwipeResult};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Decode swipe gestures into ranked words", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Word list: `word` or `word<TAB>count` per line.
    #[arg(global = true, short, long, default_value = "data/word_freq.txt")]
    dict: String,

    /// JSON file with scoring tunables.
    #[arg(global = true, long)]
    config: Option<String>,

    /// Popularity blend factor in [0, 1].
    #[arg(global = true, long)]
    pop_weight: Option<f64>,

    #[arg(global = true, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a path given as "x1,y1;x2,y2;..." and print the JSON result.
    Predict(PredictArgs),
    /// Synthesize a word's swipe (optionally jittered) and decode it.
    Trace(TraceArgs),
    /// Report how well each word is recovered from its own ideal swipe.
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug)]
struct PredictArgs {
    path: String,
    #[arg(short, long, default_value_t = 5)]
    limit: i64,
}

#[derive(Args, Debug)]
struct TraceArgs {
    word: String,
    #[arg(short, long, default_value_t = 5)]
    limit: usize,
    /// Maximum per-sample jitter, in key widths.
    #[arg(long, default_value_t = 0.0)]
    jitter: f64,
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Words to check; defaults to a built-in mix of easy and hard shapes.
    words: Vec<String>,
    #[arg(long, default_value_t = 0.1)]
    jitter: f64,
}

const DEFAULT_ANALYZE_WORDS: [&str; 24] = [
    // top row only
    "typewriter", "pretty", "quote", "power", "write", "tree",
    // bottom row heavy
    "vim", "zinc", "man", "can",
    // diagonals
    "lazy", "quartz", "pixel", "jump", "quiz",
    // short and common
    "the", "and", "for", "you", "are", "was", "his", "her", "has",
];

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run(cli) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> SwipeResult<()> {
    let config = match &cli.config {
        Some(path) => {
            info!("Loading scoring config from {}", path);
            ScoringConfig::load_from_file(path)?
        }
        None => ScoringConfig::default(),
    };

    let engine = SwipeEngine::with_config(config);
    let count = engine.load_dictionary_from_path(&cli.dict)?;
    info!("Dictionary ready: {} words", count);
    if let Some(w) = cli.pop_weight {
        engine.set_pop_weight(w);
    }

    match cli.command {
        Commands::Predict(args) => {
            println!("{}", engine.predict_json(&args.path, args.limit)?);
        }
        Commands::Trace(args) => {
            let raw = synthesize(&engine, &args.word, args.jitter, args.seed)?;
            let preds = engine.predict(&raw, args.limit)?;
            println!("{}", PredictionResponse::new(&preds).to_json()?);
        }
        Commands::Analyze(args) => analyze(&engine, &args)?,
    }
    Ok(())
}

/// Dense samples along `word`'s ideal path, with deterministic jitter.
fn synthesize(engine: &SwipeEngine, word: &str, jitter: f64, seed: u64) -> SwipeResult<Vec<GesturePoint>> {
    let waypoints = ideal_waypoints(&word.to_lowercase(), engine.layout())?;
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut noise = move || (rng.f64() - 0.5) * 2.0 * jitter;

    let mut coords: Vec<(f64, f64)> = resample_path(&waypoints, 120)
        .iter()
        .map(|p| (p.x + noise(), p.y + noise()))
        .collect();
    // A single-key word still needs extent.
    if waypoints.len() == 1 {
        let (x, y) = coords[0];
        coords.push((x + 0.05, y));
    }
    Ok(gesture_from_coords(&coords))
}

fn analyze(engine: &SwipeEngine, args: &AnalyzeArgs) -> SwipeResult<()> {
    let words: Vec<String> = if args.words.is_empty() {
        DEFAULT_ANALYZE_WORDS.iter().map(|w| w.to_string()).collect()
    } else {
        args.words.clone()
    };

    println!("=== Self-rank with jitter {:.2} ===\n", args.jitter);
    let mut hits = 0usize;
    let mut tested = 0usize;

    for (i, word) in words.iter().enumerate() {
        if !engine.contains(word) {
            println!("{:15} -> not in dictionary", word);
            continue;
        }
        let raw = synthesize(engine, word, args.jitter, i as u64 + 1)?;
        let preds = engine.predict(&raw, 5)?;
        tested += 1;

        let rank = preds.iter().position(|p| p.word == *word).map(|r| r + 1);
        if rank == Some(1) {
            hits += 1;
        }
        let rank_str = rank
            .map(|r| format!("#{}", r))
            .unwrap_or_else(|| "not in top 5".to_string());
        match preds.first() {
            Some(top) => println!(
                "{:15} -> top: {:15} (score: {:.4}) | self rank: {}",
                word, top.word, top.score, rank_str
            ),
            None => println!("{:15} -> no candidates", word),
        }
    }

    if tested > 0 {
        println!(
            "\nTop-1 accuracy: {}/{} ({:.1}%)",
            hits,
            tested,
            100.0 * hits as f64 / tested as f64
        );
    }
    Ok(())
}
