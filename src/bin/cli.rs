use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use fuzzrank::{Extractor, Match, MatchConfig, Processor, ScorerKind};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fuzzrank")]
#[command(about = "Fuzzy string scoring and ranking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file (flags override it)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Scorer: ratio, partial_ratio, token_sort_ratio, token_set_ratio
    #[arg(short, long, global = true)]
    scorer: Option<String>,

    /// Preprocessing: none, default
    #[arg(short, long, global = true)]
    processor: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score two strings
    Score { a: String, b: String },

    /// Print the best matching choice
    One {
        /// Search query
        query: String,

        /// Candidates (read from --file or stdin when empty)
        choices: Vec<String>,

        /// Minimum score
        #[arg(long)]
        cutoff: Option<f64>,

        /// Read candidates from a file, one per line
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Print every choice at or above the cutoff
    Extract {
        /// Search query
        query: String,

        /// Candidates (read from --file or stdin when empty)
        choices: Vec<String>,

        /// Minimum score
        #[arg(long)]
        cutoff: Option<f64>,

        /// Read candidates from a file, one per line
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Sort by score, highest first
        #[arg(long)]
        sort: bool,

        /// Maximum results (implies --sort)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print one JSON object per match
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fuzzrank=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => MatchConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MatchConfig::default(),
    }
    .with_env_overrides()?;

    if let Some(scorer) = &cli.scorer {
        config.scorer = scorer.parse::<ScorerKind>()?;
    }
    if let Some(processor) = &cli.processor {
        config.processor = processor.parse::<Processor>()?;
    }

    match cli.command {
        Commands::Score { a, b } => {
            let extractor = Extractor::new(config)?;
            println!("{:.4}", extractor.score(&a, &b));
        }

        Commands::One { query, choices, cutoff, file } => {
            if let Some(cutoff) = cutoff {
                config.score_cutoff = cutoff;
            }
            let extractor = Extractor::new(config)?;
            let choices = load_choices(choices, file, io::stdin().lock())?;

            let best = extractor.extract_one(&query, &choices);
            match &best {
                Some(best) => println!("{}", best.display()),
                None => tracing::info!(query = %query, candidates = choices.len(), "no match"),
            }
            return Ok(ExitCode::from(exit_status(best.as_ref())));
        }

        Commands::Extract { query, choices, cutoff, file, sort, limit, json } => {
            if let Some(cutoff) = cutoff {
                config.score_cutoff = cutoff;
            }
            if limit.is_some() {
                config.limit = limit;
            }
            let sorted = wants_sorted(sort, config.limit);
            let extractor = Extractor::new(config)?;
            let choices = load_choices(choices, file, io::stdin().lock())?;

            let matches = if sorted {
                extractor.rank(&query, &choices)
            } else {
                extractor.extract(&query, &choices)
            };

            for line in render_matches(&matches, json)? {
                println!("{}", line);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Candidates from the inline arguments, `--file`, or `stdin`, in that order
/// of preference. Any read error aborts, so indices always equal line
/// positions.
fn load_choices<R: BufRead>(
    inline: Vec<String>,
    file: Option<PathBuf>,
    stdin: R,
) -> anyhow::Result<Vec<String>> {
    if !inline.is_empty() {
        if file.is_some() {
            bail!("pass candidates either inline or with --file, not both");
        }
        return Ok(inline);
    }

    match file {
        Some(path) => {
            let reader = File::open(&path)
                .map(BufReader::new)
                .with_context(|| format!("opening {}", path.display()))?;
            read_lines(reader).with_context(|| format!("reading {}", path.display()))
        }
        None => read_lines(stdin).context("reading stdin"),
    }
}

fn read_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    reader.lines().collect()
}

/// `--limit` needs ranked output, so it implies `--sort`
fn wants_sorted(sort: bool, limit: Option<usize>) -> bool {
    sort || limit.is_some()
}

/// 0 when a match was found, 1 otherwise
fn exit_status(best: Option<&Match>) -> u8 {
    if best.is_some() {
        0
    } else {
        1
    }
}

fn render_matches(matches: &[Match], json: bool) -> anyhow::Result<Vec<String>> {
    matches
        .iter()
        .map(|m| {
            if json {
                Ok(m.to_json()?)
            } else {
                Ok(m.display())
            }
        })
        .collect()
}
