use std::{env, fs, io::{self, Write}, path::Path, time::Instant};

use anyhow::{bail, Context};
use cv_matcher::{BatchScorer, Document, MatchError, RawDocument, ScoringConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
    Cbor,
}

struct CliArgs {
    job: String,
    cvs: Vec<String>,
    config_path: Option<String>,
    mode: Option<String>,
    method: Option<String>,
    parallel: bool,
    sort: bool,
    format: OutputFormat,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let mut config = match &args.config_path {
        Some(path) => ScoringConfig::from_json_file(path)?,
        None => ScoringConfig::default(),
    };
    if let Some(mode) = &args.mode {
        config.mode = mode.parse()?;
    }
    if let Some(method) = &args.method {
        config.method = method.parse()?;
    }
    config.parallel |= args.parallel;
    let scorer = BatchScorer::from_config(&config)?;

    let job = RawDocument::new(args.job.clone(), fs::read(&args.job).with_context(|| format!("reading job description {}", args.job))?)
        .decode()
        .with_context(|| format!("job description {} is unreadable", args.job))?;
    let cvs: Vec<(String, Result<Document, MatchError>)> = args.cvs.iter().map(|path| load_cv(path)).collect();
    for (id, doc) in &cvs {
        if let Ok(doc) = doc {
            if doc.ensure_terms(scorer.vectorizer().analyzer()).is_err() {
                warn!(cv = %id, "no terms left after stop-word removal, score will be 0");
            }
        }
    }

    let start = Instant::now();
    let mut results = scorer.score_decoded(job.text(), &cvs);
    info!(
        cvs = results.len(),
        mode = %config.mode,
        method = %config.method,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "scoring done"
    );
    if args.sort {
        results.sort_by_relevance();
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Table => write!(out, "{}", results.table(config.round_digits))?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &results)?;
            writeln!(out)?;
        }
        OutputFormat::Cbor => serde_cbor::to_writer(&mut out, &results)?,
    }
    out.flush()?;
    Ok(())
}

/// Read and decode a CV file. Read and decode failures stay attached to the CV.
fn load_cv(path: &str) -> (String, Result<Document, MatchError>) {
    let id = Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string();
    let doc = match fs::read(path) {
        Ok(bytes) => RawDocument::new(id.clone(), bytes).decode(),
        Err(e) => Err(MatchError::decode_failure(&id, format!("cannot read file: {e}"))),
    };
    (id, doc)
}

fn parse_args() -> anyhow::Result<Option<CliArgs>> {
    let mut args = env::args().skip(1);
    let mut job: Option<String> = None;
    let mut cvs = Vec::new();
    let mut config_path = None;
    let mut mode = None;
    let mut method = None;
    let mut parallel = false;
    let mut sort = false;
    let mut format = OutputFormat::Table;
    while let Some(a) = args.next() {
        match a.as_str() {
            "--job" | "-j" => job = Some(args.next().context("--job requires a path")?),
            "--mode" | "-m" => mode = Some(args.next().context("--mode requires tfidf, count or hashing")?),
            "--method" => method = Some(args.next().context("--method requires cosine, euclidean or jaccard")?),
            "--config" | "-c" => config_path = Some(args.next().context("--config requires a path")?),
            "--format" | "-f" => {
                format = match args.next().context("--format requires table, json or cbor")?.as_str() {
                    "table" => OutputFormat::Table,
                    "json" => OutputFormat::Json,
                    "cbor" => OutputFormat::Cbor,
                    other => bail!("unknown output format `{other}`, choose table, json or cbor"),
                }
            }
            "--parallel" => parallel = true,
            "--sort" => sort = true,
            "-h" | "--help" => {
                print_usage();
                return Ok(None);
            }
            other if other.starts_with('-') => bail!("unknown option `{other}`"),
            other => cvs.push(other.to_string()),
        }
    }
    let Some(job) = job else {
        print_usage();
        bail!("missing --job");
    };
    if cvs.is_empty() {
        print_usage();
        bail!("no CV files given");
    }
    Ok(Some(CliArgs { job, cvs, config_path, mode, method, parallel, sort, format }))
}

fn print_usage() {
    eprintln!("Usage: cv-matcher --job FILE [--mode tfidf|count|hashing] [--method cosine|euclidean|jaccard]");
    eprintln!("                  [--config FILE.json] [--format table|json|cbor] [--sort] [--parallel] CV...");
    eprintln!("Log level is read from RUST_LOG (default: warn).");
}
