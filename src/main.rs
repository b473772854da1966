#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use sparse_life::pattern::{self, LoadReport};
use sparse_life::{EngineKind, Life, LifeConfig, PatternError};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: sparse-life [--engine weighted|block] [--steps N] [--delay-ms N] \
[--log-every N] [--print] [PATTERN.rle]\n\
Without a pattern file, `(x, y)` lines are read from stdin.";

struct MainArgs {
    config: LifeConfig,
    /// `None` runs until interrupted.
    steps: Option<u64>,
    delay: Duration,
    log_every: u64,
    print: bool,
    pattern: Option<PathBuf>,
}

fn next_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<&'a str, String> {
    iter.next()
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_args(config: LifeConfig) -> Result<MainArgs, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    parse_args_from(&args, config)
}

fn parse_args_from(args: &[String], config: LifeConfig) -> Result<MainArgs, String> {
    let mut parsed = MainArgs {
        config,
        steps: None,
        delay: Duration::ZERO,
        log_every: 100,
        print: false,
        pattern: None,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--engine" => {
                let kind: EngineKind = next_value(&mut iter, "--engine")?
                    .parse()
                    .map_err(|e| format!("{e}"))?;
                parsed.config = parsed.config.engine(kind);
            }
            "--steps" => {
                let n: u64 = next_value(&mut iter, "--steps")?
                    .parse()
                    .map_err(|_| "--steps requires a non-negative integer".to_string())?;
                parsed.steps = Some(n);
            }
            "--delay-ms" => {
                let ms: u64 = next_value(&mut iter, "--delay-ms")?
                    .parse()
                    .map_err(|_| "--delay-ms requires a non-negative integer".to_string())?;
                parsed.delay = Duration::from_millis(ms);
            }
            "--log-every" => {
                parsed.log_every = next_value(&mut iter, "--log-every")?
                    .parse()
                    .map_err(|_| "--log-every requires a non-negative integer".to_string())?;
            }
            "--print" => parsed.print = true,
            "-h" | "--help" => return Err(USAGE.to_string()),
            other if other.starts_with('-') => {
                return Err(format!("unknown argument: {other}\n{USAGE}"));
            }
            path => {
                if parsed.pattern.replace(PathBuf::from(path)).is_some() {
                    return Err(format!("only one pattern file may be given\n{USAGE}"));
                }
            }
        }
    }
    // The dump happens after the last step, which an unbounded run never reaches.
    if parsed.print && parsed.steps.is_none() {
        return Err(format!("--print requires --steps\n{USAGE}"));
    }
    Ok(parsed)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn seed(life: &mut dyn Life, pattern: Option<&PathBuf>) -> Result<LoadReport, PatternError> {
    match pattern {
        Some(path) => {
            info!(path = %path.display(), "loading RLE pattern");
            pattern::load_rle_file(path, life)
        }
        None => {
            info!("reading (x, y) points from stdin");
            pattern::load_points(io::stdin().lock(), life)
        }
    }
}

fn print_live_points(life: &dyn Life) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for p in life.live_points() {
        writeln!(out, "LivePoint: {p}")?;
    }
    out.flush()
}

fn run(args: MainArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut life = args.config.build();
    let report = seed(life.as_mut(), args.pattern.as_ref())?;
    if !report.skipped.is_empty() {
        warn!(skipped = report.skipped.len(), "some input lines were not understood");
    }
    info!(
        engine = life.name(),
        cells = report.cells,
        population = life.population(),
        "seeded"
    );

    let start = Instant::now();
    let mut remaining = args.steps;
    while remaining.is_none_or(|n| n > 0) {
        life.step();
        if let Some(n) = remaining.as_mut() {
            *n -= 1;
        }
        let generation = life.generation();
        if args.log_every > 0 && generation % args.log_every == 0 {
            info!(generation, population = life.population(), "step");
        }
        if !args.delay.is_zero() {
            thread::sleep(args.delay);
        }
    }

    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    info!(
        generation = life.generation(),
        population = life.population(),
        bounds = ?life.bounds(),
        elapsed_ms,
        "done"
    );

    if args.print {
        print_live_points(life.as_ref())?;
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let args = match parse_args(LifeConfig::from_env()) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::from(2);
        }
    };
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "run failed");
            ExitCode::FAILURE
        }
    }
}
