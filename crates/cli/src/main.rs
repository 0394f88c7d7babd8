mod progress;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use onehand_core::{
    OutcomeSink, RuleSelection, RuleSet, Run, RunConfig, RunReport, RunStats,
};
use onehand_data::{
    load_records, render_markdown, resolve_settings, write_report, JsonlStore, Settings,
};
use progress::ProgressBar;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(
    name = "onehand",
    version,
    about = "Play One Hand solitaire many times and summarize the outcomes",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Settings file (defaults to ./onehand.json when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log every draw and match
    #[arg(long, global = true)]
    debug: bool,

    #[command(flatten)]
    play: PlayArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize every outcome in the store as markdown
    Report(ReportArgs),
}

#[derive(Args, Debug, Default)]
struct PlayArgs {
    /// Number of games to play per rule-set (prompted when omitted)
    #[arg(short = 'n', long)]
    games: Option<usize>,

    /// Play games using the normal rules
    #[arg(long)]
    normal: bool,

    /// Play games using the reverse rules
    #[arg(long)]
    reverse: bool,

    /// Deal each Normal/Reverse pair from the same shuffle
    #[arg(long, visible_alias = "samedeck")]
    same_deck: bool,

    /// Do not write outcomes to the store
    #[arg(long, visible_alias = "nodb")]
    no_store: bool,

    /// Outcome store (JSON lines)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Seed for shuffles and the run id
    #[arg(long)]
    seed: Option<u64>,

    /// Print elapsed wall-clock time
    #[arg(long)]
    timing: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Outcome store to read (defaults to the configured store)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Serialize)]
struct Summary<'a> {
    run_id: Uuid,
    seed: u64,
    stats: &'a RunStats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = resolve_settings(cli.config.as_deref())?;
    init_tracing(cli.debug || settings.general.debug);

    match &cli.command {
        Some(Command::Report(args)) => run_report(args, &settings),
        None => run_games(&cli.play, &settings),
    }
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Flag beats settings file beats default; the game count falls back to a prompt.
fn run_config(
    args: &PlayArgs,
    settings: &Settings,
    prompt: impl FnOnce() -> anyhow::Result<usize>,
) -> anyhow::Result<RunConfig> {
    let count = match args.games.or(settings.general.games) {
        Some(count) => count,
        None => prompt()?,
    };
    let seed = args
        .seed
        .or(settings.general.seed)
        .unwrap_or_else(rand::random);
    Ok(RunConfig::new(count)
        .with_selection(RuleSelection::from_flags(args.normal, args.reverse))
        .with_same_deck(args.same_deck || settings.rules.same_deck)
        .with_seed(seed))
}

fn prompt_game_count() -> anyhow::Result<usize> {
    let mut out = io::stdout().lock();
    writeln!(out, "How many games should I play?")?;
    out.flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim();
    answer
        .parse()
        .with_context(|| format!("not a game count: {answer:?}"))
}

fn open_store(args: &PlayArgs, settings: &Settings) -> Option<JsonlStore> {
    if args.no_store || !settings.store.enabled {
        return None;
    }
    let path = args.store.clone().unwrap_or_else(|| settings.store.path.clone());
    match JsonlStore::open(&path) {
        Ok(store) => Some(store),
        Err(err) => {
            tracing::warn!(%err, "playing without persistence");
            eprintln!("warning: {err}; outcomes will not be saved");
            None
        }
    }
}

fn run_games(args: &PlayArgs, settings: &Settings) -> anyhow::Result<()> {
    let config = run_config(args, settings, prompt_game_count)?;
    let mut run = Run::new(config)?;
    let started = Instant::now();

    let mut store = open_store(args, settings);
    let mut progress = ProgressBar::for_count(config.count);
    run.prepare(&mut progress);
    let sink = store.as_mut().map(|store| store as &mut dyn OutcomeSink);
    let report = run.start(sink, &mut progress)?;
    let stats = run.stats()?;

    if args.json {
        let summary = Summary {
            run_id: run.id(),
            seed: config.seed,
            stats: &stats,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&run, &stats);
    }
    report_sink_failures(&report);
    if args.timing {
        println!("Elapsed: {:.3?}", started.elapsed());
    }
    Ok(())
}

fn report_sink_failures(report: &RunReport) {
    if report.persisted_cleanly() {
        return;
    }
    eprintln!(
        "warning: {} persistence failure(s) while saving outcomes",
        report.sink_failures.len()
    );
    for failure in &report.sink_failures {
        match failure.game {
            Some(game) => eprintln!("  game {game}: {}", failure.error),
            None => eprintln!("  commit: {}", failure.error),
        }
    }
}

fn print_summary(run: &Run, stats: &RunStats) {
    println!("=== Run Summary ===");
    println!("Run ID: {}", run.id());
    println!("Seed: {}", run.config().seed);
    println!("Rules: {}", stats.rules.label());
    println!("Games played: {}", stats.games);
    println!("Wins: {}", stats.wins);
    println!("Losses: {}", stats.losses);

    for rule_set in RuleSet::ALL {
        if !stats.rules.includes(rule_set) {
            continue;
        }
        let rule = stats.for_rule_set(rule_set);
        println!("-- {rule_set} Games ---");
        println!("Games: {}", rule.games);
        println!("Wins: {}", rule.wins);
        println!("Losses: {}", rule.losses);
        println!("Win percentage: {}", rule.win_pct_label());
        println!("Max cards left: {}", rule.max_cards_left);
        println!("Min cards left: {}", rule.min_cards_left);
        println!("Average cards left: {}", rule.avg_cards_left);
    }
}

fn run_report(args: &ReportArgs, settings: &Settings) -> anyhow::Result<()> {
    let path = args.store.clone().unwrap_or_else(|| settings.store.path.clone());
    let records = load_records(&path)?;
    if records.is_empty() {
        bail!("no outcomes stored in {}", path.display());
    }
    let body = render_markdown(&records);
    match &args.out {
        Some(out) => {
            write_report(out, &body)?;
            tracing::info!(path = %out.display(), records = records.len(), "report written");
        }
        None => print!("{body}"),
    }
    Ok(())
}
