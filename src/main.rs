use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use kira_heartrisk::cli::{
    BatchArgs, Cli, Commands, HistoryArgs, HistoryCommand, RemoteArgs, ScoreArgs,
};
use kira_heartrisk::ctx::Ctx;
use kira_heartrisk::history::{HistoryStore, JsonlHistory, record_prediction};
use kira_heartrisk::io;
use kira_heartrisk::pipeline::Pipeline;
use kira_heartrisk::record::catalog;
use kira_heartrisk::remote::InferenceClient;
use kira_heartrisk::scores::score;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Score(args) => run_score(args)?,
        Commands::Batch(args) => run_batch(args)?,
        Commands::History(args) => run_history(args)?,
        Commands::Remote(args) => run_remote(args)?,
        Commands::Fields => print_fields(),
    }

    Ok(())
}

fn run_score(args: ScoreArgs) -> Result<()> {
    let record = args.record.resolve()?;
    if (args.json || args.tsv) && args.out.is_none() {
        bail!("--json and --tsv require --out");
    }

    let mut ctx = Ctx::new(
        None,
        args.out.unwrap_or_else(|| PathBuf::from(".")),
        args.json,
        args.tsv,
        env!("CARGO_PKG_VERSION"),
    )
    .with_records(vec!["record_1".to_string()], vec![record]);
    ctx.history_path = args.history;

    Pipeline::standard().run(&mut ctx)?;

    let result = ctx.results.first().context("no prediction produced")?;
    print!("{}", io::summary::format_prediction(result)?);
    if ctx.history_written > 0 {
        println!("saved to history");
    }
    print_warnings(&ctx);
    Ok(())
}

fn run_batch(args: BatchArgs) -> Result<()> {
    let mut ctx = Ctx::new(
        Some(args.input),
        args.out,
        args.json,
        args.tsv,
        env!("CARGO_PKG_VERSION"),
    );
    ctx.threads = args.threads;
    ctx.history_path = args.history;

    Pipeline::standard().run(&mut ctx)?;

    print!("{}", io::summary::format_summary(&ctx)?);
    print_warnings(&ctx);
    Ok(())
}

fn run_history(args: HistoryArgs) -> Result<()> {
    match args.command {
        HistoryCommand::List(store) => {
            let history = JsonlHistory::open(store.store);
            let entries = history.list()?;
            print!("{}", io::summary::format_history(&entries)?);
        }
        HistoryCommand::Clear(store) => {
            let mut history = JsonlHistory::open(store.store);
            history.clear()?;
            println!("history cleared: {}", history.path().display());
        }
    }
    Ok(())
}

fn run_remote(args: RemoteArgs) -> Result<()> {
    let record = args.record.resolve()?;
    let client = InferenceClient::new(
        args.endpoint,
        args.token,
        Duration::from_secs(args.timeout_secs),
    )?;

    let (result, source) = match client.predict(&record) {
        Ok(result) => (result, "hosted model"),
        Err(err) if args.fallback => {
            warn!(
                endpoint = client.endpoint(),
                error = %format!("{:#}", err),
                "hosted model failed, falling back to local scoring"
            );
            (score(&record)?, "local fallback")
        }
        Err(err) => return Err(err),
    };

    println!("Source: {}", source);
    print!("{}", io::summary::format_prediction(&result)?);

    if let Some(path) = args.history {
        let mut store = JsonlHistory::open(path);
        let entry = record_prediction(&mut store, record, result, Utc::now(), 0)?;
        println!("saved to history: {}", entry.id);
    }
    Ok(())
}

fn print_fields() {
    for info in catalog() {
        let unit = info.unit.map(|u| format!(" [{}]", u)).unwrap_or_default();
        println!(
            "{}\t{}{}\t{}",
            info.field, info.title, unit, info.description
        );
        for (code, meaning) in info.values {
            println!("    {} = {}", code, meaning);
        }
        println!("    importance: {}", info.importance);
    }
}

fn print_warnings(ctx: &Ctx) {
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
}
