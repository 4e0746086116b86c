use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::info;

use vct_analyst::config::AnalystConfig;
use vct_analyst::dataset;
use vct_analyst::export::{self, JsonSnapshotSink, RecordSink, XlsxSink};
use vct_analyst::logging::init_logging;
use vct_analyst::query::{OfflineAssistant, QueryRouter};
use vct_analyst::repl::{print_banner, run_repl};

fn main() -> ExitCode {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    init_logging();

    if let Err(err) = run() {
        eprintln!("An error occurred: {err:#}");
        eprintln!("Please check your data file and configuration.");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run() -> Result<()> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let cfg = AnalystConfig::from_env().with_args(&args);

    println!("Loading player data and initializing analysis tools...");

    let roster = dataset::load_roster(&cfg.data_path)
        .with_context(|| format!("loading {}", cfg.data_path.display()))?;

    let sinks = build_sinks(&cfg);
    if !sinks.is_empty() {
        export::publish_all(&sinks, roster.players());
    }

    let router = QueryRouter::new(cfg.top_n);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print_banner(&mut stdout, roster.len())?;
    let answered = run_repl(stdin.lock(), &mut stdout, &router, &roster, &OfflineAssistant)?;
    info!(answered, "session closed");
    Ok(())
}

fn build_sinks(cfg: &AnalystConfig) -> Vec<Box<dyn RecordSink>> {
    let mut sinks: Vec<Box<dyn RecordSink>> = Vec::new();
    if let Some(dir) = &cfg.export_dir {
        sinks.push(Box::new(JsonSnapshotSink::new(dir)));
    }
    if let Some(path) = &cfg.export_xlsx {
        sinks.push(Box::new(XlsxSink::new(path)));
    }
    sinks
}
