use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt};
use tripswipe::application::driver::EngineHandle;
use tripswipe::application::engine::{Phase, SwipeContext, SwipeEngine};
use tripswipe::config::SwipeConfig;
use tripswipe::domain::decision::{TripId, UserId};
use tripswipe::domain::ports::{DecisionRecorder, DecisionRecorderRef};
use tripswipe::infrastructure::console::ConsoleRouter;
use tripswipe::infrastructure::in_memory::{
    CountingPointerCapture, InMemoryDecisionRecorder, StaticIdentity,
};
use tripswipe::interfaces::csv::decision_writer::DecisionWriter;
use tripswipe::interfaces::csv::gesture_reader::{GestureReader, ScriptStep};
use tripswipe::interfaces::json::catalog_reader::CatalogReader;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Catalog of trips and places (JSON)
    catalog: PathBuf,

    /// Gesture script to replay (CSV: event, x, y)
    gestures: PathBuf,

    /// Trip whose candidates are swiped
    #[arg(long)]
    trip_id: u32,

    /// Signed-in user
    #[arg(long)]
    user_id: u32,

    /// Horizontal drag distance (px) that counts as a decision
    #[arg(long, default_value_t = 100.0)]
    threshold: f64,

    /// Exit interval between a decision and the next card, in milliseconds
    #[arg(long, default_value_t = 300)]
    transition_ms: u64,

    /// Path to persistent decision store (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

fn open_recorder(db_path: Option<PathBuf>) -> Result<DecisionRecorderRef> {
    #[cfg(feature = "storage-rocksdb")]
    {
        if let Some(path) = db_path {
            use tripswipe::infrastructure::rocksdb::RocksDBDecisionRecorder;
            let recorder = RocksDBDecisionRecorder::open(path).into_diagnostic()?;
            return Ok(Arc::new(recorder));
        }
    }

    #[cfg(not(feature = "storage-rocksdb"))]
    {
        if db_path.is_some() {
            eprintln!(
                "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
        }
    }

    Ok(Arc::new(InMemoryDecisionRecorder::new()))
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let trip_id = TripId(cli.trip_id);

    let catalog = CatalogReader::new(File::open(&cli.catalog).into_diagnostic()?)
        .read()
        .into_diagnostic()?;
    let directory = catalog.into_directory().await;
    let recorder = open_recorder(cli.db_path)?;
    let router = Arc::new(ConsoleRouter::new());

    let ctx = SwipeContext {
        trip_id,
        identity: Arc::new(StaticIdentity::new(UserId(cli.user_id))),
        directory: Arc::new(directory),
        recorder: recorder.clone(),
        router: router.clone(),
        capture: Arc::new(CountingPointerCapture::new()),
    };
    let config = SwipeConfig::default()
        .with_threshold(cli.threshold)
        .with_transition(Duration::from_millis(cli.transition_ms));

    let mut engine = SwipeEngine::new(ctx, config);
    engine.activate().await.into_diagnostic()?;

    if engine.phase() == Phase::NoCandidates {
        eprintln!("no candidates for trip {}", trip_id);
    } else {
        let handle = EngineHandle::spawn(engine);

        let reader = GestureReader::new(File::open(&cli.gestures).into_diagnostic()?);
        for step in reader.steps() {
            match step {
                Ok(ScriptStep::Input(input)) => handle.send(input).await.into_diagnostic()?,
                Ok(ScriptStep::Settle) => {
                    handle.settled().await.into_diagnostic()?;
                }
                Err(e) => eprintln!("Error reading gesture: {}", e),
            }
        }

        let snapshot = handle.settled().await.into_diagnostic()?;
        handle.shutdown().await.into_diagnostic()?;

        if !router.navigated() {
            eprintln!(
                "stopped at {} of {} candidates",
                snapshot.cursor, snapshot.total
            );
        }
    }

    let decisions = recorder.decisions(trip_id).await.into_diagnostic()?;
    let stdout = io::stdout();
    let mut writer = DecisionWriter::new(stdout.lock());
    writer.write_decisions(decisions).into_diagnostic()?;

    Ok(())
}
