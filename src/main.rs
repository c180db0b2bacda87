use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use dag_designer::export::{DirectorySink, FileSink, MemorySink};
use dag_designer::session::{self, EventOutcome, SessionEvent};
use dag_designer::{DesignerConfig, Session};

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(short, long, global = true)]
    config: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the sample Source -> Preprocess -> Train graph
    Sample {
        #[clap(short, long)]
        output_dir: Option<String>,
    },
    /// Replay a recorded event log, writing every export
    Replay {
        #[clap(short, long)]
        events: String,
        #[clap(short, long)]
        output_dir: Option<String>,
        /// Start from an empty canvas instead of the sample graph
        #[clap(long)]
        empty: bool,
    },
    /// Print the graph state as JSON
    Inspect {
        #[clap(short, long)]
        events: Option<String>,
        #[clap(long)]
        empty: bool,
    },
    /// List registered node kinds
    Kinds,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    let mut config = match &args.config {
        Some(path) => DesignerConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => DesignerConfig::default(),
    };

    match args.command {
        Commands::Sample { output_dir } => {
            config.session.start_with_sample = true;
            let sink = output_sink(output_dir, &config);
            let mut session = Session::new(&config);
            session.dispatch(&SessionEvent::Export, &sink)?;
        }
        Commands::Replay {
            events,
            output_dir,
            empty,
        } => {
            if empty {
                config.session.start_with_sample = false;
            }
            let events = load_events(&events)?;
            let sink = output_sink(output_dir, &config);
            let mut session = Session::new(&config);
            let failed = replay(&mut session, &events, &sink);
            if failed > 0 {
                anyhow::bail!("{} of {} event(s) failed", failed, events.len());
            }
        }
        Commands::Inspect { events, empty } => {
            if empty {
                config.session.start_with_sample = false;
            }
            let mut session = Session::new(&config);
            if let Some(path) = events {
                // Exports triggered by the log are kept in memory
                replay(&mut session, &load_events(&path)?, &MemorySink::new());
            }
            println!("{}", inspect(&session)?);
        }
        Commands::Kinds => {
            let session = Session::new(&config);
            for (kind, entry) in session.registry().kinds() {
                println!("{}\t{}", kind, entry.display_name);
            }
        }
    }

    Ok(())
}

fn output_sink(output_dir: Option<String>, config: &DesignerConfig) -> DirectorySink {
    let sink = DirectorySink::new(output_dir.unwrap_or_else(|| config.export.output_dir.clone()));
    info!("Writing exports to {}", sink.dir().display());
    sink
}

fn load_events(path: &str) -> Result<Vec<SessionEvent>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read events from {}", path))?;
    session::parse_events(&content).with_context(|| format!("Failed to parse events in {}", path))
}

fn replay(session: &mut Session, events: &[SessionEvent], sink: &dyn FileSink) -> usize {
    let mut failed = 0;
    for (index, result) in session.replay(events, sink).into_iter().enumerate() {
        match result {
            Ok(EventOutcome::Exported(path)) => {
                info!("Event #{}: exported {}", index, path.display())
            }
            Ok(EventOutcome::Connected(None)) => info!("Event #{}: connection dropped", index),
            Ok(_) => {}
            Err(err) => {
                failed += 1;
                error!("Event #{} failed [{}]: {}", index, err.error_code(), err);
            }
        }
    }
    failed
}

fn inspect(session: &Session) -> Result<String> {
    use serde_json::json;

    let store = session.store();
    let nodes: Vec<_> = store
        .nodes()
        .iter()
        .map(|node| {
            json!({
                "node": node,
                "style": session.registry().style_for(node),
            })
        })
        .collect();

    let res = json!({
        "selected_kind": session.selected_kind(),
        "next_id": store.next_id(),
        "nodes": nodes,
        "edges": store.edges(),
    });
    Ok(serde_json::to_string_pretty(&res)?)
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level.to_string()))
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
