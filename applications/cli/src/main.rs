/// Gaane - local music player for the terminal
use anyhow::Context;
use clap::{Parser, Subcommand};
use gaane_cli::{
    app,
    audio::{DecoderMonitor, RodioBackend},
    runner::{self, Runner},
    GaaneConfig,
};
use gaane_core::{CatalogSource, TrackId};
use gaane_playback::PlaybackEvent;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gaane")]
#[command(about = "Gaane local music player", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Music directory to use instead of the configured ones (repeatable)
    #[arg(long = "root", global = true)]
    roots: Vec<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the music library
    Scan,
    /// Start an interactive playback session
    Play {
        /// Start playing the track `scan` listed at this position
        #[arg(short, long)]
        select: Option<usize>,
    },
    /// Delete a track's file from disk
    Delete {
        /// Track id as shown by `scan`
        id: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        GaaneConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if !cli.roots.is_empty() {
        config.library.roots = cli.roots;
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Scan => scan(&config)?,
        Commands::Play { select } => play(&config, select)?,
        Commands::Delete { id } => delete(&config, TrackId::new(id))?,
    }

    Ok(())
}

fn scan(config: &GaaneConfig) -> anyhow::Result<()> {
    let catalog = app::load_catalog(config)?;
    for (index, track) in catalog.iter().enumerate() {
        println!("{}", app::format_track(index, track));
    }
    println!("{} tracks", catalog.len());
    Ok(())
}

fn play(config: &GaaneConfig, select: Option<usize>) -> anyhow::Result<()> {
    let catalog = app::load_catalog(config)?;

    let monitor = DecoderMonitor::new();
    let mut backend = RodioBackend::new(monitor.clone());
    backend
        .ensure_output()
        .context("failed to open audio output")?;

    let mut session = app::build_session(config, backend);
    let outcome = session.attach(catalog)?;
    info!(?outcome, "session attached");

    if let Some(index) = select {
        match app::play_order_index(session.controller(), index) {
            Some(position) => {
                if let Err(e) = session.controller_mut().load_track(position) {
                    warn!(index, error = %e, "could not select track");
                }
            }
            None => warn!(index, "no track at that catalog position"),
        }
    }

    let mut runner = Runner::new(session, monitor);
    runner::spawn_stdin_reader(runner.sender());
    println!("{}", runner::HELP);

    runner.run()?;
    Ok(())
}

fn delete(config: &GaaneConfig, id: TrackId) -> anyhow::Result<()> {
    config.require_library()?;
    let source = app::catalog_source(config);
    let catalog = source.load()?;

    let mut session =
        app::build_ephemeral_session(config, RodioBackend::new(DecoderMonitor::new()));
    session.controller_mut().set_catalog(catalog);

    let result = session.delete_track(&id, &source);
    for event in session.drain_events() {
        if let PlaybackEvent::Notice(notice) = event {
            println!("{notice}");
        }
    }

    let outcome = result.with_context(|| format!("failed to delete {id}"))?;
    info!(track_id = %id, ?outcome, "delete finished");
    Ok(())
}
