//! Headless site runner.
//!
//! Assembles a [`Site`] over an in-memory location, a fixture data source and
//! a tracing surface, then walks through the given routes as if a visitor
//! typed them into the address bar. Every repaint is logged; the final state
//! tree is printed as JSON on stdout.
//!
//! # Usage
//!
//! ```text
//! vanillabeach --fixtures site.json '#journal/42' '#photos/beach' '#photos'
//! RUST_LOG=debug vanillabeach --config site.toml --dwell-ms 1500 '#junk'
//! ```
//!
//! Routes are visited in order. After each one the runner waits `--dwell-ms`
//! so fetches and fade transitions can settle.

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::time::Duration;
use vanillabeach::data::InMemorySource;
use vanillabeach::router::{Location, MemoryLocation};
use vanillabeach::ui::TracingSurface;
use vanillabeach::{initialize, ConflictPolicy, Site, SiteConfig};

const BASE_URL: &str = "http://localhost:8080/";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "vanillabeach", version, about = "Run the Vanilla Beach site core headlessly")]
struct Args {
    /// Fragments to visit in order, with or without the leading `#`.
    routes: Vec<String>,

    /// Site configuration file (TOML). Built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Journal and photo fixtures (JSON). An empty site when omitted.
    #[arg(long)]
    fixtures: Option<PathBuf>,

    /// Time spent on each route before moving on.
    #[arg(long, default_value_t = 1000)]
    dwell_ms: u64,

    /// Apply every fetch completion instead of only the newest request's.
    #[arg(long)]
    last_completion_wins: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "site run failed");
            eprintln!("vanillabeach: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut config = initialize(args.config.as_deref())?;
    if args.last_completion_wins {
        config.conflict_policy = ConflictPolicy::LastCompletionWins;
    }

    let source = match &args.fixtures {
        Some(path) => InMemorySource::from_file(path)?,
        None => InMemorySource::default(),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let local = tokio::task::LocalSet::new();

    local.block_on(&runtime, visit(config, source, args.routes, args.dwell_ms))
}

async fn visit(
    config: SiteConfig,
    source: InMemorySource,
    routes: Vec<String>,
    dwell_ms: u64,
) -> Result<(), Box<dyn Error>> {
    let dwell = Duration::from_millis(dwell_ms);
    let location = Rc::new(MemoryLocation::with_notifications(BASE_URL));

    let site = Site::new(
        config,
        location.clone(),
        Rc::new(source),
        Rc::new(TracingSurface),
    )?;
    site.attach_defaults();
    let interval = site.start();
    tracing::info!(?interval, "site started");

    tokio::time::sleep(dwell).await;
    for route in &routes {
        tracing::info!(route = %route, "visiting");
        location.set_fragment(route);
        tokio::time::sleep(dwell).await;
    }

    let state = site.state();
    println!("{}", serde_json::to_string_pretty(&*state)?);

    site.shutdown();
    Ok(())
}
