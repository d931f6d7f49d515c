//! senna-dashboard - Security operations dashboard simulator
//!
//! Usage:
//!   senna-dashboard serve --port 8080
//!   senna-dashboard run --duration 2m --format pretty
//!   senna-dashboard chat "Any threats in last hour?"
//!   senna-dashboard metrics
//!   senna-dashboard network --polls 20
//!   senna-dashboard list

use clap::{Parser, Subcommand, ValueEnum};
use senna_core::patterns::{ANOMALY_IDENTITIES, THREAT_PATTERNS};
use senna_core::{
    AnomalyCategory, ChatResponder, ChatTopic, EventBus, NetworkSimulator, PerformanceSimulator,
    SimRng, SimulationConfig, SimulationEvent, ThreatSimulator,
};
use senna_dashboard::{DashboardConfig, print_api_docs, serve};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "senna-dashboard")]
#[command(about = "Simulated security operations dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard HTTP API
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// RNG seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,

        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Stream generated events to stdout
    Run {
        /// Duration (e.g., 30s, 5m, 1h)
        #[arg(short, long, default_value = "1m", value_parser = parse_duration)]
        duration: Duration,

        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, default_value = "json-lines")]
        format: OutputFormat,

        /// JSON file with generator timings
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Ask the assistant a single question
    Chat {
        message: String,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print one performance snapshot
    Metrics {
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Poll the simulated network link
    Network {
        #[arg(short, long, default_value = "10")]
        polls: u32,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// List threat patterns and anomaly categories
    List,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormat {
    JsonLines,
    Pretty,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            host,
            seed,
            config,
        } => {
            let mut config = match config {
                Some(path) => DashboardConfig::load(&path)?,
                None => DashboardConfig::default(),
            };
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            print_api_docs(&config);
            serve(config).await?;
        }
        Commands::Run {
            duration,
            seed,
            format,
            config,
        } => {
            let config = match config {
                Some(path) => SimulationConfig::load(&path)?,
                None => SimulationConfig::default(),
            };
            run_stream(duration, rng(seed), format, config).await;
        }
        Commands::Chat { message, seed } => {
            let responder = ChatResponder::new(rng(seed));
            println!("[{:?}] {}", ChatTopic::classify(&message), responder.respond(&message));
        }
        Commands::Metrics { seed } => {
            let snapshot = PerformanceSimulator::new(rng(seed)).generate_metrics();
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Commands::Network { polls, seed } => {
            let network = NetworkSimulator::new(rng(seed));
            for i in 1..=polls {
                let status = network.get_status();
                println!(
                    "{:>4}  {:<12} {:>3}ms  {:?}",
                    i,
                    if status.connected { "connected" } else { "disconnected" },
                    status.latency_ms,
                    status.quality
                );
            }
        }
        Commands::List => run_list(),
    }

    Ok(())
}

fn rng(seed: Option<u64>) -> SimRng {
    seed.map_or_else(SimRng::from_os, SimRng::seeded)
}

async fn run_stream(
    duration: Duration,
    rng: SimRng,
    format: OutputFormat,
    config: SimulationConfig,
) {
    let bus = Arc::new(EventBus::new());
    let emitted = Arc::new(AtomicU64::new(0));

    let counter = emitted.clone();
    bus.subscribe(move |event| {
        counter.fetch_add(1, Ordering::Relaxed);
        print_event(event, format);
    });

    let simulator = ThreatSimulator::new(bus, rng, config);
    simulator.start();
    info!(duration_secs = duration.as_secs(), "streaming simulated events");

    tokio::select! {
        _ = tokio::time::sleep(duration) => {}
        _ = tokio::signal::ctrl_c() => info!("interrupted"),
    }
    simulator.stop();

    info!(events = emitted.load(Ordering::Relaxed), "stream complete");
}

fn print_event(event: &SimulationEvent, format: OutputFormat) {
    match format {
        OutputFormat::JsonLines => match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => warn!(error = %e, "failed to encode event"),
        },
        OutputFormat::Pretty => match event {
            SimulationEvent::Threat(t) => {
                println!("[{:8}] {} - {}", t.level, t.title, t.description)
            }
            SimulationEvent::Anomaly(a) => {
                println!("[anomaly ] {} - {} ({}%)", a.user, a.anomaly, a.confidence)
            }
            SimulationEvent::Trend(s) => println!(
                "[trend   ] {} total={} critical={} high={} medium={} low={}",
                s.time,
                s.counts.total(),
                s.counts.critical,
                s.counts.high,
                s.counts.medium,
                s.counts.low
            ),
        },
    }
}

fn run_list() {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Threat Patterns                           ║");
    println!("╠══════════════════════════════════════════════════════════════╣");
    for pattern in &THREAT_PATTERNS {
        let severities: Vec<&str> = pattern.severities.iter().map(|s| s.as_str()).collect();
        println!("║ {:20} - {:37} ║", pattern.kind, severities.join("/"));
    }
    println!("╠══════════════════════════════════════════════════════════════╣");
    println!("║                  Anomaly Categories                          ║");
    println!("╠══════════════════════════════════════════════════════════════╣");
    for category in AnomalyCategory::GENERATED {
        println!("║ {:60} ║", category.label());
    }
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!("\nMonitored identities: {}", ANOMALY_IDENTITIES.len());
}

fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let (digits, scale) = if let Some(n) = s.strip_suffix('h') {
        (n, 3600)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1)
    } else {
        (s, 1)
    };
    digits
        .parse::<u64>()
        .map(|n| Duration::from_secs(n * scale))
        .map_err(|_| format!("invalid duration '{}' (expected e.g. 30s, 5m, 1h)", s))
}
