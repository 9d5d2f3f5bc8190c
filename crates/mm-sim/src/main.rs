//! Frenemy simulation runner: prints one JSON line per tick, then the final graph stats.

use mm_graph::{MultimodeGraph, SharedGraph};
use mm_sim::{SimConfig, Simulation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = SimConfig::from_env()?;
    tracing::info!(
        agents = config.agents,
        ticks = config.ticks,
        decay_rate = config.decay_rate,
        seed = ?config.seed,
        "starting frenemy simulation"
    );

    let ticks = config.ticks;
    let mut sim = Simulation::new(config)?;
    let graph = SharedGraph::new(MultimodeGraph::new());
    sim.init(&mut *graph.write().await)?;

    for _ in 0..ticks {
        let counts = sim.step(&mut *graph.write().await)?;
        println!("{}", serde_json::to_string(&counts)?);
    }

    let stats = graph.read().await.stats();
    tracing::info!(nodes = stats.nodes, edges = stats.edges, "simulation finished");
    println!("{}", serde_json::to_string(&stats)?);
    Ok(())
}
