//! Standalone server binary.
//!
//! Usage:
//!   cargo run -p arena_server -- [--width 2000] [--height 2000] [--tick-hz 30] [--seed 42] [--boost-secs 10]
//!
//! Runs the fixed timestep simulation loop and broadcasts a snapshot per
//! tick. The transport/session layer is an external collaborator: it talks
//! to the loop through the `ServerHandle` channel endpoints. This binary
//! also owns the boost respawn cadence, which is external policy by design.

use std::env;
use std::time::Duration;

use arena_server::GameServer;
use arena_shared::config::ArenaConfig;
use tracing::info;

fn parse_args() -> (ArenaConfig, f32) {
    let mut cfg = ArenaConfig::default();
    let mut boost_secs = 10.0_f32;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--width" if i + 1 < args.len() => {
                cfg.width = args[i + 1].parse().unwrap_or(cfg.width);
                i += 2;
            }
            "--height" if i + 1 < args.len() => {
                cfg.height = args[i + 1].parse().unwrap_or(cfg.height);
                i += 2;
            }
            "--tick-hz" if i + 1 < args.len() => {
                cfg.tick_hz = args[i + 1].parse().unwrap_or(30);
                i += 2;
            }
            "--seed" if i + 1 < args.len() => {
                cfg.seed = args[i + 1].parse().ok();
                i += 2;
            }
            "--boost-secs" if i + 1 < args.len() => {
                boost_secs = args[i + 1].parse().unwrap_or(boost_secs);
                i += 2;
            }
            _ => i += 1,
        }
    }
    (cfg, boost_secs)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let (cfg, boost_secs) = parse_args();
    info!(
        width = cfg.width,
        height = cfg.height,
        tick_hz = cfg.tick_hz,
        seed = ?cfg.seed,
        "starting arena server"
    );

    let (mut server, handle) = GameServer::new(cfg);

    // Boost respawn cadence, owned here rather than by the world.
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs_f32(boost_secs));
        interval.tick().await; // First tick fires immediately; skip it.
        loop {
            interval.tick().await;
            if handle.spawn_boost().await.is_err() {
                break;
            }
        }
    });

    server.run().await;
    Ok(())
}
