//! Headless soak runner.
//!
//! Drives the server with scripted players and no transport: bots join,
//! then wander, shoot, and cast at random, stepping the loop as fast as it
//! will go. Prints a summary at the end. Useful for eyeballing throughput
//! and for catching panics or invariant repairs under load (run with
//! `RUST_LOG=warn` to surface repairs).
//!
//! Usage: soak_runner [ticks] [bots]

use std::time::{Duration, Instant};

use arena_server::GameServer;
use arena_shared::config::ArenaConfig;
use arena_shared::math::{Coordinate, Dimension};
use arena_shared::net::Command;
use arena_shared::player::PlayerId;
use arena_shared::spell::SpellAction;
use rand::{rngs::StdRng, Rng, SeedableRng};

const BOOST_EVERY_TICKS: u64 = 300;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let ticks: u64 = args.get(1).and_then(|a| a.parse().ok()).unwrap_or(2000);
    let bots: usize = args.get(2).and_then(|a| a.parse().ok()).unwrap_or(8);

    let cfg = ArenaConfig {
        seed: Some(0xA12E4A),
        ..Default::default()
    };
    let dim = cfg.dimension();
    let (mut server, handle) = GameServer::new(cfg);
    let mut rng = StdRng::seed_from_u64(99);

    println!("arena soak: {bots} bots, {ticks} ticks");

    // Join everyone; welcomes resolve as the loop steps.
    let mut pending: Vec<_> = (0..bots)
        .map(|i| {
            let handle = handle.clone();
            tokio::spawn(async move {
                handle
                    .join(&format!("bot-{i}"), Dimension::new(800.0, 600.0))
                    .await
            })
        })
        .collect();
    let mut ids: Vec<PlayerId> = Vec::new();
    while !pending.is_empty() {
        tokio::time::sleep(Duration::from_millis(1)).await;
        server.step();
        let (done, rest): (Vec<_>, Vec<_>) = pending.into_iter().partition(|j| j.is_finished());
        for join in done {
            ids.push(join.await??.id);
        }
        pending = rest;
    }

    let started = Instant::now();
    for tick in 0..ticks {
        for &id in &ids {
            let target = Coordinate::new(
                rng.gen_range(0.0..dim.width),
                rng.gen_range(0.0..dim.height),
            );
            let command = match rng.gen_range(0..10) {
                0..=4 => Command::Moving { target },
                5..=6 => Command::Shoot { target },
                7 => Command::Spell {
                    action: SpellAction::BasicAttack,
                    target: Some(target),
                },
                8 => Command::Spell {
                    action: SpellAction::Spell1,
                    target: None,
                },
                _ => Command::Special { target: None },
            };
            handle.send(id, command).await?;
        }
        if tick % BOOST_EVERY_TICKS == 0 {
            handle.spawn_boost().await?;
        }
        server.step();
    }
    let elapsed = started.elapsed();

    let world = server.world();
    let kills: u32 = world.players.iter().map(|p| p.score).sum();
    println!(
        "done in {:.2?} ({:.0} ticks/sec)",
        elapsed,
        ticks as f64 / elapsed.as_secs_f64()
    );
    println!(
        "players: {}  bullets in flight: {}  boosts on ground: {}  kills: {}",
        world.players.len(),
        world.bullets.len(),
        world.boosts.len(),
        kills
    );
    Ok(())
}
