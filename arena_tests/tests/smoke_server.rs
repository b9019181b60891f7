use arena_server::GameServer;
use arena_shared::config::ArenaConfig;

/// Smoke test: server can run a few ticks without panicking.
#[tokio::test]
async fn server_runs_few_ticks() {
    let (mut server, _handle) = GameServer::new(ArenaConfig::default());
    server.run_for_ticks(3).await;
    assert_eq!(server.world().tick(), 3);
}
