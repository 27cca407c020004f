//! Integration tests for outbound pacing.

mod common;

use slirc_engine::config::{EngineConfig, FloodConfig};
use slirc_engine::event::EventKind;
use tokio::time::{Duration, Instant};

fn config(max_lines_per_second: usize) -> EngineConfig {
    EngineConfig {
        flood: FloodConfig {
            max_lines_per_second,
            ..FloodConfig::default()
        },
        ..EngineConfig::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_burst_is_delayed_in_order() {
    let (engine, _connector, network, mut recorder) = common::engine_with(config(3));
    let session = engine.connect("irc.test").await.unwrap();
    let mut server = network.accept().await;
    recorder.next_of(EventKind::Connect).await;

    let start = Instant::now();
    for i in 0..6 {
        session.send(format!("PRIVMSG #c :{i}")).unwrap();
    }

    let mut arrivals = Vec::new();
    for i in 0..6 {
        server.expect(&format!("PRIVMSG #c :{i}")).await;
        arrivals.push(start.elapsed());
    }

    // The first three go out at once; the fourth waits one step above the minimum.
    assert!(arrivals[2] < Duration::from_millis(250), "{arrivals:?}");
    assert!(arrivals[3] >= Duration::from_millis(450), "{arrivals:?}");
    assert!(arrivals.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test(start_paused = true)]
async fn test_quiet_period_resets_pacing() {
    let (engine, _connector, network, mut recorder) = common::engine_with(config(2));
    let session = engine.connect("irc.test").await.unwrap();
    let mut server = network.accept().await;
    recorder.next_of(EventKind::Connect).await;

    for i in 0..3 {
        session.send(format!("A{i}")).unwrap();
    }
    for i in 0..3 {
        server.expect(&format!("A{i}")).await;
    }

    tokio::time::sleep(Duration::from_secs(5)).await;

    let start = Instant::now();
    session.send("B0").unwrap();
    server.expect("B0").await;
    assert!(start.elapsed() < Duration::from_millis(250));
}
