//! Wires CLI arguments to one engine run
//!
//! The engine executes on a worker task while log records are marshaled
//! over a channel to a blocking render loop. The channel closes when the
//! engine drops its sink, which ends the render loop; both sides are joined
//! before the exit code is decided.

use super::commands::CliArgs;
use super::output::LogFormatter;
use crate::config::CforgeConfig;
use crate::engine::BuildEngine;
use crate::progress::ChannelSink;
use std::sync::mpsc;
use std::sync::Arc;
use tracing::debug;

pub async fn handle_build(args: &CliArgs) -> i32 {
    let config = CforgeConfig::from_env();
    debug!(?config, "Engine configuration");

    let (tx, rx) = mpsc::channel();
    let sink = Arc::new(ChannelSink::new(tx));
    let engine = BuildEngine::new(config, sink);

    let sources = args.sources.clone();
    let flags = args.flags.clone();
    let clean = args.clean;
    let run = !args.no_run;

    let worker = tokio::spawn(async move {
        engine
            .build_and_run(&sources, flags.as_deref(), clean, run)
            .await
    });

    let formatter = LogFormatter::new(args.format, args.quiet);
    let renderer = tokio::task::spawn_blocking(move || {
        for record in rx {
            formatter.render(&record);
        }
    });

    let success = worker.await.unwrap_or(false);
    let _ = renderer.await;

    if success {
        0
    } else {
        1
    }
}
