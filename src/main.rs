//! Corkboard host process.
//!
//! Reads `HostEvent` JSON lines on stdin and writes `Action` JSON lines on
//! stdout. A single task owns the board and multiplexes input against the
//! scheduler tick, so endpoint updates never race with input handling.
//! Logs go to stderr.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use corkboard::action::Action;
use corkboard::board::Board;
use corkboard::bridge;
use corkboard::config::BoardConfig;
use corkboard::scheduler::ticker;
use corkboard::surface::FixedSurface;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let config = BoardConfig::from_env();
    let mut interval = ticker(config.tick_period());
    let mut board = Board::new(config, Box::new(FixedSurface::default()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    info!("corkboard ready");
    loop {
        let actions = tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => bridge::handle_line(&mut board, &line),
                None => break,
            },
            _ = interval.tick() => board.flush_updates(),
        };
        write_actions(&mut stdout, &actions).await?;
    }

    board.shutdown();
    write_actions(&mut stdout, &board.take_actions()).await?;
    info!("stdin closed; corkboard exiting");
    Ok(())
}

async fn write_actions(stdout: &mut tokio::io::Stdout, actions: &[Action]) -> std::io::Result<()> {
    if actions.is_empty() {
        return Ok(());
    }
    let mut buf = String::new();
    for action in actions {
        match bridge::encode(action) {
            Ok(json) => {
                buf.push_str(&json);
                buf.push('\n');
            }
            Err(e) => warn!(error = %e, "failed to encode action"),
        }
    }
    stdout.write_all(buf.as_bytes()).await?;
    stdout.flush().await
}
