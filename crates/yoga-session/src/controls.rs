//! Keyboard controls.

use std::io::BufRead;
use std::str::FromStr;
use std::thread::JoinHandle;

use tokio::sync::mpsc;
use tracing::{debug, warn};

/// A user command for the running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    NextPose,
    PreviousPose,
    /// Repeat the current pose's instructions
    Instruct,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "n" | "next" => Ok(SessionCommand::NextPose),
            "p" | "prev" | "previous" => Ok(SessionCommand::PreviousPose),
            "i" | "instruct" => Ok(SessionCommand::Instruct),
            "q" | "quit" => Ok(SessionCommand::Quit),
            other => Err(format!("Unknown command: {}", other)),
        }
    }
}

/// Forward commands typed on stdin, one per line.
///
/// Reads on a plain thread so a pending read never holds up runtime
/// shutdown. The thread ends at end of input or once the receiver is dropped.
pub fn spawn_stdin_reader(tx: mpsc::Sender<SessionCommand>) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("session-controls".to_string())
        .spawn(move || forward_commands(std::io::stdin().lock(), &tx))
}

fn forward_commands(input: impl BufRead, tx: &mpsc::Sender<SessionCommand>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to read controls: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<SessionCommand>() {
            Ok(command) => {
                if tx.blocking_send(command).is_err() {
                    break;
                }
            }
            Err(e) => debug!("{} (use n, p, i or q)", e),
        }
    }
    debug!("Control input closed");
}
