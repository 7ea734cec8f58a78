//! Client execution logic with reconnection support.

use std::time::Duration;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::{mpsc, watch};

use crate::{
    error::ClientError,
    reducer::{ClientState, Store},
    render::{PROMPT, redisplay_prompt, render_panel},
    session::run_client_session,
    url::normalize_url,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Check if the client should attempt to reconnect.
///
/// `current_attempt` is the number of consecutive failures so far.
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    match error {
        ClientError::ConnectFailed(_) | ClientError::ConnectionLost(_) => {
            current_attempt < max_attempts
        }
        ClientError::Serialization(_) | ClientError::ReconnectExhausted(_) => false,
    }
}

/// Failure count after `error`. A dropped connection that had been
/// established starts a fresh series of attempts.
pub fn next_attempt(error: &ClientError, current_attempt: u32) -> u32 {
    match error {
        ClientError::ConnectionLost(_) => 1,
        _ => current_attempt + 1,
    }
}

/// Run the client with reconnection logic
pub async fn run_client(url: String, name: String) -> Result<(), ClientError> {
    let url = normalize_url(&url);
    let store = Store::new();
    let render_task = tokio::spawn(render_loop(store.subscribe()));
    let mut input = spawn_readline();

    let result = run_with_reconnect(
        &url,
        &name,
        &store,
        &mut input,
        Duration::from_secs(RECONNECT_INTERVAL_SECS),
    )
    .await;

    render_task.abort();
    result
}

/// Run sessions until the user exits or reconnection gives up.
///
/// A closed `input` (Ctrl+C / Ctrl+D) ends the loop with `Ok(())`, even while
/// the server is unreachable.
async fn run_with_reconnect(
    url: &str,
    name: &str,
    store: &Store,
    input: &mut mpsc::UnboundedReceiver<String>,
    interval: Duration,
) -> Result<(), ClientError> {
    let mut attempts = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            url,
            name,
            attempts + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        let e = match run_client_session(url, name, store, input).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => e,
        };

        tracing::warn!("{}", e);
        if input.is_closed() {
            tracing::info!("Input closed, not reconnecting");
            return Ok(());
        }

        attempts = next_attempt(&e, attempts);
        if !should_attempt_reconnect(&e, attempts, MAX_RECONNECT_ATTEMPTS) {
            return Err(match e {
                ClientError::Serialization(_) => e,
                _ => ClientError::ReconnectExhausted(attempts),
            });
        }

        tracing::info!(
            "Reconnecting in {:?}... (attempt {}/{})",
            interval,
            attempts + 1,
            MAX_RECONNECT_ATTEMPTS
        );
        tokio::time::sleep(interval).await;

        if input.is_closed() {
            tracing::info!("Input closed, not reconnecting");
            return Ok(());
        }
    }
}

/// Redraw the panel whenever the store changes
async fn render_loop(mut state: watch::Receiver<ClientState>) {
    while state.changed().await.is_ok() {
        let panel = render_panel(&state.borrow_and_update());
        print!("{}", panel);
        redisplay_prompt();
    }
}

/// Spawn a blocking thread for rustyline (synchronous readline).
///
/// The channel closes on Ctrl+C, Ctrl+D or a readline failure.
fn spawn_readline() -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                    }
                    if input_tx.send(line.to_string()).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
