//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use tallyroom_shared::protocol::{ActionEnvelope, SharedStateDto};

use crate::{
    command::{Command, help_text, parse_command},
    error::ClientError,
    reducer::{ClientAction, Store},
    render::{redisplay_prompt, render_panel},
};

/// Outcome of handling one input line
enum LineOutcome {
    Send(ActionEnvelope),
    Handled,
}

/// Run one connected session until the user exits or the connection drops.
///
/// Returns `Ok(())` when the input channel closes (user exit). Lines are read
/// from `input`, which outlives the session so reconnects keep the same
/// terminal.
pub async fn run_client_session(
    url: &str,
    name: &str,
    store: &Store,
    input: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectFailed(e.to_string()))?;

    tracing::info!("Connected to {}", url);
    let (mut write, mut read) = ws_stream.split();

    let hello = encode(&ActionEnvelope::hello(name))?;
    write
        .send(Message::text(hello))
        .await
        .map_err(|e| ClientError::ConnectionLost(e.to_string()))?;
    store.dispatch(ClientAction::ConnectionChanged { connected: true });

    let result = loop {
        tokio::select! {
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<SharedStateDto>(text.as_str()) {
                        Ok(snapshot) => store.dispatch(ClientAction::SnapshotReceived(snapshot)),
                        Err(e) => tracing::warn!("Ignoring unexpected message: {}", e),
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Server closed the connection");
                    break Err(ClientError::ConnectionLost("server closed the connection".to_string()));
                }
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break Err(ClientError::ConnectionLost(e.to_string()));
                }
                Some(Ok(_)) => {}
            },
            line = input.recv() => {
                let Some(line) = line else {
                    write.close().await.ok();
                    break Ok(());
                };
                if let LineOutcome::Send(envelope) = handle_line(&line, name, store) {
                    let json = encode(&envelope)?;
                    if let Err(e) = write.send(Message::text(json)).await {
                        tracing::warn!("Failed to send action: {}", e);
                        break Err(ClientError::ConnectionLost(e.to_string()));
                    }
                }
            }
        }
    };

    store.dispatch(ClientAction::ConnectionChanged { connected: false });
    result
}

fn encode(envelope: &ActionEnvelope) -> Result<String, ClientError> {
    Ok(serde_json::to_string(envelope)?)
}

fn handle_line(line: &str, name: &str, store: &Store) -> LineOutcome {
    match parse_command(line) {
        Command::Select(choice) => {
            if store.state().locked {
                eprintln!("\n✗ Cannot select: experiment is locked (host only)\n");
                redisplay_prompt();
                return LineOutcome::Handled;
            }
            LineOutcome::Send(ActionEnvelope::select(choice.as_str()))
        }
        Command::Done => LineOutcome::Send(ActionEnvelope::done(name)),
        Command::Lock => LineOutcome::Send(ActionEnvelope::lock()),
        Command::Reset => LineOutcome::Send(ActionEnvelope::reset()),
        Command::State => {
            match serde_json::to_string_pretty(&store.state()) {
                Ok(json) => println!("{}", json),
                Err(e) => tracing::error!("Failed to serialize state: {}", e),
            }
            redisplay_prompt();
            LineOutcome::Handled
        }
        Command::Help => {
            println!("{}", help_text());
            redisplay_prompt();
            LineOutcome::Handled
        }
        Command::Render => {
            print!("{}", render_panel(&store.state()));
            redisplay_prompt();
            LineOutcome::Handled
        }
        Command::Invalid(message) => {
            eprintln!("\n✗ {}\n", message);
            redisplay_prompt();
            LineOutcome::Handled
        }
        Command::Unknown(keyword) => {
            eprintln!("\n✗ Unknown command: {} (type 'help')\n", keyword);
            redisplay_prompt();
            LineOutcome::Handled
        }
    }
}
