//! Tallyroom CLI participant with reconnection support.
//!
//! Connects to a Tallyroom server, announces itself with `hello`, and keeps a
//! status panel in sync with the shared state. Commands are read from the
//! terminal (`a`, `b`, `select A|B`, `done`, `lock`, `reset`, `state`, `help`).
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tallyroom-client -- --name alice
//! cargo run --bin tallyroom-client -- -n bob -u https://abc.example.io
//! ```

use clap::Parser;

use tallyroom_shared::{logger::setup_logger, name::normalize_name};

#[derive(Parser, Debug)]
#[command(name = "tallyroom-client")]
#[command(about = "CLI participant for a Tallyroom shared selection", long_about = None)]
struct Args {
    /// Display name announced to the other participants (trimmed, 1-64 characters)
    #[arg(short = 'n', long, value_parser = normalize_name)]
    name: String,

    /// Server URL (http:// and https:// are mapped to ws:// and wss://)
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8765")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    let args = Args::parse();

    if let Err(e) = tallyroom_client::run_client(args.url, args.name).await {
        tracing::error!("Client error: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(name: &str) -> Result<Args, clap::Error> {
        Args::try_parse_from(["tallyroom-client", "--name", name])
    }

    #[test]
    fn test_name_is_trimmed() {
        // テスト項目: --name の前後の空白は取り除かれる
        let args = parse("  alice  ").unwrap();
        assert_eq!(args.name, "alice");
        assert_eq!(args.url, "ws://127.0.0.1:8765");
    }

    #[test]
    fn test_name_the_server_would_reject_is_refused() {
        // テスト項目: サーバーが拒否する名前（空白のみ・65 文字）は起動時に拒否される
        // given (前提条件):
        let too_long = "x".repeat(65);

        // when (操作) / then (期待する結果):
        assert!(parse("   ").is_err());
        assert!(parse(&too_long).is_err());
        assert!(parse(&"x".repeat(64)).is_ok());
    }
}
