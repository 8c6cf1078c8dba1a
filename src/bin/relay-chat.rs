//! Line-based terminal driver for the messenger.
//!
//! Reads one message per line from stdin and prints the conversation as it
//! grows. Exit with Ctrl-D.

use chat_relay::client::{Message, Messenger, SendOutcome};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout carries the conversation
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut messenger = Messenger::from_env();
    for message in messenger.messages() {
        print_message(message);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let seen = messenger.messages().len();
        let outcome = messenger.send(&line).await;
        if outcome == SendOutcome::Ignored {
            continue;
        }
        // the user's own line is already on screen
        for message in messenger.messages().iter().skip(seen).filter(|m| m.is_bot) {
            print_message(message);
        }
        if let Some(banner) = messenger.error() {
            eprintln!("! {banner}");
        }
    }
    Ok(())
}

fn print_message(message: &Message) {
    let who = if message.is_bot { "Manus" } else { "You" };
    println!("[{}] {who}: {}", message.timestamp.format("%H:%M"), message.text);
}
