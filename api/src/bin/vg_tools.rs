//! Operator tools: send a one-off message, generate an `AUTH_TOKEN`

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use clap::{Parser, Subcommand};
use rand::rngs::OsRng;
use rand::RngCore;
use std::process::ExitCode;
use std::time::Duration;

use vg_infra::TelegramBotBackend;
use vg_shared::config::delivery::{DEFAULT_DELIVERY_TIMEOUT_SECS, DEFAULT_TELEGRAM_API_BASE};

#[derive(Parser)]
#[command(name = "vg-tools")]
#[command(version, about = "Verigram operator tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send one message through the Telegram bot API
    Send {
        /// Chat id, phone number or @username
        #[arg(long)]
        chat_id: String,

        /// Message text
        #[arg(long)]
        text: String,

        #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
        token: Option<String>,

        #[arg(long, env = "TELEGRAM_API_BASE", default_value = DEFAULT_TELEGRAM_API_BASE)]
        api_base: String,

        #[arg(long, default_value_t = DEFAULT_DELIVERY_TIMEOUT_SECS)]
        timeout_secs: u64,
    },

    /// Print a random URL-safe secret suitable for AUTH_TOKEN
    GenToken {
        /// Number of random bytes
        #[arg(long, default_value_t = 32)]
        length: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    match Cli::parse().command {
        Command::Send {
            chat_id,
            text,
            token,
            api_base,
            timeout_secs,
        } => {
            let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
                eprintln!("TELEGRAM_BOT_TOKEN not set in environment");
                return Ok(ExitCode::from(2));
            };

            let backend = TelegramBotBackend::new(token, api_base, Duration::from_secs(timeout_secs))?;
            let outcome = backend.send_message(&chat_id, &text).await?;

            println!("{}", outcome.status_code);
            println!("{}", serde_json::to_string_pretty(&outcome.body)?);

            Ok(if outcome.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
        Command::GenToken { length } => {
            let token = generate_token(length);
            println!("{}", token);
            println!();
            println!("# Shell example:");
            println!("# export AUTH_TOKEN='{}'", token);
            println!("# Clients must then send the header:");
            println!("# curl -X POST http://127.0.0.1:5000/request_code \\");
            println!("#   -H 'X-Auth-Token: {}' -H 'Content-Type: application/json' \\", token);
            println!("#   -d '{{\"recipientId\": \"@username\", \"credential\": \"+15555550100\"}}'");
            println!("# Send a one-off message (reads TELEGRAM_BOT_TOKEN):");
            println!("# vg-tools send --chat-id '+15555550100' --text 'Your code is 12345'");
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// `length` bytes from the OS CSPRNG, URL-safe base64 without padding
fn generate_token(length: usize) -> String {
    let mut raw = vec![0u8; length];
    OsRng.fill_bytes(&mut raw);
    URL_SAFE_NO_PAD.encode(raw)
}
