use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::io::{self, Read};

use gmail_triage::auth::{TokenManager, token_store};
use gmail_triage::config::load_config;
use gmail_triage::mail::fetch::{DEFAULT_MAX_RESULTS, MAX_AGE_LIMIT_DAYS};
use gmail_triage::mail::gmail_client::GMAIL_API_BASE;
use gmail_triage::mail::{FetchOptions, GmailClient, fetch_unread};
use gmail_triage::triage::Session;

#[derive(Parser)]
#[command(name = "gmail_triage")]
#[command(about = "Quickly triage unread Gmail messages from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,

    /// Search string to filter unread messages (Gmail search syntax)
    #[arg(short, long)]
    search: Option<String>,

    /// Maximum age of messages in days
    #[arg(short = 'a', long, value_parser = clap::value_parser!(u32).range(0..=MAX_AGE_LIMIT_DAYS as i64))]
    max_age: Option<u32>,

    /// Maximum number of messages to fetch (1-100)
    #[arg(short, long)]
    max_results: Option<u32>,
}

#[derive(Subcommand)]
enum Command {
    /// Store the OAuth client secret in keyring
    SetClientSecret {
        #[arg(long)]
        client_id: String,
    },
}

fn set_client_secret(client_id: &str) -> Result<()> {
    eprintln!("Paste client secret (end with Ctrl-D):");
    let mut secret = String::new();
    io::stdin().read_to_string(&mut secret)?;
    token_store::save_client_secret(client_id, secret.trim())?;
    println!("Saved client secret for client_id {client_id}");
    Ok(())
}

fn describe(opts: &FetchOptions) {
    println!("\n- Will search for up to {} unread messages", opts.max_results);
    match opts.max_age_days {
        Some(1) => println!("- With a maximum age of 1 day"),
        Some(days) => println!("- With a maximum age of {days} days"),
        None => {}
    }
    if let Some(search) = &opts.search {
        println!("- Matching the keyword(s) '{search}'");
    }
}

fn run_triage(cli: Cli) -> Result<()> {
    let cfg = load_config().map_err(|e| anyhow!("Configuration error: {e}"))?;

    println!("Initializing Gmail service...");
    let tokens = TokenManager::from_config(&cfg)?;
    let api_base = cfg.api_base.as_deref().unwrap_or(GMAIL_API_BASE);
    let gmail = GmailClient::with_base_url(api_base, tokens)
        .context("Failed to initialize Gmail service")?;

    let opts = FetchOptions::new(
        cli.search,
        cli.max_age,
        cli.max_results
            .or(cfg.max_results)
            .unwrap_or(DEFAULT_MAX_RESULTS),
    );
    describe(&opts);

    let messages = fetch_unread(&gmail, &opts).context("Failed to get unread messages")?;

    let stdin = io::stdin();
    let mut session = Session::new(messages);
    session
        .run(&gmail, stdin.lock(), io::stdout())
        .context("Error during triage")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    if let Some(Command::SetClientSecret { client_id }) = &cli.cmd {
        return set_client_secret(client_id);
    }
    run_triage(cli)
}
