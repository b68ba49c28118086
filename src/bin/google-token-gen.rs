//! One-time operator setup: authorize the booking calendar's Google
//! account and print a refresh token for `GOOGLE_REFRESH_TOKEN`.
//!
//! Runs offline from the service and never writes tokens to disk.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use voice_scheduling::core::config::DEFAULT_GOOGLE_TOKEN_URL;
use voice_scheduling::google::oauth::{
    CALENDAR_EVENTS_SCOPE, OAuthClientSecrets, authorization_code_from, consent_url,
    exchange_code_for_token,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// OAuth client file downloaded from the Google Cloud console
    #[arg(long, default_value = "oauth-client.json")]
    credentials: PathBuf,

    /// Redirect URI registered for the client. Defaults to the first
    /// one in the client file.
    #[arg(long)]
    redirect_uri: Option<String>,

    /// Token endpoint override
    #[arg(long)]
    token_url: Option<String>,
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read from stdin")?;
    Ok(input)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let secrets = OAuthClientSecrets::from_path(&args.credentials)?;
    let redirect_uri = args
        .redirect_uri
        .or_else(|| secrets.redirect_uris.first().cloned())
        .unwrap_or_else(|| String::from("http://localhost"));
    let token_url = args
        .token_url
        .or_else(|| secrets.token_uri.clone())
        .unwrap_or_else(|| DEFAULT_GOOGLE_TOKEN_URL.to_string());

    println!(
        "\nPlease open the following URL in your browser and authorize access:\n\n{}\n",
        consent_url(&secrets.client_id, &redirect_uri, CALENDAR_EVENTS_SCOPE)
    );
    let input = prompt("Paste the authorization code (or the full redirect URL) here: ")?;
    let code = authorization_code_from(&input);

    let token = exchange_code_for_token(
        &reqwest::Client::new(),
        &token_url,
        &secrets.client_id,
        &secrets.client_secret,
        &code,
        &redirect_uri,
    )
    .await?;

    println!("Authorized successfully.");

    match token.refresh_token.filter(|t| !t.is_empty()) {
        Some(refresh_token) => {
            println!("\n===== REFRESH TOKEN =====");
            println!("{}", refresh_token);
            println!("=========================\n");
        }
        None => println!("No refresh token returned."),
    }

    Ok(())
}
