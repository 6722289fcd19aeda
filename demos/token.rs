//! Example: Token lifecycle with manual and transparent refresh.
//!
//! Run with: cargo run --example token
//!
//! Reads `SBANKEN_CLIENT_ID` and `SBANKEN_CLIENT_SECRET`.

use sbanken_api_client::auth::{CredentialsProvider, EnvCredentials, TokenProvider, TokenSource};
use sbanken_api_client::client::endpoints::IDENTITY_SERVER_URL;
use time::OffsetDateTime;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let Some(credentials) = EnvCredentials::try_from_env() else {
        println!("Set SBANKEN_CLIENT_ID and SBANKEN_CLIENT_SECRET to run this example.");
        return Ok(());
    };
    let creds = credentials.get_credentials();

    let provider = TokenProvider::obtain(
        IDENTITY_SERVER_URL,
        creds.client_id.clone(),
        creds.expose_secret(),
    )
    .await?;
    println!(
        "{} token valid until {}",
        provider.token_type().await,
        provider.expiration_time().await
    );

    // Manual: check the expiry and refresh.
    if provider.expiration_time().await <= OffsetDateTime::now_utc() {
        provider.refresh().await?;
    }

    // Transparent: refreshes only when needed.
    let token = provider.bearer_token().await?;
    println!("Using token expiring at {}", token.valid_to);

    Ok(())
}
