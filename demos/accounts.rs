//! Example: List accounts and recent transactions.
//!
//! Run with: cargo run --example accounts -- sbanken.json

use sbanken_api_client::bank::TransactionsRequest;
use sbanken_api_client::{Config, SbankenClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sbanken.json".to_string());
    let config = Config::from_file(&path)?;
    let client = SbankenClient::from_config(&config).await?;

    let accounts = client.get_accounts().await?;
    for account in &accounts {
        println!(
            "{} ({}): available {} / balance {}",
            account.name, account.account_number, account.available, account.balance
        );
    }

    if let Some(account) = accounts.first() {
        let request = TransactionsRequest::new().window(0, 10);
        let transactions = client.get_transactions(&account.account_id, &request).await?;
        println!(
            "Showing {} of {} transactions",
            transactions.items.len(),
            transactions.available_items
        );
        for transaction in transactions.items {
            println!("{:>12} {}", transaction.amount, transaction.text);
        }
    }

    Ok(())
}
