use std::io;
use std::time::Duration;

use clockwork::ClockworkClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("CLOCKWORK_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CLOCKWORK_API_KEY environment variable is required",
        )
    })?;
    let timeout = std::env::var("CLOCKWORK_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(clockwork::DEFAULT_TIMEOUT);

    let client = ClockworkClient::builder(api_key).timeout(timeout).build()?;
    let balance = client.check_balance().await?;
    println!("amount: {}, currency: {}", balance.amount, balance.currency);

    Ok(())
}
