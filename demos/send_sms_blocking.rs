use std::io;

use clockwork::SendMessage;
use clockwork::blocking::ClockworkClient;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("CLOCKWORK_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CLOCKWORK_API_KEY environment variable is required",
        )
    })?;
    let phone = std::env::var("CLOCKWORK_TO").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CLOCKWORK_TO environment variable is required",
        )
    })?;

    let client = ClockworkClient::new(api_key);
    client.send(SendMessage::new(phone, "Hello from the clockwork blocking demo."))?;
    println!("sent; balance now {}", client.check_balance()?);

    Ok(())
}
