use std::io;

use clockwork::{ClockworkClient, ClockworkError, SendMessage};
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
    let phones = std::env::var("CLOCKWORK_TO").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CLOCKWORK_TO environment variable is required (comma-separated numbers)",
        )
    })?;
    let message = std::env::var("CLOCKWORK_MESSAGE")
        .unwrap_or_else(|_| "Hello from the clockwork send_sms demo.".to_owned());

    let client = ClockworkClient::new(api_key);
    let mut request = SendMessage::new(phones.split(',').map(str::trim).collect::<Vec<_>>(), message)
        .long(std::env::var("CLOCKWORK_LONG").is_ok_and(|value| value == "1"));
    if let Ok(from) = std::env::var("CLOCKWORK_FROM") {
        request = request.from(from);
    }

    match client.send(request).await {
        Ok(()) => println!("sent"),
        Err(ClockworkError::MessageSend(err)) => {
            println!(
                "rejected for {}: errno={} msg={}",
                err.recipient(),
                err.errno(),
                err.msg()
            );
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
