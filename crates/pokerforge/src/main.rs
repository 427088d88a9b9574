use pokerforge::{PokerError, PokerServerBuilder, ServerConfig, telemetry};

#[tokio::main]
async fn main() -> Result<(), PokerError> {
    let config = ServerConfig::from_env()?;
    telemetry::init(config.debug);

    let server = PokerServerBuilder::from_config(config).build().await?;
    server.run().await
}
