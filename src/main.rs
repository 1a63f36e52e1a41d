#[tokio::main]
async fn main() -> nearby_bot::error::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("nearby_bot=info"))
        .init();
    log::info!("Starting nearby-bot");

    match nearby_bot::run().await {
        Ok(()) => {
            log::info!("Bot shut down successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Bot encountered an error: {e}");
            Err(e)
        }
    }
}
