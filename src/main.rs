use anyhow::Error;
use christmas_leds::prelude::*;
use log::{error, info, warn};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Warming up...");

    match run().await {
        Ok(()) => info!("Done"),
        Err(e) => error!("Error: {}", e),
    }
}

async fn run() -> Result<(), Error> {
    let config = Config::load_or_default()?;

    let channels = LedController::init(&config)?;
    info!("LEDs initialized");

    // Every Ctrl-C skips the animation that is currently playing
    let (clock, interrupter) = ThreadClock::new();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl-C received, skipping the current animation");
            if !interrupter.interrupt() {
                break;
            }
        }
    });

    let show = config.show;
    tokio::task::spawn_blocking(move || {
        let mut sequencer = Sequencer::new(channels, clock, FairCoin::from_entropy());
        sequencer.run(&show)
    })
    .await??;

    Ok(())
}
