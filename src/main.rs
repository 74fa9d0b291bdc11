mod api;
mod config;
mod error;
mod leaderboard;
mod logging;
mod markdown;
mod notify;
mod pipeline;
mod store;
mod util;

use tracing::{error, info};

pub type Error = Box<dyn std::error::Error + Send + Sync + 'static>;

#[tokio::main]
async fn main() -> Result<(), Error> {
    if std::env::var("RUST_BACKTRACE").is_err() {
        std::env::set_var("RUST_BACKTRACE", "1");
    }

    let cfg = config::load_config().expect("Could not load config");

    logging::init(&cfg)?;
    info!("Logging Initialised. Initialising Stravaboard application");

    let result = match std::env::args().nth(1).as_deref() {
        None => pipeline::run(&cfg).await,
        Some("rollover") => pipeline::rollover(&cfg).map_err(Error::from),
        Some("refresh-tokens") => api::oauth::refresh_tokens(&cfg.oauth).await,
        Some(other) => Err(format!(
            "Unknown subcommand: {other}. Expected no argument, 'rollover' or 'refresh-tokens'"
        )
        .into()),
    };

    if let Err(e) = &result {
        error!(error = ?e, "Run failed");
    }

    result
}
