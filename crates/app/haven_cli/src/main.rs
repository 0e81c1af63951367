// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use cli::{Cli, Commands};
use haven_core::assistant::{OpenAiAssistant, OpenAiConfig};
use haven_core::models::rooms::RoomSide;
use haven_core::relay::{ChatRelay, PollPolicy};

mod cli;
mod logging;

fn main() -> Result<()> {
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    logging::init()?;

    let args = Cli::parse();

    match args.command {
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
        Commands::Ask {
            message,
            poll_interval_ms,
            poll_max_attempts,
        } => {
            let assistant = OpenAiAssistant::new(OpenAiConfig::from_env()?)?;
            let policy = PollPolicy::new(Duration::from_millis(poll_interval_ms), poll_max_attempts);
            let relay = ChatRelay::new(Arc::new(assistant), policy);

            log::info!("sending message ({} chars)", message.chars().count());
            let runtime = tokio::runtime::Runtime::new()?;
            let reply = runtime.block_on(relay.get_response(Some(&message)));
            println!("{reply}");
        }
        Commands::Side { room } => match RoomSide::of(&room) {
            Some(side) => println!("{side}"),
            None => {
                return Err(Error::Custom(format!(
                    "Unable to determine the side for room {room}"
                )));
            }
        },
    }

    Ok(())
}
