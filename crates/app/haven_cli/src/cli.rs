use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "haven", version, about = "Haven command-line tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the version.
    Version,

    /// Send one message through the chat relay and print the reply.
    ///
    /// Reads OPENAI_API_KEY, ASSISTANT_ID and OPENAI_BASE_URL from the environment.
    Ask {
        /// Message to send.
        message: String,

        /// Delay between run status checks, in milliseconds.
        #[arg(long, env = "POLL_INTERVAL_MS", default_value_t = 1000)]
        poll_interval_ms: u64,

        /// Status checks before giving up.
        #[arg(long, env = "POLL_MAX_ATTEMPTS", default_value_t = 60)]
        poll_max_attempts: u32,
    },

    /// Print the building side a room code belongs to.
    Side {
        /// Room code, e.g. A301 or 0507.
        room: String,
    },
}
