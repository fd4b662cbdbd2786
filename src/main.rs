use clap::{Parser, Subcommand};

use mailbeacon::config;
use mailbeacon::runtime::modes::{send, server};
use mailbeacon::system::logging;

#[derive(Parser)]
#[command(name = "mailbeacon", version, about = "Email engagement tracking service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the tracking HTTP server (default)
    Serve,
    /// Dispatch the campaign to the configured recipients
    Send {
        /// Override the configured recipient list
        #[arg(long = "to", value_name = "ADDRESS")]
        to: Vec<String>,
    },
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    config::init_config();
    let _guard = logging::init_logging(&config::get_config());

    match cli.command {
        Some(Command::Send { to }) => {
            let recipients = if to.is_empty() { None } else { Some(to) };
            send::run_send(recipients).await
        }
        Some(Command::Serve) | None => server::run_server().await,
    }
}
