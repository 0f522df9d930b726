use clap::Parser;

use release_brancher::cli::{Cli, Commands};
use release_brancher::commands;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Apply(args) => commands::apply::handle_apply(args).await,
        Commands::Check { file } => commands::check::handle_check(file),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
