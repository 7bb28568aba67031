use anyhow::Result;
use budget_tracker::cli::Cli;
use clap::Parser;
use env_logger::Env;

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_filter())).init();
    cli.run()
}
