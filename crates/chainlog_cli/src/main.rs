use chainlog::{ParentProcessIdentity, StoreConfig};
use chainlog_cli::app;
use chainlog_cli::commands::Cli;
use clap::Parser;

fn main() {
    env_logger::init();

    // Parse problems and --help both print and leave with success; this
    // tool has no failing exit path.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return;
        }
    };

    let mut config = StoreConfig::default_locations();
    if let Some(path) = &cli.chain {
        config = config.with_chain_path(path);
    }

    app::run(&cli.command(), &config, &ParentProcessIdentity);
}
