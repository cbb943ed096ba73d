mod aggregate;
mod hunt;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "tandemhunter";
    pub const DEFAULT_LOG_FILTER: &str = "info";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Call partial tandem duplications by comparing the coverage of two target regions per sample.")
        .subcommand_required(true)
        .subcommand(hunt::cli::create_hunt_cli())
        .subcommand(aggregate::cli::create_aggregate_cli())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(consts::DEFAULT_LOG_FILTER),
    )
    .init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // PTD CALLING
        //
        Some((hunt::cli::HUNT_CMD, matches)) => {
            hunt::handlers::run_hunt(matches)?;
        }

        //
        // MERGING OF PER-SAMPLE RESULTS
        //
        Some((aggregate::cli::AGGREGATE_CMD, matches)) => {
            aggregate::handlers::run_aggregate(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
