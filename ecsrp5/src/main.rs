use anyhow::Context;
use clap::Parser;
use ecsrp5::{app, app::Config, SearchOutcome};
use log::warn;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = Config::parse();

    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .init();

    let outcome = app::run(&config)
        .with_context(|| format!("cannot recover the password of {:?}", config.username));

    match outcome {
        Ok(SearchOutcome::Found { password, .. }) => {
            println!("{}:{}", config.username, String::from_utf8_lossy(&password));
            ExitCode::SUCCESS
        }
        Ok(SearchOutcome::Exhausted { tried, skipped }) => {
            warn!(
                "password not found for {:?} ({tried} candidates, {skipped} skipped)",
                config.username
            );
            ExitCode::from(1)
        }
        Err(err) => {
            eprintln!("error: {err:?}");
            ExitCode::from(2)
        }
    }
}
