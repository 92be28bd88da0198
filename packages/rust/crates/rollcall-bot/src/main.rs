//! rollcall-bot CLI: run the attendance bot or inspect the batch schedule.
//!
//! Logging: set `RUST_LOG=rollcall_bot=debug` (or `warn`, `info`) to control stderr logs.

mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rollcall_bot::{BatchClock, BotConfig, render_status, run_polling, set_config_home_override};
use rollcall_core::parse_time_of_day;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(conf_dir) = cli.conf.clone() {
        set_config_home_override(conf_dir);
    }

    // RUST_LOG overrides; --verbose on run => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let verbose = matches!(&cli.command, Command::Run { verbose: true, .. });
        EnvFilter::new(if verbose {
            "rollcall_bot=debug,rollcall_core=debug"
        } else {
            "rollcall_bot=info,rollcall_core=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = BotConfig::from_env()?;

    match cli.command {
        Command::Run {
            variant,
            bot_token,
            verbose: _,
        } => {
            let config = config.with_overrides(variant.map(Into::into), bot_token);
            run_polling(config).await
        }
        Command::Status { at } => {
            let time = match at {
                Some(raw) => parse_time_of_day("--at", &raw)?,
                None => BatchClock::new(config.timezone).now().time(),
            };
            print!("{}", render_status(&config.schedule, &config.roster, time));
            Ok(())
        }
    }
}
