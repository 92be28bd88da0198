use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rollcall_core::EngineVariant;

#[derive(Parser)]
#[command(name = "rollcall-bot")]
#[command(about = "Telegram attendance bot: mark absentees for the running batch, save rows to Sheets.")]
pub(crate) struct Cli {
    /// Override config directory (reads `<conf>/rollcall/settings.yaml`).
    #[arg(long, global = true)]
    pub(crate) conf: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum VariantArg {
    Text,
    Buttons,
}

impl From<VariantArg> for EngineVariant {
    fn from(value: VariantArg) -> Self {
        match value {
            VariantArg::Text => Self::Text,
            VariantArg::Buttons => Self::Buttons,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run the bot via Telegram long polling. Ctrl+C to stop.
    Run {
        /// Operator front-end (default: settings `telegram.variant`, else buttons)
        #[arg(long, value_enum)]
        variant: Option<VariantArg>,

        /// Bot token (default: ROLLCALL_TELEGRAM_BOT_TOKEN / BOT_TOKEN / settings)
        #[arg(long)]
        bot_token: Option<String>,

        /// Debug logging for rollcall crates
        #[arg(long, short = 'v')]
        verbose: bool,
    },
    /// Print the configured batches and which one is active.
    Status {
        /// Time of day to resolve (HH:MM); defaults to now
        #[arg(long)]
        at: Option<String>,
    },
}
