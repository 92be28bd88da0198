//! Persistence sinks for finalized attendance rows.

mod console;
mod sheets;

use anyhow::Result;
use rollcall_core::PersistenceSink;

use crate::config::SheetsConfig;

pub use console::ConsoleSink;
pub use sheets::{GoogleSheetsSink, ServiceAccountCredentials};

/// Google Sheets when configured, console output otherwise.
///
/// # Errors
///
/// Fails when the spreadsheet is configured but its credentials cannot be loaded.
pub fn build_persistence(sheets: Option<&SheetsConfig>) -> Result<Box<dyn PersistenceSink>> {
    match sheets {
        Some(config) => {
            let sink = GoogleSheetsSink::from_config(config)?;
            tracing::info!(
                spreadsheet_id = %config.spreadsheet_id,
                range = %config.range,
                "attendance rows go to Google Sheets"
            );
            Ok(Box::new(sink))
        }
        None => {
            tracing::info!("no spreadsheet configured; attendance rows go to stdout");
            Ok(Box::new(ConsoleSink))
        }
    }
}
