use async_trait::async_trait;
use rollcall_core::{AttendanceRecord, PersistenceSink};

/// Prints each row tab-separated on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    /// Tab-separated rendering of one row.
    #[must_use]
    pub fn format_row(record: &AttendanceRecord) -> String {
        record.to_row().join("\t")
    }
}

#[async_trait]
impl PersistenceSink for ConsoleSink {
    async fn append_record(&self, record: &AttendanceRecord) -> anyhow::Result<()> {
        tracing::debug!(
            batch = %record.window,
            member = %record.member,
            status = %record.status,
            "attendance row"
        );
        println!("{}", Self::format_row(record));
        Ok(())
    }
}
