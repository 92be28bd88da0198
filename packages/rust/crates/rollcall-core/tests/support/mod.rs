#![allow(dead_code, clippy::expect_used)]

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rollcall_core::{
    AttendanceEngine, AttendanceRecord, BatchWindow, ControlLayout, EngineVariant, InboundEvent,
    NotificationSink, PersistenceSink, Roster, Schedule,
};

pub const CHAT: &str = "-100123";
pub const LAYOUT_MESSAGE_ID: i64 = 42;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text(String),
    WithLayout(String, ControlLayout),
    EditLayout(i64, ControlLayout),
    EditText(i64, String),
    Ack(String),
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Sent>>,
}

impl RecordingNotifier {
    pub fn take(&self) -> Vec<Sent> {
        std::mem::take(&mut *self.sent.lock().expect("notifier lock"))
    }

    fn push(&self, sent: Sent) {
        self.sent.lock().expect("notifier lock").push(sent);
    }
}

#[async_trait]
impl NotificationSink for RecordingNotifier {
    async fn send_text(&self, chat_id: &str, text: &str) -> anyhow::Result<()> {
        assert_eq!(chat_id, CHAT);
        self.push(Sent::Text(text.to_string()));
        Ok(())
    }

    async fn send_with_layout(
        &self,
        chat_id: &str,
        text: &str,
        layout: &ControlLayout,
    ) -> anyhow::Result<()> {
        assert_eq!(chat_id, CHAT);
        self.push(Sent::WithLayout(text.to_string(), layout.clone()));
        Ok(())
    }

    async fn edit_control_layout(
        &self,
        chat_id: &str,
        message_id: i64,
        layout: &ControlLayout,
    ) -> anyhow::Result<()> {
        assert_eq!(chat_id, CHAT);
        self.push(Sent::EditLayout(message_id, layout.clone()));
        Ok(())
    }

    async fn edit_message_text(
        &self,
        chat_id: &str,
        message_id: i64,
        text: &str,
    ) -> anyhow::Result<()> {
        assert_eq!(chat_id, CHAT);
        self.push(Sent::EditText(message_id, text.to_string()));
        Ok(())
    }

    async fn acknowledge(&self, callback_id: &str) -> anyhow::Result<()> {
        self.push(Sent::Ack(callback_id.to_string()));
        Ok(())
    }
}

/// Records appended rows; fails the call with index `fail_at` when set.
#[derive(Default)]
pub struct RecordingPersistence {
    records: Mutex<Vec<AttendanceRecord>>,
    fail_at: Option<usize>,
}

impl RecordingPersistence {
    pub fn failing_at(index: usize) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail_at: Some(index),
        }
    }

    pub fn records(&self) -> Vec<AttendanceRecord> {
        self.records.lock().expect("persistence lock").clone()
    }
}

#[async_trait]
impl PersistenceSink for RecordingPersistence {
    async fn append_record(&self, record: &AttendanceRecord) -> anyhow::Result<()> {
        let mut records = self.records.lock().expect("persistence lock");
        if self.fail_at == Some(records.len()) {
            anyhow::bail!("sheet append failed for {}", record.member);
        }
        records.push(record.clone());
        Ok(())
    }
}

pub fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 17)
        .expect("valid date")
        .and_time(hm(hour, minute))
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

pub fn schedule() -> Schedule {
    Schedule::new(vec![
        BatchWindow::new("Morning", hm(9, 0), hm(10, 0)),
        BatchWindow::new("Evening Batch 1", hm(17, 0), hm(20, 0)),
        BatchWindow::new("Evening Batch 2", hm(20, 0), hm(23, 0)),
    ])
    .expect("valid schedule")
}

pub fn roster() -> Roster {
    Roster::new([
        ("Morning".to_string(), names(&["Rahul", "Neha", "Amit"])),
        (
            "Evening Batch 1".to_string(),
            names(&["Rahul", "Sana", "Vikram"]),
        ),
        (
            "Evening Batch 2".to_string(),
            names(&["Neha", "Amit", "Rohit"]),
        ),
    ])
}

pub fn engine(variant: EngineVariant) -> AttendanceEngine {
    AttendanceEngine::new(schedule(), roster(), variant)
}

pub fn text(value: &str) -> InboundEvent {
    InboundEvent::Text {
        chat_id: CHAT.to_string(),
        text: value.to_string(),
    }
}

pub fn tap(payload: &str) -> InboundEvent {
    InboundEvent::ButtonTap {
        chat_id: CHAT.to_string(),
        message_id: LAYOUT_MESSAGE_ID,
        callback_id: format!("cb-{payload}"),
        payload: payload.to_string(),
    }
}
