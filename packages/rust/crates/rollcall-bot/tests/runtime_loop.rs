#![allow(missing_docs, clippy::expect_used)]

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rollcall_bot::{BatchClock, drain_inbound_events, render_status};
use rollcall_core::{
    AttendanceEngine, AttendanceRecord, AttendanceStatus, BatchWindow, ControlLayout,
    EngineVariant, InboundEvent, NotificationSink, PersistenceSink, Roster, Schedule,
};
use tokio::sync::mpsc;

#[derive(Default)]
struct RecordingNotifier {
    texts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn texts(&self) -> Vec<String> {
        self.texts.lock().expect("notifier lock").clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingNotifier {
    async fn send_text(&self, _chat_id: &str, text: &str) -> anyhow::Result<()> {
        self.texts.lock().expect("notifier lock").push(text.to_string());
        Ok(())
    }

    async fn send_with_layout(
        &self,
        chat_id: &str,
        text: &str,
        _layout: &ControlLayout,
    ) -> anyhow::Result<()> {
        self.send_text(chat_id, text).await
    }

    async fn edit_control_layout(
        &self,
        _chat_id: &str,
        _message_id: i64,
        _layout: &ControlLayout,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    async fn edit_message_text(
        &self,
        chat_id: &str,
        _message_id: i64,
        text: &str,
    ) -> anyhow::Result<()> {
        self.send_text(chat_id, text).await
    }
}

#[derive(Default)]
struct FlakyPersistence {
    fail_first: bool,
    calls: Mutex<usize>,
    records: Mutex<Vec<AttendanceRecord>>,
}

#[async_trait]
impl PersistenceSink for FlakyPersistence {
    async fn append_record(&self, record: &AttendanceRecord) -> anyhow::Result<()> {
        let mut calls = self.calls.lock().expect("calls lock");
        *calls += 1;
        if self.fail_first && *calls == 1 {
            anyhow::bail!("sheet unavailable");
        }
        self.records.lock().expect("records lock").push(record.clone());
        Ok(())
    }
}

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 17)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid instant")
}

fn engine(variant: EngineVariant) -> AttendanceEngine {
    let schedule = Schedule::new(vec![
        BatchWindow::new(
            "Morning",
            at(9, 0).time(),
            at(10, 0).time(),
        ),
        BatchWindow::new(
            "Evening Batch 1",
            at(17, 0).time(),
            at(20, 0).time(),
        ),
    ])
    .expect("valid schedule");
    let roster = Roster::new([(
        "Morning".to_string(),
        vec!["Rahul".to_string(), "Neha".to_string(), "Amit".to_string()],
    )]);
    AttendanceEngine::new(schedule, roster, variant)
}

fn text(body: &str) -> InboundEvent {
    InboundEvent::Text {
        chat_id: "-100123".to_string(),
        text: body.to_string(),
    }
}

async fn run_events(
    engine: &mut AttendanceEngine,
    events: Vec<InboundEvent>,
    notifier: &RecordingNotifier,
    persistence: &FlakyPersistence,
    clock: &BatchClock,
) {
    let (tx, mut rx) = mpsc::channel(events.len().max(1));
    for event in events {
        tx.send(event).await.expect("queue event");
    }
    drop(tx);
    drain_inbound_events(engine, &mut rx, notifier, persistence, clock).await;
}

#[tokio::test]
async fn events_are_handled_in_order_until_queue_closes() {
    let mut engine = engine(EngineVariant::Text);
    let notifier = RecordingNotifier::default();
    let persistence = FlakyPersistence::default();
    let clock = BatchClock::fixed(at(9, 30));

    run_events(
        &mut engine,
        vec![text("hello"), text("@ Rahul AP"), text("done")],
        &notifier,
        &persistence,
        &clock,
    )
    .await;

    let texts = notifier.texts();
    assert_eq!(texts.len(), 3);
    assert!(texts[0].starts_with("🤖 Morning started (09:00–10:00)"));
    assert_eq!(texts[1], "✅ Rahul marked absent.");
    assert_eq!(
        texts[2],
        "📊 Attendance saved for Morning\nPresent: 2\nAbsent: 1"
    );
    let records = persistence.records.lock().expect("records lock").clone();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].status, AttendanceStatus::Absent);
    assert_eq!(records[0].time, at(9, 30).time());
    assert!(engine.session().active_window().is_none());
}

#[tokio::test]
async fn handler_failure_is_logged_and_loop_continues() {
    let mut engine = engine(EngineVariant::Buttons);
    let notifier = RecordingNotifier::default();
    let persistence = FlakyPersistence {
        fail_first: true,
        ..FlakyPersistence::default()
    };
    let clock = BatchClock::fixed(at(9, 30));

    run_events(
        &mut engine,
        vec![text("hi"), text("done"), text("done")],
        &notifier,
        &persistence,
        &clock,
    )
    .await;

    let texts = notifier.texts();
    assert_eq!(texts.len(), 2, "first done failed before its summary");
    assert!(texts[1].contains("Present: 3"));
    assert_eq!(*persistence.calls.lock().expect("calls lock"), 4);
    assert_eq!(persistence.records.lock().expect("records lock").len(), 3);
    assert!(engine.session().active_window().is_none());
}

#[tokio::test]
async fn outside_every_batch_only_the_no_active_notice_is_sent() {
    let mut engine = engine(EngineVariant::Text);
    let notifier = RecordingNotifier::default();
    let persistence = FlakyPersistence::default();
    let clock = BatchClock::fixed(at(12, 0));

    run_events(&mut engine, vec![text("done")], &notifier, &persistence, &clock).await;

    assert_eq!(
        notifier.texts(),
        vec!["⏰ No active batch right now.\nAttendance can only be marked during batch time."]
    );
    assert!(persistence.records.lock().expect("records lock").is_empty());
}

#[test]
fn status_marks_active_batch_and_lists_members() {
    let engine = engine(EngineVariant::Text);
    let rendered = render_status(engine.schedule(), engine.roster(), at(9, 15).time());

    assert!(rendered.starts_with("Active batch at 09:15: Morning (09:00–10:00)\n"));
    assert!(rendered.contains("* Morning 09:00–10:00 (3 members): Rahul, Neha, Amit\n"));
    assert!(rendered.contains("  Evening Batch 1 17:00–20:00 (0 members)\n"));
}

#[test]
fn status_outside_batches() {
    let engine = engine(EngineVariant::Text);
    let rendered = render_status(engine.schedule(), engine.roster(), at(23, 30).time());
    assert!(rendered.starts_with("No active batch at 23:30.\n"));
}
