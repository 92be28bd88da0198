//! Polling runtime: one listener task feeding a single engine loop.

use std::sync::Arc;

use anyhow::Result;
use rollcall_core::{AttendanceEngine, InboundEvent, NotificationSink, PersistenceSink};
use tokio::sync::mpsc;

use crate::channels::TelegramChannel;
use crate::clock::BatchClock;
use crate::config::BotConfig;
use crate::persistence::build_persistence;

/// Run the bot via Telegram long polling until Ctrl+C or a fatal listener error.
///
/// # Errors
///
/// Fails when the bot token is missing, persistence cannot be set up, or the
/// listener stops with an unrecoverable API error.
pub async fn run_polling(config: BotConfig) -> Result<()> {
    let bot_token = config.require_bot_token()?.to_string();
    let channel = Arc::new(TelegramChannel::new_with_base_url(
        bot_token,
        config.telegram_api_base_url.clone(),
    ));
    let persistence = build_persistence(config.sheets.as_ref())?;
    let clock = BatchClock::new(config.timezone);
    let mut engine = AttendanceEngine::new(config.schedule, config.roster, config.variant);

    if !channel.health_probe().await {
        tracing::warn!(
            api_base_url = %config.telegram_api_base_url,
            "Telegram getMe check failed; polling anyway"
        );
    }

    let (tx, mut inbound_rx) = mpsc::channel::<InboundEvent>(config.inbound_queue_capacity);
    let listener_channel = Arc::clone(&channel);
    let listener = tokio::spawn(async move { listener_channel.listen(tx).await });

    println!(
        "Telegram attendance bot listening... (polling, variant={}, Ctrl+C to stop)",
        engine.variant()
    );
    tracing::info!(
        variant = %engine.variant(),
        batches = engine.schedule().windows().len(),
        inbound_queue_capacity = config.inbound_queue_capacity,
        "attendance runtime started"
    );

    let interrupted = tokio::select! {
        () = drain_inbound_events(
            &mut engine,
            &mut inbound_rx,
            channel.as_ref(),
            persistence.as_ref(),
            &clock,
        ) => false,
        _ = tokio::signal::ctrl_c() => true,
    };

    if interrupted {
        println!("Shutting down...");
        listener.abort();
    }
    listener_outcome(listener.await)
}

fn listener_outcome(joined: Result<Result<()>, tokio::task::JoinError>) -> Result<()> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(error)) => {
            tracing::error!(error = %error, "Telegram listener stopped");
            Err(error)
        }
        Err(error) if error.is_cancelled() => Ok(()),
        Err(error) => Err(anyhow::anyhow!("Telegram listener task failed: {error}")),
    }
}

/// Feed every queued event to the engine, in arrival order, until the queue closes.
///
/// Handler failures are logged and the loop moves on to the next event.
pub async fn drain_inbound_events(
    engine: &mut AttendanceEngine,
    inbound_rx: &mut mpsc::Receiver<InboundEvent>,
    notifier: &dyn NotificationSink,
    persistence: &dyn PersistenceSink,
    clock: &BatchClock,
) {
    while let Some(event) = inbound_rx.recv().await {
        let now = clock.now();
        if let Err(error) = engine.handle(&event, now, notifier, persistence).await {
            tracing::error!(
                error = %format!("{error:#}"),
                session = ?engine.session().active_window(),
                "failed to handle inbound event"
            );
        }
    }
    tracing::debug!("inbound queue closed");
}
