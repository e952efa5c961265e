//! Event loop and playback tick.
//!
//! The runtime owns the session and serializes everything that touches
//! it: user/host events and playback ticks are awaited in one loop and
//! each is handled to completion before the next.
//!
//! The tick interval lives inside the loop, so restarting the clock for
//! new media replaces it outright and no tick from the previous media can
//! be pending. The loop ends on [`EditorHandle::shutdown`] or once every
//! handle has been dropped.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};

use framecut_common::error::{FramecutError, FramecutResult};
use framecut_editor_model::event::EditorEvent;

use crate::session::{ClockDirective, EditorSession};

/// Capacity of the runtime's event channel.
const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug)]
enum LoopMessage {
    Event(EditorEvent),
    Shutdown,
}

/// Periodic tick source for one loaded media item.
#[derive(Debug)]
pub struct PlaybackClock {
    period: Duration,
    ticker: Option<Interval>,
}

impl PlaybackClock {
    /// Create a stopped clock. Zero periods are raised to 1 ms.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            ticker: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Replace any running interval with a fresh one. Must be called from
    /// within a tokio runtime.
    pub fn start(&mut self) {
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.ticker = Some(ticker);
        tracing::debug!(
            period_ms = self.period.as_millis() as u64,
            "Playback clock started"
        );
    }

    pub fn stop(&mut self) {
        if self.ticker.take().is_some() {
            tracing::debug!("Playback clock stopped");
        }
    }

    /// Wait for the next tick. Never completes while stopped.
    pub async fn tick(&mut self) {
        match self.ticker.as_mut() {
            Some(ticker) => {
                ticker.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

/// Cloneable sender into a running [`EditorRuntime`].
#[derive(Debug, Clone)]
pub struct EditorHandle {
    tx: mpsc::Sender<LoopMessage>,
}

impl EditorHandle {
    /// Queue an event for the session.
    pub async fn send(&self, event: EditorEvent) -> FramecutResult<()> {
        self.tx
            .send(LoopMessage::Event(event))
            .await
            .map_err(|_| FramecutError::transport("Editor runtime has stopped"))
    }

    /// Ask the runtime to stop after the messages already queued.
    pub async fn shutdown(&self) -> FramecutResult<()> {
        self.tx
            .send(LoopMessage::Shutdown)
            .await
            .map_err(|_| FramecutError::transport("Editor runtime has stopped"))
    }
}

/// Drives an [`EditorSession`] from events and playback ticks.
pub struct EditorRuntime {
    session: EditorSession,
    clock: PlaybackClock,
    tx: mpsc::Sender<LoopMessage>,
    rx: mpsc::Receiver<LoopMessage>,
    ticks_handled: u64,
}

impl EditorRuntime {
    pub fn new(session: EditorSession, tick_interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        Self {
            session,
            clock: PlaybackClock::new(tick_interval),
            tx,
            rx,
            ticks_handled: 0,
        }
    }

    /// A handle for feeding events into this runtime.
    pub fn handle(&self) -> EditorHandle {
        EditorHandle {
            tx: self.tx.clone(),
        }
    }

    /// Run until shutdown or until every handle is dropped. Returns the
    /// session for inspection.
    pub async fn run(self) -> EditorSession {
        let Self {
            mut session,
            mut clock,
            tx,
            mut rx,
            mut ticks_handled,
        } = self;
        // Only handles may keep the channel open.
        drop(tx);

        tracing::info!("Editor runtime started");

        loop {
            tokio::select! {
                biased;
                message = rx.recv() => match message {
                    Some(LoopMessage::Event(event)) => {
                        dispatch_event(&mut session, &mut clock, event);
                    }
                    Some(LoopMessage::Shutdown) => break,
                    None => {
                        tracing::debug!("All editor handles dropped");
                        break;
                    }
                },
                _ = clock.tick() => {
                    session.on_tick();
                    ticks_handled += 1;
                }
            }
        }

        clock.stop();
        tracing::info!(ticks = ticks_handled, "Editor runtime stopped");
        session
    }
}

fn dispatch_event(session: &mut EditorSession, clock: &mut PlaybackClock, event: EditorEvent) {
    match session.handle(event) {
        Ok(Some(ClockDirective::Start)) => clock.start(),
        Ok(Some(ClockDirective::Stop)) => clock.stop(),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "Editor event failed"),
    }
}
