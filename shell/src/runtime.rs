//! Serialized event loop around the controller.
//!
//! One task owns the [`Controller`]. UI events, the splash timer and
//! shutdown all funnel through a single `select!`, so every transition is
//! applied in arrival order and a splash timeout can never interleave with a
//! navigation half way through.

use std::future::pending;
use std::pin::Pin;

use estate_core::{Controller, Snapshot, Transition};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant, Sleep};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::events::{ShellEvent, UiEvent};

/// Errors talking to a running shell.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("event loop has stopped")]
    Closed,
    #[error("event loop panicked: {0}")]
    Task(#[from] tokio::task::JoinError),
}

struct Envelope {
    event: UiEvent,
    ack: Option<oneshot::Sender<Snapshot>>,
}

type SplashTimer = Option<Pin<Box<Sleep>>>;

/// Handle to a running shell.
pub struct ShellHandle {
    events: mpsc::UnboundedSender<Envelope>,
    outcomes: mpsc::UnboundedReceiver<ShellEvent>,
    snapshots: watch::Receiver<Snapshot>,
    task: JoinHandle<()>,
}

impl ShellHandle {
    /// Queue an event without waiting for it to be applied.
    pub fn send(&self, event: UiEvent) -> Result<(), ShellError> {
        self.events
            .send(Envelope { event, ack: None })
            .map_err(|_| ShellError::Closed)
    }

    /// Queue an event and wait for the snapshot taken right after it.
    pub async fn dispatch(&self, event: UiEvent) -> Result<Snapshot, ShellError> {
        let (ack, done) = oneshot::channel();
        self.events
            .send(Envelope {
                event,
                ack: Some(ack),
            })
            .map_err(|_| ShellError::Closed)?;
        done.await.map_err(|_| ShellError::Closed)
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// Watch snapshots as they are published.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Next transition or rejection, in the order they happened.
    ///
    /// Returns `None` once the loop has stopped and every outcome was read.
    pub async fn next_event(&mut self) -> Option<ShellEvent> {
        self.outcomes.recv().await
    }

    /// Outcome already produced, if any, without waiting.
    pub fn try_next_event(&mut self) -> Option<ShellEvent> {
        self.outcomes.try_recv().ok()
    }

    /// Stop accepting events and wait for the loop to drain.
    pub async fn shutdown(self) -> Result<(), ShellError> {
        let Self { events, task, .. } = self;
        drop(events);
        task.await?;
        Ok(())
    }
}

/// Start the shell on the current tokio runtime.
///
/// The splash is shown and its fallback armed immediately.
pub fn spawn(config: &Config) -> ShellHandle {
    let mut controller = Controller::new(config.controller());
    let started = Instant::now();
    controller.start_splash(0);
    let timer: SplashTimer = Some(Box::pin(sleep_until(started + config.splash_timeout)));

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
    let (snapshots_tx, snapshots_rx) = watch::channel(controller.snapshot());

    let shell = EventLoop {
        controller,
        started,
        timer,
        events: events_rx,
        outcomes: outcomes_tx,
        snapshots: snapshots_tx,
    };
    let task = tokio::spawn(shell.run());

    ShellHandle {
        events: events_tx,
        outcomes: outcomes_rx,
        snapshots: snapshots_rx,
        task,
    }
}

struct EventLoop {
    controller: Controller,
    started: Instant,
    timer: SplashTimer,
    events: mpsc::UnboundedReceiver<Envelope>,
    outcomes: mpsc::UnboundedSender<ShellEvent>,
    snapshots: watch::Sender<Snapshot>,
}

impl EventLoop {
    async fn run(mut self) {
        info!(active = %self.controller.active(), "shell started");
        loop {
            tokio::select! {
                biased;
                envelope = self.events.recv() => {
                    let Some(Envelope { event, ack }) = envelope else { break };
                    self.apply(event);
                    let snapshot = self.publish();
                    if let Some(ack) = ack {
                        // Caller may have given up waiting
                        let _ = ack.send(snapshot);
                    }
                }
                () = splash_elapsed(&mut self.timer) => {
                    self.timer = None;
                    let now_ms = self.elapsed_ms();
                    if let Some(transition) = self.controller.tick(now_ms) {
                        info!(now_ms, "splash timed out");
                        self.emit(ShellEvent::Transitioned(transition));
                        self.publish();
                    }
                }
            }
        }
        info!(active = %self.controller.active(), "shell stopped");
    }

    fn apply(&mut self, event: UiEvent) {
        debug!(event = event.name(), "ui event");
        let result = match event {
            UiEvent::Navigate { screen, params } => {
                Ok(Some(self.controller.navigate_named(&screen, &params)))
            }
            UiEvent::Back => Ok(Some(self.controller.go_back())),
            UiEvent::LoginSucceeded { response } => {
                self.controller.complete_login(&response).map(Some)
            }
            UiEvent::OtpVerified => Ok(Some(self.controller.complete_otp_verification())),
            UiEvent::PasswordResetDone => Ok(Some(self.controller.complete_password_reset())),
            UiEvent::Logout => {
                self.timer = None;
                Ok(Some(self.controller.reset_session()))
            }
            UiEvent::SplashComplete => {
                self.timer = None;
                Ok(self.controller.finish_splash())
            }
        };

        match result {
            Ok(Some(transition)) => self.emit(ShellEvent::Transitioned(transition)),
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "event rejected");
                self.emit(ShellEvent::Rejected {
                    reason: e.to_string(),
                });
            }
        }
    }

    fn emit(&self, outcome: ShellEvent) {
        if let ShellEvent::Transitioned(Transition { from, to, kind }) = &outcome {
            debug!(%from, %to, ?kind, "transition");
        }
        // Nobody listening is fine; snapshots still go out
        let _ = self.outcomes.send(outcome);
    }

    fn publish(&self) -> Snapshot {
        let snapshot = self.controller.snapshot();
        self.snapshots.send_replace(snapshot.clone());
        snapshot
    }

    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

async fn splash_elapsed(timer: &mut SplashTimer) {
    match timer {
        Some(sleep) => sleep.as_mut().await,
        None => pending().await,
    }
}
