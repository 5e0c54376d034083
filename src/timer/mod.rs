use std::time::Duration;

use tokio::sync::mpsc::Sender;
use tokio::sync::watch;
use tokio::time;

/// Events emitted by the countdown task. Every event carries the turn
/// generation the timer was started for, so that the session can drop events
/// that outlive the turn they belong to.
#[derive(Clone, Debug, PartialEq)]
pub enum TimerEvent {
    Tick { turn: u64, remaining: u32 },
    Expired { turn: u64 },
}

impl TimerEvent {
    pub fn turn(&self) -> u64 {
        match self {
            TimerEvent::Tick { turn, .. } => *turn,
            TimerEvent::Expired { turn } => *turn,
        }
    }
}

/// One-second countdown for a single turn. `start` spawns a tokio task that
/// decrements the remaining seconds on every tick, emits `Tick` events, and
/// emits `Expired` exactly once when the count reaches zero. The timer owns
/// its cancellation channel; `cancel` is an idempotent no-op once stopped.
#[derive(Default)]
pub struct TurnTimer {
    cancel_tx: Option<watch::Sender<bool>>,
}

impl TurnTimer {
    const TICK_PERIOD: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        TurnTimer::default()
    }

    /// Starts the countdown, cancelling any previous one first. Events are
    /// delivered through `events`; the task stops on expiry, on cancellation,
    /// or when the receiving side goes away.
    pub fn start(&mut self, turn: u64, seconds: u32, events: Sender<TimerEvent>) {
        self.cancel();

        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        self.cancel_tx = Some(cancel_tx);

        tokio::spawn(async move {
            if seconds == 0 {
                let _ = events.send(TimerEvent::Expired { turn }).await;
                return;
            }

            let mut remaining = seconds;
            let mut interval = time::interval(TurnTimer::TICK_PERIOD);
            // The first tick of a tokio interval completes immediately.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        remaining -= 1;
                        if events.send(TimerEvent::Tick { turn, remaining }).await.is_err() {
                            break;
                        }
                        if remaining == 0 {
                            let _ = events.send(TimerEvent::Expired { turn }).await;
                            break;
                        }
                    }
                    _ = cancel_rx.changed() => {
                        break;
                    }
                }
            }
        });
    }

    /// Stops the countdown immediately. Safe to call repeatedly or after
    /// expiry.
    pub fn cancel(&mut self) {
        if let Some(cancel_tx) = self.cancel_tx.take() {
            let _ = cancel_tx.send(true);
        }
    }
}

impl Drop for TurnTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
