use std::time::Duration;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTick {
    Interval,
    LatencyElapsed,
}

pub struct RefreshTimers {
    tx: UnboundedSender<RefreshTick>,
    interval: Option<JoinHandle<()>>,
    pending: Option<JoinHandle<()>>,
}

impl RefreshTimers {
    pub fn channel() -> (Self, UnboundedReceiver<RefreshTick>) {
        let (tx, rx) = unbounded_channel();
        (
            Self {
                tx,
                interval: None,
                pending: None,
            },
            rx,
        )
    }

    pub fn start_interval(&mut self, period: Duration) {
        if let Some(handle) = self.interval.take() {
            handle.abort();
        }
        let tx = self.tx.clone();
        self.interval = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(RefreshTick::Interval).is_err() {
                    break;
                }
            }
        }));
        debug!(?period, "refresh interval started");
    }

    pub fn schedule_completion(&mut self, latency: Duration) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            sleep(latency).await;
            let _ = tx.send(RefreshTick::LatencyElapsed);
        }));
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.interval.as_ref().is_some_and(|handle| !handle.is_finished())
            || self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    pub fn cancel_all(&mut self) {
        for handle in [self.interval.take(), self.pending.take()].into_iter().flatten() {
            handle.abort();
        }
        debug!("refresh timers cancelled");
    }
}

impl Drop for RefreshTimers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
