//! Repeating timer that drives carousel autoplay

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::core::raw_msg::RawMsg;

/// Owns at most one live interval task. Starting always cancels the
/// previous task first.
#[derive(Debug, Default)]
pub struct AutoplayTimer {
    handle: Option<JoinHandle<()>>,
}

impl AutoplayTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send [`RawMsg::AutoplayTick`] every `period`, first tick one period from now
    pub fn start(&mut self, period: Duration, tx: mpsc::UnboundedSender<RawMsg>) {
        self.stop();
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(RawMsg::AutoplayTick).is_err() {
                    break;
                }
            }
        });
        self.handle = Some(handle);
        tracing::debug!(?period, "autoplay started");
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!("autoplay stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for AutoplayTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
