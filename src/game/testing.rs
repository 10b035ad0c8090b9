//! Test doubles for the game loop.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use super::alerter::BlindAlerter;

/// One alert registered with a [`SpyBlindAlerter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAlert {
    /// Delay from game start.
    pub at: Duration,
    /// Blind amount.
    pub amount: u32,
}

/// Alerter recording every request instead of acting on it.
#[derive(Debug, Clone, Default)]
pub struct SpyBlindAlerter {
    alerts: Arc<Mutex<Vec<ScheduledAlert>>>,
}

impl SpyBlindAlerter {
    /// Create a spy with no recorded alerts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Alerts scheduled so far, in call order.
    pub fn alerts(&self) -> Vec<ScheduledAlert> {
        self.alerts
            .lock()
            .map(|alerts| alerts.clone())
            .unwrap_or_default()
    }
}

impl BlindAlerter for SpyBlindAlerter {
    fn schedule_alert_at(&self, at: Duration, amount: u32) {
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(ScheduledAlert { at, amount });
        }
    }
}
