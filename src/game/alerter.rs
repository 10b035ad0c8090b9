use std::{
    io::{self, Write},
    time::Duration,
};

use tokio::{runtime::Handle, time::sleep};
use tracing::warn;

/// Schedules blind-level announcements during a game.
pub trait BlindAlerter: Send + Sync {
    /// Announce `amount` once `at` has elapsed from now.
    fn schedule_alert_at(&self, at: Duration, amount: u32);
}

/// Alerter printing `Blind is now {amount}` to stdout from tokio timers.
pub struct StdOutAlerter {
    runtime: Handle,
}

impl StdOutAlerter {
    /// Spawn alert timers on `runtime`.
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }
}

impl BlindAlerter for StdOutAlerter {
    fn schedule_alert_at(&self, at: Duration, amount: u32) {
        self.runtime.spawn(async move {
            sleep(at).await;
            let mut stdout = io::stdout().lock();
            if let Err(err) = writeln!(stdout, "Blind is now {amount}") {
                warn!(error = %err, amount, "failed to announce blind");
            }
        });
    }
}
