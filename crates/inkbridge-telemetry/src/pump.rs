//! Telemetry pump
//!
//! Drains render-step records off the draw path. Every record is appended
//! to the pen log; the readout is rate limited and most-recent-wins, so a
//! burst of records between two slots collapses into the newest one.

use crate::display::DisplaySink;
use crate::pen_log::PenLog;
use crate::queue::TelemetryQueue;
use crate::rate_limiter::{RateLimiter, RateLimiterStats};
use crate::record::TelemetryRecord;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PumpStats {
    pub received: u64,
    pub displayed: u64,
    pub logged: u64,
    pub log_errors: u64,
}

pub struct TelemetryPump {
    limiter: RateLimiter,
    display: Arc<DisplaySink>,
    pen_log: Option<PenLog>,
    pending: Option<TelemetryRecord>,
    stats: PumpStats,
}

impl TelemetryPump {
    pub fn new(rate_hz: u32, display: Arc<DisplaySink>) -> Self {
        Self {
            limiter: RateLimiter::new(rate_hz),
            display,
            pen_log: None,
            pending: None,
            stats: PumpStats::default(),
        }
    }

    pub fn with_pen_log(mut self, log: PenLog) -> Self {
        self.pen_log = Some(log);
        self
    }

    /// Accept one record: log it, then show it if a readout slot is free,
    /// otherwise park it as the pending readout.
    pub fn handle(&mut self, record: TelemetryRecord) {
        self.stats.received = self.stats.received.saturating_add(1);

        if let Some(log) = self.pen_log.as_mut() {
            match log.append(&record) {
                Ok(()) => self.stats.logged = self.stats.logged.saturating_add(1),
                Err(err) => {
                    self.stats.log_errors = self.stats.log_errors.saturating_add(1);
                    warn!(error = %err, "pen log append failed");
                }
            }
        }

        self.pending = Some(record);
        self.try_display();
    }

    fn try_display(&mut self) {
        if self.pending.is_some() && self.limiter.should_process() {
            self.show_pending();
        }
    }

    fn show_pending(&mut self) {
        if let Some(record) = self.pending.take() {
            self.display.show(record.format_line());
            self.stats.displayed = self.stats.displayed.saturating_add(1);
        }
    }

    /// Show the pending readout immediately, ignoring the rate limit.
    pub fn flush(&mut self) {
        self.show_pending();
        if let Some(log) = self.pen_log.as_mut()
            && let Err(err) = log.flush()
        {
            self.stats.log_errors = self.stats.log_errors.saturating_add(1);
            warn!(error = %err, "pen log flush failed");
        }
    }

    /// Handle everything currently queued. Returns the number of records.
    pub fn drain_queue(&mut self, queue: &TelemetryQueue<TelemetryRecord>) -> usize {
        let records = queue.drain();
        let count = records.len();
        for record in records {
            self.handle(record);
        }
        count
    }

    /// Run until every sender is gone, then flush and hand the pump back.
    pub async fn run(mut self, mut rx: mpsc::Receiver<TelemetryRecord>) -> Self {
        loop {
            if self.pending.is_some() {
                let wait = self.limiter.time_until_slot();
                tokio::select! {
                    next = rx.recv() => match next {
                        Some(record) => self.handle(record),
                        None => break,
                    },
                    () = tokio::time::sleep(wait) => self.try_display(),
                }
            } else {
                match rx.recv().await {
                    Some(record) => self.handle(record),
                    None => break,
                }
            }
        }

        self.flush();
        debug!(
            received = self.stats.received,
            displayed = self.stats.displayed,
            "telemetry pump stopped"
        );
        self
    }

    pub fn stats(&self) -> &PumpStats {
        &self.stats
    }

    pub fn limiter_stats(&self) -> RateLimiterStats {
        RateLimiterStats::from(&self.limiter)
    }

    pub fn display(&self) -> &Arc<DisplaySink> {
        &self.display
    }

    pub fn pen_log(&self) -> Option<&PenLog> {
        self.pen_log.as_ref()
    }

    pub fn pen_log_mut(&mut self) -> Option<&mut PenLog> {
        self.pen_log.as_mut()
    }
}
