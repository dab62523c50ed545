//! Telemetry sinks the renderer offers records to

use crate::queue::TelemetryQueue;
use crate::record::TelemetryRecord;
use inkbridge_errors::TelemetryError;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Receiving end of the render-step telemetry path.
///
/// `offer` is called on the draw path after the draw call has been issued.
/// Implementations must return immediately; an error means the record was
/// dropped, never that drawing should stop.
pub trait TelemetrySink: Send + Sync {
    fn offer(&self, record: TelemetryRecord) -> Result<(), TelemetryError>;
}

impl<S: TelemetrySink + ?Sized> TelemetrySink for Arc<S> {
    fn offer(&self, record: TelemetryRecord) -> Result<(), TelemetryError> {
        (**self).offer(record)
    }
}

impl TelemetrySink for TelemetryQueue<TelemetryRecord> {
    fn offer(&self, record: TelemetryRecord) -> Result<(), TelemetryError> {
        self.push(record);
        Ok(())
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TelemetrySink for NullSink {
    fn offer(&self, _record: TelemetryRecord) -> Result<(), TelemetryError> {
        Ok(())
    }
}

/// Bounded channel into an async [`TelemetryPump`](crate::TelemetryPump).
/// A full channel drops the new record and counts it.
#[derive(Debug)]
pub struct ChannelSink {
    tx: mpsc::Sender<TelemetryRecord>,
    capacity: usize,
    dropped: AtomicU64,
}

impl ChannelSink {
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<TelemetryRecord>) {
        let capacity = capacity.max(1);
        let (tx, rx) = mpsc::channel(capacity);
        (
            Self {
                tx,
                capacity,
                dropped: AtomicU64::new(0),
            },
            rx,
        )
    }

    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl TelemetrySink for ChannelSink {
    fn offer(&self, record: TelemetryRecord) -> Result<(), TelemetryError> {
        match self.tx.try_send(record) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                Err(TelemetryError::QueueFull {
                    capacity: self.capacity,
                })
            }
            Err(TrySendError::Closed(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                Err(TelemetryError::ChannelClosed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkbridge_sample::{
        ButtonMask, NormalizedSample, Point, PointerId, SamplePhase, SourceKind, Tilt,
    };

    fn record(x: f32) -> TelemetryRecord {
        TelemetryRecord::now(&NormalizedSample {
            position: Point::new(x, 0.0),
            pressure: 0.5,
            tilt: Tilt::default(),
            rotation: 0.0,
            buttons: ButtonMask::TIP,
            source: SourceKind::Pen,
            phase: SamplePhase::Move,
            pointer_id: PointerId(1),
            screen_position: Point::new(x, 0.0),
        })
    }

    #[test]
    fn test_channel_sink_drops_when_full() {
        let (sink, mut rx) = ChannelSink::channel(2);

        assert!(sink.offer(record(1.0)).is_ok());
        assert!(sink.offer(record(2.0)).is_ok());
        assert!(matches!(
            sink.offer(record(3.0)),
            Err(TelemetryError::QueueFull { capacity: 2 })
        ));
        assert_eq!(sink.dropped_count(), 1);

        let first = rx.try_recv().ok().map(|r| r.position.x);
        assert_eq!(first, Some(1.0));
    }

    #[test]
    fn test_channel_sink_closed() {
        let (sink, rx) = ChannelSink::channel(4);
        drop(rx);
        assert!(matches!(
            sink.offer(record(1.0)),
            Err(TelemetryError::ChannelClosed)
        ));
    }

    #[test]
    fn test_queue_sink_never_fails() {
        let queue = Arc::new(TelemetryQueue::new(1));
        assert!(queue.offer(record(1.0)).is_ok());
        assert!(queue.offer(record(2.0)).is_ok());
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.evicted_count(), 1);
    }
}
