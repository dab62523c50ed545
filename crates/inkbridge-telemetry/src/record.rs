//! Telemetry records and their text renderings

use chrono::{DateTime, SecondsFormat, Utc};
use inkbridge_sample::{ButtonMask, NormalizedSample, Point, PointerId, SamplePhase, SourceKind, Tilt};
use serde::{Deserialize, Serialize};

/// One render step as seen by telemetry. Positions are CSS pixels, not
/// surface pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub timestamp: DateTime<Utc>,
    pub source: SourceKind,
    pub phase: SamplePhase,
    pub pointer_id: PointerId,
    pub position: Point,
    pub pressure: f32,
    pub tilt: Tilt,
    pub rotation: f32,
    pub buttons: ButtonMask,
}

impl TelemetryRecord {
    pub fn from_sample(sample: &NormalizedSample, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            source: sample.source,
            phase: sample.phase,
            pointer_id: sample.pointer_id,
            position: sample.screen_position,
            pressure: sample.pressure,
            tilt: sample.tilt,
            rotation: sample.rotation,
            buttons: sample.buttons,
        }
    }

    pub fn now(sample: &NormalizedSample) -> Self {
        Self::from_sample(sample, Utc::now())
    }

    /// Single-line readout, e.g.
    /// `pen , pointermove : X:12.000, Y:40.000, P:0.500, Tx:0.000, Ty:0.000, R:0.000, B:1`.
    pub fn format_line(&self) -> String {
        format!(
            "{} , {} : X:{:.3}, Y:{:.3}, P:{:.3}, Tx:{:.3}, Ty:{:.3}, R:{:.3}, B:{}",
            self.source,
            self.phase,
            self.position.x,
            self.position.y,
            self.pressure,
            self.tilt.x,
            self.tilt.y,
            self.rotation,
            self.buttons,
        )
    }

    /// Multi-line pen-log entry terminated by `---`.
    pub fn log_entry(&self) -> String {
        format!(
            "Time: {}\nType: {}\nEvent: {}\nPressure: {:.3}\nTiltX: {}\nTiltY: {}\nX: {:.3}\nY: {:.3}\nButtons: {}\n---\n",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.source,
            self.phase,
            self.pressure,
            self.tilt.x,
            self.tilt.y,
            self.position.x,
            self.position.y,
            self.buttons,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> TelemetryRecord {
        let timestamp = Utc
            .with_ymd_and_hms(2024, 3, 1, 12, 30, 5)
            .single()
            .unwrap_or_default();
        TelemetryRecord {
            timestamp,
            source: SourceKind::Pen,
            phase: SamplePhase::Move,
            pointer_id: PointerId(1),
            position: Point::new(12.0, 40.25),
            pressure: 0.5,
            tilt: Tilt::new(-15.0, 30.0),
            rotation: 90.0,
            buttons: ButtonMask::TIP,
        }
    }

    #[test]
    fn test_format_line() {
        insta::assert_snapshot!(record().format_line(), @"pen , pointermove : X:12.000, Y:40.250, P:0.500, Tx:-15.000, Ty:30.000, R:90.000, B:1");
    }

    #[test]
    fn test_log_entry() {
        insta::assert_snapshot!(record().log_entry().trim_end(), @r"
        Time: 2024-03-01T12:30:05.000Z
        Type: pen
        Event: pointermove
        Pressure: 0.500
        TiltX: -15
        TiltY: 30
        X: 12.000
        Y: 40.250
        Buttons: 1
        ---
        ");
    }

    #[test]
    fn test_record_uses_css_position() {
        let sample = NormalizedSample {
            position: Point::new(200.0, 100.0),
            pressure: 0.25,
            tilt: Tilt::default(),
            rotation: 0.0,
            buttons: ButtonMask::TIP,
            source: SourceKind::HidRaw,
            phase: SamplePhase::Down,
            pointer_id: PointerId(4),
            screen_position: Point::new(100.0, 50.0),
        };
        let rec = TelemetryRecord::now(&sample);
        assert_eq!(rec.position, Point::new(100.0, 50.0));
        assert!(rec.format_line().starts_with("hid-raw , pointerdown : X:100.000"));
    }

    #[test]
    fn test_record_json_shape() -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(record())?;
        assert_eq!(value["source"], "pen");
        assert_eq!(value["phase"], "move");
        assert_eq!(value["buttons"], 1);
        assert_eq!(value["pointer_id"], 1);
        assert_eq!(value["timestamp"], "2024-03-01T12:30:05Z");
        Ok(())
    }
}
