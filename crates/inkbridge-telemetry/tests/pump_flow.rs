//! End-to-end telemetry flow through the async pump.

use inkbridge_sample::{
    ButtonMask, NormalizedSample, Point, PointerId, SamplePhase, SourceKind, Tilt,
};
use inkbridge_telemetry::{
    ChannelSink, DisplaySink, PenLog, TelemetryPump, TelemetryRecord, TelemetrySink,
};
use proptest::prelude::*;
use std::sync::Arc;

fn record(x: f32, phase: SamplePhase) -> TelemetryRecord {
    TelemetryRecord::now(&NormalizedSample {
        position: Point::new(x * 2.0, 0.0),
        pressure: 0.5,
        tilt: Tilt::default(),
        rotation: 0.0,
        buttons: ButtonMask::TIP,
        source: SourceKind::Pen,
        phase,
        pointer_id: PointerId(1),
        screen_position: Point::new(x, 0.0),
    })
}

#[tokio::test]
async fn pump_logs_everything_and_shows_the_last_record() -> Result<(), Box<dyn std::error::Error>> {
    let (sink, rx) = ChannelSink::channel(64);
    let display = Arc::new(DisplaySink::new());
    let pump = TelemetryPump::new(10, Arc::clone(&display)).with_pen_log(PenLog::in_memory());
    let task = tokio::spawn(pump.run(rx));

    assert!(sink.offer(record(0.0, SamplePhase::Down)).is_ok());
    for i in 1..20u16 {
        assert!(sink.offer(record(f32::from(i), SamplePhase::Move)).is_ok());
    }
    assert!(sink.offer(record(99.0, SamplePhase::Up)).is_ok());
    drop(sink);

    let pump = task.await?;

    assert_eq!(pump.stats().received, 21);
    assert_eq!(pump.stats().logged, 21);
    assert!(pump.stats().displayed <= 21);
    assert!(
        display
            .latest()
            .is_some_and(|line| line.starts_with("pen , pointerup : X:99.000"))
    );

    let log = pump.pen_log().map(PenLog::contents).unwrap_or_default();
    assert_eq!(log.matches("---\n").count(), 21);
    assert!(log.find("pointerdown") < log.find("pointerup"));
    Ok(())
}

#[tokio::test]
async fn closed_pump_refuses_offers_without_blocking() {
    let (sink, rx) = ChannelSink::channel(1);
    drop(rx);
    assert!(sink.offer(record(1.0, SamplePhase::Move)).is_err());
    assert_eq!(sink.dropped_count(), 1);
}

proptest! {
    #[test]
    fn format_line_always_has_seven_fields(
        x in -1.0e4f32..1.0e4,
        y in -1.0e4f32..1.0e4,
        pressure in 0.0f32..=1.0,
        buttons in 0u16..64,
    ) {
        let mut rec = record(0.0, SamplePhase::Move);
        rec.position = Point::new(x, y);
        rec.pressure = pressure;
        rec.buttons = ButtonMask::from_bits(buttons);

        let line = rec.format_line();
        let (_, fields) = line.split_once(" : ").unwrap_or_default();
        prop_assert_eq!(fields.split(", ").count(), 7);
        let expected_tail = format!("B:{buttons}");
        prop_assert!(line.ends_with(&expected_tail));
    }
}
