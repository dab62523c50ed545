//! Capability probe
//!
//! Watches samples and records which stylus features the connected device
//! has actually exercised.

use inkbridge_sample::{NormalizedSample, SourceKind};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CapabilityProbe {
    pub pressure: bool,
    pub tilt: bool,
    pub buttons: bool,
    pub gestures: bool,
}

impl CapabilityProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Features only ever switch on.
    pub fn observe(&mut self, sample: &NormalizedSample) {
        self.pressure |= sample.pressure > 0.0 && sample.source != SourceKind::Touch;
        self.tilt |= !sample.tilt.is_level();
        self.buttons |= !sample.buttons.is_empty();
        self.gestures |= matches!(sample.source, SourceKind::Pen | SourceKind::HidRaw);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn features(&self) -> [(&'static str, bool); 4] {
        [
            ("Pressure", self.pressure),
            ("Tilt", self.tilt),
            ("Buttons", self.buttons),
            ("Gestures", self.gestures),
        ]
    }

    pub fn report(&self) -> String {
        let mut text = String::from("Supported Features:\n");
        for (name, supported) in self.features() {
            let answer = if supported { "Yes" } else { "No" };
            text.push_str(&format!("{name}: {answer}\n"));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkbridge_sample::{ButtonMask, Point, PointerId, SamplePhase, Tilt};

    fn sample(source: SourceKind, pressure: f32, tilt: Tilt, buttons: ButtonMask) -> NormalizedSample {
        NormalizedSample {
            position: Point::ORIGIN,
            pressure,
            tilt,
            rotation: 0.0,
            buttons,
            source,
            phase: SamplePhase::Move,
            pointer_id: PointerId(0),
            screen_position: Point::ORIGIN,
        }
    }

    #[test]
    fn test_empty_report() {
        insta::assert_snapshot!(CapabilityProbe::new().report().trim_end(), @r"
        Supported Features:
        Pressure: No
        Tilt: No
        Buttons: No
        Gestures: No
        ");
    }

    #[test]
    fn test_pen_exercises_everything() {
        let mut probe = CapabilityProbe::new();
        probe.observe(&sample(
            SourceKind::Pen,
            0.4,
            Tilt::new(10.0, 0.0),
            ButtonMask::TIP,
        ));
        assert_eq!(
            probe,
            CapabilityProbe {
                pressure: true,
                tilt: true,
                buttons: true,
                gestures: true
            }
        );
    }

    #[test]
    fn test_touch_pressure_is_synthetic() {
        let mut probe = CapabilityProbe::new();
        probe.observe(&sample(
            SourceKind::Touch,
            1.0,
            Tilt::default(),
            ButtonMask::NONE,
        ));
        assert!(!probe.pressure);
        assert!(!probe.gestures);
    }

    #[test]
    fn test_features_are_sticky() {
        let mut probe = CapabilityProbe::new();
        probe.observe(&sample(SourceKind::Mouse, 0.5, Tilt::default(), ButtonMask::TIP));
        probe.observe(&sample(SourceKind::Mouse, 0.0, Tilt::default(), ButtonMask::NONE));
        assert!(probe.pressure);
        assert!(probe.buttons);

        probe.reset();
        assert_eq!(probe, CapabilityProbe::default());
    }
}
