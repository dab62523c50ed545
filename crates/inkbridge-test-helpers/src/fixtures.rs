//! Input fixtures: scripted pointer strokes and synthetic tablet reports.

use inkbridge_hid_common::ReportBuilder;
use inkbridge_sample::{HidReportLayout, Point, RawPointerEvent};

/// Builds a `down, move*, up` pointer event sequence for one pointer.
#[derive(Debug, Clone)]
pub struct StrokeScript {
    pointer_type: String,
    pointer_id: u32,
    pressure: Option<f32>,
    buttons: u16,
    tilt: Option<(f32, f32)>,
    points: Vec<Point>,
}

impl StrokeScript {
    pub fn new(pointer_type: impl Into<String>) -> Self {
        Self {
            pointer_type: pointer_type.into(),
            pointer_id: 1,
            pressure: None,
            buttons: 1,
            tilt: None,
            points: Vec::new(),
        }
    }

    pub fn pointer_id(mut self, id: u32) -> Self {
        self.pointer_id = id;
        self
    }

    pub fn pressure(mut self, pressure: f32) -> Self {
        self.pressure = Some(pressure);
        self
    }

    pub fn buttons(mut self, buttons: u16) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn tilt(mut self, x: f32, y: f32) -> Self {
        self.tilt = Some((x, y));
        self
    }

    pub fn through(mut self, points: &[(f32, f32)]) -> Self {
        self.points
            .extend(points.iter().map(|&(x, y)| Point::new(x, y)));
        self
    }

    fn event(&self, kind: &str, at: Point, buttons: u16) -> RawPointerEvent {
        let mut raw = RawPointerEvent::new(kind, self.pointer_type.clone())
            .at(at.x, at.y)
            .with_pointer_id(self.pointer_id)
            .with_buttons(buttons);
        raw.pressure = self.pressure;
        if let Some((x, y)) = self.tilt {
            raw = raw.with_tilt(x, y);
        }
        raw
    }

    /// First point is the down, the rest are moves, and the stroke lifts
    /// at the last point.
    pub fn build(&self) -> Vec<RawPointerEvent> {
        let Some((first, rest)) = self.points.split_first() else {
            return Vec::new();
        };
        let mut events = Vec::with_capacity(self.points.len().saturating_add(1));
        events.push(self.event("pointerdown", *first, self.buttons));
        events.extend(
            rest.iter()
                .map(|point| self.event("pointermove", *point, self.buttons)),
        );
        let last = rest.last().unwrap_or(first);
        events.push(self.event("pointerup", *last, 0));
        events
    }
}

pub fn pen_stroke(points: &[(f32, f32)], pressure: f32) -> Vec<RawPointerEvent> {
    StrokeScript::new("pen")
        .pressure(pressure)
        .through(points)
        .build()
}

pub fn touch_stroke(points: &[(f32, f32)]) -> Vec<RawPointerEvent> {
    StrokeScript::new("touch").through(points).build()
}

/// A report in the default tablet layout.
pub fn tablet_report(pressure: u16, x: u16, y: u16, buttons: u8) -> Vec<u8> {
    let layout = HidReportLayout::default();
    let mut builder = ReportBuilder::zeroed(layout.report_len);
    builder
        .put_u16_le_at(layout.pressure_offset, pressure)
        .put_u16_le_at(layout.x_offset, x)
        .put_u16_le_at(layout.y_offset, y)
        .put_u8_at(layout.buttons_offset, buttons);
    builder.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkbridge_sample::RawEventKind;

    #[test]
    fn test_stroke_script_shape() {
        let events = pen_stroke(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)], 0.5);
        let kinds: Vec<_> = events.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                RawEventKind::Down,
                RawEventKind::Move,
                RawEventKind::Move,
                RawEventKind::Up
            ]
        );
        assert_eq!(events.last().map(|e| e.buttons), Some(0));
    }

    #[test]
    fn test_empty_script() {
        assert!(StrokeScript::new("pen").build().is_empty());
    }

    #[test]
    fn test_tablet_report_length() {
        assert_eq!(tablet_report(1, 2, 3, 1).len(), 15);
    }
}
