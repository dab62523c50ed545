//! Pointer-event normalization
//!
//! Browser-style pointer events arrive in CSS pixels relative to the
//! viewport. The surface keeps its own internal resolution, so every
//! position is shifted to the surface rectangle and rescaled per axis.

use crate::types::{
    ButtonMask, NormalizedSample, Point, PointerId, SamplePhase, Size, SourceKind, Tilt,
    clamp_unit, finite_or_zero,
};
use inkbridge_errors::SampleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mouse pressure when a button is held but the event reports none.
pub const DEFAULT_MOUSE_PRESSURE: f32 = 0.5;

/// Pointer event kind, serialized under its DOM event name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RawEventKind {
    Down,
    Move,
    Up,
    Enter,
    Leave,
    Other(String),
}

impl RawEventKind {
    pub fn name(&self) -> &str {
        match self {
            RawEventKind::Down => "pointerdown",
            RawEventKind::Move => "pointermove",
            RawEventKind::Up => "pointerup",
            RawEventKind::Enter => "pointerenter",
            RawEventKind::Leave => "pointerleave",
            RawEventKind::Other(name) => name,
        }
    }

    pub fn phase(&self) -> Option<SamplePhase> {
        match self {
            RawEventKind::Down => Some(SamplePhase::Down),
            RawEventKind::Move => Some(SamplePhase::Move),
            RawEventKind::Up => Some(SamplePhase::Up),
            _ => None,
        }
    }
}

impl From<String> for RawEventKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "pointerdown" => RawEventKind::Down,
            "pointermove" => RawEventKind::Move,
            "pointerup" => RawEventKind::Up,
            "pointerenter" => RawEventKind::Enter,
            "pointerleave" => RawEventKind::Leave,
            _ => RawEventKind::Other(name),
        }
    }
}

impl From<&str> for RawEventKind {
    fn from(name: &str) -> Self {
        RawEventKind::from(name.to_string())
    }
}

impl From<RawEventKind> for String {
    fn from(kind: RawEventKind) -> Self {
        match kind {
            RawEventKind::Other(name) => name,
            known => known.name().to_string(),
        }
    }
}

impl fmt::Display for RawEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pointer event as delivered by the host, before normalization.
///
/// Every optional field defaults when absent; an event with no position at
/// all lands on the surface origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPointerEvent {
    #[serde(rename = "type")]
    pub kind: RawEventKind,
    pub pointer_type: String,
    #[serde(default)]
    pub pointer_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<Point>,
    #[serde(default)]
    pub scroll: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tilt_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tilt_y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twist: Option<f32>,
    #[serde(default)]
    pub buttons: u16,
}

impl RawPointerEvent {
    pub fn new(kind: impl Into<RawEventKind>, pointer_type: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            pointer_type: pointer_type.into(),
            pointer_id: 0,
            client: None,
            page: None,
            scroll: Point::ORIGIN,
            pressure: None,
            tilt_x: None,
            tilt_y: None,
            twist: None,
            buttons: 0,
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.client = Some(Point::new(x, y));
        self
    }

    pub fn with_pointer_id(mut self, id: u32) -> Self {
        self.pointer_id = id;
        self
    }

    pub fn with_pressure(mut self, pressure: f32) -> Self {
        self.pressure = Some(pressure);
        self
    }

    pub fn with_tilt(mut self, x: f32, y: f32) -> Self {
        self.tilt_x = Some(x);
        self.tilt_y = Some(y);
        self
    }

    pub fn with_buttons(mut self, buttons: u16) -> Self {
        self.buttons = buttons;
        self
    }

    /// Client position, falling back to page position minus scroll offset.
    pub fn client_position(&self) -> Point {
        self.client
            .or_else(|| self.page.map(|page| page - self.scroll))
            .unwrap_or(Point::ORIGIN)
    }
}

/// Where the drawing surface sits on screen and how large its backing
/// store is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceGeometry {
    /// Top-left of the displayed surface in client coordinates.
    pub rect_origin: Point,
    /// Displayed size in CSS pixels.
    pub displayed_size: Size,
    /// Backing-store resolution in surface pixels.
    pub internal_size: Size,
}

impl SurfaceGeometry {
    pub fn new(rect_origin: Point, displayed_size: Size, internal_size: Size) -> Self {
        Self {
            rect_origin,
            displayed_size,
            internal_size,
        }
    }

    /// Surface displayed at its internal resolution at the viewport origin.
    pub fn identity(width: f32, height: f32) -> Self {
        let size = Size::new(width, height);
        Self::new(Point::ORIGIN, size, size)
    }

    /// CSS to surface scale per axis. A degenerate axis scales by 1.0.
    pub fn scale(&self) -> (f32, f32) {
        fn axis(internal: f32, displayed: f32) -> f32 {
            let scale = internal / displayed;
            if displayed > 0.0 && scale.is_finite() && scale > 0.0 {
                scale
            } else {
                1.0
            }
        }
        (
            axis(self.internal_size.width, self.displayed_size.width),
            axis(self.internal_size.height, self.displayed_size.height),
        )
    }

    /// Map a client-relative CSS position to surface pixels.
    pub fn to_internal(&self, css: Point) -> Point {
        css * self.scale()
    }

    /// Inverse of [`SurfaceGeometry::to_internal`].
    pub fn to_css(&self, internal: Point) -> Point {
        let (sx, sy) = self.scale();
        Point::new(internal.x / sx, internal.y / sy)
    }
}

impl Default for SurfaceGeometry {
    fn default() -> Self {
        Self::identity(800.0, 600.0)
    }
}

/// Effective pressure for a source. Touch is always full pressure; mice
/// have no pressure sensor and derive it from the held buttons.
pub fn source_pressure(source: SourceKind, reported: Option<f32>, buttons: ButtonMask) -> f32 {
    let pressure = match source {
        SourceKind::Touch => 1.0,
        SourceKind::Mouse => {
            if buttons.is_empty() || buttons.is_barrel_only() {
                0.0
            } else {
                reported.unwrap_or(DEFAULT_MOUSE_PRESSURE)
            }
        }
        SourceKind::Pen | SourceKind::HidRaw => reported.unwrap_or(0.0),
    };
    clamp_unit(pressure)
}

/// Normalize one pointer event.
///
/// # Errors
///
/// - [`SampleError::UnrecognizedEvent`] for event kinds outside the stroke
///   vocabulary
/// - [`SampleError::NotAStrokeEvent`] for pointer enter/leave
/// - [`SampleError::UnknownSource`] for an unknown `pointer_type`
pub fn normalize_pointer(
    raw: &RawPointerEvent,
    geometry: &SurfaceGeometry,
) -> Result<NormalizedSample, SampleError> {
    let phase = match &raw.kind {
        RawEventKind::Other(name) => return Err(SampleError::unrecognized(name.clone())),
        kind => kind
            .phase()
            .ok_or_else(|| SampleError::NotAStrokeEvent(kind.name().to_string()))?,
    };
    let source: SourceKind = raw.pointer_type.parse()?;
    let buttons = ButtonMask::from_bits(raw.buttons);

    let screen_position = raw.client_position() - geometry.rect_origin;
    let position = geometry.to_internal(screen_position);

    Ok(NormalizedSample {
        position,
        pressure: source_pressure(source, raw.pressure, buttons),
        tilt: Tilt::new(
            finite_or_zero(raw.tilt_x.unwrap_or(0.0)),
            finite_or_zero(raw.tilt_y.unwrap_or(0.0)),
        ),
        rotation: finite_or_zero(raw.twist.unwrap_or(0.0)),
        buttons,
        source,
        phase,
        pointer_id: PointerId(raw.pointer_id),
        screen_position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_identity_geometry_keeps_client_position() -> Result<(), SampleError> {
        let raw = RawPointerEvent::new("pointermove", "pen").at(12.5, 40.0);
        let sample = normalize_pointer(&raw, &SurfaceGeometry::identity(640.0, 480.0))?;
        assert!(close(sample.position.x, 12.5));
        assert!(close(sample.position.y, 40.0));
        assert_eq!(sample.phase, SamplePhase::Move);
        Ok(())
    }

    #[test]
    fn test_scaled_geometry() -> Result<(), SampleError> {
        let geometry = SurfaceGeometry::new(
            Point::new(100.0, 50.0),
            Size::new(400.0, 300.0),
            Size::new(800.0, 600.0),
        );
        let raw = RawPointerEvent::new("pointerdown", "pen").at(300.0, 200.0);
        let sample = normalize_pointer(&raw, &geometry)?;
        assert!(close(sample.position.x, 400.0));
        assert!(close(sample.position.y, 300.0));
        assert!(close(sample.screen_position.x, 200.0));
        assert!(close(sample.screen_position.y, 150.0));
        Ok(())
    }

    #[test]
    fn test_zero_displayed_size_scales_by_one() -> Result<(), SampleError> {
        let geometry =
            SurfaceGeometry::new(Point::ORIGIN, Size::new(0.0, 0.0), Size::new(800.0, 600.0));
        let raw = RawPointerEvent::new("pointermove", "pen").at(10.0, 20.0);
        let sample = normalize_pointer(&raw, &geometry)?;
        assert!(sample.position.is_finite());
        assert!(close(sample.position.x, 10.0));
        Ok(())
    }

    #[test]
    fn test_page_minus_scroll_fallback() {
        let mut raw = RawPointerEvent::new("pointermove", "mouse");
        raw.page = Some(Point::new(150.0, 1200.0));
        raw.scroll = Point::new(0.0, 1000.0);
        let pos = raw.client_position();
        assert!(close(pos.x, 150.0));
        assert!(close(pos.y, 200.0));
    }

    #[test]
    fn test_touch_is_full_pressure() -> Result<(), SampleError> {
        let raw = RawPointerEvent::new("pointermove", "touch")
            .at(1.0, 1.0)
            .with_pressure(0.2);
        let sample = normalize_pointer(&raw, &SurfaceGeometry::default())?;
        assert!(close(sample.pressure, 1.0));
        Ok(())
    }

    #[test]
    fn test_mouse_pressure_rules() {
        assert!(close(
            source_pressure(SourceKind::Mouse, None, ButtonMask::BARREL),
            0.0
        ));
        assert!(close(
            source_pressure(SourceKind::Mouse, Some(0.5), ButtonMask::BARREL),
            0.0
        ));
        assert!(close(
            source_pressure(SourceKind::Mouse, None, ButtonMask::NONE),
            0.0
        ));
        assert!(close(
            source_pressure(SourceKind::Mouse, None, ButtonMask::TIP),
            DEFAULT_MOUSE_PRESSURE
        ));
    }

    #[test]
    fn test_missing_optionals_default_to_zero() -> Result<(), SampleError> {
        let raw = RawPointerEvent::new("pointerdown", "pen").at(0.0, 0.0);
        let sample = normalize_pointer(&raw, &SurfaceGeometry::default())?;
        assert!(sample.tilt.is_level());
        assert!(close(sample.rotation, 0.0));
        assert!(close(sample.pressure, 0.0));
        Ok(())
    }

    #[test]
    fn test_unrecognized_and_hover_events() {
        let geometry = SurfaceGeometry::default();
        let raw = RawPointerEvent::new("gotpointercapture", "pen");
        assert_eq!(
            normalize_pointer(&raw, &geometry),
            Err(SampleError::unrecognized("gotpointercapture"))
        );

        let raw = RawPointerEvent::new("pointerenter", "pen");
        assert!(matches!(
            normalize_pointer(&raw, &geometry),
            Err(SampleError::NotAStrokeEvent(_))
        ));
    }

    #[test]
    fn test_unknown_pointer_type() {
        let raw = RawPointerEvent::new("pointerdown", "trackball");
        assert!(matches!(
            normalize_pointer(&raw, &SurfaceGeometry::default()),
            Err(SampleError::UnknownSource(_))
        ));
    }

    #[test]
    fn test_raw_event_json_shape() -> Result<(), serde_json::Error> {
        let raw: RawPointerEvent = serde_json::from_str(
            r#"{"type":"pointermove","pointer_type":"pen","client":{"x":1.0,"y":2.0},"pressure":0.4,"buttons":1}"#,
        )?;
        assert_eq!(raw.kind, RawEventKind::Move);
        assert_eq!(raw.buttons, 1);

        let other: RawEventKind = serde_json::from_str("\"wheel\"")?;
        assert_eq!(other, RawEventKind::Other("wheel".into()));
        assert_eq!(serde_json::to_string(&RawEventKind::Leave)?, "\"pointerleave\"");
        Ok(())
    }
}
