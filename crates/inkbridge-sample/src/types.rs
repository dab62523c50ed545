//! Sample value types shared by the normalizer and the renderer

use inkbridge_errors::SampleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Mul, Sub};
use std::str::FromStr;

/// A position in either CSS pixels or surface pixels, depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point {
            x: f32::midpoint(self.x, other.x),
            y: f32::midpoint(self.y, other.y),
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Per-axis scale.
impl Mul<(f32, f32)> for Point {
    type Output = Point;

    fn mul(self, (sx, sy): (f32, f32)) -> Point {
        Point::new(self.x * sx, self.y * sy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_positive(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Stylus tilt in signed degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Tilt {
    pub x: f32,
    pub y: f32,
}

impl Tilt {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_level(self) -> bool {
        self.x.abs() < f32::EPSILON && self.y.abs() < f32::EPSILON
    }
}

/// Pointer button state as reported by the pointer-event `buttons` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ButtonMask(u16);

impl ButtonMask {
    pub const NONE: ButtonMask = ButtonMask(0);
    /// Pen tip in contact, or primary mouse button.
    pub const TIP: ButtonMask = ButtonMask(0x01);
    /// Pen barrel button, or secondary mouse button.
    pub const BARREL: ButtonMask = ButtonMask(0x02);
    pub const MIDDLE: ButtonMask = ButtonMask(0x04);
    /// Eraser end in contact.
    pub const ERASER: ButtonMask = ButtonMask(0x20);

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn contains(self, other: ButtonMask) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Exactly the eraser bit. Any other combination draws.
    pub const fn is_eraser_only(self) -> bool {
        self.0 == Self::ERASER.0
    }

    pub const fn is_barrel_only(self) -> bool {
        self.0 == Self::BARREL.0
    }
}

impl From<u8> for ButtonMask {
    fn from(bits: u8) -> Self {
        Self(u16::from(bits))
    }
}

impl fmt::Display for ButtonMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Device kind that produced a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    Mouse,
    Touch,
    Pen,
    HidRaw,
}

impl SourceKind {
    pub const ALL: [SourceKind; 4] = [
        SourceKind::Mouse,
        SourceKind::Touch,
        SourceKind::Pen,
        SourceKind::HidRaw,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Mouse => "mouse",
            SourceKind::Touch => "touch",
            SourceKind::Pen => "pen",
            SourceKind::HidRaw => "hid-raw",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = SampleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mouse" => Ok(SourceKind::Mouse),
            "touch" => Ok(SourceKind::Touch),
            "pen" => Ok(SourceKind::Pen),
            "hid" | "hid-raw" | "hidraw" => Ok(SourceKind::HidRaw),
            _ => Err(SampleError::UnknownSource(s.to_string())),
        }
    }
}

/// The stroke phase carried by a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplePhase {
    Down,
    Move,
    Up,
}

impl SamplePhase {
    /// Pointer-event name for this phase, as shown in telemetry.
    pub fn event_name(self) -> &'static str {
        match self {
            SamplePhase::Down => "pointerdown",
            SamplePhase::Move => "pointermove",
            SamplePhase::Up => "pointerup",
        }
    }
}

impl fmt::Display for SamplePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointerId(pub u32);

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One input sample after normalization. Every consumer downstream of the
/// normalizer sees this shape regardless of the device that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSample {
    /// Surface-pixel position.
    pub position: Point,
    /// Always within `[0, 1]`.
    pub pressure: f32,
    pub tilt: Tilt,
    pub rotation: f32,
    pub buttons: ButtonMask,
    pub source: SourceKind,
    pub phase: SamplePhase,
    pub pointer_id: PointerId,
    /// Client-relative CSS position, kept for telemetry.
    pub screen_position: Point,
}

impl NormalizedSample {
    pub fn is_erasing(&self) -> bool {
        self.buttons.is_eraser_only()
    }
}

/// Clamp to `[0, 1]`, mapping NaN and infinities to 0.
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Replace NaN and infinities with 0.
pub fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}
