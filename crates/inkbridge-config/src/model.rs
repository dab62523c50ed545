//! Bridge configuration model.

use crate::devices::DeviceProfile;
use inkbridge_sample::{Point, Size, SourceKind, SurfaceGeometry};
use inkbridge_stroke::{
    DEFAULT_ERASER_WIDTH, DEFAULT_MAX_WIDTH, DEFAULT_TOUCH_WIDTH, InkColor, StylePolicy,
    StylePolicyTable,
};
use inkbridge_telemetry::{DEFAULT_RATE_HZ, RateLimiter};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub surface: SurfaceConfig,
    pub style: StyleConfig,
    pub telemetry: TelemetrySettings,
    /// User profiles. Searched before the built-in set.
    pub devices: Vec<DeviceProfile>,
}

/// Drawing surface resolution and its on-screen size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Backing-store width in surface pixels.
    pub width: f32,
    pub height: f32,
    /// CSS width the surface is displayed at. Defaults to `width`.
    pub display_width: Option<f32>,
    pub display_height: Option<f32>,
    pub background: InkColor,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            display_width: None,
            display_height: None,
            background: InkColor::WHITE,
        }
    }
}

impl SurfaceConfig {
    pub fn internal_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn displayed_size(&self) -> Size {
        Size::new(
            self.display_width.unwrap_or(self.width),
            self.display_height.unwrap_or(self.height),
        )
    }

    /// Geometry for a surface whose bounding rect starts at the viewport origin.
    pub fn geometry(&self) -> SurfaceGeometry {
        SurfaceGeometry::new(Point::ORIGIN, self.displayed_size(), self.internal_size())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub ink: InkColor,
    /// Overrides `ink` for touch strokes.
    pub touch_ink: Option<InkColor>,
    pub w_max: f32,
    pub touch_width: f32,
    pub eraser_width: f32,
    /// Pen width follows tilt instead of pressure.
    pub tilt_mode: bool,
    /// Replaces the generated row for a source kind.
    pub policies: HashMap<SourceKind, StylePolicy>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            ink: InkColor::BLACK,
            touch_ink: None,
            w_max: DEFAULT_MAX_WIDTH,
            touch_width: DEFAULT_TOUCH_WIDTH,
            eraser_width: DEFAULT_ERASER_WIDTH,
            tilt_mode: false,
            policies: HashMap::new(),
        }
    }
}

impl StyleConfig {
    pub fn policy_table(&self, background: InkColor) -> StylePolicyTable {
        let standard = StylePolicyTable::standard(self.w_max, self.touch_width, self.tilt_mode);
        let mut table = StylePolicyTable::empty(background, self.eraser_width);
        for source in SourceKind::ALL {
            if let Some(policy) = self.policies.get(&source) {
                table.set_policy(source, *policy);
                continue;
            }
            if let Some(row) = standard.policy(source) {
                let color = match source {
                    SourceKind::Touch => self.touch_ink.unwrap_or(self.ink),
                    _ => self.ink,
                };
                table.set_policy(source, StylePolicy::new(color, row.width));
            }
        }
        table
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetrySettings {
    /// Display refresh ceiling.
    pub rate_hz: u32,
    pub queue_capacity: usize,
    /// Append pen log entries to this file.
    pub pen_log: Option<PathBuf>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            rate_hz: DEFAULT_RATE_HZ,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            pen_log: None,
        }
    }
}

impl TelemetrySettings {
    pub fn rate_limiter(&self) -> RateLimiter {
        RateLimiter::new(self.rate_hz)
    }
}

impl BridgeConfig {
    pub fn policy_table(&self) -> StylePolicyTable {
        self.style.policy_table(self.surface.background)
    }

    pub fn geometry(&self) -> SurfaceGeometry {
        self.surface.geometry()
    }
}
