//! Per-device style policies
//!
//! Each device kind maps to a [`StylePolicy`] row: an ink color and a rule
//! turning a sample into a line width. Supporting a new kind means adding
//! a row, not a branch.

use crate::color::InkColor;
use inkbridge_sample::{NormalizedSample, SourceKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_MAX_WIDTH: f32 = 10.0;
pub const DEFAULT_ERASER_WIDTH: f32 = 10.0;
pub const DEFAULT_TOUCH_WIDTH: f32 = 1.0;
/// Tilt-mode multiplier applied to `pressure * |tilt.x|`.
pub const TILT_WIDTH_FACTOR: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "kebab-case")]
pub enum WidthRule {
    /// Same width for every sample.
    Fixed { width: f32 },
    /// `pressure * max`.
    Pressure { max: f32 },
    /// `pressure * factor * |tilt.x|`.
    Tilt { factor: f32 },
}

impl WidthRule {
    pub fn width(&self, sample: &NormalizedSample) -> f32 {
        let width = match *self {
            WidthRule::Fixed { width } => width,
            WidthRule::Pressure { max } => sample.pressure * max,
            WidthRule::Tilt { factor } => sample.pressure * factor * sample.tilt.x.abs(),
        };
        if width.is_finite() { width.max(0.0) } else { 0.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StylePolicy {
    pub color: InkColor,
    pub width: WidthRule,
}

impl StylePolicy {
    pub fn new(color: InkColor, width: WidthRule) -> Self {
        Self { color, width }
    }
}

/// The style chosen for one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedStyle {
    pub color: InkColor,
    pub width: f32,
    pub erasing: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StylePolicyTable {
    policies: HashMap<SourceKind, StylePolicy>,
    background: InkColor,
    eraser_width: f32,
}

impl StylePolicyTable {
    /// An empty table: every source is skipped until given a policy.
    pub fn empty(background: InkColor, eraser_width: f32) -> Self {
        Self {
            policies: HashMap::new(),
            background,
            eraser_width,
        }
    }

    /// Black ink on white. Pens and raw HID tablets scale width by
    /// pressure up to `max_width`, or by tilt when `tilt_mode` is set.
    /// Touch draws a fixed width and mice use pressure as the width.
    pub fn standard(max_width: f32, touch_width: f32, tilt_mode: bool) -> Self {
        let pen_rule = if tilt_mode {
            WidthRule::Tilt {
                factor: TILT_WIDTH_FACTOR,
            }
        } else {
            WidthRule::Pressure { max: max_width }
        };
        Self::empty(InkColor::WHITE, DEFAULT_ERASER_WIDTH)
            .with_policy(SourceKind::Pen, StylePolicy::new(InkColor::BLACK, pen_rule))
            .with_policy(
                SourceKind::HidRaw,
                StylePolicy::new(InkColor::BLACK, pen_rule),
            )
            .with_policy(
                SourceKind::Touch,
                StylePolicy::new(InkColor::BLACK, WidthRule::Fixed { width: touch_width }),
            )
            .with_policy(
                SourceKind::Mouse,
                StylePolicy::new(InkColor::BLACK, WidthRule::Pressure { max: 1.0 }),
            )
    }

    pub fn with_policy(mut self, source: SourceKind, policy: StylePolicy) -> Self {
        self.set_policy(source, policy);
        self
    }

    pub fn set_policy(&mut self, source: SourceKind, policy: StylePolicy) {
        self.policies.insert(source, policy);
    }

    pub fn policy(&self, source: SourceKind) -> Option<&StylePolicy> {
        self.policies.get(&source)
    }

    pub fn with_background(mut self, background: InkColor) -> Self {
        self.background = background;
        self
    }

    pub fn with_eraser_width(mut self, width: f32) -> Self {
        self.eraser_width = width;
        self
    }

    pub fn background(&self) -> InkColor {
        self.background
    }

    pub fn eraser_width(&self) -> f32 {
        self.eraser_width
    }

    /// Style for `sample`. The eraser overrides every per-source row.
    /// `None` when the source has no row.
    pub fn resolve(&self, sample: &NormalizedSample) -> Option<ResolvedStyle> {
        if sample.is_erasing() {
            return Some(ResolvedStyle {
                color: self.background,
                width: self.eraser_width,
                erasing: true,
            });
        }
        self.policy(sample.source).map(|policy| ResolvedStyle {
            color: policy.color,
            width: policy.width.width(sample),
            erasing: false,
        })
    }
}

impl Default for StylePolicyTable {
    fn default() -> Self {
        Self::standard(DEFAULT_MAX_WIDTH, DEFAULT_TOUCH_WIDTH, false)
    }
}
