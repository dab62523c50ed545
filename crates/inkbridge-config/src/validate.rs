//! Configuration validation.

use crate::devices::DeviceProfile;
use crate::model::{BridgeConfig, StyleConfig, SurfaceConfig, TelemetrySettings};
use inkbridge_errors::{ConfigError, ensure_positive};
use inkbridge_sample::HidReportLayout;
use inkbridge_stroke::WidthRule;
use std::collections::HashSet;

impl BridgeConfig {
    /// Reject values the renderer or decoder cannot use.
    ///
    /// # Errors
    ///
    /// The first offending field as [`ConfigError::InvalidValue`], or
    /// [`ConfigError::DuplicateProfile`] when two user profiles share a name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.surface.validate()?;
        self.style.validate()?;
        self.telemetry.validate()?;
        validate_profiles(&self.devices)
    }
}

impl SurfaceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive!("surface.width", self.width);
        ensure_positive!("surface.height", self.height);
        if let Some(width) = self.display_width {
            ensure_positive!("surface.display_width", width);
        }
        if let Some(height) = self.display_height {
            ensure_positive!("surface.display_height", height);
        }
        Ok(())
    }
}

impl StyleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive!("style.w_max", self.w_max);
        ensure_positive!("style.touch_width", self.touch_width);
        ensure_positive!("style.eraser_width", self.eraser_width);
        for (source, policy) in &self.policies {
            let (name, value) = match policy.width {
                WidthRule::Fixed { width } => ("width", width),
                WidthRule::Pressure { max } => ("max", max),
                WidthRule::Tilt { factor } => ("factor", factor),
            };
            let field = format!("style.policies.{source}.{name}");
            ensure_positive!(field, value);
        }
        Ok(())
    }
}

impl TelemetrySettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rate_hz == 0 {
            return Err(ConfigError::invalid("telemetry.rate_hz", "must be at least 1"));
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::invalid(
                "telemetry.queue_capacity",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Check one report layout against its declared length.
pub fn validate_layout(profile: &str, layout: &HidReportLayout) -> Result<(), ConfigError> {
    let prefix = format!("devices.{profile}.layout");
    if layout.pressure_max == 0 {
        return Err(ConfigError::invalid(
            format!("{prefix}.pressure_max"),
            "must be non-zero",
        ));
    }
    if layout.axis_max == 0 {
        return Err(ConfigError::invalid(
            format!("{prefix}.axis_max"),
            "must be non-zero",
        ));
    }
    for (name, offset, width) in layout.fields() {
        let end = offset.saturating_add(width);
        if end > layout.report_len {
            return Err(ConfigError::invalid(
                format!("{prefix}.{name}_offset"),
                format!(
                    "field ends at byte {end}, past report_len {}",
                    layout.report_len
                ),
            ));
        }
    }
    if layout.report_id.is_some()
        && let Some((name, _, _)) = layout.fields().into_iter().find(|(_, offset, _)| *offset == 0)
    {
        return Err(ConfigError::invalid(
            format!("{prefix}.{name}_offset"),
            "byte 0 holds the report id",
        ));
    }
    if let Some(threshold) = layout.contact_threshold
        && !(0.0..=1.0).contains(&threshold)
    {
        return Err(ConfigError::invalid(
            format!("{prefix}.contact_threshold"),
            format!("must be within 0-1, got {threshold}"),
        ));
    }
    Ok(())
}

pub fn validate_profiles(profiles: &[DeviceProfile]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for profile in profiles {
        if profile.name.trim().is_empty() {
            return Err(ConfigError::invalid("devices.name", "must not be empty"));
        }
        if !seen.insert(profile.name.to_ascii_lowercase()) {
            return Err(ConfigError::DuplicateProfile(profile.name.clone()));
        }
        validate_layout(&profile.name, &profile.layout)?;
    }
    Ok(())
}
