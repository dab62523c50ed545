//! Tablet device profiles.

use inkbridge_errors::ConfigError;
use inkbridge_hid_common::HidDeviceInfo;
use inkbridge_sample::HidReportLayout;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DEVICES_YAML: &str = include_str!("default_devices.yaml");

/// A named report layout for one tablet family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceProfile {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub vendor_id: u16,
    /// Empty matches every product from the vendor.
    #[serde(default)]
    pub product_ids: Vec<u16>,
    #[serde(default)]
    pub layout: HidReportLayout,
}

impl DeviceProfile {
    pub fn new(name: impl Into<String>, vendor_id: u16, layout: HidReportLayout) -> Self {
        Self {
            name: name.into(),
            description: None,
            vendor_id,
            product_ids: Vec::new(),
            layout,
        }
    }

    pub fn matches(&self, device: &HidDeviceInfo) -> bool {
        device.matches_vendor(self.vendor_id)
            && (self.product_ids.is_empty() || self.product_ids.contains(&device.product_id))
    }
}

#[derive(Debug, Deserialize)]
struct ProfileFile {
    profiles: Vec<DeviceProfile>,
}

/// Parse the built-in profile set.
pub fn builtin_profiles() -> Result<Vec<DeviceProfile>, ConfigError> {
    serde_yaml::from_str::<ProfileFile>(DEFAULT_DEVICES_YAML)
        .map(|file| file.profiles)
        .map_err(|e| ConfigError::parse("yaml", e))
}

/// First profile named `name`.
pub fn find_profile<'a>(
    profiles: &'a [DeviceProfile],
    name: &str,
) -> Result<&'a DeviceProfile, ConfigError> {
    profiles
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))
}

/// First profile that claims `device`.
pub fn profile_for_device<'a>(
    profiles: &'a [DeviceProfile],
    device: &HidDeviceInfo,
) -> Option<&'a DeviceProfile> {
    profiles.iter().find(|p| p.matches(device))
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn builtin_profiles_parse_and_include_reference_vendor() -> TestResult {
        let profiles = builtin_profiles()?;
        assert!(profiles.len() >= 3);
        let reference = find_profile(&profiles, "reference-tablet")?;
        assert_eq!(reference.vendor_id, 0x056a);
        assert_eq!(reference.layout, HidReportLayout::default());
        Ok(())
    }

    #[test]
    fn builtin_profile_names_are_unique() -> TestResult {
        let profiles = builtin_profiles()?;
        let mut names: Vec<_> = profiles.iter().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(names.len(), before);
        Ok(())
    }

    #[test]
    fn device_matching_by_vendor_and_product() -> TestResult {
        let profiles = builtin_profiles()?;
        let huion = HidDeviceInfo::new(0x256c, 0x006d, "/dev/hidraw3");
        assert_eq!(
            profile_for_device(&profiles, &huion).map(|p| p.name.as_str()),
            Some("huion-pen")
        );

        let mut narrow = DeviceProfile::new("narrow", 0x256c, HidReportLayout::default());
        narrow.product_ids = vec![0x0001];
        assert!(!narrow.matches(&huion));
        Ok(())
    }

    #[test]
    fn missing_profile_is_reported_by_name() {
        let err = find_profile(&[], "wacom").err();
        assert_eq!(err, Some(ConfigError::ProfileNotFound("wacom".into())));
    }
}
