//! Device information types for HID tablets

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HidDeviceInfo {
    pub vendor_id: u16,
    pub product_id: u16,
    pub manufacturer: Option<String>,
    pub product_name: Option<String>,
    pub path: String,
}

impl HidDeviceInfo {
    pub fn new(vendor_id: u16, product_id: u16, path: impl Into<String>) -> Self {
        Self {
            vendor_id,
            product_id,
            manufacturer: None,
            product_name: None,
            path: path.into(),
        }
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    pub fn matches_vendor(&self, vendor_id: u16) -> bool {
        self.vendor_id == vendor_id
    }

    pub fn display_name(&self) -> String {
        self.product_name
            .clone()
            .or_else(|| self.manufacturer.clone())
            .unwrap_or_else(|| format!("{:04x}:{:04x}", self.vendor_id, self.product_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_info_vendor_match() {
        let info = HidDeviceInfo::new(0x056a, 0x0374, "/dev/hidraw0");
        assert!(info.matches_vendor(0x056a));
        assert!(!info.matches_vendor(0x28bd));
    }

    #[test]
    fn test_device_info_display_name() {
        let info = HidDeviceInfo::new(0x056a, 0x0374, "/dev/hidraw0")
            .with_product_name("Intuos S");
        assert_eq!(info.display_name(), "Intuos S");

        let info = HidDeviceInfo::new(0x056a, 0x0374, "/dev/hidraw0").with_manufacturer("Wacom");
        assert_eq!(info.display_name(), "Wacom");

        let info = HidDeviceInfo::new(0x056a, 0x0374, "/dev/hidraw0");
        assert_eq!(info.display_name(), "056a:0374");
    }

    #[test]
    fn test_device_info_serde() -> Result<(), serde_json::Error> {
        let info = HidDeviceInfo::new(0x28bd, 0x0914, "hid-1").with_product_name("Deco 01");
        let json = serde_json::to_string(&info)?;
        let back: HidDeviceInfo = serde_json::from_str(&json)?;
        assert_eq!(back, info);
        Ok(())
    }
}
