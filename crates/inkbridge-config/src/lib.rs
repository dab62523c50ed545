//! Configuration for InkBridge
//!
//! A [`BridgeConfig`] is read from YAML or JSON (chosen by extension),
//! validated up front, and turned into the runtime pieces: a
//! [`StylePolicyTable`](inkbridge_stroke::StylePolicyTable), a
//! [`SurfaceGeometry`](inkbridge_sample::SurfaceGeometry), telemetry
//! settings and HID [`DeviceProfile`]s. A built-in profile set ships in
//! [`DEFAULT_DEVICES_YAML`].

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod devices;
pub mod loader;
pub mod model;
pub mod validate;

pub use devices::{
    DEFAULT_DEVICES_YAML, DeviceProfile, builtin_profiles, find_profile, profile_for_device,
};
pub use loader::ConfigFormat;
pub use model::{
    BridgeConfig, DEFAULT_QUEUE_CAPACITY, StyleConfig, SurfaceConfig, TelemetrySettings,
};
pub use validate::{validate_layout, validate_profiles};
