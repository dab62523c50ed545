//! Loading bridge configs from disk.

use inkbridge_config::{BridgeConfig, ConfigFormat, validate_layout};
use inkbridge_errors::{ConfigError, ErrorCategory, InkBridgeError};
use inkbridge_sample::{HidReportLayout, SourceKind};
use inkbridge_stroke::{InkColor, StylePolicy, WidthRule};
use proptest::prelude::*;
use std::io::Write;
use std::path::Path;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn write_file(dir: &Path, name: &str, body: &str) -> Result<std::path::PathBuf, std::io::Error> {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path)?;
    file.write_all(body.as_bytes())?;
    Ok(path)
}

#[test]
fn yaml_config_with_partial_sections() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = write_file(
        dir.path(),
        "bridge.yaml",
        r##"
surface:
  width: 1600
  height: 1200
  display_width: 800
  display_height: 600
  background: "#fafafa"
style:
  ink: navy-free
"##,
    )?;
    let err = BridgeConfig::load(&path).err();
    assert!(matches!(
        err,
        Some(InkBridgeError::Config(ConfigError::Parse { format: "yaml", .. }))
    ));

    let path = write_file(
        dir.path(),
        "bridge.yml",
        r##"
surface:
  width: 1600
  height: 1200
  display_width: 800
  display_height: 600
  background: "#fafafa"
style:
  touch_ink: red
  tilt_mode: true
  policies:
    mouse:
      color: "#333"
      width:
        rule: fixed
        width: 2.0
telemetry:
  rate_hz: 30
"##,
    )?;
    let config = BridgeConfig::load(&path)?;
    assert_eq!(config.surface.background, InkColor::rgb(0xfa, 0xfa, 0xfa));
    assert_eq!(config.telemetry.rate_hz, 30);
    assert_eq!(config.telemetry.queue_capacity, 256);

    let table = config.policy_table();
    assert_eq!(
        table.policy(SourceKind::Mouse),
        Some(&StylePolicy::new(
            InkColor::rgb(0x33, 0x33, 0x33),
            WidthRule::Fixed { width: 2.0 }
        ))
    );
    assert_eq!(
        table.policy(SourceKind::Pen).map(|p| p.width),
        Some(WidthRule::Tilt { factor: 3.0 })
    );
    assert_eq!(
        table.policy(SourceKind::Touch).map(|p| p.color),
        Some(InkColor::RED)
    );

    let (sx, _) = config.geometry().scale();
    assert!((sx - 2.0).abs() < 1e-6);
    Ok(())
}

#[test]
fn json_config_and_user_profiles() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = write_file(
        dir.path(),
        "bridge.json",
        r#"{
  "devices": [
    {
      "name": "reference-tablet",
      "vendor_id": 1386,
      "layout": { "report_id": 1, "pressure_offset": 1, "report_len": 16 }
    }
  ]
}"#,
    )?;
    let config = BridgeConfig::load(&path)?;

    let shadowed = config.profile("reference-tablet")?;
    assert_eq!(shadowed.layout.report_id, Some(1));
    assert!(config.profile("huion-pen").is_ok());
    assert_eq!(
        config.profile("nope").err(),
        Some(ConfigError::ProfileNotFound("nope".into()))
    );
    Ok(())
}

#[test]
fn invalid_values_are_rejected_on_load() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = write_file(dir.path(), "bad.yaml", "telemetry:\n  rate_hz: 0\n")?;
    let err = BridgeConfig::load(&path).err().ok_or("expected an error")?;
    assert_eq!(err.category(), ErrorCategory::Config);
    assert!(err.to_string().contains("telemetry.rate_hz"));
    Ok(())
}

#[test]
fn unknown_extension_and_missing_file() -> TestResult {
    let dir = tempfile::tempdir()?;
    let toml = dir.path().join("bridge.toml");
    assert!(matches!(
        BridgeConfig::load(&toml).err(),
        Some(InkBridgeError::Config(ConfigError::UnsupportedFormat(_)))
    ));

    let missing = dir.path().join("missing.yaml");
    let err = BridgeConfig::load(&missing).err().ok_or("expected an error")?;
    assert!(err.to_string().contains("read_config"));
    Ok(())
}

#[test]
fn yaml_round_trip_preserves_config() -> TestResult {
    let mut config = BridgeConfig::default();
    config.style.w_max = 6.5;
    config.telemetry.pen_log = Some("pen.log".into());
    let text = config.to_string_as(ConfigFormat::Yaml)?;
    let back = BridgeConfig::from_str_as(&text, ConfigFormat::Yaml)?;
    assert_eq!(back, config);
    Ok(())
}

proptest! {
    #[test]
    fn layouts_inside_report_len_validate(
        pressure in 0usize..20,
        x in 0usize..20,
        buttons in 0usize..20,
        slack in 0usize..4,
    ) {
        let mut layout = HidReportLayout {
            pressure_offset: pressure,
            x_offset: x,
            y_offset: 0,
            tilt_x_offset: 0,
            tilt_y_offset: 0,
            buttons_offset: buttons,
            ..HidReportLayout::default()
        };
        let end = [pressure + 2, x + 2, buttons + 1, 2].into_iter().max().unwrap_or(2);
        layout.report_len = end + slack;
        prop_assert!(validate_layout("p", &layout).is_ok());

        layout.report_len = end - 1;
        prop_assert!(validate_layout("p", &layout).is_err());
    }
}
