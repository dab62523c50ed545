//! Raw HID report decoding.

use crate::commands::DecodeArgs;
use crate::error::CliError;
use crate::output;
use anyhow::Result;
use inkbridge_config::BridgeConfig;
use inkbridge_hid_common::parse_hex_report;
use inkbridge_sample::{HidContactTracker, NormalizedSample, PointerId};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct DecodedReport {
    index: usize,
    bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    sample: Option<NormalizedSample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Execute the decode command.
pub fn execute(args: &DecodeArgs, config: &BridgeConfig, json: bool) -> Result<()> {
    let profile = config.profile(&args.profile).map_err(CliError::from)?;
    let geometry = config.geometry();
    let mut tracker = HidContactTracker::new(PointerId(0));

    let results: Vec<DecodedReport> = args
        .reports
        .iter()
        .enumerate()
        .map(|(index, text)| match parse_hex_report(text) {
            Ok(bytes) => {
                let decoded = tracker.decode(&bytes, &profile.layout, &geometry);
                DecodedReport {
                    index,
                    bytes: bytes.len(),
                    sample: decoded.as_ref().ok().copied(),
                    error: decoded.err().map(|e| e.to_string()),
                }
            }
            Err(e) => DecodedReport {
                index,
                bytes: 0,
                sample: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    if json {
        output::print_success_json("reports", &results);
    } else {
        output::heading(&format!("Profile: {}", profile.name));
        for report in &results {
            match (&report.sample, &report.error) {
                (Some(s), _) => println!(
                    "  #{} {} X:{:.3} Y:{:.3} P:{:.3} Tx:{} Ty:{} B:{}",
                    report.index,
                    s.phase,
                    s.position.x,
                    s.position.y,
                    s.pressure,
                    s.tilt.x,
                    s.tilt.y,
                    s.buttons
                ),
                (None, Some(error)) => println!("  #{} error: {error}", report.index),
                (None, None) => {}
            }
        }
    }

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    if failed > 0 {
        return Err(CliError::InvalidReport(format!(
            "{failed} of {} reports failed to decode",
            results.len()
        ))
        .into());
    }
    Ok(())
}
