//! Device profile listing.

use crate::error::CliError;
use crate::output;
use anyhow::Result;
use colored::*;
use inkbridge_config::BridgeConfig;

/// Execute the profiles command.
pub fn execute(config: &BridgeConfig, json: bool) -> Result<()> {
    let profiles = config.profiles().map_err(CliError::from)?;

    if json {
        output::print_success_json("profiles", &profiles);
        return Ok(());
    }

    if profiles.is_empty() {
        println!("{}", "No device profiles".yellow());
        return Ok(());
    }

    output::heading("Device Profiles:");
    for profile in &profiles {
        println!(
            "  {} ({})",
            profile.name.bold(),
            format!("{:04x}", profile.vendor_id).dimmed()
        );
        if let Some(description) = &profile.description {
            println!("    {description}");
        }
        let report_id = profile
            .layout
            .report_id
            .map(|id| format!("0x{id:02x}"))
            .unwrap_or_else(|| "none".to_string());
        println!(
            "    Report: {} bytes, id {report_id}, pressure max {}, axis max {}",
            profile.layout.report_len, profile.layout.pressure_max, profile.layout.axis_max
        );
    }
    Ok(())
}
