//! Capability summary of a capture.

use crate::capture::read_capture;
use crate::commands::ProbeArgs;
use crate::output;
use anyhow::Result;
use inkbridge_config::BridgeConfig;
use inkbridge_sample::normalize_pointer;
use inkbridge_telemetry::CapabilityProbe;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ProbeSummary {
    events: usize,
    samples: usize,
    skipped: usize,
    sources: BTreeMap<&'static str, usize>,
    features: CapabilityProbe,
}

/// Execute the probe command.
pub async fn execute(args: &ProbeArgs, config: &BridgeConfig, json: bool) -> Result<()> {
    let events = read_capture(&args.capture).await?;
    let geometry = config.geometry();

    let mut probe = CapabilityProbe::new();
    let mut sources: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut samples = 0usize;
    for event in &events {
        match normalize_pointer(event, &geometry) {
            Ok(sample) => {
                probe.observe(&sample);
                samples = samples.saturating_add(1);
                let count = sources.entry(sample.source.as_str()).or_default();
                *count = count.saturating_add(1);
            }
            Err(err) => debug!(error = %err, "event not probed"),
        }
    }

    let summary = ProbeSummary {
        events: events.len(),
        samples,
        skipped: events.len().saturating_sub(samples),
        sources,
        features: probe,
    };

    if json {
        output::print_success_json("probe", &summary);
    } else {
        print!("{}", summary.features.report());
        println!("Samples: {} of {} events", summary.samples, summary.events);
        for (source, count) in &summary.sources {
            println!("  {source}: {count}");
        }
    }
    Ok(())
}
