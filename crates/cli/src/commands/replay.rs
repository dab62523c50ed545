//! Capture replay through the normalizer and stroke renderer.

use crate::capture::read_capture;
use crate::commands::{RenderFormat, ReplayArgs};
use crate::output;
use anyhow::{Context, Result};
use inkbridge_config::BridgeConfig;
use inkbridge_sample::RawPointerEvent;
use inkbridge_stroke::{DrawingSurface, RecordingSurface, RendererStats, StrokeRenderer, SvgSurface};
use inkbridge_telemetry::{
    DisplaySink, PenLog, PumpStats, RateLimiterStats, TelemetryPump, TelemetryQueue,
    TelemetryRecord,
};
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Serialize)]
struct ReplaySummary {
    capture: String,
    events: usize,
    renderer: RendererStats,
    telemetry: PumpStats,
    readout: RateLimiterStats,
    evicted: u64,
    last_readout: Option<String>,
    pen_log: Option<String>,
    output: Option<String>,
}

/// Telemetry side of a replay: the queue the renderer offers to and the
/// pump that drains it after every event.
struct TelemetryPath {
    queue: Arc<TelemetryQueue<TelemetryRecord>>,
    pump: TelemetryPump,
    display: Arc<DisplaySink>,
    seen_updates: u64,
    echo: bool,
}

impl TelemetryPath {
    fn pump_once(&mut self) {
        self.pump.drain_queue(&self.queue);
        self.echo_readout();
    }

    fn finish(&mut self) {
        self.pump.drain_queue(&self.queue);
        self.pump.flush();
        self.echo_readout();
    }

    fn echo_readout(&mut self) {
        let updates = self.display.update_count();
        if self.echo
            && updates != self.seen_updates
            && let Some(line) = self.display.latest()
        {
            eprintln!("{line}");
        }
        self.seen_updates = updates;
    }
}

fn drive<S: DrawingSurface>(
    renderer: &mut StrokeRenderer<S>,
    events: &[RawPointerEvent],
    telemetry: &mut TelemetryPath,
    clear: bool,
) {
    if clear {
        renderer.clear();
    }
    for event in events {
        renderer.handle_raw(event);
        telemetry.pump_once();
    }
    telemetry.finish();
}

/// Execute the replay command.
pub async fn execute(args: &ReplayArgs, config: &BridgeConfig, json: bool) -> Result<()> {
    let events = read_capture(&args.capture).await?;

    let mut settings = config.telemetry.clone();
    if let Some(rate_hz) = args.rate_hz {
        settings.rate_hz = rate_hz;
    }
    if let Some(path) = &args.pen_log {
        settings.pen_log = Some(path.clone());
    }
    settings.validate()?;

    let display = Arc::new(DisplaySink::new());
    let mut pump = TelemetryPump::new(settings.rate_hz, Arc::clone(&display));
    if let Some(path) = &settings.pen_log {
        let log = PenLog::open(path)
            .with_context(|| format!("Failed to open pen log {}", path.display()))?;
        pump = pump.with_pen_log(log);
    }
    let queue = Arc::new(TelemetryQueue::new(settings.queue_capacity));
    let mut telemetry = TelemetryPath {
        queue: Arc::clone(&queue),
        pump,
        display,
        seen_updates: 0,
        echo: args.telemetry,
    };

    let size = config.surface.internal_size();
    let styles = config.policy_table();
    let geometry = config.geometry();
    let clear = !args.no_clear;

    let (document, renderer_stats) = match args.format {
        RenderFormat::Svg => {
            let mut renderer = StrokeRenderer::new(SvgSurface::new(size.width, size.height), styles)
                .with_geometry(geometry)
                .with_telemetry(Arc::clone(&queue));
            drive(&mut renderer, &events, &mut telemetry, clear);
            (renderer.surface().to_document(), renderer.stats().clone())
        }
        RenderFormat::Ops => {
            let mut renderer =
                StrokeRenderer::new(RecordingSurface::new(size.width, size.height), styles)
                    .with_geometry(geometry)
                    .with_telemetry(Arc::clone(&queue));
            drive(&mut renderer, &events, &mut telemetry, clear);
            let mut ops = serde_json::to_string_pretty(renderer.surface().ops())?;
            ops.push('\n');
            (ops, renderer.stats().clone())
        }
    };

    match &args.output {
        Some(path) => std::fs::write(path, &document)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None if !json => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.flush()?;
        }
        None => {}
    }

    let summary = ReplaySummary {
        capture: args.capture.display().to_string(),
        events: events.len(),
        renderer: renderer_stats,
        telemetry: telemetry.pump.stats().clone(),
        readout: telemetry.pump.limiter_stats(),
        evicted: queue.evicted_count(),
        last_readout: telemetry.display.latest(),
        pen_log: settings.pen_log.as_ref().map(|p| p.display().to_string()),
        output: args.output.as_ref().map(|p| p.display().to_string()),
    };
    info!(
        events = summary.events,
        segments = summary.renderer.segments,
        "replay finished"
    );

    if json {
        output::print_success_json("replay", &summary);
    } else if let Some(path) = &summary.output {
        output::heading(&format!("Replayed {} events", summary.events));
        println!(
            "  Strokes: {}  Segments: {}  Skipped: {}  Ignored: {}",
            summary.renderer.strokes,
            summary.renderer.segments,
            summary.renderer.skipped,
            summary.renderer.ignored
        );
        println!(
            "  Telemetry: {} received, {} displayed, {} logged",
            summary.telemetry.received, summary.telemetry.displayed, summary.telemetry.logged
        );
        if let Some(line) = &summary.last_readout {
            println!("  Last readout: {line}");
        }
        println!("  Output: {path}");
    }
    Ok(())
}
