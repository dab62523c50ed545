//! Stroke state machine
//!
//! One [`StrokeState`] per pointer id, `Idle` or `Drawing`:
//!
//! | state   | sample | effect                                       |
//! |---------|--------|----------------------------------------------|
//! | any     | Down   | start drawing, remember position             |
//! | Drawing | Move   | render segment from last position, remember  |
//! | Drawing | Up     | stop drawing                                 |
//! | Idle    | Move   | nothing (hover)                              |
//!
//! Move and Up never create state for an unknown pointer. Finished
//! pointers stay readable until a Down arrives from a new pointer id.
//!
//! After the draw call, each sample is offered to the telemetry sink.

use crate::segment::Segment;
use crate::style::StylePolicyTable;
use crate::surface::{DrawingSurface, StrokeStyle};
use inkbridge_sample::{
    NormalizedSample, Point, PointerId, RawPointerEvent, SamplePhase, Size, SurfaceGeometry,
    normalize_pointer,
};
use inkbridge_telemetry::{NullSink, TelemetryRecord, TelemetrySink};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StrokeState {
    pub is_drawing: bool,
    /// `None` until the pointer first goes down.
    pub last_position: Option<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// Not erasing and no pressure.
    NoPressure,
    /// The width rule produced zero, e.g. a level pen in tilt mode.
    ZeroWidth,
    /// No style row for the sample's source.
    NoPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderOutcome {
    StrokeStarted,
    Segment,
    /// Drawing continued but this segment was not painted.
    Skipped(SkipReason),
    StrokeEnded,
    /// No state change: hover move, stray up, or an undecodable event.
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RendererStats {
    pub strokes: u64,
    pub segments: u64,
    pub skipped: u64,
    pub ignored: u64,
    pub telemetry_dropped: u64,
}

pub struct StrokeRenderer<S> {
    surface: S,
    styles: StylePolicyTable,
    geometry: SurfaceGeometry,
    telemetry: Box<dyn TelemetrySink>,
    pointers: HashMap<PointerId, StrokeState>,
    stats: RendererStats,
}

impl<S: DrawingSurface> StrokeRenderer<S> {
    /// Renderer over `surface`, displayed at its internal resolution.
    pub fn new(surface: S, styles: StylePolicyTable) -> Self {
        let size = surface.internal_size();
        Self {
            surface,
            styles,
            geometry: SurfaceGeometry::identity(size.width, size.height),
            telemetry: Box::new(NullSink),
            pointers: HashMap::new(),
            stats: RendererStats::default(),
        }
    }

    pub fn with_telemetry(mut self, sink: impl TelemetrySink + 'static) -> Self {
        self.telemetry = Box::new(sink);
        self
    }

    /// Geometry used by [`StrokeRenderer::handle_raw`].
    pub fn with_geometry(mut self, geometry: SurfaceGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn set_geometry(&mut self, geometry: SurfaceGeometry) {
        self.geometry = geometry;
    }

    pub fn geometry(&self) -> &SurfaceGeometry {
        &self.geometry
    }

    /// Advance the pointer's state machine by one sample.
    pub fn process(&mut self, sample: &NormalizedSample) -> RenderOutcome {
        let outcome = self.transition(sample);
        match outcome {
            RenderOutcome::StrokeStarted => self.stats.strokes = self.stats.strokes.saturating_add(1),
            RenderOutcome::Segment => self.stats.segments = self.stats.segments.saturating_add(1),
            RenderOutcome::Skipped(_) => self.stats.skipped = self.stats.skipped.saturating_add(1),
            RenderOutcome::Ignored => self.stats.ignored = self.stats.ignored.saturating_add(1),
            RenderOutcome::StrokeEnded => {}
        }

        if let Err(err) = self.telemetry.offer(TelemetryRecord::now(sample)) {
            self.stats.telemetry_dropped = self.stats.telemetry_dropped.saturating_add(1);
            trace!(error = %err, "telemetry record dropped");
        }
        outcome
    }

    fn transition(&mut self, sample: &NormalizedSample) -> RenderOutcome {
        if sample.phase == SamplePhase::Down {
            self.start_stroke(sample);
            return RenderOutcome::StrokeStarted;
        }

        // Only a Down creates state; hover and stray ups on unknown ids leave none.
        let Some(state) = self.pointers.get_mut(&sample.pointer_id) else {
            return RenderOutcome::Ignored;
        };
        match (sample.phase, state.is_drawing) {
            (SamplePhase::Up, true) => {
                state.is_drawing = false;
                debug!(pointer = %sample.pointer_id, "stroke ended");
                RenderOutcome::StrokeEnded
            }
            (SamplePhase::Move, true) => {
                let from = state.last_position.unwrap_or(sample.position);
                state.last_position = Some(sample.position);
                self.render_segment(from, sample)
            }
            _ => RenderOutcome::Ignored,
        }
    }

    /// A Down from a pointer id not seen before retires every finished
    /// pointer, so the map holds the live contacts plus those that ended
    /// since the last new one.
    fn start_stroke(&mut self, sample: &NormalizedSample) {
        if !self.pointers.contains_key(&sample.pointer_id) {
            self.pointers.retain(|_, state| state.is_drawing);
        }
        self.pointers.insert(
            sample.pointer_id,
            StrokeState {
                is_drawing: true,
                last_position: Some(sample.position),
            },
        );
        debug!(pointer = %sample.pointer_id, source = %sample.source, "stroke started");
    }

    fn render_segment(&mut self, from: Point, sample: &NormalizedSample) -> RenderOutcome {
        let Some(style) = self.styles.resolve(sample) else {
            return RenderOutcome::Skipped(SkipReason::NoPolicy);
        };
        if !style.erasing && sample.pressure <= 0.0 {
            return RenderOutcome::Skipped(SkipReason::NoPressure);
        }
        if style.width <= 0.0 {
            return RenderOutcome::Skipped(SkipReason::ZeroWidth);
        }

        if style.erasing {
            self.surface.fill_rect(
                sample.position,
                Size::new(style.width, style.width),
                style.color,
            );
        }
        Segment::new(from, sample.position)
            .render(&mut self.surface, &StrokeStyle::new(style.color, style.width));
        RenderOutcome::Segment
    }

    /// Normalize and process a raw pointer event. Events that do not
    /// normalize are logged and dropped without touching any stroke.
    pub fn handle_raw(&mut self, raw: &RawPointerEvent) -> RenderOutcome {
        match normalize_pointer(raw, &self.geometry) {
            Ok(sample) => self.process(&sample),
            Err(err) => {
                if err.is_benign() {
                    trace!(event = %raw.kind, "hover event");
                } else {
                    warn!("WARNING: {err}");
                }
                self.stats.ignored = self.stats.ignored.saturating_add(1);
                RenderOutcome::Ignored
            }
        }
    }

    /// Paint the whole surface with the background color.
    pub fn clear(&mut self) {
        let size = self.surface.internal_size();
        self.surface
            .fill_rect(Point::ORIGIN, size, self.styles.background());
    }

    pub fn state(&self, pointer: PointerId) -> Option<&StrokeState> {
        self.pointers.get(&pointer)
    }

    /// Pointers with state held, drawing or finished.
    pub fn tracked_pointers(&self) -> usize {
        self.pointers.len()
    }

    /// Pointers currently mid-stroke, in id order.
    pub fn active_pointers(&self) -> Vec<PointerId> {
        let mut active: Vec<PointerId> = self
            .pointers
            .iter()
            .filter(|(_, state)| state.is_drawing)
            .map(|(id, _)| *id)
            .collect();
        active.sort_unstable();
        active
    }

    /// Drop all state for a pointer. Nothing is drawn.
    pub fn forget_pointer(&mut self, pointer: PointerId) -> Option<StrokeState> {
        self.pointers.remove(&pointer)
    }

    pub fn stats(&self) -> &RendererStats {
        &self.stats
    }

    pub fn styles(&self) -> &StylePolicyTable {
        &self.styles
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}
