//! Tablet HID report decoding
//!
//! A tablet publishes a fixed little-endian input report. The layout is a
//! device profile, not code: each vendor's report is described by a
//! [`HidReportLayout`] and decoded by the same routine.

use crate::pointer::SurfaceGeometry;
use crate::types::{
    ButtonMask, NormalizedSample, Point, PointerId, SamplePhase, SourceKind, Tilt, clamp_unit,
};
use inkbridge_errors::{DecodeError, SampleError};
use inkbridge_hid_common::{HidCommonResult, InputReportStream, ReportParser};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// Field offsets and scaling for one tablet's input report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HidReportLayout {
    /// Required value of byte 0, when the device prefixes a report id.
    pub report_id: Option<u8>,
    /// u16 LE
    pub pressure_offset: usize,
    /// i16 LE, degrees
    pub tilt_x_offset: usize,
    /// i16 LE, degrees
    pub tilt_y_offset: usize,
    /// u16 LE absolute
    pub x_offset: usize,
    /// u16 LE absolute
    pub y_offset: usize,
    /// u8 bitmask
    pub buttons_offset: usize,
    /// Declared report length in bytes.
    pub report_len: usize,
    pub pressure_max: u16,
    pub axis_max: u16,
    /// Normalized pressure above which the pen counts as touching even
    /// without the tip bit.
    pub contact_threshold: Option<f32>,
}

impl Default for HidReportLayout {
    fn default() -> Self {
        Self {
            report_id: None,
            pressure_offset: 2,
            tilt_x_offset: 6,
            tilt_y_offset: 8,
            x_offset: 10,
            y_offset: 12,
            buttons_offset: 14,
            report_len: 15,
            pressure_max: u16::MAX,
            axis_max: u16::MAX,
            contact_threshold: None,
        }
    }
}

impl HidReportLayout {
    /// `(name, offset, width)` of every field the decoder reads.
    pub fn fields(&self) -> [(&'static str, usize, usize); 6] {
        [
            ("pressure", self.pressure_offset, 2),
            ("tilt_x", self.tilt_x_offset, 2),
            ("tilt_y", self.tilt_y_offset, 2),
            ("x", self.x_offset, 2),
            ("y", self.y_offset, 2),
            ("buttons", self.buttons_offset, 1),
        ]
    }

    /// Shortest payload the decoder accepts. Never less than the furthest
    /// field end, so a sloppy `report_len` cannot cause an out-of-range read.
    pub fn min_report_len(&self) -> usize {
        self.fields()
            .iter()
            .map(|(_, offset, width)| offset.saturating_add(*width))
            .chain(std::iter::once(self.report_len))
            .max()
            .unwrap_or(self.report_len)
    }
}

fn field<T>(
    value: HidCommonResult<T>,
    name: &'static str,
    offset: usize,
    len: usize,
) -> Result<T, DecodeError> {
    value.ok().ok_or(DecodeError::FieldOutOfRange {
        field: name,
        offset,
        len,
    })
}

fn scale_axis(raw: u16, axis_max: u16, extent: f32) -> f32 {
    if axis_max == 0 {
        return 0.0;
    }
    f32::from(raw) / f32::from(axis_max) * extent
}

/// Stroke phase from the previous and current contact state. Lifting the
/// pen ends the stroke; hovering without contact is a move.
pub fn contact_phase(previous_contact: bool, contact: bool) -> SamplePhase {
    match (previous_contact, contact) {
        (false, true) => SamplePhase::Down,
        (true, false) => SamplePhase::Up,
        _ => SamplePhase::Move,
    }
}

/// Decode one raw tablet report into a sample.
///
/// # Errors
///
/// Returns [`SampleError::Decode`] when the payload is shorter than the
/// layout requires or its report id does not match. No partial sample is
/// ever produced.
pub fn decode_hid_report(
    data: &[u8],
    layout: &HidReportLayout,
    geometry: &SurfaceGeometry,
    pointer_id: PointerId,
    previous_contact: bool,
) -> Result<NormalizedSample, SampleError> {
    let required = layout.min_report_len();
    if data.len() < required {
        return Err(DecodeError::too_short(required, data.len()).into());
    }

    let parser = ReportParser::new(data);
    let len = parser.len();

    if let Some(expected) = layout.report_id {
        let actual = field(parser.u8_at(0), "report_id", 0, len)?;
        if actual != expected {
            return Err(DecodeError::UnexpectedReportId { expected, actual }.into());
        }
    }

    let raw_pressure = field(
        parser.u16_le_at(layout.pressure_offset),
        "pressure",
        layout.pressure_offset,
        len,
    )?;
    let tilt_x = field(
        parser.i16_le_at(layout.tilt_x_offset),
        "tilt_x",
        layout.tilt_x_offset,
        len,
    )?;
    let tilt_y = field(
        parser.i16_le_at(layout.tilt_y_offset),
        "tilt_y",
        layout.tilt_y_offset,
        len,
    )?;
    let raw_x = field(parser.u16_le_at(layout.x_offset), "x", layout.x_offset, len)?;
    let raw_y = field(parser.u16_le_at(layout.y_offset), "y", layout.y_offset, len)?;
    let raw_buttons = field(
        parser.u8_at(layout.buttons_offset),
        "buttons",
        layout.buttons_offset,
        len,
    )?;

    let pressure = if layout.pressure_max == 0 {
        0.0
    } else {
        clamp_unit(f32::from(raw_pressure) / f32::from(layout.pressure_max))
    };
    let buttons = ButtonMask::from(raw_buttons);
    let contact = buttons.contains(ButtonMask::TIP)
        || buttons.contains(ButtonMask::ERASER)
        || layout
            .contact_threshold
            .is_some_and(|threshold| pressure > threshold);

    let extent = geometry.internal_size;
    let position = Point::new(
        scale_axis(raw_x, layout.axis_max, extent.width),
        scale_axis(raw_y, layout.axis_max, extent.height),
    );

    Ok(NormalizedSample {
        position,
        pressure,
        tilt: Tilt::new(f32::from(tilt_x), f32::from(tilt_y)),
        rotation: 0.0,
        buttons,
        source: SourceKind::HidRaw,
        phase: contact_phase(previous_contact, contact),
        pointer_id,
        screen_position: geometry.to_css(position),
    })
}

/// Contact state for one HID device, carried between successive reports.
#[derive(Debug, Clone)]
pub struct HidContactTracker {
    pointer_id: PointerId,
    previous_contact: bool,
}

impl HidContactTracker {
    pub fn new(pointer_id: PointerId) -> Self {
        Self {
            pointer_id,
            previous_contact: false,
        }
    }

    pub fn pointer_id(&self) -> PointerId {
        self.pointer_id
    }

    pub fn in_contact(&self) -> bool {
        self.previous_contact
    }

    /// Decode the next report. Contact state only advances on success, so
    /// a dropped report cannot fake a pen lift.
    pub fn decode(
        &mut self,
        data: &[u8],
        layout: &HidReportLayout,
        geometry: &SurfaceGeometry,
    ) -> Result<NormalizedSample, SampleError> {
        let sample = decode_hid_report(
            data,
            layout,
            geometry,
            self.pointer_id,
            self.previous_contact,
        )?;
        self.previous_contact = matches!(sample.phase, SamplePhase::Down)
            || (self.previous_contact && matches!(sample.phase, SamplePhase::Move));
        Ok(sample)
    }

    pub fn reset(&mut self) {
        self.previous_contact = false;
    }
}

/// Pulls reports from an opened device stream and yields decoded samples.
pub struct HidSampleReader<S> {
    stream: S,
    layout: HidReportLayout,
    geometry: SurfaceGeometry,
    tracker: HidContactTracker,
    dropped: u64,
}

impl<S: InputReportStream> HidSampleReader<S> {
    pub fn new(
        stream: S,
        layout: HidReportLayout,
        geometry: SurfaceGeometry,
        pointer_id: PointerId,
    ) -> Self {
        Self {
            stream,
            layout,
            geometry,
            tracker: HidContactTracker::new(pointer_id),
            dropped: 0,
        }
    }

    /// Next decodable sample. Undecodable reports are logged and skipped;
    /// `Ok(None)` means the stream ended.
    ///
    /// # Errors
    ///
    /// Transport failures from the underlying stream.
    pub async fn next_sample(&mut self) -> HidCommonResult<Option<NormalizedSample>> {
        while let Some(report) = self.stream.next_report().await? {
            match self.tracker.decode(&report, &self.layout, &self.geometry) {
                Ok(sample) => {
                    trace!(phase = %sample.phase, pressure = sample.pressure, "hid sample");
                    return Ok(Some(sample));
                }
                Err(err) => {
                    self.dropped = self.dropped.saturating_add(1);
                    warn!(
                        device = %self.stream.device_info().display_name(),
                        error = %err,
                        "dropping undecodable report"
                    );
                }
            }
        }
        Ok(None)
    }

    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }

    pub fn stream(&self) -> &S {
        &self.stream
    }
}
