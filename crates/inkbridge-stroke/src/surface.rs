//! Drawing surfaces
//!
//! The renderer only ever issues the handful of path and fill calls in
//! [`DrawingSurface`]. A canvas binding implements the trait on the host
//! side; [`RecordingSurface`] and [`SvgSurface`] cover tests and tooling.

use crate::color::InkColor;
use inkbridge_sample::{Point, Size};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    #[default]
    Round,
    Butt,
    Square,
}

impl LineCap {
    pub fn as_str(self) -> &'static str {
        match self {
            LineCap::Round => "round",
            LineCap::Butt => "butt",
            LineCap::Square => "square",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: InkColor,
    pub width: f32,
    pub cap: LineCap,
}

impl StrokeStyle {
    pub fn new(color: InkColor, width: f32) -> Self {
        Self {
            color,
            width,
            cap: LineCap::Round,
        }
    }
}

/// Immediate-mode 2D path API in surface pixels.
pub trait DrawingSurface {
    /// Backing-store resolution.
    fn internal_size(&self) -> Size;

    fn begin_path(&mut self);

    fn move_to(&mut self, point: Point);

    fn quadratic_curve_to(&mut self, control: Point, end: Point);

    fn line_to(&mut self, point: Point);

    /// Stroke the current path.
    fn stroke(&mut self, style: &StrokeStyle);

    fn fill_rect(&mut self, origin: Point, size: Size, color: InkColor);
}

/// One surface call, as recorded by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    BeginPath,
    MoveTo { point: Point },
    QuadraticCurveTo { control: Point, end: Point },
    LineTo { point: Point },
    Stroke { style: StrokeStyle },
    FillRect { origin: Point, size: Size, color: InkColor },
}

/// Records every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Size,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Size::new(width, height),
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn stroke_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Stroke { .. }))
            .count()
    }
}

impl DrawingSurface for RecordingSurface {
    fn internal_size(&self) -> Size {
        self.size
    }

    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }

    fn move_to(&mut self, point: Point) {
        self.ops.push(DrawOp::MoveTo { point });
    }

    fn quadratic_curve_to(&mut self, control: Point, end: Point) {
        self.ops.push(DrawOp::QuadraticCurveTo { control, end });
    }

    fn line_to(&mut self, point: Point) {
        self.ops.push(DrawOp::LineTo { point });
    }

    fn stroke(&mut self, style: &StrokeStyle) {
        self.ops.push(DrawOp::Stroke { style: *style });
    }

    fn fill_rect(&mut self, origin: Point, size: Size, color: InkColor) {
        self.ops.push(DrawOp::FillRect {
            origin,
            size,
            color,
        });
    }
}

/// Accumulates an SVG document: each stroked path becomes a `<path>`, each
/// fill a `<rect>`, in paint order.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    size: Size,
    path: String,
    elements: Vec<String>,
}

fn num(value: f32) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() || text == "-" || text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn paint_attrs(color: &InkColor, paint: &str) -> String {
    if color.is_opaque() {
        format!("{paint}=\"{}\"", color.hex())
    } else {
        format!(
            "{paint}=\"{}\" {paint}-opacity=\"{}\"",
            color.hex(),
            num(color.a)
        )
    }
}

impl SvgSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Size::new(width, height),
            path: String::new(),
            elements: Vec::new(),
        }
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    fn push_path(&mut self, segment: std::fmt::Arguments<'_>) {
        if !self.path.is_empty() {
            self.path.push(' ');
        }
        // Writing into a String cannot fail.
        if self.path.write_fmt(segment).is_err() {
            self.path.clear();
        }
    }

    /// Complete SVG document.
    pub fn to_document(&self) -> String {
        let mut doc = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = num(self.size.width),
            h = num(self.size.height),
        );
        for element in &self.elements {
            doc.push_str("  ");
            doc.push_str(element);
            doc.push('\n');
        }
        doc.push_str("</svg>\n");
        doc
    }
}

impl DrawingSurface for SvgSurface {
    fn internal_size(&self) -> Size {
        self.size
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, point: Point) {
        self.push_path(format_args!("M {} {}", num(point.x), num(point.y)));
    }

    fn quadratic_curve_to(&mut self, control: Point, end: Point) {
        self.push_path(format_args!(
            "Q {} {} {} {}",
            num(control.x),
            num(control.y),
            num(end.x),
            num(end.y)
        ));
    }

    fn line_to(&mut self, point: Point) {
        self.push_path(format_args!("L {} {}", num(point.x), num(point.y)));
    }

    fn stroke(&mut self, style: &StrokeStyle) {
        if self.path.is_empty() {
            return;
        }
        self.elements.push(format!(
            "<path d=\"{}\" fill=\"none\" {} stroke-width=\"{}\" stroke-linecap=\"{}\"/>",
            self.path,
            paint_attrs(&style.color, "stroke"),
            num(style.width),
            style.cap.as_str(),
        ));
    }

    fn fill_rect(&mut self, origin: Point, size: Size, color: InkColor) {
        self.elements.push(format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" {}/>",
            num(origin.x),
            num(origin.y),
            num(size.width),
            num(size.height),
            paint_attrs(&color, "fill"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_surface_keeps_order() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        surface.begin_path();
        surface.move_to(Point::ORIGIN);
        surface.line_to(Point::new(1.0, 1.0));
        surface.stroke(&StrokeStyle::new(InkColor::BLACK, 2.0));

        assert_eq!(surface.ops().len(), 4);
        assert_eq!(surface.ops().first(), Some(&DrawOp::BeginPath));
        assert_eq!(surface.stroke_count(), 1);
        assert_eq!(surface.take_ops().len(), 4);
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(num(5.0), "5");
        assert_eq!(num(2.5), "2.5");
        assert_eq!(num(0.126), "0.13");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(-3.10), "-3.1");
    }

    #[test]
    fn test_svg_document() {
        let mut svg = SvgSurface::new(20.0, 10.0);
        svg.fill_rect(Point::ORIGIN, Size::new(20.0, 10.0), InkColor::WHITE);
        svg.begin_path();
        svg.move_to(Point::ORIGIN);
        svg.quadratic_curve_to(Point::ORIGIN, Point::new(5.0, 0.0));
        svg.line_to(Point::new(10.0, 0.0));
        svg.stroke(&StrokeStyle::new(InkColor::BLACK, 5.0));

        insta::assert_snapshot!(svg.to_document().trim_end(), @r##"
        <svg xmlns="http://www.w3.org/2000/svg" width="20" height="10" viewBox="0 0 20 10">
          <rect x="0" y="0" width="20" height="10" fill="#ffffff"/>
          <path d="M 0 0 Q 0 0 5 0 L 10 0" fill="none" stroke="#000000" stroke-width="5" stroke-linecap="round"/>
        </svg>
        "##);
    }

    #[test]
    fn test_svg_ignores_empty_stroke() {
        let mut svg = SvgSurface::new(10.0, 10.0);
        svg.begin_path();
        svg.stroke(&StrokeStyle::new(InkColor::BLACK, 1.0));
        assert_eq!(svg.element_count(), 0);
    }

    #[test]
    fn test_draw_op_json_tag() -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(&DrawOp::LineTo {
            point: Point::new(1.0, 2.0),
        })?;
        assert_eq!(json, r#"{"op":"line_to","point":{"x":1.0,"y":2.0}}"#);
        Ok(())
    }
}
