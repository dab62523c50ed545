//! Midpoint-quadratic segments
//!
//! Each pair of consecutive samples becomes its own stroked path so every
//! piece keeps its own width. The path curves from the previous point to
//! the midpoint and then runs straight to the new point, which closes the
//! gap to the next segment.

use crate::surface::{DrawingSurface, StrokeStyle};
use inkbridge_sample::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    pub fn midpoint(&self) -> Point {
        self.from.midpoint(self.to)
    }

    /// `begin_path, move_to(P0), quadratic_curve_to(P0, M), line_to(P1), stroke`.
    pub fn render<S: DrawingSurface + ?Sized>(&self, surface: &mut S, style: &StrokeStyle) {
        surface.begin_path();
        surface.move_to(self.from);
        surface.quadratic_curve_to(self.from, self.midpoint());
        surface.line_to(self.to);
        surface.stroke(style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::InkColor;
    use crate::surface::{DrawOp, RecordingSurface};

    #[test]
    fn test_segment_call_sequence() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let style = StrokeStyle::new(InkColor::BLACK, 4.0);
        Segment::new(Point::ORIGIN, Point::new(10.0, 0.0)).render(&mut surface, &style);

        assert_eq!(
            surface.ops(),
            &[
                DrawOp::BeginPath,
                DrawOp::MoveTo {
                    point: Point::ORIGIN
                },
                DrawOp::QuadraticCurveTo {
                    control: Point::ORIGIN,
                    end: Point::new(5.0, 0.0)
                },
                DrawOp::LineTo {
                    point: Point::new(10.0, 0.0)
                },
                DrawOp::Stroke { style },
            ]
        );
    }
}
