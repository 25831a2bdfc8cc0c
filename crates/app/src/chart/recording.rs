//! Test surface that records every primitive.

use crate::ports::surface::{Color, Point, Rect, Stroke, Surface, TextStyle};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Op {
    Rect(Rect, Color),
    Line(Point, Point),
    Path(Vec<Point>),
    Circle(Point),
    Text(String, Point, TextStyle),
}

pub(crate) struct RecordingSurface {
    pub width: f64,
    pub height: f64,
    pub ops: Vec<Op>,
    pub clears: usize,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            clears: 0,
        }
    }

    pub fn rects(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Rect(rect, _) => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(text, _, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn paths(&self) -> Vec<&[Point]> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Path(points) => Some(points.as_slice()),
                _ => None,
            })
            .collect()
    }

    pub fn circles(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Op::Circle(_))).count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.clears += 1;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(Op::Rect(rect, color));
    }

    fn stroke_line(&mut self, from: Point, to: Point, _stroke: Stroke) {
        self.ops.push(Op::Line(from, to));
    }

    fn stroke_path(&mut self, points: &[Point], _stroke: Stroke) {
        self.ops.push(Op::Path(points.to_vec()));
    }

    fn fill_circle(&mut self, center: Point, _radius: f64, _color: Color) {
        self.ops.push(Op::Circle(center));
    }

    fn fill_text(&mut self, text: &str, at: Point, style: TextStyle) {
        self.ops.push(Op::Text(text.to_string(), at, style));
    }
}
