//! Recording surface replayed onto the plotters SVG backend.

use plotters::prelude::{
    Circle, IntoDrawingArea, IntoFont, PathElement, Rectangle, SVGBackend, Text,
};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color as _, RGBAColor};

use sensorboard_app::ports::{Color, Point, Rect, Stroke, Surface, TextAnchor, TextStyle};

use crate::error::RenderError;

const FONT_FAMILY: &str = "sans-serif";

#[derive(Debug, Clone, PartialEq)]
enum Primitive {
    Rect(Rect, Color),
    Line(Point, Point, Stroke),
    Path(Vec<Point>, Stroke),
    Circle(Point, f64, Color),
    Text(String, Point, TextStyle),
}

/// A [`Surface`] that keeps what was drawn and renders it on demand.
///
/// Renderers draw into it through the port; [`PlottersSurface::to_svg`]
/// turns the recording into a standalone SVG document.
#[derive(Debug, Clone)]
pub struct PlottersSurface {
    width: u32,
    height: u32,
    primitives: Vec<Primitive>,
}

impl PlottersSurface {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            primitives: Vec::new(),
        }
    }

    /// Number of recorded primitives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Render the recording as an SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidSize`] for a zero-sized surface, or
    /// [`RenderError::Draw`] if the backend rejects a primitive.
    pub fn to_svg(&self) -> Result<String, RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height))
                .into_drawing_area();
            for primitive in &self.primitives {
                let drawn = match primitive {
                    Primitive::Rect(rect, color) => root.draw(&Rectangle::new(
                        [
                            (px(rect.x), px(rect.y)),
                            (px(rect.x + rect.width), px(rect.y + rect.height)),
                        ],
                        rgba(*color).filled(),
                    )),
                    Primitive::Line(from, to, stroke) => root.draw(&PathElement::new(
                        vec![coord(*from), coord(*to)],
                        rgba(stroke.color).stroke_width(size_px(stroke.width)),
                    )),
                    Primitive::Path(points, stroke) => root.draw(&PathElement::new(
                        points.iter().copied().map(coord).collect::<Vec<_>>(),
                        rgba(stroke.color).stroke_width(size_px(stroke.width)),
                    )),
                    Primitive::Circle(center, radius, color) => root.draw(&Circle::new(
                        coord(*center),
                        size_px(*radius),
                        rgba(*color).filled(),
                    )),
                    Primitive::Text(text, at, style) => {
                        let font = (FONT_FAMILY, style.size)
                            .into_font()
                            .color(&rgba(style.color))
                            .pos(Pos::new(h_pos(style.anchor), VPos::Bottom));
                        root.draw(&Text::new(text.as_str(), coord(*at), font))
                    }
                };
                drawn.map_err(draw_error)?;
            }
            root.present().map_err(draw_error)?;
        }
        tracing::trace!(
            primitives = self.primitives.len(),
            bytes = svg.len(),
            "chart rendered"
        );
        Ok(svg)
    }
}

impl Surface for PlottersSurface {
    fn size(&self) -> (f64, f64) {
        (f64::from(self.width), f64::from(self.height))
    }

    fn clear(&mut self) {
        self.primitives.clear();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.primitives.push(Primitive::Rect(rect, color));
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.primitives.push(Primitive::Line(from, to, stroke));
    }

    fn stroke_path(&mut self, points: &[Point], stroke: Stroke) {
        if points.is_empty() {
            return;
        }
        self.primitives.push(Primitive::Path(points.to_vec(), stroke));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.primitives.push(Primitive::Circle(center, radius, color));
    }

    fn fill_text(&mut self, text: &str, at: Point, style: TextStyle) {
        self.primitives
            .push(Primitive::Text(text.to_string(), at, style));
    }
}

fn draw_error<E>(err: E) -> RenderError
where
    E: std::error::Error + Send + Sync + 'static,
{
    RenderError::Draw(Box::new(err))
}

fn rgba(color: Color) -> RGBAColor {
    RGBAColor(color.r, color.g, color.b, color.alpha)
}

fn h_pos(anchor: TextAnchor) -> HPos {
    match anchor {
        TextAnchor::Start => HPos::Left,
        TextAnchor::Middle => HPos::Center,
        TextAnchor::End => HPos::Right,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn px(value: f64) -> i32 {
    value.round() as i32
}

fn coord(point: Point) -> (i32, i32) {
    (px(point.x), px(point.y))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn size_px(value: f64) -> u32 {
    value.round().max(1.0) as u32
}
