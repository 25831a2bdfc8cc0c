//! The three chart renderers.

use sensorboard_domain::chart::ChartPoint;

use super::labels::label_indices;
use super::scale::{LinearScale, extent};
use super::smoothing::moving_average;
use crate::ports::surface::{Color, Point, Rect, Stroke, Surface, TextAnchor, TextStyle};

const GRID_LINES: usize = 5;
const LINE_WIDTH: f64 = 2.0;
const DOT_RADIUS: f64 = 3.0;
const LABEL_SIZE: f64 = 10.0;
const PLACEHOLDER_SIZE: f64 = 14.0;
const BAND_HEIGHT: f64 = 4.0;
const MIN_SPAN_WIDTH: f64 = 2.0;
const LINE_LABELS: usize = 4;
const BAR_LABELS: usize = 6;

const GRID: Color = Color::rgb(148, 163, 184);
const MUTED: Color = Color::rgb(100, 116, 139);

/// Drawing options shared by all renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    /// Series color.
    pub color: Color,
    /// Blank margin on every side.
    pub padding: f64,
    /// Target number of axis labels. Defaults per chart kind when `None`.
    pub max_labels: Option<usize>,
    /// Text shown when there is nothing to plot.
    pub placeholder: String,
    /// Moving-average window of the line chart.
    pub smoothing_window: usize,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            color: Color::rgb(79, 70, 229),
            padding: 8.0,
            max_labels: None,
            placeholder: "No data".to_string(),
            smoothing_window: 3,
        }
    }
}

impl ChartOptions {
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }
}

/// What a render call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// No surface was given.
    Skipped,
    /// No points, the placeholder text was drawn.
    Placeholder,
    Drawn,
}

/// Smoothed line chart with grid lines, point markers and thinned time labels.
///
/// The vertical domain is `[min, max]` of the smoothed values.
pub fn render_line<S: Surface>(
    surface: Option<&mut S>,
    points: &[ChartPoint],
    options: &ChartOptions,
) -> RenderOutcome {
    let Some(surface) = surface else {
        return RenderOutcome::Skipped;
    };
    surface.clear();
    if points.is_empty() {
        draw_placeholder(surface, options);
        return RenderOutcome::Placeholder;
    }
    let (width, height) = surface.size();
    let pad = options.padding;

    let smoothed = moving_average(&finite_values(points), options.smoothing_window);
    let (min, max) = extent(smoothed.iter().copied()).unwrap_or((0.0, 0.0));
    let y = LinearScale::new((min, max), (height - pad, pad));
    let xs = x_positions(points, pad, width - pad);

    let grid = Stroke {
        color: GRID.with_alpha(0.3),
        width: 1.0,
    };
    for i in 0..GRID_LINES {
        let gy = pad + (height - 2.0 * pad) * i as f64 / (GRID_LINES - 1) as f64;
        surface.stroke_line(Point::new(pad, gy), Point::new(width - pad, gy), grid);
    }

    let path: Vec<Point> = xs
        .iter()
        .zip(&smoothed)
        .map(|(x, v)| Point::new(*x, y.apply(*v)))
        .collect();
    surface.stroke_path(
        &path,
        Stroke {
            color: options.color,
            width: LINE_WIDTH,
        },
    );
    for point in &path {
        surface.fill_circle(*point, DOT_RADIUS, options.color);
    }

    let desired = options.max_labels.unwrap_or(LINE_LABELS);
    for idx in label_indices(points.len(), desired, true) {
        surface.fill_text(
            &points[idx].axis_label(),
            Point::new(xs[idx], height - 1.0),
            label_style(),
        );
    }
    RenderOutcome::Drawn
}

/// Bar chart over `[0, max]`, one slot per point.
///
/// Negative values are drawn as zero-height bars; every point gets a bar.
pub fn render_bar<S: Surface>(
    surface: Option<&mut S>,
    points: &[ChartPoint],
    options: &ChartOptions,
) -> RenderOutcome {
    let Some(surface) = surface else {
        return RenderOutcome::Skipped;
    };
    surface.clear();
    if points.is_empty() {
        draw_placeholder(surface, options);
        return RenderOutcome::Placeholder;
    }
    let (width, height) = surface.size();
    let pad = options.padding;
    let baseline = height - pad;

    let values: Vec<f64> = finite_values(points).into_iter().map(|v| v.max(0.0)).collect();
    let max = extent(values.iter().copied()).map_or(0.0, |(_, hi)| hi);
    let y = LinearScale::new((0.0, max), (baseline, pad));
    let step = (width - 2.0 * pad) / points.len() as f64;
    let bar_width = step * 0.6;

    surface.stroke_line(
        Point::new(pad, baseline),
        Point::new(width - pad, baseline),
        Stroke {
            color: GRID.with_alpha(0.5),
            width: 1.0,
        },
    );

    for (idx, value) in values.iter().enumerate() {
        let x = pad + idx as f64 * step + step * 0.2;
        let top = y.apply(*value);
        surface.fill_rect(Rect::new(x, top, bar_width, baseline - top), options.color);
    }

    let desired = options.max_labels.unwrap_or(BAR_LABELS);
    for idx in label_indices(points.len(), desired, false) {
        let center = pad + idx as f64 * step + step * 0.5;
        surface.fill_text(
            &points[idx].axis_label(),
            Point::new(center, height - 1.0),
            label_style(),
        );
    }
    RenderOutcome::Drawn
}

/// On/off timeline: a baseline band plus one filled rectangle per
/// contiguous run of "on" samples.
///
/// The band is drawn even without data. A run starting at sample `i` extends
/// to the first following "off" sample, or to the last sample when the signal
/// stays on. A lone "on" as the final sample has no successor and draws nothing.
pub fn render_binary_events<S: Surface>(
    surface: Option<&mut S>,
    points: &[ChartPoint],
    options: &ChartOptions,
) -> RenderOutcome {
    let Some(surface) = surface else {
        return RenderOutcome::Skipped;
    };
    surface.clear();
    let (width, height) = surface.size();
    let pad = options.padding;
    surface.fill_rect(
        Rect::new(
            pad,
            height / 2.0 - BAND_HEIGHT / 2.0,
            width - 2.0 * pad,
            BAND_HEIGHT,
        ),
        options.color.with_alpha(0.2),
    );
    if points.is_empty() {
        draw_placeholder(surface, options);
        return RenderOutcome::Placeholder;
    }
    let xs = x_positions(points, pad, width - pad);

    for (start, end) in on_spans(points) {
        let x_start = xs[start];
        let span = (xs[end] - x_start).max(MIN_SPAN_WIDTH);
        surface.fill_rect(
            Rect::new(x_start, pad, span, height - 2.0 * pad),
            options.color.with_alpha(0.8),
        );
    }

    let desired = options.max_labels.unwrap_or(LINE_LABELS);
    for idx in label_indices(points.len(), desired, true) {
        surface.fill_text(
            &points[idx].axis_label(),
            Point::new(xs[idx], height - 1.0),
            label_style(),
        );
    }
    RenderOutcome::Drawn
}

fn draw_placeholder<S: Surface>(surface: &mut S, options: &ChartOptions) {
    let (width, height) = surface.size();
    surface.fill_text(
        &options.placeholder,
        Point::new(width / 2.0, height / 2.0),
        TextStyle {
            color: MUTED,
            size: PLACEHOLDER_SIZE,
            anchor: TextAnchor::Middle,
        },
    );
}

fn label_style() -> TextStyle {
    TextStyle {
        color: MUTED,
        size: LABEL_SIZE,
        anchor: TextAnchor::Middle,
    }
}

fn finite_values(points: &[ChartPoint]) -> Vec<f64> {
    points
        .iter()
        .map(|p| if p.value.is_finite() { p.value } else { 0.0 })
        .collect()
}

/// Horizontal positions: proportional to time when every point is timed,
/// by index otherwise.
fn x_positions(points: &[ChartPoint], start: f64, end: f64) -> Vec<f64> {
    let times: Option<Vec<f64>> = points
        .iter()
        .map(|p| p.time().map(|t| t.timestamp_millis() as f64 / 1000.0))
        .collect();
    let keys = times.unwrap_or_else(|| (0..points.len()).map(|i| i as f64).collect());
    let (min, max) = extent(keys.iter().copied()).unwrap_or((0.0, 0.0));
    let scale = LinearScale::new((min, max), (start, end));
    keys.iter().map(|k| scale.apply(*k)).collect()
}

/// `(first on index, end index)` of each contiguous run of on samples.
fn on_spans(points: &[ChartPoint]) -> Vec<(usize, usize)> {
    let last = points.len().saturating_sub(1);
    let mut spans = Vec::new();
    let mut start = None;
    for (idx, point) in points.iter().enumerate() {
        match (start, point.is_on()) {
            (None, true) => start = Some(idx),
            (Some(s), false) => {
                spans.push((s, idx));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start.filter(|s| *s < last) {
        spans.push((s, last));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::recording::{Op, RecordingSurface};
    use sensorboard_domain::time::parse_timestamp;

    fn at(minute: u32) -> sensorboard_domain::time::Timestamp {
        parse_timestamp(&format!("2024-01-01T10:{minute:02}:00Z")).unwrap()
    }

    fn timed(values: &[f64]) -> Vec<ChartPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| ChartPoint::timed(at(u32::try_from(i).unwrap()), *v))
            .collect()
    }

    fn flags(values: &[bool]) -> Vec<ChartPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, on)| ChartPoint::flag(at(u32::try_from(i).unwrap()), *on))
            .collect()
    }

    #[test]
    fn should_skip_silently_without_surface() {
        let options = ChartOptions::default();
        let points = timed(&[1.0, 2.0]);
        assert_eq!(
            render_line::<RecordingSurface>(None, &points, &options),
            RenderOutcome::Skipped
        );
        assert_eq!(
            render_bar::<RecordingSurface>(None, &[], &options),
            RenderOutcome::Skipped
        );
        assert_eq!(
            render_binary_events::<RecordingSurface>(None, &points, &options),
            RenderOutcome::Skipped
        );
    }

    #[test]
    fn should_draw_centered_placeholder_when_empty() {
        let mut surface = RecordingSurface::new(200.0, 100.0);
        let options = ChartOptions::default().with_placeholder("Nothing yet");

        let outcome = render_line(Some(&mut surface), &[], &options);

        assert_eq!(outcome, RenderOutcome::Placeholder);
        assert_eq!(surface.ops.len(), 1);
        let Op::Text(text, at, style) = &surface.ops[0] else {
            panic!("expected text, got {:?}", surface.ops[0]);
        };
        assert_eq!(text, "Nothing yet");
        assert_eq!(*at, Point::new(100.0, 50.0));
        assert_eq!(style.anchor, TextAnchor::Middle);
    }

    #[test]
    fn should_draw_placeholder_for_every_chart_kind() {
        let options = ChartOptions::default();
        let mut surface = RecordingSurface::new(100.0, 40.0);
        assert_eq!(
            render_bar(Some(&mut surface), &[], &options),
            RenderOutcome::Placeholder
        );
        assert_eq!(surface.texts(), vec!["No data"]);
        assert_eq!(
            render_binary_events(Some(&mut surface), &[], &options),
            RenderOutcome::Placeholder
        );
        assert_eq!(surface.texts(), vec!["No data"]);
        assert_eq!(surface.rects().len(), 1);
    }

    #[test]
    fn should_clear_before_every_draw() {
        let mut surface = RecordingSurface::new(300.0, 120.0);
        let options = ChartOptions::default();
        let points = timed(&[40.0, 42.0, 45.0, 41.0]);

        render_line(Some(&mut surface), &points, &options);
        let first = surface.ops.clone();
        render_line(Some(&mut surface), &points, &options);

        assert_eq!(surface.clears, 2);
        assert_eq!(surface.ops, first);
    }

    #[test]
    fn should_draw_one_marker_per_point_on_line_chart() {
        let mut surface = RecordingSurface::new(300.0, 120.0);
        let points = timed(&[10.0, 20.0, 30.0, 40.0, 50.0]);

        let outcome = render_line(Some(&mut surface), &points, &ChartOptions::default());

        assert_eq!(outcome, RenderOutcome::Drawn);
        assert_eq!(surface.paths().len(), 1);
        assert_eq!(surface.paths()[0].len(), 5);
        assert_eq!(surface.circles(), 5);
    }

    #[test]
    fn should_span_padded_area_on_line_chart() {
        let mut surface = RecordingSurface::new(300.0, 120.0);
        let points = timed(&[10.0, 20.0, 30.0]);

        render_line(Some(&mut surface), &points, &ChartOptions::default());

        let path = surface.paths()[0].to_vec();
        assert!((path[0].x - 8.0).abs() < 1e-9);
        assert!((path[2].x - 292.0).abs() < 1e-9);
        // smoothed values are 10, 15, 20: min at the bottom, max at the top
        assert!((path[0].y - 112.0).abs() < 1e-9);
        assert!((path[2].y - 8.0).abs() < 1e-9);
    }

    #[test]
    fn should_render_flat_line_without_dividing_by_zero() {
        let mut surface = RecordingSurface::new(300.0, 120.0);
        let points = timed(&[55.0, 55.0, 55.0, 55.0]);

        render_line(Some(&mut surface), &points, &ChartOptions::default());

        assert!(surface.paths()[0].iter().all(|p| p.y.is_finite() && p.x.is_finite()));
    }

    #[test]
    fn should_render_single_point_line() {
        let mut surface = RecordingSurface::new(300.0, 120.0);
        let points = timed(&[42.0]);

        let outcome = render_line(Some(&mut surface), &points, &ChartOptions::default());

        assert_eq!(outcome, RenderOutcome::Drawn);
        assert_eq!(surface.circles(), 1);
        assert_eq!(surface.texts(), vec!["10:00"]);
    }

    #[test]
    fn should_label_last_point_of_line_chart() {
        let mut surface = RecordingSurface::new(300.0, 120.0);
        let points = timed(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0]);

        render_line(Some(&mut surface), &points, &ChartOptions::default());

        assert_eq!(
            surface.texts(),
            vec!["10:00", "10:03", "10:06", "10:09", "10:10"]
        );
    }

    #[test]
    fn should_draw_zero_height_bar_for_zero_value() {
        let mut surface = RecordingSurface::new(216.0, 116.0);
        let points = vec![ChartPoint::labeled("a", 0.0), ChartPoint::labeled("b", 10.0)];

        let outcome = render_bar(Some(&mut surface), &points, &ChartOptions::default());

        assert_eq!(outcome, RenderOutcome::Drawn);
        let rects = surface.rects();
        assert_eq!(rects.len(), 2);
        // step = (216 - 16) / 2 = 100
        assert!((rects[0].x - 28.0).abs() < 1e-9);
        assert!((rects[0].width - 60.0).abs() < 1e-9);
        assert!(rects[0].height.abs() < 1e-9);
        assert!((rects[1].x - 128.0).abs() < 1e-9);
        assert!((rects[1].y - 8.0).abs() < 1e-9);
        assert!((rects[1].height - 100.0).abs() < 1e-9);
        assert_eq!(surface.texts(), vec!["a", "b"]);
    }

    #[test]
    fn should_clamp_negative_bars_to_zero() {
        let mut surface = RecordingSurface::new(216.0, 116.0);
        let points = vec![ChartPoint::labeled("a", -5.0), ChartPoint::labeled("b", 5.0)];

        render_bar(Some(&mut surface), &points, &ChartOptions::default());

        let rects = surface.rects();
        assert!(rects[0].height.abs() < 1e-9);
        assert!((rects[1].height - 100.0).abs() < 1e-9);
    }

    #[test]
    fn should_render_all_zero_bars_without_nan() {
        let mut surface = RecordingSurface::new(216.0, 116.0);
        let points = vec![ChartPoint::labeled("a", 0.0), ChartPoint::labeled("b", 0.0)];

        render_bar(Some(&mut surface), &points, &ChartOptions::default());

        assert!(surface.rects().iter().all(|r| r.height.abs() < 1e-9 && r.y.is_finite()));
    }

    #[test]
    fn should_thin_bar_labels() {
        let mut surface = RecordingSurface::new(400.0, 100.0);
        let points: Vec<ChartPoint> = (0..12_u32)
            .map(|i| ChartPoint::labeled(format!("m{i}"), f64::from(i)))
            .collect();

        render_bar(Some(&mut surface), &points, &ChartOptions::default());

        assert_eq!(surface.rects().len(), 12);
        assert_eq!(surface.texts(), vec!["m0", "m2", "m4", "m6", "m8", "m10"]);
    }

    #[test]
    fn should_draw_only_baseline_band_when_signal_is_off() {
        let mut surface = RecordingSurface::new(216.0, 100.0);
        let points = flags(&[false, false, false]);

        render_binary_events(Some(&mut surface), &points, &ChartOptions::default());

        let rects = surface.rects();
        assert_eq!(rects.len(), 1);
        assert!((rects[0].y - 48.0).abs() < 1e-9);
        assert!((rects[0].height - 4.0).abs() < 1e-9);
    }

    #[test]
    fn should_merge_contiguous_on_samples_into_one_span() {
        let mut surface = RecordingSurface::new(216.0, 100.0);
        // x positions: 8, 58, 108, 158, 208
        let points = flags(&[false, true, true, false, true]);

        render_binary_events(Some(&mut surface), &points, &ChartOptions::default());

        let rects = surface.rects();
        assert_eq!(rects.len(), 2);
        assert!((rects[1].x - 58.0).abs() < 1e-9);
        assert!((rects[1].width - 100.0).abs() < 1e-9);
        assert!((rects[1].y - 8.0).abs() < 1e-9);
        assert!((rects[1].height - 84.0).abs() < 1e-9);
    }

    #[test]
    fn should_skip_final_on_sample_without_successor() {
        let mut surface = RecordingSurface::new(216.0, 100.0);

        render_binary_events(
            Some(&mut surface),
            &flags(&[false, false, true]),
            &ChartOptions::default(),
        );

        assert_eq!(surface.rects().len(), 1);
    }

    #[test]
    fn should_use_minimum_width_for_coincident_samples() {
        let mut surface = RecordingSurface::new(216.0, 100.0);
        let stamp = at(0);
        let points = vec![
            ChartPoint::timed(stamp, 1.0),
            ChartPoint::timed(stamp, 0.0),
        ];

        render_binary_events(Some(&mut surface), &points, &ChartOptions::default());

        let rects = surface.rects();
        assert_eq!(rects.len(), 2);
        assert!((rects[1].width - 2.0).abs() < 1e-9);
    }

    #[test]
    fn should_find_on_spans() {
        let points = flags(&[true, true, false, true, true]);
        assert_eq!(on_spans(&points), vec![(0, 2), (3, 4)]);
        assert!(on_spans(&flags(&[false, true])).is_empty());
        assert!(on_spans(&flags(&[false, false])).is_empty());
    }
}
