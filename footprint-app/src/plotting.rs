//! Rasterizes aggregated views into in-memory PNG images.

use anyhow::Result;
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{Duration, NaiveDate};
use footprint_core::error::RenderError;
use footprint_schemas::view::{AggregatedView, DailyBreakdown, MonthlyMean, SeriesPoint, ViewKind};
use image::{codecs::png::PngEncoder, ColorType, ImageEncoder};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::{Deserialize, Deserializer, Serialize};
use std::f64::consts::PI;

/// Styling for the daily breakdown pie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieStyle {
    pub width: u32,
    pub height: u32,
    pub colors: Vec<String>,
    /// Radial offset of each slice as a fraction of the radius.
    pub explode: Vec<f64>,
    pub start_angle_deg: f64,
    pub shadow: bool,
    pub pct_distance: f64,
    pub label_distance: f64,
}

impl Default for PieStyle {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            colors: vec!["#FF9999".into(), "#66B3FF".into(), "#99FF99".into()],
            explode: vec![0.05, 0.05, 0.0],
            start_angle_deg: 140.0,
            shadow: true,
            pct_distance: 0.7,
            label_distance: 1.1,
        }
    }
}

/// Styling for one of the dated series charts. Each chart has its own
/// defaults, so configuration is read through [`SeriesStyleOverride`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesStyle {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub color: String,
    pub stroke_width: u32,
    pub marker_size: u32,
    /// Distance between x-axis ticks, in days for dated series and in
    /// months for the monthly-mean series.
    pub tick_interval: u32,
    /// strftime pattern for tick labels.
    pub tick_format: String,
}

impl SeriesStyle {
    pub fn weekly() -> Self {
        Self {
            width: 800,
            height: 400,
            title: "Weekly Carbon Emission Trend".into(),
            x_desc: "Date".into(),
            y_desc: "kg CO2".into(),
            color: "#1F77B4".into(),
            stroke_width: 2,
            marker_size: 4,
            tick_interval: 1,
            tick_format: "%b %d".into(),
        }
    }

    pub fn monthly() -> Self {
        Self {
            width: 1000,
            height: 500,
            title: "Monthly Carbon Emission".into(),
            color: "#87CEEB".into(),
            stroke_width: 0,
            marker_size: 0,
            tick_interval: 3,
            ..Self::weekly()
        }
    }

    pub fn yearly() -> Self {
        Self {
            width: 1200,
            height: 600,
            title: "Yearly Carbon Emission Trend".into(),
            x_desc: "Month".into(),
            color: "#008000".into(),
            tick_interval: 1,
            tick_format: "%b".into(),
            ..Self::weekly()
        }
    }
}

/// The keys of a configured series section. Keys left out keep the value of
/// the chart the section belongs to.
#[derive(Debug, Default, Deserialize)]
pub struct SeriesStyleOverride {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub title: Option<String>,
    pub x_desc: Option<String>,
    pub y_desc: Option<String>,
    pub color: Option<String>,
    pub stroke_width: Option<u32>,
    pub marker_size: Option<u32>,
    pub tick_interval: Option<u32>,
    pub tick_format: Option<String>,
}

impl SeriesStyleOverride {
    pub fn apply(self, base: SeriesStyle) -> SeriesStyle {
        SeriesStyle {
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
            title: self.title.unwrap_or(base.title),
            x_desc: self.x_desc.unwrap_or(base.x_desc),
            y_desc: self.y_desc.unwrap_or(base.y_desc),
            color: self.color.unwrap_or(base.color),
            stroke_width: self.stroke_width.unwrap_or(base.stroke_width),
            marker_size: self.marker_size.unwrap_or(base.marker_size),
            tick_interval: self.tick_interval.unwrap_or(base.tick_interval),
            tick_format: self.tick_format.unwrap_or(base.tick_format),
        }
    }
}

fn weekly_style<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SeriesStyle, D::Error> {
    SeriesStyleOverride::deserialize(deserializer).map(|o| o.apply(SeriesStyle::weekly()))
}

fn monthly_style<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SeriesStyle, D::Error> {
    SeriesStyleOverride::deserialize(deserializer).map(|o| o.apply(SeriesStyle::monthly()))
}

fn yearly_style<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SeriesStyle, D::Error> {
    SeriesStyleOverride::deserialize(deserializer).map(|o| o.apply(SeriesStyle::yearly()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Captions, tick labels and pie annotations. Turn off on hosts without
    /// system fonts.
    pub draw_text: bool,
    pub pie: PieStyle,
    #[serde(deserialize_with = "weekly_style")]
    pub weekly: SeriesStyle,
    #[serde(deserialize_with = "monthly_style")]
    pub monthly: SeriesStyle,
    #[serde(deserialize_with = "yearly_style")]
    pub yearly: SeriesStyle,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            draw_text: true,
            pie: PieStyle::default(),
            weekly: SeriesStyle::weekly(),
            monthly: SeriesStyle::monthly(),
            yearly: SeriesStyle::yearly(),
        }
    }
}

impl RenderStyle {
    /// Pixel size of the image produced for `kind`.
    pub fn dimensions(&self, kind: ViewKind) -> (u32, u32) {
        match kind {
            ViewKind::Daily => (self.pie.width, self.pie.height),
            ViewKind::Weekly => (self.weekly.width, self.weekly.height),
            ViewKind::Monthly => (self.monthly.width, self.monthly.height),
            ViewKind::Yearly => (self.yearly.width, self.yearly.height),
        }
    }
}

/// A chart encoded as PNG.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub kind: ViewKind,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl RenderedChart {
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.png)
    }
}

/// Parses `#RRGGBB`.
pub fn parse_hex_color(hex: &str) -> Option<RGBColor> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

fn color_or(hex: &str, fallback: RGBColor) -> RGBColor {
    parse_hex_color(hex).unwrap_or(fallback)
}

/// Renders `view` to a PNG of the size configured for its kind.
pub fn render(view: &AggregatedView, style: &RenderStyle) -> Result<RenderedChart, RenderError> {
    let kind = view.kind();
    if view.is_empty() {
        return Err(RenderError::EmptySeries(kind));
    }
    let (width, height) = style.dimensions(kind);
    if width == 0 || height == 0 {
        return Err(RenderError::Drawing {
            kind,
            reason: format!("figure size {}x{} has no area", width, height),
        });
    }

    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        let drawn = match view {
            AggregatedView::DailyBreakdown(breakdown) => {
                check_slices(breakdown)?;
                draw_pie(&root, breakdown, &style.pie, style.draw_text)
            }
            AggregatedView::WeeklySeries { points } => {
                let (origin, xy) = day_offsets(kind, points)?;
                draw_series(&root, &xy, &style.weekly, style.draw_text, false, &|x: f64| {
                    day_label(origin, x, &style.weekly.tick_format)
                })
            }
            AggregatedView::MonthlySeries { points } => {
                let (origin, xy) = day_offsets(kind, points)?;
                draw_series(&root, &xy, &style.monthly, style.draw_text, true, &|x: f64| {
                    day_label(origin, x, &style.monthly.tick_format)
                })
            }
            AggregatedView::YearlyMonthlyMean { months } => {
                let (origin, xy) = month_offsets(kind, months)?;
                draw_series(&root, &xy, &style.yearly, style.draw_text, false, &|x: f64| {
                    month_label(origin, x, &style.yearly.tick_format)
                })
            }
        };
        drawn
            .and_then(|_| root.present().map_err(anyhow::Error::from))
            .map_err(|e| RenderError::Drawing {
                kind,
                reason: format!("{:#}", e),
            })?;
    }

    let png = encode_png(kind, &buffer, width, height)?;
    Ok(RenderedChart {
        kind,
        width,
        height,
        png,
    })
}

fn encode_png(kind: ViewKind, rgb: &[u8], width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(rgb, width, height, ColorType::Rgb8)
        .map_err(|e| RenderError::Encoding {
            kind,
            reason: e.to_string(),
        })?;
    Ok(png)
}

fn invalid(kind: ViewKind, reason: impl Into<String>) -> RenderError {
    RenderError::InvalidValue {
        kind,
        reason: reason.into(),
    }
}

fn check_slices(breakdown: &DailyBreakdown) -> Result<(), RenderError> {
    for slice in &breakdown.slices {
        if !slice.value.is_finite() || slice.value < 0.0 {
            return Err(invalid(
                ViewKind::Daily,
                format!("slice '{}' has size {}", slice.label, slice.value),
            ));
        }
    }
    if breakdown.total() <= 0.0 {
        return Err(invalid(ViewKind::Daily, "every slice is zero"));
    }
    Ok(())
}

/// Maps dated points to (days since earliest date, value).
fn day_offsets(kind: ViewKind, points: &[SeriesPoint]) -> Result<(NaiveDate, Vec<(f64, f64)>), RenderError> {
    let origin = points
        .iter()
        .map(|p| p.date)
        .min()
        .ok_or(RenderError::EmptySeries(kind))?;
    let mut xy = Vec::with_capacity(points.len());
    for p in points {
        if !p.value.is_finite() {
            return Err(invalid(kind, format!("value on {} is {}", p.date, p.value)));
        }
        xy.push(((p.date - origin).num_days() as f64, p.value));
    }
    Ok((origin, xy))
}

/// Maps monthly means to (months since earliest month, mean).
fn month_offsets(kind: ViewKind, months: &[MonthlyMean]) -> Result<((i32, u32), Vec<(f64, f64)>), RenderError> {
    let index = |m: &MonthlyMean| m.year as i64 * 12 + (m.month as i64 - 1);
    let first = months.iter().min_by_key(|m| index(m)).ok_or(RenderError::EmptySeries(kind))?;
    let base = index(first);
    let mut xy = Vec::with_capacity(months.len());
    for m in months {
        if !m.mean.is_finite() {
            return Err(invalid(kind, format!("mean for {}-{:02} is {}", m.year, m.month, m.mean)));
        }
        xy.push(((index(m) - base) as f64, m.mean));
    }
    Ok(((first.year, first.month), xy))
}

fn day_label(origin: NaiveDate, x: f64, format: &str) -> String {
    (origin + Duration::days(x.round() as i64)).format(format).to_string()
}

fn month_label((year, month): (i32, u32), x: f64, format: &str) -> String {
    let total = year as i64 * 12 + (month as i64 - 1) + x.round() as i64;
    let (y, m) = (total.div_euclid(12) as i32, total.rem_euclid(12) as u32 + 1);
    NaiveDate::from_ymd_opt(y, m, 1)
        .map(|d| d.format(format).to_string())
        .unwrap_or_default()
}

/// Upper bound on x-axis ticks per chart.
const MAX_TICKS: usize = 60;

/// Tick positions from `start` to `end` every `interval` units. Spans that
/// would need more than [`MAX_TICKS`] ticks use a multiple of `interval`.
fn ticks(start: f64, end: f64, interval: u32) -> Vec<f64> {
    let mut step = interval.max(1) as f64;
    let span = (end - start).max(0.0);
    if span / step >= MAX_TICKS as f64 {
        step *= (span / step / (MAX_TICKS - 1) as f64).ceil();
    }
    let count = (span / step).floor() as usize;
    (0..=count).map(|i| start + i as f64 * step).collect()
}

/// Draws a dated line or bar chart with a dashed grid and a label at every
/// tick.
fn draw_series(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    xy: &[(f64, f64)],
    style: &SeriesStyle,
    draw_text: bool,
    bars: bool,
    x_label: &dyn Fn(f64) -> String,
) -> Result<()> {
    root.fill(&WHITE)?;

    let x_min = xy.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let x_max = xy.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let (x_left, x_right) = (x_min - 0.5, x_max + 0.5);
    let y_low = xy.iter().map(|p| p.1).fold(0.0, f64::min);
    let mut y_high = xy.iter().map(|p| p.1).fold(0.0, f64::max) * 1.1;
    if y_high <= y_low {
        y_high = y_low + 1.0;
    }

    let x_ticks = ticks(x_min, x_max, style.tick_interval);
    let y_ticks: Vec<f64> = (0..=5).map(|i| y_low + (y_high - y_low) * i as f64 / 5.0).collect();

    let mut builder = ChartBuilder::on(root);
    builder.margin(15);
    if draw_text {
        builder
            .caption(&style.title, ("sans-serif", 24).into_font())
            .x_label_area_size(55)
            .y_label_area_size(70);
    }
    let mut chart = builder.build_cartesian_2d(x_left..x_right, y_low..y_high)?;

    let grid = RGBColor(176, 176, 176).mix(0.5).stroke_width(1);
    for &x in &x_ticks {
        chart.draw_series(DashedLineSeries::new(vec![(x, y_low), (x, y_high)], 5, 5, grid))?;
    }
    for &y in &y_ticks {
        chart.draw_series(DashedLineSeries::new(vec![(x_left, y), (x_right, y)], 5, 5, grid))?;
    }
    chart.draw_series(LineSeries::new(
        vec![(x_left, y_high), (x_left, y_low), (x_right, y_low)],
        BLACK.stroke_width(1),
    ))?;

    let color = color_or(&style.color, BLUE);
    if bars {
        chart.draw_series(
            xy.iter()
                .map(|&(x, y)| Rectangle::new([(x - 0.4, 0.0), (x + 0.4, y)], color.filled())),
        )?;
    } else {
        chart.draw_series(LineSeries::new(
            xy.iter().copied(),
            color.stroke_width(style.stroke_width.max(1)),
        ))?;
        if style.marker_size > 0 {
            chart.draw_series(
                xy.iter()
                    .map(|&(x, y)| Circle::new((x, y), style.marker_size, color.filled())),
            )?;
        }
    }

    if draw_text {
        let tick_font = ("sans-serif", 13).into_font().color(&BLACK);
        for &x in &x_ticks {
            let (px, py) = chart.backend_coord(&(x, y_low));
            let below = tick_font.pos(Pos::new(HPos::Center, VPos::Top));
            root.draw_text(&x_label(x), &below, (px, py + 6))?;
        }
        for &y in &y_ticks {
            let (px, py) = chart.backend_coord(&(x_left, y));
            let left = tick_font.pos(Pos::new(HPos::Right, VPos::Center));
            root.draw_text(&format!("{:.1}", y), &left, (px - 6, py))?;
        }

        let desc_font = ("sans-serif", 16).into_font().color(&BLACK);
        let (left_px, bottom_px) = chart.backend_coord(&(x_left, y_low));
        let (right_px, top_px) = chart.backend_coord(&(x_right, y_high));
        root.draw_text(
            &style.x_desc,
            &desc_font.pos(Pos::new(HPos::Center, VPos::Top)),
            ((left_px + right_px) / 2, bottom_px + 30),
        )?;
        root.draw_text(
            &style.y_desc,
            &desc_font.pos(Pos::new(HPos::Left, VPos::Bottom)),
            (left_px - 60, top_px - 8),
        )?;
    }

    Ok(())
}

/// Polygon approximating a pie wedge between two angles (degrees,
/// counter-clockwise from 3 o'clock).
fn wedge(center: (f64, f64), radius: f64, from_deg: f64, to_deg: f64) -> Vec<(i32, i32)> {
    let steps = ((to_deg - from_deg).abs().ceil() as usize).max(2);
    let mut points = vec![(center.0.round() as i32, center.1.round() as i32)];
    for i in 0..=steps {
        let angle = (from_deg + (to_deg - from_deg) * i as f64 / steps as f64) * PI / 180.0;
        points.push((
            (center.0 + radius * angle.cos()).round() as i32,
            (center.1 - radius * angle.sin()).round() as i32,
        ));
    }
    points
}

/// Draws the Travel / Energy / Diet pie with exploded slices.
fn draw_pie(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    breakdown: &DailyBreakdown,
    style: &PieStyle,
    draw_text: bool,
) -> Result<()> {
    root.fill(&WHITE)?;

    let (width, height) = root.dim_in_pixel();
    let center = (width as f64 / 2.0, height as f64 / 2.0);
    let radius = width.min(height) as f64 * 0.35;
    let total = breakdown.total();
    let palette = [RED, BLUE, GREEN];

    struct Slice {
        from: f64,
        to: f64,
        center: (f64, f64),
        color: RGBColor,
    }

    let mut slices = Vec::with_capacity(breakdown.slices.len());
    let mut angle = style.start_angle_deg;
    for (i, slice) in breakdown.slices.iter().enumerate() {
        let sweep = 360.0 * slice.value / total;
        let mid = (angle + sweep / 2.0) * PI / 180.0;
        let offset = style.explode.get(i).copied().unwrap_or(0.0) * radius;
        slices.push(Slice {
            from: angle,
            to: angle + sweep,
            center: (center.0 + offset * mid.cos(), center.1 - offset * mid.sin()),
            color: style
                .colors
                .get(i)
                .and_then(|c| parse_hex_color(c))
                .unwrap_or(palette[i % palette.len()]),
        });
        angle += sweep;
    }

    if style.shadow {
        let shift = radius * 0.02;
        for s in slices.iter().filter(|s| s.to > s.from) {
            let shadow_center = (s.center.0 + shift, s.center.1 + shift);
            root.draw(&Polygon::new(
                wedge(shadow_center, radius, s.from, s.to),
                BLACK.mix(0.3).filled(),
            ))?;
        }
    }

    for s in slices.iter().filter(|s| s.to > s.from) {
        root.draw(&Polygon::new(wedge(s.center, radius, s.from, s.to), s.color.filled()))?;
    }

    if draw_text {
        for (s, slice) in slices.iter().zip(&breakdown.slices) {
            let mid = ((s.from + s.to) / 2.0) * PI / 180.0;
            let (cos, sin) = (mid.cos(), mid.sin());

            let label_at = (
                (s.center.0 + style.label_distance * radius * cos).round() as i32,
                (s.center.1 - style.label_distance * radius * sin).round() as i32,
            );
            let h_pos = if cos >= 0.0 { HPos::Left } else { HPos::Right };
            let label_style = ("sans-serif", 18)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(h_pos, VPos::Center));
            root.draw_text(&slice.label, &label_style, label_at)?;

            let pct_at = (
                (s.center.0 + style.pct_distance * radius * cos).round() as i32,
                (s.center.1 - style.pct_distance * radius * sin).round() as i32,
            );
            let pct_style = ("sans-serif", 16)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center));
            root.draw_text(
                &format!("{:.1}%", 100.0 * slice.value / total),
                &pct_style,
                pct_at,
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use footprint_schemas::view::BreakdownSlice;

    fn headless() -> RenderStyle {
        RenderStyle {
            draw_text: false,
            ..RenderStyle::default()
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn points(n: usize) -> Vec<SeriesPoint> {
        (0..n)
            .map(|i| SeriesPoint {
                date: ymd(2024, 1, 1) + Duration::days(i as i64),
                value: 3.0 + (i % 4) as f64,
            })
            .collect()
    }

    fn breakdown(values: [f64; 3]) -> AggregatedView {
        AggregatedView::DailyBreakdown(DailyBreakdown {
            slices: ["Travel", "Energy", "Diet"]
                .iter()
                .zip(values)
                .map(|(label, value)| BreakdownSlice {
                    label: label.to_string(),
                    value,
                })
                .collect(),
        })
    }

    fn assert_png_size(chart: &RenderedChart, width: u32, height: u32) {
        assert!(!chart.png.is_empty());
        let decoded = image::load_from_memory(&chart.png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (width, height));
        assert_eq!((chart.width, chart.height), (width, height));
    }

    #[test]
    fn every_view_decodes_to_its_configured_size() {
        let style = headless();
        let views = [
            breakdown([2.1, 10.0, 1.0]),
            AggregatedView::WeeklySeries { points: points(7) },
            AggregatedView::MonthlySeries { points: points(30) },
            AggregatedView::YearlyMonthlyMean {
                months: vec![
                    MonthlyMean { year: 2023, month: 11, mean: 1500.0, count: 30 },
                    MonthlyMean { year: 2023, month: 12, mean: 1480.0, count: 31 },
                    MonthlyMean { year: 2024, month: 1, mean: 1510.0, count: 31 },
                ],
            },
        ];
        for view in &views {
            let chart = render(view, &style).unwrap();
            let (w, h) = style.dimensions(view.kind());
            assert_eq!(chart.kind, view.kind());
            assert_png_size(&chart, w, h);
        }
    }

    #[test]
    fn custom_figure_size_is_respected() {
        let mut style = headless();
        style.weekly.width = 320;
        style.weekly.height = 200;
        let chart = render(&AggregatedView::WeeklySeries { points: points(3) }, &style).unwrap();
        assert_png_size(&chart, 320, 200);
    }

    #[test]
    fn single_point_series_renders() {
        let chart = render(&AggregatedView::MonthlySeries { points: points(1) }, &headless()).unwrap();
        assert_png_size(&chart, 1000, 500);
    }

    #[test]
    fn empty_series_is_a_render_error() {
        let err = render(&AggregatedView::WeeklySeries { points: vec![] }, &headless()).unwrap_err();
        assert_eq!(err, RenderError::EmptySeries(ViewKind::Weekly));
        let err = render(&AggregatedView::YearlyMonthlyMean { months: vec![] }, &headless()).unwrap_err();
        assert_eq!(err, RenderError::EmptySeries(ViewKind::Yearly));
    }

    #[test]
    fn all_zero_pie_is_a_render_error() {
        let err = render(&breakdown([0.0, 0.0, 0.0]), &headless()).unwrap_err();
        assert!(matches!(err, RenderError::InvalidValue { kind: ViewKind::Daily, .. }));
    }

    #[test]
    fn negative_slice_is_a_render_error() {
        let err = render(&breakdown([1.0, -2.0, 1.0]), &headless()).unwrap_err();
        assert!(matches!(err, RenderError::InvalidValue { .. }));
    }

    #[test]
    fn non_finite_series_value_is_a_render_error() {
        let mut pts = points(3);
        pts[1].value = f64::NAN;
        let err = render(&AggregatedView::WeeklySeries { points: pts }, &headless()).unwrap_err();
        assert!(matches!(err, RenderError::InvalidValue { kind: ViewKind::Weekly, .. }));
    }

    #[test]
    fn zero_sized_figure_is_rejected() {
        let mut style = headless();
        style.pie.width = 0;
        assert!(render(&breakdown([1.0, 1.0, 1.0]), &style).is_err());
    }

    #[test]
    fn tick_spacing_follows_interval() {
        assert_eq!(ticks(0.0, 29.0, 3).len(), 10);
        assert_eq!(ticks(0.0, 6.0, 1), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(ticks(0.0, 0.0, 1), vec![0.0]);
    }

    #[test]
    fn tick_count_is_capped_for_long_spans() {
        let decades = ticks(0.0, 36_500.0, 1);
        assert!(decades.len() <= MAX_TICKS);
        assert!(decades.len() > 10);
        assert_eq!(decades[0], 0.0);

        let every_third = ticks(0.0, 10_000.0, 3);
        assert!(every_third.len() <= MAX_TICKS);
        assert_eq!((every_third[1] - every_third[0]) % 3.0, 0.0);
    }

    #[test]
    fn sparse_dates_over_decades_still_render() {
        let points: Vec<SeriesPoint> = (0..30)
            .map(|i| SeriesPoint {
                date: ymd(1990 + i, 1, 1),
                value: 2.0 + i as f64,
            })
            .collect();
        let chart = render(&AggregatedView::MonthlySeries { points }, &headless()).unwrap();
        assert_png_size(&chart, 1000, 500);
    }

    #[test]
    fn labels_use_calendar_dates() {
        assert_eq!(day_label(ymd(2024, 1, 30), 3.0, "%b %d"), "Feb 02");
        assert_eq!(month_label((2023, 11), 2.0, "%b"), "Jan");
    }

    #[test]
    fn hex_colors_parse() {
        assert_eq!(parse_hex_color("#FF9999"), Some(RGBColor(255, 153, 153)));
        assert_eq!(parse_hex_color("skyblue"), None);
        assert_eq!(parse_hex_color("#12345"), None);
    }

    #[test]
    fn base64_text_is_non_empty() {
        let chart = render(&breakdown([1.0, 2.0, 3.0]), &headless()).unwrap();
        assert!(chart.to_base64().starts_with("iVBORw0KGgo"));
    }
}
