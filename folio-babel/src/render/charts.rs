//! Chart widgets rendered as inline SVG.
//!
//! Every chart is a `figure.folio-chart` holding an optional `figcaption` and one `svg` with a
//! fixed 600-unit wide viewBox. Height comes from the payload's `height`, else
//! [`RenderOptions::chart_height`]. Items whose numbers do not coerce are skipped; a chart with
//! nothing left to draw renders a "No data" note instead of an empty canvas.

use super::util::{
    array_field, as_number, bool_field, color_field, format_number, number_field, text_field,
    value_to_string,
};
use super::{RenderOptions, WidgetRenderer};
use crate::blocks::schema::is_hex_color;
use crate::blocks::BlockType;
use crate::formats::html::dom::{append, create_element, create_text, element_with_text};
use markup5ever_rcdom::Handle;
use serde_json::Value;
use std::f64::consts::PI;

const WIDTH: f64 = 600.0;
const PAD: f64 = 40.0;
const DEFAULT_COLOR: &str = "#2563eb";

/// Slice and series colors, cycled.
pub const PALETTE: &[&str] = &[
    "#2563eb", "#16a34a", "#f59e0b", "#dc2626", "#9333ea", "#0891b2", "#db2777", "#65a30d",
    "#ea580c", "#4f46e5", "#0d9488", "#a16207",
];

fn node(tag: &str, attrs: &[(&str, String)]) -> Handle {
    create_element(
        tag,
        attrs.iter().map(|(name, value)| (*name, value.as_str())).collect(),
    )
}

fn label(x: f64, y: f64, anchor: &str, text: &str) -> Handle {
    element_with_text(
        "text",
        vec![
            ("x", format_number(x).as_str()),
            ("y", format_number(y).as_str()),
            ("text-anchor", anchor),
            ("class", "folio-chart-label"),
        ],
        text,
    )
}

/// Attach a hover tooltip.
fn with_title(shape: Handle, text: &str) -> Handle {
    append(&shape, element_with_text("title", vec![], text));
    shape
}

fn chart_height(data: &Value, options: &RenderOptions) -> f64 {
    number_field(data, "height")
        .filter(|h| (100.0..=1000.0).contains(h))
        .unwrap_or(f64::from(options.chart_height))
}

/// Drawing area inside the padding.
#[derive(Debug, Clone, Copy)]
struct Plot {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Plot {
    fn new(svg_height: f64) -> Self {
        Self {
            left: PAD,
            top: PAD / 2.0,
            width: WIDTH - 2.0 * PAD,
            height: (svg_height - 1.5 * PAD).max(1.0),
        }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Linear map from `[min, max]` onto `[start, end]`.
#[derive(Debug, Clone, Copy)]
struct Scale {
    min: f64,
    max: f64,
    start: f64,
    end: f64,
}

impl Scale {
    fn new(min: f64, max: f64, start: f64, end: f64) -> Self {
        let (min, max) = if (max - min).abs() < f64::EPSILON {
            (min - 1.0, max + 1.0)
        } else {
            (min, max)
        };
        Self {
            min,
            max,
            start,
            end,
        }
    }

    fn map(&self, value: f64) -> f64 {
        self.start + (value - self.min) / (self.max - self.min) * (self.end - self.start)
    }
}

/// A chart under construction. The svg is attached by [`Frame::finish`].
struct Frame {
    figure: Handle,
    svg: Handle,
    height: f64,
}

impl Frame {
    fn finish(self) -> Handle {
        append(&self.figure, self.svg);
        self.figure
    }

    fn empty(self) -> Handle {
        append(
            &self.figure,
            element_with_text("p", vec![("class", "folio-chart-empty")], "No data"),
        );
        self.figure
    }
}

fn frame(block_type: BlockType, data: &Value, options: &RenderOptions) -> Frame {
    let height = chart_height(data, options);
    let class = format!("folio-chart folio-chart-{}", block_type.as_str());
    let figure = create_element("figure", vec![("class", class.as_str())]);

    let title = text_field(data, "title");
    if let Some(title) = &title {
        append(&figure, element_with_text("figcaption", vec![], title));
    }

    let aria = title.unwrap_or_else(|| format!("{} block", block_type.as_str()));
    let svg = node(
        "svg",
        &[
            ("class", "folio-chart-svg".to_string()),
            ("viewBox", format!("0 0 {} {}", WIDTH, format_number(height))),
            ("width", "100%".to_string()),
            ("height", format_number(height)),
            ("role", "img".to_string()),
            ("aria-label", aria),
        ],
    );
    Frame {
        figure,
        svg,
        height,
    }
}

/// `(name, value)` pairs from `data[]`, skipping items without a numeric value.
fn named_values(data: &Value, name_key: &str) -> Vec<(String, f64)> {
    array_field(data, "data")
        .iter()
        .filter_map(|item| {
            let value = item.get("value").and_then(as_number)?;
            let name = item.get(name_key).map(value_to_string).unwrap_or_default();
            Some((name, value))
        })
        .collect()
}

fn axis_labels(svg: &Handle, data: &Value, plot: &Plot, svg_height: f64) {
    if let Some(x_label) = text_field(data, "xLabel") {
        append(
            svg,
            label(plot.left + plot.width / 2.0, svg_height - 4.0, "middle", &x_label),
        );
    }
    if let Some(y_label) = text_field(data, "yLabel") {
        let middle = format_number(plot.top + plot.height / 2.0);
        let text = node(
            "text",
            &[
                ("x", "12".to_string()),
                ("y", middle.clone()),
                ("text-anchor", "middle".to_string()),
                ("class", "folio-chart-label".to_string()),
                ("transform", format!("rotate(-90 12 {middle})")),
            ],
        );
        append(&text, create_text(&y_label));
        append(svg, text);
    }
}

fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

pub fn bar_chart(data: &Value, options: &RenderOptions) -> Handle {
    let frame = frame(BlockType::BarChart, data, options);
    let points = named_values(data, "name");
    if points.is_empty() {
        return frame.empty();
    }
    let plot = Plot::new(frame.height);
    let color = color_field(data, "color", DEFAULT_COLOR);
    let (min, max) = value_range(points.iter().map(|(_, v)| *v));
    let horizontal = bool_field(data, "horizontal", false);

    for (index, (name, value)) in points.iter().enumerate() {
        let tooltip = format!("{name}: {}", format_number(*value));
        let (x, y, w, h, label_node) = if horizontal {
            let scale = Scale::new(min, max, plot.left, plot.left + plot.width);
            let slot = plot.height / points.len() as f64;
            let (a, b) = (scale.map(0.0), scale.map(*value));
            let y = plot.top + index as f64 * slot + slot * 0.15;
            (
                a.min(b),
                y,
                (a - b).abs(),
                slot * 0.7,
                label(plot.left - 4.0, y + slot * 0.35 + 4.0, "end", name),
            )
        } else {
            let scale = Scale::new(min, max, plot.bottom(), plot.top);
            let slot = plot.width / points.len() as f64;
            let (a, b) = (scale.map(0.0), scale.map(*value));
            let x = plot.left + index as f64 * slot + slot * 0.15;
            (
                x,
                a.min(b),
                slot * 0.7,
                (a - b).abs(),
                label(x + slot * 0.35, plot.bottom() + 16.0, "middle", name),
            )
        };
        let rect = node(
            "rect",
            &[
                ("x", format_number(x)),
                ("y", format_number(y)),
                ("width", format_number(w)),
                ("height", format_number(h)),
                ("fill", color.clone()),
            ],
        );
        append(&frame.svg, with_title(rect, &tooltip));
        append(&frame.svg, label_node);
    }
    axis_labels(&frame.svg, data, &plot, frame.height);
    frame.finish()
}

/// Shared by line and area charts: screen coordinates of each point.
fn series_coordinates(points: &[(String, f64)], plot: &Plot) -> Vec<(f64, f64)> {
    let (min, max) = value_range(points.iter().map(|(_, v)| *v));
    let y_scale = Scale::new(min, max, plot.bottom(), plot.top);
    let step = if points.len() > 1 {
        plot.width / (points.len() - 1) as f64
    } else {
        0.0
    };
    points
        .iter()
        .enumerate()
        .map(|(index, (_, value))| {
            let x = if points.len() > 1 {
                plot.left + index as f64 * step
            } else {
                plot.left + plot.width / 2.0
            };
            (x, y_scale.map(*value))
        })
        .collect()
}

fn points_attr(coords: &[(f64, f64)]) -> String {
    coords
        .iter()
        .map(|(x, y)| format!("{},{}", format_number(*x), format_number(*y)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn series_chart(block_type: BlockType, data: &Value, options: &RenderOptions) -> Handle {
    let frame = frame(block_type, data, options);
    let points = named_values(data, "name");
    if points.is_empty() {
        return frame.empty();
    }
    let plot = Plot::new(frame.height);
    let color = color_field(data, "color", DEFAULT_COLOR);
    let coords = series_coordinates(&points, &plot);

    if block_type == BlockType::AreaChart {
        let opacity = number_field(data, "fillOpacity")
            .filter(|o| (0.0..=1.0).contains(o))
            .unwrap_or(0.3);
        let mut outline = coords.clone();
        if let (Some(first), Some(last)) = (coords.first(), coords.last()) {
            outline.push((last.0, plot.bottom()));
            outline.push((first.0, plot.bottom()));
        }
        append(
            &frame.svg,
            node(
                "polygon",
                &[
                    ("points", points_attr(&outline)),
                    ("fill", color.clone()),
                    ("fill-opacity", format_number(opacity)),
                    ("stroke", "none".to_string()),
                ],
            ),
        );
    }

    append(
        &frame.svg,
        node(
            "polyline",
            &[
                ("points", points_attr(&coords)),
                ("fill", "none".to_string()),
                ("stroke", color.clone()),
                ("stroke-width", "2".to_string()),
            ],
        ),
    );

    let show_dots = block_type == BlockType::LineChart && bool_field(data, "showDots", true);
    for ((name, value), (x, y)) in points.iter().zip(&coords) {
        if show_dots {
            let dot = node(
                "circle",
                &[
                    ("cx", format_number(*x)),
                    ("cy", format_number(*y)),
                    ("r", "4".to_string()),
                    ("fill", color.clone()),
                ],
            );
            append(&frame.svg, with_title(dot, &format!("{name}: {}", format_number(*value))));
        }
        append(&frame.svg, label(*x, plot.bottom() + 16.0, "middle", name));
    }
    axis_labels(&frame.svg, data, &plot, frame.height);
    frame.finish()
}

pub fn line_chart(data: &Value, options: &RenderOptions) -> Handle {
    series_chart(BlockType::LineChart, data, options)
}

pub fn area_chart(data: &Value, options: &RenderOptions) -> Handle {
    series_chart(BlockType::AreaChart, data, options)
}

fn polar(cx: f64, cy: f64, radius: f64, angle: f64) -> (f64, f64) {
    (cx + radius * angle.cos(), cy + radius * angle.sin())
}

fn slice_path(cx: f64, cy: f64, outer: f64, inner: f64, start: f64, end: f64) -> String {
    let large = if end - start > PI { 1 } else { 0 };
    let (ox1, oy1) = polar(cx, cy, outer, start);
    let (ox2, oy2) = polar(cx, cy, outer, end);
    let f = format_number;
    if inner > 0.0 {
        let (ix1, iy1) = polar(cx, cy, inner, start);
        let (ix2, iy2) = polar(cx, cy, inner, end);
        format!(
            "M {} {} A {} {} 0 {large} 1 {} {} L {} {} A {} {} 0 {large} 0 {} {} Z",
            f(ox1),
            f(oy1),
            f(outer),
            f(outer),
            f(ox2),
            f(oy2),
            f(ix2),
            f(iy2),
            f(inner),
            f(inner),
            f(ix1),
            f(iy1)
        )
    } else {
        format!(
            "M {} {} L {} {} A {} {} 0 {large} 1 {} {} Z",
            f(cx),
            f(cy),
            f(ox1),
            f(oy1),
            f(outer),
            f(outer),
            f(ox2),
            f(oy2)
        )
    }
}

pub fn pie_chart(data: &Value, options: &RenderOptions) -> Handle {
    let frame = frame(BlockType::PieChart, data, options);
    let items = array_field(data, "data");
    let slices: Vec<(String, f64, String)> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let value = item.get("value").and_then(as_number).filter(|v| *v > 0.0)?;
            let name = item.get("name").map(value_to_string).unwrap_or_default();
            let color = item
                .get("color")
                .and_then(Value::as_str)
                .filter(|c| is_hex_color(c))
                .unwrap_or(PALETTE[index % PALETTE.len()])
                .to_string();
            Some((name, value, color))
        })
        .collect();
    let total: f64 = slices.iter().map(|(_, v, _)| v).sum();
    if slices.is_empty() || total <= 0.0 {
        return frame.empty();
    }

    let (cx, cy) = (WIDTH / 2.0, frame.height / 2.0);
    let outer = (frame.height / 2.0 - 16.0).max(10.0);
    let inner = if bool_field(data, "donut", false) {
        outer * 0.55
    } else {
        0.0
    };

    let mut angle = -PI / 2.0;
    for (name, value, color) in &slices {
        let sweep = value / total * 2.0 * PI;
        let tooltip = format!("{name}: {} ({:.0}%)", format_number(*value), value / total * 100.0);
        let shape = if sweep >= 2.0 * PI - 1e-9 {
            // A full-circle arc has coincident endpoints and draws nothing.
            let (r, fill, stroke, stroke_width) = if inner > 0.0 {
                ((outer + inner) / 2.0, "none".to_string(), color.clone(), outer - inner)
            } else {
                (outer, color.clone(), "none".to_string(), 0.0)
            };
            node(
                "circle",
                &[
                    ("cx", format_number(cx)),
                    ("cy", format_number(cy)),
                    ("r", format_number(r)),
                    ("fill", fill),
                    ("stroke", stroke),
                    ("stroke-width", format_number(stroke_width)),
                ],
            )
        } else {
            node(
                "path",
                &[
                    ("d", slice_path(cx, cy, outer, inner, angle, angle + sweep)),
                    ("fill", color.clone()),
                ],
            )
        };
        append(&frame.svg, with_title(shape, &tooltip));
        angle += sweep;
    }

    let show_legend = bool_field(data, "showLegend", true);
    let figure = frame.finish();
    if show_legend {
        let legend = create_element("ul", vec![("class", "folio-chart-legend")]);
        for (name, value, color) in &slices {
            let item = create_element("li", vec![]);
            let swatch_style = format!("background-color: {color}");
            append(
                &item,
                create_element(
                    "span",
                    vec![("class", "folio-chart-swatch"), ("style", swatch_style.as_str())],
                ),
            );
            append(
                &item,
                create_text(&format!("{name} ({})", format_number(*value))),
            );
            append(&legend, item);
        }
        append(&figure, legend);
    }
    figure
}

pub fn radar_chart(data: &Value, options: &RenderOptions) -> Handle {
    let frame = frame(BlockType::RadarChart, data, options);
    let points: Vec<(String, f64)> = array_field(data, "data")
        .iter()
        .filter_map(|item| {
            let value = item.get("value").and_then(as_number)?.max(0.0);
            let subject = item
                .get("subject")
                .or_else(|| item.get("name"))
                .map(value_to_string)
                .unwrap_or_default();
            Some((subject, value))
        })
        .collect();
    if points.len() < 3 {
        return frame.empty();
    }

    let max = number_field(data, "maxValue")
        .filter(|m| *m > 0.0)
        .unwrap_or_else(|| points.iter().map(|(_, v)| *v).fold(0.0, f64::max))
        .max(f64::EPSILON);
    let color = color_field(data, "color", DEFAULT_COLOR);
    let (cx, cy) = (WIDTH / 2.0, frame.height / 2.0);
    let radius = (frame.height / 2.0 - 30.0).max(10.0);
    let angle_of = |index: usize| -PI / 2.0 + 2.0 * PI * index as f64 / points.len() as f64;

    for ring in 1..=4 {
        let r = radius * ring as f64 / 4.0;
        let coords: Vec<(f64, f64)> = (0..points.len())
            .map(|i| polar(cx, cy, r, angle_of(i)))
            .collect();
        append(
            &frame.svg,
            node(
                "polygon",
                &[
                    ("points", points_attr(&coords)),
                    ("fill", "none".to_string()),
                    ("class", "folio-chart-grid".to_string()),
                ],
            ),
        );
    }

    for (index, (subject, _)) in points.iter().enumerate() {
        let (x, y) = polar(cx, cy, radius, angle_of(index));
        append(
            &frame.svg,
            node(
                "line",
                &[
                    ("x1", format_number(cx)),
                    ("y1", format_number(cy)),
                    ("x2", format_number(x)),
                    ("y2", format_number(y)),
                    ("class", "folio-chart-grid".to_string()),
                ],
            ),
        );
        let (lx, ly) = polar(cx, cy, radius + 14.0, angle_of(index));
        append(&frame.svg, label(lx, ly + 4.0, "middle", subject));
    }

    let coords: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(index, (_, value))| polar(cx, cy, radius * (value / max).min(1.0), angle_of(index)))
        .collect();
    append(
        &frame.svg,
        node(
            "polygon",
            &[
                ("points", points_attr(&coords)),
                ("fill", color.clone()),
                ("fill-opacity", "0.3".to_string()),
                ("stroke", color),
                ("stroke-width", "2".to_string()),
            ],
        ),
    );
    frame.finish()
}

pub fn scatter_chart(data: &Value, options: &RenderOptions) -> Handle {
    let frame = frame(BlockType::ScatterChart, data, options);
    let points: Vec<(f64, f64, Option<String>)> = array_field(data, "data")
        .iter()
        .filter_map(|item| {
            let x = item.get("x").and_then(as_number)?;
            let y = item.get("y").and_then(as_number)?;
            Some((x, y, text_field(item, "label")))
        })
        .collect();
    if points.is_empty() {
        return frame.empty();
    }

    let plot = Plot::new(frame.height);
    let color = color_field(data, "color", DEFAULT_COLOR);
    let (x_min, x_max) = points
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), (x, _, _)| (lo.min(*x), hi.max(*x)));
    let (y_min, y_max) = points
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), (_, y, _)| (lo.min(*y), hi.max(*y)));
    let x_scale = Scale::new(x_min, x_max, plot.left, plot.left + plot.width);
    let y_scale = Scale::new(y_min, y_max, plot.bottom(), plot.top);

    append(
        &frame.svg,
        node(
            "line",
            &[
                ("x1", format_number(plot.left)),
                ("y1", format_number(plot.bottom())),
                ("x2", format_number(plot.left + plot.width)),
                ("y2", format_number(plot.bottom())),
                ("class", "folio-chart-axis".to_string()),
            ],
        ),
    );

    for (x, y, point_label) in &points {
        let dot = node(
            "circle",
            &[
                ("cx", format_number(x_scale.map(*x))),
                ("cy", format_number(y_scale.map(*y))),
                ("r", "4".to_string()),
                ("fill", color.clone()),
            ],
        );
        let coords = format!("({}, {})", format_number(*x), format_number(*y));
        let tooltip = match point_label {
            Some(text) => format!("{text} {coords}"),
            None => coords,
        };
        append(&frame.svg, with_title(dot, &tooltip));
    }
    axis_labels(&frame.svg, data, &plot, frame.height);
    frame.finish()
}

macro_rules! chart_renderer {
    ($name:ident, $block_type:expr, $render:path) => {
        pub struct $name;

        impl WidgetRenderer for $name {
            fn block_type(&self) -> BlockType {
                $block_type
            }

            fn render(&self, data: &Value, options: &RenderOptions) -> Handle {
                $render(data, options)
            }
        }
    };
}

chart_renderer!(BarChartRenderer, BlockType::BarChart, bar_chart);
chart_renderer!(LineChartRenderer, BlockType::LineChart, line_chart);
chart_renderer!(AreaChartRenderer, BlockType::AreaChart, area_chart);
chart_renderer!(PieChartRenderer, BlockType::PieChart, pie_chart);
chart_renderer!(RadarChartRenderer, BlockType::RadarChart, radar_chart);
chart_renderer!(ScatterChartRenderer, BlockType::ScatterChart, scatter_chart);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::html::dom::{element_children, find_element, get_attr, serialize_children};
    use serde_json::json;

    fn count(node: &Handle, tag: &str) -> usize {
        let own = usize::from(crate::formats::html::dom::is_element(node, tag));
        own + node
            .children
            .borrow()
            .iter()
            .map(|child| count(child, tag))
            .sum::<usize>()
    }

    #[test]
    fn bar_chart_draws_one_rect_per_point() {
        let chart = bar_chart(
            &json!({"title": "Sales", "data": [{"name": "Q1", "value": 10}, {"name": "Q2", "value": "20"}, {"name": "Q3", "value": "n/a"}]}),
            &RenderOptions::default(),
        );
        assert_eq!(count(&chart, "rect"), 2);
        let svg = find_element(&chart, "svg").unwrap();
        assert_eq!(get_attr(&svg, "aria-label").as_deref(), Some("Sales"));
        assert_eq!(get_attr(&svg, "height").as_deref(), Some("300"));
    }

    #[test]
    fn payload_height_overrides_default() {
        let chart = line_chart(
            &json!({"height": 400, "data": [{"name": "a", "value": 1}, {"name": "b", "value": 2}]}),
            &RenderOptions::default(),
        );
        let svg = find_element(&chart, "svg").unwrap();
        assert_eq!(get_attr(&svg, "viewBox").as_deref(), Some("0 0 600 400"));
        assert_eq!(count(&chart, "circle"), 2);
    }

    #[test]
    fn area_chart_fills_under_the_line() {
        let chart = area_chart(
            &json!({"data": [{"name": "a", "value": 1}, {"name": "b", "value": 3}], "fillOpacity": 0.5}),
            &RenderOptions::default(),
        );
        let polygon = find_element(&chart, "polygon").unwrap();
        assert_eq!(get_attr(&polygon, "fill-opacity").as_deref(), Some("0.5"));
        assert_eq!(count(&chart, "circle"), 0);
    }

    #[test]
    fn pie_chart_slices_and_legend() {
        let chart = pie_chart(
            &json!({"data": [{"name": "A", "value": 1}, {"name": "B", "value": 3, "color": "#ff0000"}]}),
            &RenderOptions::default(),
        );
        assert_eq!(count(&chart, "path"), 2);
        let legend = find_element(&chart, "ul").unwrap();
        assert_eq!(element_children(&legend).len(), 2);
        let html = serialize_children(&legend).unwrap();
        assert!(html.contains("background-color: #ff0000"));
        assert!(html.contains("B (3)"));
    }

    #[test]
    fn single_slice_pie_is_a_full_circle() {
        let chart = pie_chart(
            &json!({"data": [{"name": "All", "value": 5}], "showLegend": false}),
            &RenderOptions::default(),
        );
        assert_eq!(count(&chart, "path"), 0);
        assert_eq!(count(&chart, "circle"), 1);
        assert!(find_element(&chart, "ul").is_none());
    }

    #[test]
    fn radar_needs_three_axes() {
        let too_few = radar_chart(
            &json!({"data": [{"subject": "a", "value": 1}, {"subject": "b", "value": 2}]}),
            &RenderOptions::default(),
        );
        assert!(find_element(&too_few, "svg").is_none());

        let chart = radar_chart(
            &json!({"data": [{"subject": "a", "value": 1}, {"subject": "b", "value": 2}, {"subject": "c", "value": 3}]}),
            &RenderOptions::default(),
        );
        // four grid rings plus the data polygon
        assert_eq!(count(&chart, "polygon"), 5);
    }

    #[test]
    fn scatter_plots_every_numeric_point() {
        let chart = scatter_chart(
            &json!({"data": [{"x": 1, "y": 2}, {"x": 3, "y": 4, "label": "p"}, {"x": "bad"}]}),
            &RenderOptions::default(),
        );
        assert_eq!(count(&chart, "circle"), 2);
    }

    #[test]
    fn missing_data_renders_note() {
        let chart = bar_chart(&json!({"data": "oops"}), &RenderOptions::default());
        assert!(find_element(&chart, "svg").is_none());
        let note = find_element(&chart, "p").unwrap();
        assert_eq!(get_attr(&note, "class").as_deref(), Some("folio-chart-empty"));
    }
}
