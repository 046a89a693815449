use super::scale::{Frame, YScale};
use super::{CONTROL_COLOR, TEST_COLOR};
use crate::shared::format::format_compact;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct LineSeriesPoint {
    pub label: String,
    pub test: f64,
    pub control: f64,
}

/// x coordinate of the i-th of `count` points; a single point is centered
pub fn point_x(index: usize, count: usize, frame: &Frame) -> f64 {
    if count <= 1 {
        frame.left + frame.plot_width() / 2.0
    } else {
        frame.left + frame.plot_width() * index as f64 / (count - 1) as f64
    }
}

/// `points` attribute of an SVG polyline
pub fn polyline_points(values: &[f64], scale: &YScale, frame: &Frame) -> String {
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| format!("{:.1},{:.1}", point_x(i, values.len(), frame), scale.y(value)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Indices whose label is drawn on the x axis; at most `max_labels`
pub fn label_indices(count: usize, max_labels: usize) -> Vec<usize> {
    if count == 0 || max_labels == 0 {
        return Vec::new();
    }
    let step = count.div_ceil(max_labels).max(1);
    let mut indices: Vec<usize> = (0..count).step_by(step).collect();
    if indices.last() != Some(&(count - 1)) && indices.len() < max_labels {
        indices.push(count - 1);
    }
    indices
}

#[component]
pub fn LineChart(
    #[prop(into)]
    points: Signal<Vec<LineSeriesPoint>>,
    #[prop(into)]
    title: String,
) -> impl IntoView {
    let frame = Frame::default();

    view! {
        <div class="chart">
            <div class="chart__header">
                <h3 class="chart__title">{title}</h3>
                <div class="chart__legend">
                    <span class="chart__legend-item">
                        <span class="chart__swatch" style=format!("background: {}", TEST_COLOR)></span>
                        "Test"
                    </span>
                    <span class="chart__legend-item">
                        <span class="chart__swatch" style=format!("background: {}", CONTROL_COLOR)></span>
                        "Control"
                    </span>
                </div>
            </div>
            {move || {
                let points = points.get();
                if points.is_empty() {
                    return view! { <div class="chart__empty">"No daily sales yet."</div> }.into_any();
                }
                let test: Vec<f64> = points.iter().map(|p| p.test).collect();
                let control: Vec<f64> = points.iter().map(|p| p.control).collect();
                let data_max = test.iter().chain(control.iter()).copied().fold(0.0_f64, f64::max);
                let scale = YScale::new(data_max, frame);
                let count = points.len();
                view! {
                    <svg class="chart__svg" viewBox=frame.view_box() role="img">
                        <g class="chart__grid">
                            {scale.ticks(4).into_iter().map(|tick| {
                                let y = scale.y(tick);
                                view! {
                                    <line x1=frame.left y1=y x2=frame.width - frame.right y2=y stroke="#e5e7eb" stroke-width="1"/>
                                    <text x=frame.left - 8.0 y=y + 4.0 text-anchor="end" font-size="11" fill="#6b7280">
                                        {format_compact(tick)}
                                    </text>
                                }
                            }).collect_view()}
                        </g>
                        <polyline
                            points=polyline_points(&control, &scale, &frame)
                            fill="none"
                            stroke=CONTROL_COLOR
                            stroke-width="2"
                        />
                        <polyline
                            points=polyline_points(&test, &scale, &frame)
                            fill="none"
                            stroke=TEST_COLOR
                            stroke-width="2"
                        />
                        <g class="chart__labels">
                            {label_indices(count, 8).into_iter().map(|i| view! {
                                <text
                                    x=point_x(i, count, &frame)
                                    y=frame.height - 16.0
                                    text-anchor="middle"
                                    font-size="11"
                                    fill="#374151"
                                >
                                    {points[i].label.clone()}
                                </text>
                            }).collect_view()}
                        </g>
                    </svg>
                }
                .into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_span_plot_width() {
        let frame = Frame::default();
        let scale = YScale::new(10.0, frame);
        let points = polyline_points(&[0.0, 5.0, 10.0], &scale, &frame);
        let coords: Vec<&str> = points.split(' ').collect();
        assert_eq!(coords.len(), 3);
        assert_eq!(coords[0], format!("{:.1},{:.1}", frame.left, frame.baseline()));
        assert_eq!(
            coords[2],
            format!("{:.1},{:.1}", frame.width - frame.right, frame.top)
        );
    }

    #[test]
    fn single_point_is_centered() {
        let frame = Frame::default();
        assert_eq!(point_x(0, 1, &frame), frame.left + frame.plot_width() / 2.0);
    }

    #[test]
    fn labels_are_thinned() {
        assert_eq!(label_indices(5, 8), vec![0, 1, 2, 3, 4]);
        let many = label_indices(30, 8);
        assert!(many.len() <= 8);
        assert_eq!(many[0], 0);
        assert!(label_indices(0, 8).is_empty());
    }
}
