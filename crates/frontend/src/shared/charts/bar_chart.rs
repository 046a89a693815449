use super::scale::{Frame, YScale};
use super::{CONTROL_COLOR, TEST_COLOR};
use crate::shared::format::format_compact;
use leptos::prelude::*;

/// One category on the x axis with its test and control bars
#[derive(Clone, Debug, PartialEq)]
pub struct BarGroup {
    pub label: String,
    pub test: f64,
    pub control: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Series {
    Test,
    Control,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub series: Series,
    pub value: f64,
}

/// Center of each group's slot, used for the x labels
pub fn group_centers(count: usize, frame: &Frame) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    let slot = frame.plot_width() / count as f64;
    (0..count)
        .map(|i| frame.left + slot * (i as f64 + 0.5))
        .collect()
}

/// Two bars per group, side by side, filling 70% of the group's slot
pub fn layout_bars(groups: &[BarGroup], frame: &Frame) -> (Vec<BarRect>, YScale) {
    let data_max = groups
        .iter()
        .flat_map(|g| [g.test, g.control])
        .fold(0.0_f64, f64::max);
    let scale = YScale::new(data_max, *frame);
    if groups.is_empty() {
        return (Vec::new(), scale);
    }

    let slot = frame.plot_width() / groups.len() as f64;
    let bar_width = slot * 0.35;
    let rects = groups
        .iter()
        .zip(group_centers(groups.len(), frame))
        .flat_map(|(group, center)| {
            [(Series::Test, group.test, center - bar_width), (Series::Control, group.control, center)]
                .into_iter()
                .map(move |(series, value, x)| BarRect {
                    x,
                    y: scale.y(value),
                    width: bar_width,
                    height: scale.height(value),
                    series,
                    value,
                })
        })
        .collect();
    (rects, scale)
}

#[component]
pub fn BarChart(
    #[prop(into)]
    groups: Signal<Vec<BarGroup>>,
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
                let groups = groups.get();
                if groups.is_empty() {
                    return view! { <div class="chart__empty">"No data for the selected periods."</div> }.into_any();
                }
                let (rects, scale) = layout_bars(&groups, &frame);
                let centers = group_centers(groups.len(), &frame);
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
                        <g class="chart__bars">
                            {rects.into_iter().map(|rect| {
                                let fill = match rect.series {
                                    Series::Test => TEST_COLOR,
                                    Series::Control => CONTROL_COLOR,
                                };
                                view! {
                                    <rect
                                        x=rect.x
                                        y=rect.y
                                        width=rect.width
                                        height=rect.height
                                        fill=fill
                                        rx="2"
                                        data-value=format_compact(rect.value)
                                    />
                                }
                            }).collect_view()}
                        </g>
                        <g class="chart__labels">
                            {groups.into_iter().zip(centers).map(|(group, x)| view! {
                                <text x=x y=frame.height - 16.0 text-anchor="middle" font-size="11" fill="#374151">
                                    {group.label}
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

    fn group(label: &str, test: f64, control: f64) -> BarGroup {
        BarGroup {
            label: label.to_string(),
            test,
            control,
        }
    }

    #[test]
    fn two_bars_per_group_inside_plot() {
        let frame = Frame::default();
        let (rects, scale) = layout_bars(&[group("Units", 120.0, 100.0), group("Sales", 40.0, 60.0)], &frame);
        assert_eq!(rects.len(), 4);
        assert_eq!(scale.max, 200.0);
        for rect in &rects {
            assert!(rect.x >= frame.left);
            assert!(rect.x + rect.width <= frame.width - frame.right + 1e-9);
            assert!((rect.y + rect.height - frame.baseline()).abs() < 1e-9);
        }
        assert_eq!(rects[0].series, Series::Test);
        assert_eq!(rects[1].series, Series::Control);
        assert!(rects[0].height > rects[1].height);
    }

    #[test]
    fn empty_groups_have_no_bars() {
        let (rects, scale) = layout_bars(&[], &Frame::default());
        assert!(rects.is_empty());
        assert_eq!(scale.max, 1.0);
        assert!(group_centers(0, &Frame::default()).is_empty());
    }
}
