use super::asin_table::asin_columns;
use crate::dashboards::d400_price_test_dashboard::api::load_group_dashboard;
use crate::dashboards::d400_price_test_dashboard::sample::sample_dashboard;
use crate::dashboards::d400_price_test_dashboard::view_model::{
    bar_groups, daily_points, DashboardState, DataSource, Metric, SAMPLE_SOURCE,
};
use crate::domain::a002_test_group::api::fetch_test_groups;
use crate::shared::charts::{BarChart, LineChart};
use crate::shared::components::stat_card::StatCard;
use crate::shared::components::warning_box::WarningBox;
use crate::shared::data_table::{DataTable, SortState};
use crate::shared::date_utils::format_date_range;
use crate::shared::request_guard::RequestGuard;
use contracts::dashboards::d400_price_test_results::DashboardMetrics;
use contracts::domain::a002_test_group::aggregate::TestGroup;
use leptos::prelude::*;
use thaw::{Flex, FlexGap, Spinner};

/// Metric cards of one comparison period
fn period_cards(metrics: DashboardMetrics) -> impl IntoView {
    let range = format_date_range(&metrics.period.start_date, &metrics.period.end_date);
    view! {
        <section class="dashboard__period">
            <div class="dashboard__period-header">
                <h3>{metrics.period.label.clone()}</h3>
                <span class="dashboard__period-kind">{metrics.period.kind.label()}</span>
                <span class="dashboard__period-range">{range}</span>
            </div>
            <div class="stat-cards">
                {Metric::ALL
                    .into_iter()
                    .map(|metric| {
                        view! {
                            <StatCard
                                label=metric.label()
                                icon_name=metric.icon()
                                value=Some(metric.of(&metrics))
                                format=metric.format()
                            />
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
pub fn PriceTestDashboard() -> impl IntoView {
    let source = RwSignal::new(DataSource::Sample);
    let state = RwSignal::new(DashboardState::new(sample_dashboard()));
    let bar_metric = RwSignal::new(Metric::Sales);

    let (groups, set_groups) = signal(Vec::<TestGroup>::new());
    let (loading, set_loading) = signal(false);
    let guard = StoredValue::new(RequestGuard::for_component());

    let groups_ticket = RequestGuard::for_component().begin();
    wasm_bindgen_futures::spawn_local(async move {
        let result = fetch_test_groups().await;
        groups_ticket.apply("dashboard groups", || match result {
            Ok(rows) => set_groups.set(rows),
            Err(e) => {
                log::warn!("test groups unavailable, only the sample can be shown: {}", e);
                state.update(|s| s.error = Some(e.to_string()));
            }
        });
    });

    Effect::new(move |_| {
        let ticket = guard.with_value(|g| g.begin());
        match source.get() {
            DataSource::Sample => {
                ticket.apply("dashboard sample", || {
                    state.update(|s| s.settle(Ok::<_, String>(sample_dashboard())));
                    set_loading.set(false);
                });
            }
            DataSource::Group(group_id) => {
                set_loading.set(true);
                wasm_bindgen_futures::spawn_local(async move {
                    let result = load_group_dashboard(group_id).await;
                    ticket.apply("dashboard group", || {
                        if let Err(e) = &result {
                            log::error!("failed to load dashboard for group {}: {}", group_id, e);
                        }
                        state.update(|s| s.settle(result));
                        set_loading.set(false);
                    });
                });
            }
        }
    });

    let visible = Memo::new(move |_| state.with(|s| s.visible_periods()));
    let bars = Signal::derive(move || visible.with(|v| bar_groups(v, bar_metric.get())));
    let points = Signal::derive(move || state.with(|s| daily_points(&s.data.daily)));
    let asin_rows = Signal::derive(move || state.with(|s| s.data.asins.clone()));
    let error = Signal::derive(move || state.with(|s| s.error.clone()));
    let period_labels = Memo::new(move |_| {
        state.with(|s| {
            s.data
                .summary
                .periods
                .iter()
                .map(|m| m.period.label.clone())
                .collect::<Vec<_>>()
        })
    });

    let test_caption = move || state.with(|s| s.caption());

    view! {
        <div class="page dashboard">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"Price Test Results"</h1>
                    <span class="header__subtitle">{test_caption}</span>
                </div>
                <div class="header__actions">
                    <label class="form__inline-label" for="dashboard-source">"Data"</label>
                    <select
                        id="dashboard-source"
                        class="form__select"
                        prop:value=move || source.get().to_value()
                        on:change=move |ev| {
                            match DataSource::parse(&event_target_value(&ev)) {
                                Some(next) => source.set(next),
                                None => log::warn!("unknown dashboard source"),
                            }
                        }
                    >
                        <option value=SAMPLE_SOURCE>"Sample data"</option>
                        <For
                            each=move || groups.get()
                            key=|g| g.id
                            children=|g: TestGroup| view! {
                                <option value=g.id.to_string()>{g.name}</option>
                            }
                        />
                    </select>
                </div>
            </div>

            <WarningBox message=error />

            <div class="dashboard__toggles">
                <span class="dashboard__toggles-label">"Periods"</span>
                <For
                    each=move || period_labels.get()
                    key=|label| label.clone()
                    children=move |label: String| {
                        let checked_label = label.clone();
                        let toggle_label = label.clone();
                        view! {
                            <label class="form__checkbox">
                                <input
                                    type="checkbox"
                                    prop:checked=move || state.with(|s| s.toggles.is_enabled(&checked_label))
                                    on:change=move |_| state.update(|s| s.toggles.toggle(&toggle_label))
                                />
                                {label}
                            </label>
                        }
                    }
                />
            </div>

            <Show
                when=move || !loading.get()
                fallback=|| view! {
                    <Flex gap=FlexGap::Small style="align-items: center; justify-content: center; padding: var(--spacing-xl);">
                        <Spinner />
                        <span>"Loading results..."</span>
                    </Flex>
                }
            >
                <div class="dashboard__periods">
                    {move || {
                        let periods = visible.get();
                        if periods.is_empty() {
                            view! { <div class="dashboard__empty">"No periods selected."</div> }.into_any()
                        } else {
                            periods.into_iter().map(period_cards).collect_view().into_any()
                        }
                    }}
                </div>

                <div class="dashboard__charts">
                    <div class="dashboard__chart">
                        <div class="dashboard__chart-controls">
                            <select
                                class="form__select"
                                prop:value=move || bar_metric.get().key()
                                on:change=move |ev| {
                                    if let Some(metric) = Metric::from_key(&event_target_value(&ev)) {
                                        bar_metric.set(metric);
                                    }
                                }
                            >
                                {Metric::ALL
                                    .into_iter()
                                    .map(|m| view! { <option value=m.key()>{m.label()}</option> })
                                    .collect_view()}
                            </select>
                        </div>
                        <BarChart groups=bars title="Test vs control by period" />
                    </div>
                    <div class="dashboard__chart">
                        <LineChart points=points title="Daily sales" />
                    </div>
                </div>

                <section class="dashboard__report">
                    <h3>"Sales by ASIN"</h3>
                    <DataTable
                        rows=asin_rows
                        columns=asin_columns()
                        initial_sort=SortState::descending("sales")
                        search_placeholder="Search ASIN or product..."
                    />
                </section>
            </Show>
        </div>
    }
}
