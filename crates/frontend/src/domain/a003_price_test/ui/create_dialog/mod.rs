//! Create Test dialog: test details first, then per-product prices for the
//! members of the chosen group.

pub mod model;

use self::model::{build_price_test, ItemLine, TestDetails, TestDetailsErrors, TestDetailsInput};
use crate::domain::a002_test_group::api::{fetch_test_group, fetch_test_groups};
use crate::shared::class_names::{cn, when};
use crate::shared::components::warning_box::WarningBox;
use crate::shared::date_utils::{format_date_range, to_input_value, today, tomorrow};
use crate::shared::format::format_currency;
use crate::shared::modal::Modal;
use crate::shared::request_guard::RequestGuard;
use crate::shared::wizard::{WizardStep, WizardSteps};
use contracts::domain::a002_test_group::aggregate::{TestGroup, TestGroupId};
use contracts::domain::a003_price_test::aggregate::NewPriceTest;
use leptos::prelude::*;
use std::sync::Arc;
use thaw::{Table, TableBody, TableCell, TableHeader, TableHeaderCell, TableRow};

fn field_error(message: Option<String>) -> impl IntoView {
    message.map(|msg| view! { <span class="form__error">{msg}</span> })
}

#[component]
pub fn CreateTestDialog(
    /// Receives the assembled test; the caller performs the write
    on_submit: Callback<NewPriceTest>,
    on_close: Callback<()>,
) -> impl IntoView {
    let step = RwSignal::new(WizardStep::Details);
    let form = RwSignal::new(TestDetailsInput::default());
    let errors = RwSignal::new(TestDetailsErrors::default());
    let details = RwSignal::new(Option::<TestDetails>::None);
    let lines = RwSignal::new(Vec::<ItemLine>::new());
    let loaded_group = RwSignal::new(Option::<TestGroupId>::None);
    let show_price_errors = RwSignal::new(false);

    let (groups, set_groups) = signal(Vec::<TestGroup>::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (review_loading, set_review_loading) = signal(false);
    let guard = StoredValue::new(RequestGuard::for_component());

    let groups_ticket = guard.with_value(|g| g.begin());
    wasm_bindgen_futures::spawn_local(async move {
        let result = fetch_test_groups().await;
        groups_ticket.apply("create test groups", || match result {
            Ok(rows) => set_groups.set(rows),
            Err(e) => set_error.set(Some(e.to_string())),
        });
    });

    // generation counter of the member loads only
    let review_guard = StoredValue::new(RequestGuard::for_component());
    let load_lines = move |group_id: TestGroupId| {
        if loaded_group.get_untracked() == Some(group_id) {
            return;
        }
        let ticket = review_guard.with_value(|g| g.begin());
        set_review_loading.set(true);
        lines.set(Vec::new());
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_test_group(group_id).await;
            ticket.apply("create test group members", || {
                match result {
                    Ok(detail) => {
                        lines.set(detail.products.iter().map(ItemLine::from).collect());
                        loaded_group.set(Some(group_id));
                        set_error.set(None);
                    }
                    Err(e) => {
                        log::error!("failed to load members of group {}: {}", group_id, e);
                        set_error.set(Some(e.to_string()));
                    }
                }
                set_review_loading.set(false);
            });
        });
    };

    let on_next = move |_| match form.with_untracked(|f| f.validate(today())) {
        Ok(valid) => {
            errors.set(TestDetailsErrors::default());
            load_lines(valid.group_id);
            details.set(Some(valid));
            step.update(|s| *s = s.next());
        }
        Err(e) => errors.set(e),
    };

    let can_create = Signal::derive(move || {
        !review_loading.get() && lines.with(|l| !l.is_empty()) && details.with(|d| d.is_some())
    });

    let on_create = move |_| {
        let Some(valid) = details.get_untracked() else {
            return;
        };
        match lines.with_untracked(|l| build_price_test(&valid, l)) {
            Ok(dto) => {
                log::info!("submitting price test {:?} with {} items", dto.name, dto.items.len());
                on_submit.run(dto);
                on_close.run(());
            }
            Err(invalid) => {
                log::debug!("{} test prices are not valid", invalid.len());
                show_price_errors.set(true);
            }
        }
    };

    let earliest = to_input_value(Some(tomorrow(today())));

    let footer = Arc::new(move || {
        view! {
            <button class="button button--secondary" on:click=move |_| on_close.run(())>
                "Cancel"
            </button>
            <Show
                when=move || step.get() == WizardStep::Details
                fallback=move || view! {
                    <button
                        class="button button--secondary"
                        on:click=move |_| step.update(|s| *s = s.back())
                    >
                        "Back"
                    </button>
                    <button
                        class="button button--primary"
                        disabled=move || !can_create.get()
                        on:click=on_create
                    >
                        "Create test"
                    </button>
                }
            >
                <button class="button button--primary" on:click=on_next>
                    "Next"
                </button>
            </Show>
        }
        .into_any()
    });

    let details_panel = move || {
        let earliest = earliest.clone();
        view! {
            <div class="wizard__panel">
                <div class="form-group">
                    <label for="test-name">"Test name"</label>
                    <input
                        id="test-name"
                        type="text"
                        class="form__input"
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                    {move || field_error(errors.with(|e| e.name.clone()))}
                </div>

                <div class="form-group">
                    <label for="test-group">"Test group"</label>
                    <select
                        id="test-group"
                        class="form__select"
                        prop:value=move || form.with(|f| f.group_id.map(|id| id.to_string()).unwrap_or_default())
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.group_id = value.parse::<i64>().ok().map(TestGroupId));
                        }
                    >
                        <option value="">"Select a group"</option>
                        <For
                            each=move || groups.get()
                            key=|g| g.id
                            children=|g: TestGroup| view! {
                                <option value=g.id.to_string()>
                                    {format!("{} ({} products)", g.name, g.item_count)}
                                </option>
                            }
                        />
                    </select>
                    {move || field_error(errors.with(|e| e.group.clone()))}
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="test-start">"Start date"</label>
                        <input
                            id="test-start"
                            type="date"
                            class="form__input"
                            min=earliest.clone()
                            prop:value=move || form.with(|f| f.start_date.clone())
                            on:input=move |ev| form.update(|f| f.start_date = event_target_value(&ev))
                        />
                        {move || field_error(errors.with(|e| e.start_date.clone()))}
                    </div>
                    <div class="form-group">
                        <label for="test-end">"End date"</label>
                        <input
                            id="test-end"
                            type="date"
                            class="form__input"
                            min=earliest
                            prop:value=move || form.with(|f| f.end_date.clone())
                            on:input=move |ev| form.update(|f| f.end_date = event_target_value(&ev))
                        />
                        {move || field_error(errors.with(|e| e.end_date.clone()))}
                    </div>
                </div>

                <label class="form__checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || form.with(|f| f.is_controlled_test)
                        on:change=move |ev| form.update(|f| f.is_controlled_test = event_target_checked(&ev))
                    />
                    "Controlled test"
                </label>
            </div>
        }
    };

    let price_row = move |index: usize| {
        let line = move || lines.with(|l| l.get(index).cloned());
        let invalid = move || {
            show_price_errors.get()
                && lines.with(|l| l.get(index).and_then(|line| line.price_error()).is_some())
        };
        view! {
            <TableRow>
                <TableCell>{move || line().map(|l| l.asin).unwrap_or_default()}</TableCell>
                <TableCell>{move || line().map(|l| l.name).unwrap_or_default()}</TableCell>
                <TableCell class="data-table__cell--right">
                    {move || line().map(|l| format_currency(l.control_price)).unwrap_or_default()}
                </TableCell>
                <TableCell>
                    <input
                        type="number"
                        min="0"
                        step="0.01"
                        class=move || cn(["form__input form__input--compact", when(invalid(), "form__input--invalid")])
                        prop:value=move || line().map(|l| l.test_price).unwrap_or_default()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            lines.update(|l| {
                                if let Some(line) = l.get_mut(index) {
                                    line.test_price = value;
                                }
                            });
                        }
                    />
                    <Show when=invalid>
                        <span class="form__error">{model::PRICE_ERROR}</span>
                    </Show>
                </TableCell>
                <TableCell class="data-table__cell--right">
                    {move || line().map(|l| l.change_label()).unwrap_or_default()}
                </TableCell>
            </TableRow>
        }
    };

    let review_panel = move || {
        view! {
            <div class="wizard__panel">
                <dl class="review-summary">
                    <dt>"Test name"</dt>
                    <dd>{move || details.with(|d| d.as_ref().map(|d| d.name.clone()))}</dd>
                    <dt>"Period"</dt>
                    <dd>
                        {move || details.with(|d| d.as_ref().map(|d| format_date_range(&d.start_date, &d.end_date)))}
                    </dd>
                </dl>
                <Show
                    when=move || !review_loading.get()
                    fallback=|| view! { <div class="data-table__empty">"Loading..."</div> }
                >
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"ASIN"</TableHeaderCell>
                                <TableHeaderCell>"Name"</TableHeaderCell>
                                <TableHeaderCell class="data-table__cell--right">"Control price"</TableHeaderCell>
                                <TableHeaderCell>"Test price"</TableHeaderCell>
                                <TableHeaderCell class="data-table__cell--right">"Change"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <Show when=move || lines.with(|l| l.is_empty())>
                                <TableRow>
                                    <TableCell attr:colspan="5" class="data-table__empty">
                                        "The selected group has no products."
                                    </TableCell>
                                </TableRow>
                            </Show>
                            <For
                                each=move || 0..lines.with(|l| l.len())
                                key=|index| *index
                                children=price_row
                            />
                        </TableBody>
                    </Table>
                </Show>
            </div>
        }
    };

    view! {
        <Modal title="Create price test".to_string() on_close=on_close footer=footer class="modal--wide">
            <WizardSteps current=step />
            <WarningBox message=error />
            <Show when=move || step.get() == WizardStep::Details fallback=review_panel>
                {details_panel.clone()}
            </Show>
        </Modal>
    }
}
