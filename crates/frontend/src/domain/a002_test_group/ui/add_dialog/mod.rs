//! Two-step dialog for creating a test group: name and product picker, then
//! a review of the selection.

pub mod model;

use self::model::{build_group, can_continue, AddGroupErrors};
use crate::domain::a001_product::api::fetch_products;
use crate::domain::a001_product::ui::columns::product_columns;
use crate::shared::components::warning_box::WarningBox;
use crate::shared::data_table::{DataTable, SortState};
use crate::shared::format::format_currency;
use crate::shared::modal::Modal;
use crate::shared::request_guard::RequestGuard;
use crate::shared::wizard::{WizardStep, WizardSteps};
use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a002_test_group::aggregate::NewTestGroup;
use leptos::prelude::*;
use std::sync::Arc;
use thaw::{Table, TableBody, TableCell, TableHeader, TableHeaderCell, TableRow};

#[component]
pub fn AddGroupDialog(
    /// Receives the assembled group; the caller performs the write
    on_submit: Callback<NewTestGroup>,
    on_close: Callback<()>,
) -> impl IntoView {
    let step = RwSignal::new(WizardStep::Details);
    let name = RwSignal::new(String::new());
    let selected = RwSignal::new(Vec::<Product>::new());
    let errors = RwSignal::new(AddGroupErrors::default());

    let (products, set_products) = signal(Vec::<Product>::new());
    let (loading, set_loading) = signal(true);
    let (load_error, set_load_error) = signal::<Option<String>>(None);

    let ticket = RequestGuard::for_component().begin();
    wasm_bindgen_futures::spawn_local(async move {
        let result = fetch_products().await;
        ticket.apply("add group products", || {
            match result {
                Ok(rows) => set_products.set(rows),
                Err(e) => set_load_error.set(Some(e.to_string())),
            }
            set_loading.set(false);
        });
    });

    let has_selection = Signal::derive(move || selected.with(|s| can_continue(s)));

    let on_next = move |_| {
        match build_group(&name.get_untracked(), &selected.get_untracked()) {
            Ok(_) => {
                errors.set(AddGroupErrors::default());
                step.update(|s| *s = s.next());
            }
            Err(e) => errors.set(e),
        }
    };

    let on_create = move |_| {
        match build_group(&name.get_untracked(), &selected.get_untracked()) {
            Ok(dto) => {
                log::info!("submitting group {:?} with {} products", dto.name, dto.product_ids.len());
                on_submit.run(dto);
                on_close.run(());
            }
            Err(e) => {
                errors.set(e);
                step.set(WizardStep::Details);
            }
        }
    };

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
                        disabled=move || !has_selection.get()
                        on:click=on_create
                    >
                        "Create group"
                    </button>
                }
            >
                <button
                    class="button button--primary"
                    disabled=move || !has_selection.get()
                    on:click=on_next
                >
                    "Next"
                </button>
            </Show>
        }
        .into_any()
    });

    view! {
        <Modal title="Add test group".to_string() on_close=on_close footer=footer class="modal--wide">
            <WizardSteps current=step />

            // kept mounted on Review so Back finds the table selection intact
            <div class="wizard__panel" hidden=move || step.get() != WizardStep::Details>
                <div class="form-group">
                    <label for="group-name">"Group name"</label>
                    <input
                        id="group-name"
                        type="text"
                        class="form__input"
                        placeholder="e.g. Kitchen bestsellers"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                    {move || errors.with(|e| e.name.clone()).map(|msg| view! {
                        <span class="form__error">{msg}</span>
                    })}
                </div>

                <WarningBox message=load_error />

                <DataTable
                    rows=products
                    columns=product_columns()
                    enable_selection=true
                    on_selection_change=Callback::new(move |rows: Vec<Product>| selected.set(rows))
                    initial_sort=SortState::ascending("name")
                    search_placeholder="Search products..."
                    loading=loading
                />
                {move || errors.with(|e| e.products.clone()).map(|msg| view! {
                    <span class="form__error">{msg}</span>
                })}
            </div>

            <Show when=move || step.get() == WizardStep::Review>
                <div class="wizard__panel">
                    <dl class="review-summary">
                        <dt>"Group name"</dt>
                        <dd>{move || name.get().trim().to_string()}</dd>
                        <dt>"Products"</dt>
                        <dd>{move || selected.with(|s| s.len())}</dd>
                    </dl>
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"SKU"</TableHeaderCell>
                                <TableHeaderCell>"ASIN"</TableHeaderCell>
                                <TableHeaderCell>"Name"</TableHeaderCell>
                                <TableHeaderCell class="data-table__cell--right">"Price"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || selected.get()
                                key=|p| p.id
                                children=|p: Product| view! {
                                    <TableRow>
                                        <TableCell>{p.sku}</TableCell>
                                        <TableCell>{p.asin}</TableCell>
                                        <TableCell>{p.name}</TableCell>
                                        <TableCell class="data-table__cell--right">
                                            {format_currency(p.price)}
                                        </TableCell>
                                    </TableRow>
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
            </Show>
        </Modal>
    }
}
