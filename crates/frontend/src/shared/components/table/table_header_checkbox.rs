//! Select-all checkbox for the header row of a table.
//!
//! Tri-state: checked when every visible row is selected, indeterminate when
//! only some are.

use crate::shared::data_table::PageSelection;
use leptos::prelude::*;
use thaw::TableHeaderCell;
use wasm_bindgen::JsCast;

#[component]
pub fn TableHeaderCheckbox(
    /// Selection state of the rows on the visible page
    #[prop(into)]
    state: Signal<PageSelection>,

    /// true = select the page, false = clear it
    on_change: Callback<bool>,

    /// Set while the page has no rows
    #[prop(into)]
    disabled: Signal<bool>,
) -> impl IntoView {
    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    // indeterminate is only reachable as a DOM property
    Effect::new(move |_| {
        let indeterminate = state.get() == PageSelection::Some;
        if let Some(input) = checkbox_ref.get() {
            if let Some(input_el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                input_el.set_indeterminate(indeterminate);
            }
        }
    });

    view! {
        <TableHeaderCell resizable=false class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                aria-label="Select all rows on this page"
                prop:checked=move || state.get() == PageSelection::All
                prop:disabled=move || disabled.get()
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableHeaderCell>
    }
}
