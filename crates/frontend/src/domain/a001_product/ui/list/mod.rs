use crate::domain::a001_product::api::fetch_products;
use crate::domain::a001_product::ui::columns::product_columns;
use crate::shared::components::warning_box::WarningBox;
use crate::shared::data_table::{DataTable, SortState};
use crate::shared::icons::icon;
use crate::shared::request_guard::RequestGuard;
use contracts::domain::a001_product::aggregate::Product;
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn ProductList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<Product>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let guard = StoredValue::new(RequestGuard::for_component());

    let fetch = move || {
        let ticket = guard.with_value(|g| g.begin());
        set_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_products().await;
            ticket.apply("products", || {
                match result {
                    Ok(products) => {
                        log::info!("loaded {} products", products.len());
                        set_items.set(products);
                        set_error.set(None);
                    }
                    Err(e) => {
                        log::error!("failed to load products: {}", e);
                        set_error.set(Some(e.to_string()));
                    }
                }
                set_loading.set(false);
            });
        });
    };

    fetch();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"Products"</h1>
                    <span class="header__subtitle">
                        {move || format!("{} products", items.with(|v| v.len()))}
                    </span>
                </div>
                <div class="header__actions">
                    <button class="button button--secondary" on:click=move |_| fetch()>
                        {icon("refresh")}
                        "Refresh"
                    </button>
                </div>
            </div>

            <WarningBox message=error />

            <DataTable
                rows=items
                columns=product_columns()
                initial_sort=SortState::ascending("name")
                search_placeholder="Search SKU, ASIN or name..."
                loading=loading
            />
        </div>
    }
}
