//! Product columns shared by the product list, the group details page and
//! the product picker of the Add Group dialog.

use crate::shared::data_table::{Align, CellValue, Column, DataRow, FilterKind};
use crate::shared::format::format_currency;
use crate::shared::icons::icon;
use contracts::domain::a001_product::aggregate::{Product, ProductStatus};
use leptos::prelude::*;
use thaw::{Badge, BadgeAppearance, BadgeColor};

impl DataRow for Product {
    fn row_id(&self) -> String {
        self.id.to_string()
    }
}

pub fn status_badge(status: ProductStatus) -> AnyView {
    let color = match status {
        ProductStatus::Active => BadgeColor::Success,
        ProductStatus::Inactive => BadgeColor::Subtle,
    };
    view! {
        <Badge appearance=BadgeAppearance::Tint color=color>
            {status.label()}
        </Badge>
    }
    .into_any()
}

/// Link to the marketplace listing, opened in a new tab
pub fn asin_link(asin: String, url: String) -> AnyView {
    view! {
        <a class="table__link" href=url target="_blank" rel="noopener noreferrer">
            <span>{asin}</span>
            {icon("external-link")}
        </a>
    }
    .into_any()
}

pub fn product_columns() -> Vec<Column<Product>> {
    vec![
        Column::new("sku", "SKU", |p: &Product| CellValue::from(p.sku.as_str()))
            .filter(FilterKind::Text),
        Column::new("asin", "ASIN", |p: &Product| CellValue::from(p.asin.as_str()))
            .filter(FilterKind::Text)
            .render(|p| asin_link(p.asin.clone(), p.marketplace_url())),
        Column::new("name", "Name", |p: &Product| CellValue::from(p.name.as_str()))
            .filter(FilterKind::Text),
        Column::new("price", "Price", |p: &Product| CellValue::from(p.price))
            .filter(FilterKind::NumberRange)
            .align(Align::Right)
            .searchable(false)
            .render(|p| {
                let text = format_currency(p.price);
                view! { <span>{text}</span> }.into_any()
            }),
        Column::new("status", "Status", |p: &Product| CellValue::from(p.status.label()))
            .filter(FilterKind::MultiSelect {
                options: vec![
                    ProductStatus::Active.label().to_string(),
                    ProductStatus::Inactive.label().to_string(),
                ],
            })
            .render(|p| status_badge(p.status)),
    ]
}
