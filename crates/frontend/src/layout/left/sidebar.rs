//! Navigation sidebar with the static route list

use crate::shared::icons::icon;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

pub const NAV_ITEMS: [NavItem; 4] = [
    NavItem {
        path: "/",
        label: "Dashboard",
        icon: "dashboard",
    },
    NavItem {
        path: "/products",
        label: "Products",
        icon: "products",
    },
    NavItem {
        path: "/test-groups",
        label: "Test Groups",
        icon: "test-groups",
    },
    NavItem {
        path: "/price-tests",
        label: "Price Tests",
        icon: "price-tests",
    },
];

/// `/` only matches itself; other items also match their sub-paths
pub fn is_active(current: &str, item_path: &str) -> bool {
    if item_path == "/" {
        return current == "/";
    }
    current == item_path
        || current
            .strip_prefix(item_path)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let pathname = use_location().pathname;

    view! {
        <nav class="app-sidebar__content" aria-label="Main">
            {NAV_ITEMS
                .into_iter()
                .map(|item| {
                    let active = move || pathname.with(|path| is_active(path, item.path));
                    view! {
                        <A href=item.path>
                            <div
                                class="app-sidebar__item"
                                class:app-sidebar__item--active=active
                            >
                                <div class="app-sidebar__item-content">
                                    {icon(item.icon)}
                                    <span>{item.label}</span>
                                </div>
                            </div>
                        </A>
                    }
                })
                .collect_view()}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_matches_exactly() {
        assert!(is_active("/", "/"));
        assert!(!is_active("/products", "/"));
    }

    #[test]
    fn other_items_match_by_prefix() {
        assert!(is_active("/test-groups", "/test-groups"));
        assert!(is_active("/test-groups/12", "/test-groups"));
        assert!(!is_active("/test-groups-archive", "/test-groups"));
        assert!(!is_active("/price-tests", "/test-groups"));
    }

    #[test]
    fn nav_paths_are_unique() {
        let mut paths: Vec<_> = NAV_ITEMS.iter().map(|i| i.path).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), NAV_ITEMS.len());
    }
}
