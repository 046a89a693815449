use crate::dashboards::d400_price_test_dashboard::ui::PriceTestDashboard;
use crate::domain::a001_product::ui::list::ProductList;
use crate::domain::a002_test_group::ui::details::TestGroupDetails;
use crate::domain::a002_test_group::ui::list::TestGroupList;
use crate::domain::a003_price_test::ui::list::PriceTestList;
use crate::layout::Shell;
use crate::routes::guard::RouteGuard;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;
use leptos_router::components::{Outlet, ParentRoute, Route, Router, Routes, A};
use leptos_router::path;

#[component]
fn MainLayout() -> impl IntoView {
    view! {
        <Shell>
            <Outlet />
        </Shell>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page page--centered">
            <h1>"Page not found"</h1>
            <A href="/">"Back to the dashboard"</A>
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <RouteGuard />
            <Routes fallback=|| view! { <NotFound /> }>
                <Route path=path!("/login") view=LoginPage />
                <ParentRoute path=path!("") view=MainLayout>
                    <Route path=path!("") view=PriceTestDashboard />
                    <Route path=path!("products") view=ProductList />
                    <Route path=path!("test-groups") view=TestGroupList />
                    <Route path=path!("test-groups/:id") view=TestGroupDetails />
                    <Route path=path!("price-tests") view=PriceTestList />
                </ParentRoute>
            </Routes>
        </Router>
    }
}
