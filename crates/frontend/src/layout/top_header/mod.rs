//! Application top bar: sidebar toggle, title, signed-in user and sign-out.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use crate::system::auth::lifecycle::sign_out;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let auth_state = use_auth();

    let email = move || {
        auth_state.with(|state| state.user().map(|u| u.email.clone()).unwrap_or_default())
    };

    view! {
        <header class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if ctx.left_open.get() { "Hide navigation" } else { "Show navigation" }
                >
                    {icon("dashboard")}
                </button>
                <span class="top-header__title">"Price Tests"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    <span>{email}</span>
                </div>
                <button class="top-header__icon-btn" on:click=move |_| sign_out() title="Sign out">
                    {icon("log-out")}
                    <span>"Sign out"</span>
                </button>
            </div>
        </header>
    }
}
