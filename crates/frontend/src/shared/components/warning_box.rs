use leptos::prelude::*;

/// Inline error banner used by pages and dialogs
#[component]
pub fn WarningBox(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message.get().map(|text| {
            view! {
                <div class="warning-box warning-box--error" role="alert">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{text}</span>
                </div>
            }
        })
    }
}
