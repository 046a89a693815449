use crate::shared::class_names::cn;
use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;

/// Dialog shell: overlay, title bar, body and an optional footer.
///
/// Escape and a click on the overlay both close the dialog. The keydown
/// listener is removed when the dialog unmounts.
#[component]
pub fn Modal(
    /// Title of the dialog
    #[prop(into)]
    title: Signal<String>,
    /// Called when the dialog should close
    on_close: Callback<()>,
    /// Footer with the dialog actions
    #[prop(optional)]
    footer: Option<ChildrenFn>,
    /// Extra class on the dialog box, e.g. `modal--wide`
    #[prop(optional, into)]
    class: Option<String>,
    children: Children,
) -> impl IntoView {
    let listener = Closure::wrap(Box::new(move |event: web_sys::Event| {
        if let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() {
            if keyboard_event.key() == "Escape" {
                on_close.run(());
            }
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(window) = web_sys::window() {
        let _ = window.add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref());
    }
    let listener = StoredValue::new_local(listener);
    on_cleanup(move || {
        if let Some(window) = web_sys::window() {
            listener.with_value(|l| {
                let _ = window
                    .remove_event_listener_with_callback("keydown", l.as_ref().unchecked_ref());
            });
        }
    });

    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    let modal_class = cn(["modal", class.as_deref().unwrap_or_default()]);

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class=modal_class role="dialog" aria-modal="true" on:click=stop_propagation>
                <div class="modal-header">
                    <h2 class="modal-title">{move || title.get()}</h2>
                    <button
                        class="button button--icon modal__close"
                        aria-label="Close"
                        on:click=move |_| on_close.run(())
                    >
                        {icon("x")}
                    </button>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
                {footer.map(|footer| view! {
                    <div class="modal-footer">{footer()}</div>
                })}
            </div>
        </div>
    }
}
