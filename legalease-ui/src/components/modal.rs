//! Modal Component

use leptos::*;

/// Dialog with a title, a body and close/confirm buttons
#[component]
pub fn Modal(
    #[prop(into)]
    title: String,
    #[prop(into)]
    open: Signal<bool>,
    #[prop(into)]
    on_close: Callback<()>,
    #[prop(into)]
    on_confirm: Callback<()>,
    #[prop(default = "Analyze")]
    confirm_label: &'static str,
    children: ChildrenFn,
) -> impl IntoView {
    let title = store_value(title);
    let children = store_value(children);

    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop" on:click=move |_| on_close.call(())>
                <div class="modal" on:click=|ev| ev.stop_propagation()>
                    <div class="modal-header">
                        <h3>{title.get_value()}</h3>
                        <button class="modal-close" on:click=move |_| on_close.call(())>"×"</button>
                    </div>
                    <div class="modal-body">{children.with_value(|children| children())}</div>
                    <div class="modal-footer">
                        <button class="btn-secondary" on:click=move |_| on_close.call(())>"Cancel"</button>
                        <button class="btn-primary" on:click=move |_| on_confirm.call(())>
                            {confirm_label}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
