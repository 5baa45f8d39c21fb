use leptos::ev;
use leptos::prelude::*;

/// Centered dialog over a dimmed backdrop. Clicking the backdrop, the close
/// button or pressing Escape calls `on_close`.
#[component]
pub fn Modal(
    /// Whether the dialog is shown
    #[prop(into)]
    open: Signal<bool>,
    /// Heading text
    #[prop(into)]
    title: Signal<String>,
    on_close: Callback<()>,
    /// Extra class on the card, e.g. "modal-wide"
    #[prop(optional, into)]
    class: Option<String>,
    children: ChildrenFn,
) -> impl IntoView {
    let escape = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" && open.get_untracked() {
            on_close.run(());
        }
    });
    on_cleanup(move || escape.remove());

    let card_class = format!("modal-card {}", class.unwrap_or_default());

    view! {
        <Show when=move || open.get()>
            <div class="modal-overlay" on:click=move |_| on_close.run(())>
                <div class=card_class.clone() on:click=|ev| ev.stop_propagation()>
                    <div class="modal-header">
                        <h2 class="modal-title">{move || title.get()}</h2>
                        <button class="modal-close" title="Close" on:click=move |_| on_close.run(())>
                            "\u{2715}"
                        </button>
                    </div>
                    {children()}
                </div>
            </div>
        </Show>
    }
}
