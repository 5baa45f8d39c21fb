use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::use_app;
use crate::components::modal::Modal;
use crate::components::spinner::ButtonSpinner;

fn compose_title(recipients: usize) -> String {
    let plural = if recipients == 1 { "" } else { "s" };
    format!("Send Email to {} contact{}", recipients, plural)
}

/// Subject/body editor for a bulk send to the current selection. The draft is
/// kept when a send fails and cleared when the dialog closes or a send succeeds.
#[component]
pub fn ComposeModal(
    #[prop(into)] open: Signal<bool>,
    on_close: Callback<()>,
) -> impl IntoView {
    let app = use_app();
    let (subject, set_subject) = signal(String::new());
    let (body, set_body) = signal(String::new());
    let recipients = Memo::new(move |_| app.contacts.with(|s| s.selection.len()));
    let sending = Memo::new(move |_| app.contacts.with(|s| s.sending));
    let title = Signal::derive(move || compose_title(recipients.get()));

    let close = Callback::new(move |_| {
        set_subject.set(String::new());
        set_body.set(String::new());
        on_close.run(());
    });

    let on_send = move |_| {
        let services = app.services();
        let ids = app.contacts.with_untracked(|s| s.selection.ids());
        let subject = subject.get_untracked();
        let body = body.get_untracked();
        spawn_local(async move {
            if services.contacts.send_emails(ids, &subject, &body).await.is_ok() {
                close.run(());
            }
        });
    };

    view! {
        <Modal open=open title=title on_close=close class="modal-wide">
            <div class="form-stack">
                <div class="form-group">
                    <label>"Subject"</label>
                    <input
                        type="text"
                        placeholder="Application for Software Engineer position"
                        prop:value=move || subject.get()
                        on:input=move |ev| set_subject.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label>"Body"</label>
                    <textarea
                        rows="6"
                        placeholder="Dear HR Manager,\n\nI am writing to express my interest in..."
                        prop:value=move || body.get()
                        on:input=move |ev| set_body.set(event_target_value(&ev))
                    ></textarea>
                </div>
                <p class="hint">"\u{1f4ce} Your resume will be automatically attached to the email."</p>
                <div class="modal-actions">
                    <button class="btn btn-ghost" on:click=move |_| close.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn-success" disabled=move || sending.get() on:click=on_send>
                        <Show when=move || sending.get() fallback=|| "Send">
                            <ButtonSpinner />
                            "Sending..."
                        </Show>
                    </button>
                </div>
            </div>
        </Modal>
    }
}
