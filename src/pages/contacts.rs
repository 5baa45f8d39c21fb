use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::use_app;
use crate::components::compose_modal::ComposeModal;
use crate::components::contact_table::ContactTable;
use crate::components::filter_bar::FilterBar;
use crate::components::modal::Modal;
use crate::components::pagination::PaginationBar;
use crate::components::spinner::Spinner;
use crate::contacts::ListState;

#[component]
pub fn ContactsPage() -> impl IntoView {
    let app = use_app();
    let (compose_open, set_compose_open) = signal(false);

    let awaiting_page = Memo::new(move |_| app.contacts.with(ListState::awaiting_fresh_page));
    let is_empty = Memo::new(move |_| app.contacts.with(|s| s.contacts.is_empty()));
    let selected_count = Memo::new(move |_| app.contacts.with(|s| s.selection.len()));
    let pagination = Memo::new(move |_| app.contacts.with(|s| s.pagination.clone()));
    let delete_open = Memo::new(move |_| app.contacts.with(|s| s.pending_delete.is_some()));
    let deleting = Memo::new(move |_| app.contacts.with(|s| s.deleting));

    Effect::new(move |_| {
        let services = app.services();
        spawn_local(async move {
            services.contacts.load_if_idle().await;
        });
    });
    // Selection does not survive leaving the list
    on_cleanup(move || app.services().contacts.clear_selection());

    let on_page = Callback::new(move |index: u32| {
        let services = app.services();
        spawn_local(async move {
            services.contacts.set_page(index).await;
        });
    });
    let open_compose = Callback::new(move |_| set_compose_open.set(true));
    let close_compose = Callback::new(move |_| set_compose_open.set(false));
    let cancel_delete = Callback::new(move |_| app.services().contacts.cancel_delete());
    let confirm_delete = move |_| {
        let services = app.services();
        spawn_local(async move {
            // Failures are reported through the notifier; the dialog stays open
            let _ = services.contacts.confirm_delete().await;
        });
    };

    view! {
        <div class="page">
            <div class="page-header">
                <div>
                    <h2>"HR Contacts"</h2>
                    <p class="page-description">"Manage your outreach contacts"</p>
                </div>
                <div class="header-actions">
                    <Show when=move || { selected_count.get() > 0 }>
                        <button class="btn btn-success" on:click=move |_| open_compose.run(())>
                            {move || format!("Send Email ({})", selected_count.get())}
                        </button>
                    </Show>
                    <a href="/hr-management/add" class="btn btn-primary">"+ Add Contact"</a>
                </div>
            </div>

            <FilterBar />

            <Show when=move || !awaiting_page.get() fallback=|| view! { <Spinner /> }>
                <Show
                    when=move || !is_empty.get()
                    fallback=|| view! {
                        <div class="card empty-state">
                            <h3>"No HR contacts found"</h3>
                            <p>"Add your first HR contact to start outreach"</p>
                            <a href="/hr-management/add" class="btn btn-primary">"+ Add Contact"</a>
                        </div>
                    }
                >
                    <div class="card table-card">
                        <ContactTable on_compose=open_compose />
                        <PaginationBar pagination=pagination on_page=on_page />
                    </div>
                </Show>
            </Show>

            <ComposeModal open=compose_open on_close=close_compose />

            <Modal open=delete_open title="Delete Contact" on_close=cancel_delete>
                <p class="modal-text">
                    "Are you sure you want to delete this HR contact? This action cannot be undone."
                </p>
                <div class="modal-actions">
                    <button class="btn btn-ghost" on:click=move |_| cancel_delete.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn-danger" disabled=move || deleting.get() on:click=confirm_delete>
                        {move || if deleting.get() { "Deleting..." } else { "Delete" }}
                    </button>
                </div>
            </Modal>
        </div>
    }
}
