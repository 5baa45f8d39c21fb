use chrono::NaiveDateTime;
use leptos::prelude::*;

use crate::api::types::HrContact;
use crate::app::use_app;
use crate::components::status_badge::StatusBadge;
use crate::contacts::ListState;

const MISSING: &str = "\u{2014}";

/// "Jan 5, 2024", or a dash when the backend sent no date.
fn format_date(value: Option<NaiveDateTime>) -> String {
    value
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

fn or_missing(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or(MISSING)
        .to_string()
}

/// The current page of contacts with selection checkboxes and row actions.
#[component]
pub fn ContactTable(
    /// Opens the compose dialog after a row's email action selected that row
    on_compose: Callback<()>,
) -> impl IntoView {
    let app = use_app();
    let contacts = Memo::new(move |_| app.contacts.with(|s| s.contacts.clone()));
    let all_selected = Memo::new(move |_| app.contacts.with(ListState::all_selected));

    view! {
        <div class="table-wrap">
            <table class="contact-table">
                <thead>
                    <tr>
                        <th class="col-check">
                            <input
                                type="checkbox"
                                prop:checked=move || all_selected.get()
                                on:change=move |_| app.services().contacts.toggle_select_all()
                            />
                        </th>
                        <th>"HR Name"</th>
                        <th>"Email"</th>
                        <th>"Company"</th>
                        <th>"Job Role"</th>
                        <th>"Status"</th>
                        <th>"Date Added"</th>
                        <th class="col-actions">"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || contacts.get()
                        key=|contact| contact.clone()
                        children=move |contact| view! { <ContactRow contact=contact on_compose=on_compose /> }
                    />
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn ContactRow(contact: HrContact, on_compose: Callback<()>) -> impl IntoView {
    let app = use_app();
    let id = contact.id;
    let selected = move || app.contacts.with(|s| s.selection.contains(id));

    view! {
        <tr class:row-selected=selected>
            <td>
                <input
                    type="checkbox"
                    prop:checked=selected
                    on:change=move |_| app.services().contacts.toggle_select(id)
                />
            </td>
            <td class="cell-name">{contact.hr_name}</td>
            <td class="cell-muted">{contact.email}</td>
            <td>{contact.company_name}</td>
            <td class="cell-muted">{or_missing(&contact.job_role)}</td>
            <td>
                <StatusBadge status=contact.email_status />
            </td>
            <td class="cell-muted">{format_date(contact.date_added)}</td>
            <td class="col-actions">
                <button
                    class="icon-btn"
                    title="Send email"
                    on:click=move |_| {
                        app.services().contacts.select_only(id);
                        on_compose.run(());
                    }
                >
                    "\u{2709}"
                </button>
                <a href=format!("/hr-management/edit/{}", id) class="icon-btn" title="Edit">
                    "\u{270e}"
                </a>
                <button
                    class="icon-btn icon-btn-danger"
                    title="Delete"
                    on:click=move |_| app.services().contacts.request_delete(id)
                >
                    "\u{1f5d1}"
                </button>
            </td>
        </tr>
    }
}
