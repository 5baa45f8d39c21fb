use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};
use tracing::warn;
use wasm_bindgen_futures::spawn_local;

use crate::api::types::ContactId;
use crate::app::use_app;
use crate::components::field_error::FieldError;
use crate::components::spinner::{ButtonSpinner, Spinner};
use crate::contacts::{ContactDraft, DraftField, FormError};
use crate::validate::FieldErrors;

const LIST_PATH: &str = "/hr-management";

/// Add form at /hr-management/add, edit form at /hr-management/edit/:id.
#[component]
pub fn ContactFormPage() -> impl IntoView {
    let app = use_app();
    // Local storage keeps the views that capture it Send
    let navigate = StoredValue::new_local(use_navigate());
    let params = use_params_map();

    let raw_id = params.with_untracked(|p| p.get("id"));
    let edit_id: Option<ContactId> = raw_id.as_deref().and_then(|raw| raw.parse().ok());
    let is_edit = raw_id.is_some();

    let draft = RwSignal::new(ContactDraft::default());
    let errors = RwSignal::new(FieldErrors::default());
    let (is_loading, set_is_loading) = signal(is_edit);
    let saving = Memo::new(move |_| app.contacts.with(|s| s.saving));

    Effect::new(move |_| {
        if !is_edit {
            return;
        }
        let navigate = navigate.get_value();
        let Some(id) = edit_id else {
            warn!("Ignoring malformed contact id {:?}", raw_id);
            navigate(LIST_PATH, Default::default());
            return;
        };
        let services = app.services();
        spawn_local(async move {
            match services.contacts.load_contact(id).await {
                Ok(contact) => {
                    draft.set(ContactDraft::from_contact(&contact));
                    set_is_loading.set(false);
                }
                Err(_) => navigate(LIST_PATH, Default::default()),
            }
        });
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let services = app.services();
        let navigate = navigate.get_value();
        let current = draft.get_untracked();
        spawn_local(async move {
            let result = match edit_id {
                Some(id) => services.contacts.update_contact(id, &current).await,
                None => services.contacts.create_contact(&current).await,
            };
            match result {
                Ok(_) => navigate(LIST_PATH, Default::default()),
                Err(FormError::Invalid(invalid)) => errors.set(invalid),
                // Notified already; the form keeps what the user typed
                Err(_) => {}
            }
        });
    };

    let (title, description, submit_label, busy_label) = if is_edit {
        (
            "Edit HR Contact",
            "Update the contact details below",
            "Update Contact",
            "Updating...",
        )
    } else {
        (
            "Add New HR Contact",
            "Fill in the HR contact details to add to your outreach list",
            "Add Contact",
            "Adding...",
        )
    };

    view! {
        <Show when=move || !is_loading.get() fallback=|| view! { <Spinner /> }>
            <div class="page page-narrow">
                <a href=LIST_PATH class="back-link">"\u{2190} Back to HR Contacts"</a>
                <h2>{title}</h2>
                <p class="page-description">{description}</p>

                <form class="card contact-form" on:submit=on_submit>
                    <div class="form-grid">
                        <DraftInput draft=draft errors=errors field=DraftField::HrName label="HR Name" placeholder="Jane Smith" required=true />
                        <DraftInput draft=draft errors=errors field=DraftField::Email label="Email" input_type="email" placeholder="jane@company.com" required=true />
                        <DraftInput draft=draft errors=errors field=DraftField::MobileNumber label="Mobile Number" input_type="tel" placeholder="+91 9876543210" />
                        <DraftInput draft=draft errors=errors field=DraftField::CompanyName label="Company Name" placeholder="Google" required=true />
                    </div>
                    <DraftInput draft=draft errors=errors field=DraftField::JobRole label="Job Role Hiring For" placeholder="Senior Software Engineer" />
                    <div class="form-group">
                        <label>"Notes"</label>
                        <textarea
                            rows="4"
                            placeholder="Any additional notes..."
                            prop:value=move || draft.with(|d| d.notes.clone())
                            on:input=move |ev| draft.update(|d| d.notes = event_target_value(&ev))
                        ></textarea>
                    </div>

                    <div class="form-actions">
                        <a href=LIST_PATH class="btn btn-ghost">"Cancel"</a>
                        <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                            <Show when=move || saving.get() fallback=move || submit_label>
                                <ButtonSpinner />
                                {busy_label}
                            </Show>
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}

/// One labelled text input bound to a draft field. Editing clears that
/// field's error.
#[component]
fn DraftInput(
    draft: RwSignal<ContactDraft>,
    errors: RwSignal<FieldErrors>,
    field: DraftField,
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    let on_input = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        draft.update(|d| *d.get_mut(field) = value);
        errors.update(|e| e.clear(field.key()));
    };

    view! {
        <div class="form-group">
            <label>
                {label}
                {required.then(|| view! { <span class="required">" *"</span> })}
            </label>
            <input
                type=input_type
                placeholder=placeholder
                prop:value=move || draft.with(|d| d.get(field).to_string())
                on:input=on_input
            />
            <FieldError errors=errors field=field.key() />
        </div>
    }
}
