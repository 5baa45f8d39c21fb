use leptos::prelude::*;

use crate::validate::FieldErrors;

/// Inline message under an input; renders nothing while the field is valid.
#[component]
pub fn FieldError(#[prop(into)] errors: Signal<FieldErrors>, field: &'static str) -> impl IntoView {
    move || {
        errors
            .with(|e| e.get(field))
            .map(|message| view! { <p class="field-error">{message}</p> })
    }
}
